use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;

use crate::flatten::{flatten, FlatField};
use crate::indicators::{simple_moving_average, LONG_WINDOW, SHORT_WINDOW};
use crate::{date_from_millis, ValidationError};

/// Identity fields returned by the ticker-details lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub ticker: String,
    pub name: Option<String>,
    pub market_cap: Option<u64>,
    pub homepage_url: Option<String>,
}

/// OHLCV summary for one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBar {
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Start of the bucket, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl AggregateBar {
    pub fn date(&self) -> Result<Date, ValidationError> {
        date_from_millis(self.timestamp_ms)
    }
}

/// Most recent reporting period of a company's financial statements.
///
/// The statement schema varies by filer, so the `financials` object is kept
/// as an untyped tree and read through key lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSnapshot {
    financials: Value,
}

impl FinancialSnapshot {
    pub fn new(financials: Value) -> Self {
        Self { financials }
    }

    pub fn ratios(&self) -> Option<&Value> {
        self.section("ratios")
    }

    /// First non-null entry among `keys` inside `section`.
    pub fn lookup(&self, section: &str, keys: &[&str]) -> Option<&Value> {
        let section = self.section(section)?;
        keys.iter()
            .filter_map(|key| section.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn flatten(&self) -> Vec<FlatField> {
        flatten(&self.financials)
    }

    fn section(&self, name: &str) -> Option<&Value> {
        self.financials.get(name).filter(|value| value.is_object())
    }
}

/// One dated bar with its trailing averages.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub date: Date,
    pub bar: AggregateBar,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
}

/// Daily bars sorted ascending by date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorySeries {
    points: Vec<HistoryPoint>,
}

impl HistorySeries {
    /// Dates every bar, sorts by date and computes the 50/200-day averages.
    ///
    /// The sort is stable, so bars sharing a date keep their provider order.
    pub fn from_bars(bars: Vec<AggregateBar>) -> Result<Self, ValidationError> {
        let mut dated = bars
            .into_iter()
            .map(|bar| bar.date().map(|date| (date, bar)))
            .collect::<Result<Vec<_>, _>>()?;
        dated.sort_by_key(|(date, _)| *date);

        let closes = dated.iter().map(|(_, bar)| bar.close).collect::<Vec<_>>();
        let short = simple_moving_average(&closes, SHORT_WINDOW);
        let long = simple_moving_average(&closes, LONG_WINDOW);

        let points = dated
            .into_iter()
            .zip(short.into_iter().zip(long))
            .map(|((date, bar), (sma_50, sma_200))| HistoryPoint {
                date,
                bar,
                sma_50,
                sma_200,
            })
            .collect();

        Ok(Self { points })
    }

    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    const DAY_MS: i64 = 86_400_000;

    fn bar(day: i64, close: f64) -> AggregateBar {
        AggregateBar {
            ticker: String::from("AAPL"),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000.0,
            timestamp_ms: 1_704_171_600_000 + day * DAY_MS,
        }
    }

    #[test]
    fn history_sorts_out_of_order_bars() {
        let series =
            HistorySeries::from_bars(vec![bar(2, 3.0), bar(0, 1.0), bar(1, 2.0)]).expect("series");
        let dates = series.points().iter().map(|p| p.date).collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![date!(2024 - 01 - 02), date!(2024 - 01 - 03), date!(2024 - 01 - 04)]
        );
    }

    #[test]
    fn same_day_bars_keep_provider_order() {
        let mut later = bar(0, 2.0);
        later.timestamp_ms += 5 * 3_600_000;
        let earlier = bar(0, 1.0);

        let series = HistorySeries::from_bars(vec![later, earlier]).expect("series");
        let closes = series.points().iter().map(|p| p.bar.close).collect::<Vec<_>>();
        assert_eq!(closes, [2.0, 1.0]);
    }

    #[test]
    fn short_history_has_no_averages() {
        let series = HistorySeries::from_bars((0..10).map(|d| bar(d, 1.0)).collect()).expect("series");
        assert!(series.points().iter().all(|p| p.sma_50.is_none() && p.sma_200.is_none()));
    }

    #[test]
    fn lookup_skips_null_entries_and_missing_sections() {
        let snapshot = FinancialSnapshot::new(json!({
            "income_statement": { "eps": null, "basic_earnings_per_share": { "value": 6.1 } }
        }));

        let eps = snapshot
            .lookup("income_statement", &["eps", "basic_earnings_per_share"])
            .expect("fallback key");
        assert_eq!(eps["value"], json!(6.1));
        assert!(snapshot.lookup("ratios", &["peRatioTTM"]).is_none());
    }
}
