use crate::format::{group_thousands, metric_text, NOT_AVAILABLE};
use crate::provider::MarketDataProvider;
use crate::report::{Canvas, Cell, Metric, Table};
use crate::{CompanyDetails, FinancialSnapshot};

use super::{ActionError, Completion, ValidatedInputs};

pub const NO_FINANCIAL_DATA: &str = "No financial data available for this symbol.";

struct MetricSource {
    label: &'static str,
    section: &'static str,
    /// Candidate keys, first non-null wins.
    keys: &'static [&'static str],
}

const INCOME_METRICS: [MetricSource; 3] = [
    MetricSource {
        label: "Revenue",
        section: "income_statement",
        keys: &["revenues", "revenue"],
    },
    MetricSource {
        label: "Net Income",
        section: "income_statement",
        keys: &["net_income", "net_income_loss"],
    },
    MetricSource {
        label: "EPS",
        section: "income_statement",
        keys: &["eps", "basic_earnings_per_share", "diluted_earnings_per_share"],
    },
];

const RATIO_METRICS: [MetricSource; 3] = [
    MetricSource {
        label: "P/E Ratio",
        section: "ratios",
        keys: &["peRatioTTM", "pe_ratio", "price_to_earnings_ratio"],
    },
    MetricSource {
        label: "Gross Margin",
        section: "ratios",
        keys: &["grossMargin", "gross_margin"],
    },
    MetricSource {
        label: "Dividend Yield",
        section: "ratios",
        keys: &["dividendYield", "dividend_yield"],
    },
];

pub(super) async fn run<P: MarketDataProvider + ?Sized>(
    provider: &P,
    inputs: &ValidatedInputs,
    canvas: &mut Canvas,
) -> Result<Completion, ActionError> {
    let details = provider
        .ticker_details(&inputs.symbol, &inputs.credential)
        .await?;
    render_company(&details, canvas);

    let snapshot = provider
        .latest_financials(&inputs.symbol, &inputs.credential)
        .await?;
    let Some(snapshot) = snapshot else {
        return Ok(Completion::NoData(String::from(NO_FINANCIAL_DATA)));
    };

    canvas.heading("Key Financial Metrics");
    canvas.metrics(metric_row(&snapshot, &INCOME_METRICS));
    canvas.metrics(metric_row(&snapshot, &RATIO_METRICS));

    canvas.heading("Full Financial Data");
    canvas.table(flattened_table(&snapshot));

    Ok(Completion::Completed)
}

fn render_company(details: &CompanyDetails, canvas: &mut Canvas) {
    canvas.heading("Company Details");
    canvas.field("Ticker", details.ticker.as_str());
    canvas.field("Name", details.name.as_deref().unwrap_or(NOT_AVAILABLE));
    canvas.field(
        "Market Cap",
        details
            .market_cap
            .map(group_thousands)
            .unwrap_or_else(|| String::from(NOT_AVAILABLE)),
    );
    canvas.field(
        "Homepage",
        details.homepage_url.as_deref().unwrap_or(NOT_AVAILABLE),
    );
}

fn metric_row(snapshot: &FinancialSnapshot, sources: &[MetricSource]) -> Vec<Metric> {
    sources
        .iter()
        .map(|source| {
            Metric::new(
                source.label,
                metric_text(snapshot.lookup(source.section, source.keys)),
            )
        })
        .collect()
}

fn flattened_table(snapshot: &FinancialSnapshot) -> Table {
    let mut table = Table::new(["field", "value"]).indexed_by("field");
    for field in snapshot.flatten() {
        table.push_row(vec![Cell::Text(field.path), Cell::from_json(&field.value)]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metrics_fall_back_to_statement_key_names() {
        let snapshot = FinancialSnapshot::new(json!({
            "income_statement": {
                "revenues": { "value": 94930000000_u64, "unit": "USD" },
                "net_income_loss": { "value": 14736000000_u64, "unit": "USD" },
                "basic_earnings_per_share": { "value": 0.97, "unit": "USD / shares" }
            }
        }));

        let income = metric_row(&snapshot, &INCOME_METRICS);
        let values = income.iter().map(|m| m.value.as_str()).collect::<Vec<_>>();
        assert_eq!(values, ["94,930,000,000", "14,736,000,000", "0.97"]);

        let ratios = metric_row(&snapshot, &RATIO_METRICS);
        assert!(ratios.iter().all(|m| m.value == NOT_AVAILABLE));
    }

    #[test]
    fn missing_company_fields_render_not_available() {
        let mut canvas = Canvas::default();
        render_company(
            &CompanyDetails {
                ticker: String::from("XYZ"),
                name: None,
                market_cap: None,
                homepage_url: None,
            },
            &mut canvas,
        );
        assert_eq!(canvas.blocks().len(), 5);
    }
}
