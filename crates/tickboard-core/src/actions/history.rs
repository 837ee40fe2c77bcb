use time::Date;

use crate::indicators::{LONG_WINDOW, SHORT_WINDOW};
use crate::provider::{MarketDataProvider, ProviderError};
use crate::report::{Canvas, Cell, Chart, ChartPoint, Series, Table};
use crate::{format_iso_date, DateRange, HistoryPoint, HistorySeries};

use super::{ActionError, Completion, ValidatedInputs};

/// Length of the history window in calendar years.
pub const HISTORY_YEARS: i32 = 5;
pub const NO_HISTORICAL_DATA: &str = "No historical data available for this symbol.";

const HISTORY_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

pub(super) async fn run<P: MarketDataProvider + ?Sized>(
    provider: &P,
    inputs: &ValidatedInputs,
    today: Date,
    canvas: &mut Canvas,
) -> Result<Completion, ActionError> {
    let range = DateRange::trailing_years(today, HISTORY_YEARS)?;
    let bars = provider
        .daily_aggregates(&inputs.symbol, &inputs.credential, range)
        .await?;
    if bars.is_empty() {
        return Ok(Completion::NoData(String::from(NO_HISTORICAL_DATA)));
    }

    let series = HistorySeries::from_bars(bars)
        .map_err(|error| ProviderError::invalid_data(format!("polygon aggregate bar: {error}")))?;
    let dates = series
        .points()
        .iter()
        .map(|point| format_iso_date(point.date))
        .collect::<Vec<_>>();

    let symbol = &inputs.symbol;
    canvas.heading(format!("{symbol} Price Trend (Last {HISTORY_YEARS} Years)"));
    canvas.chart(Chart {
        title: format!("{symbol} close"),
        x_label: String::from("date"),
        series: vec![line(&dates, "close", &series, |p| Some(p.bar.close))],
    });

    canvas.heading("Historical Data Table");
    let mut table = Table::new(HISTORY_COLUMNS).indexed_by("date");
    for (date, point) in dates.iter().zip(series.points()) {
        table.push_row(vec![
            Cell::text(date.as_str()),
            Cell::Number(point.bar.open),
            Cell::Number(point.bar.high),
            Cell::Number(point.bar.low),
            Cell::Number(point.bar.close),
            Cell::Number(point.bar.volume),
        ]);
    }
    canvas.table(table);

    canvas.chart(Chart {
        title: format!("{symbol} close with {SHORT_WINDOW}/{LONG_WINDOW}-day moving averages"),
        x_label: String::from("date"),
        series: vec![
            line(&dates, "close", &series, |p| Some(p.bar.close)),
            line(&dates, "50d_ma", &series, |p| p.sma_50),
            line(&dates, "200d_ma", &series, |p| p.sma_200),
        ],
    });

    Ok(Completion::Completed)
}

fn line(
    dates: &[String],
    name: &str,
    series: &HistorySeries,
    value: impl Fn(&HistoryPoint) -> Option<f64>,
) -> Series {
    Series {
        name: name.to_owned(),
        points: dates
            .iter()
            .zip(series.points())
            .map(|(date, point)| ChartPoint {
                x: date.clone(),
                y: value(point),
            })
            .collect(),
    }
}
