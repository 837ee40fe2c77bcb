use crate::provider::MarketDataProvider;
use crate::report::{Canvas, Cell, Table};

use super::{ActionError, Completion, ValidatedInputs};

pub(super) const QUOTE_COLUMNS: [&str; 6] = ["ticker", "open", "high", "low", "close", "volume"];

pub(super) async fn run<P: MarketDataProvider + ?Sized>(
    provider: &P,
    inputs: &ValidatedInputs,
    canvas: &mut Canvas,
) -> Result<Completion, ActionError> {
    let bars = provider
        .previous_close(&inputs.symbol, &inputs.credential)
        .await?;

    canvas.heading("Previous Close Data");
    let mut table = Table::new(QUOTE_COLUMNS);
    for bar in bars {
        table.push_row(vec![
            Cell::Text(bar.ticker),
            Cell::Number(bar.open),
            Cell::Number(bar.high),
            Cell::Number(bar.low),
            Cell::Number(bar.close),
            Cell::Number(bar.volume),
        ]);
    }
    canvas.table(table);

    Ok(Completion::Completed)
}
