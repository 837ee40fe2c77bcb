//! Report renderers.
//!
//! Text output walks the report blocks in order: headings, `label: value`
//! fields, metric rows, column-aligned tables and a compact sparkline per
//! chart series, followed by the outcome notice. JSON output wraps the report
//! with a generation timestamp.

use std::io::Write;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tickboard_core::{Block, Chart, Metric, Outcome, Report, Table};

use crate::cli::OutputFormat;
use crate::error::CliError;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 60;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text(&mut out, report)?,
        OutputFormat::Json => write_json(&mut out, report, OffsetDateTime::now_utc(), pretty)?,
    }
    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a Report,
}

pub fn write_json(
    out: &mut impl Write,
    report: &Report,
    generated_at: OffsetDateTime,
    pretty: bool,
) -> Result<(), CliError> {
    let envelope = JsonEnvelope {
        generated_at: generated_at.format(&Rfc3339)?,
        report,
    };
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &envelope)?;
    } else {
        serde_json::to_writer(&mut *out, &envelope)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_text(out: &mut impl Write, report: &Report) -> Result<(), CliError> {
    for block in &report.blocks {
        match block {
            Block::Heading { text } => {
                writeln!(out)?;
                writeln!(out, "== {text} ==")?;
            }
            Block::Field { label, value } => writeln!(out, "{label}: {value}")?,
            Block::Metrics { metrics } => write_metrics(out, metrics)?,
            Block::Table(table) => write_table(out, table)?,
            Block::Chart(chart) => write_chart(out, chart)?,
        }
    }

    match &report.outcome {
        Outcome::Completed => {}
        Outcome::NoData { message } => writeln!(out, "info: {message}")?,
        Outcome::Failed { error } => writeln!(out, "error: {error}")?,
    }
    Ok(())
}

fn write_metrics(out: &mut impl Write, metrics: &[Metric]) -> Result<(), CliError> {
    let line = metrics
        .iter()
        .map(|metric| format!("{}: {}", metric.label, metric.value))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{line}")?;
    Ok(())
}

fn write_table(out: &mut impl Write, table: &Table) -> Result<(), CliError> {
    let rendered = table
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = table.columns.iter().map(|c| c.chars().count()).collect::<Vec<_>>();
    for row in &rendered {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, table.columns.iter().map(String::as_str), &widths)?;
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");
    writeln!(out, "{rule}")?;
    for row in &rendered {
        write_row(out, row.iter().map(String::as_str), &widths)?;
    }
    if rendered.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    Ok(())
}

fn write_row<'a>(
    out: &mut impl Write,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> Result<(), CliError> {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

fn write_chart(out: &mut impl Write, chart: &Chart) -> Result<(), CliError> {
    writeln!(out, "[chart] {}", chart.title)?;
    for series in &chart.series {
        let values = series.points.iter().filter_map(|p| p.y).collect::<Vec<_>>();
        let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
            writeln!(out, "  {}: (empty)", series.name)?;
            continue;
        };
        let Some((min, max)) = bounds(&values) else {
            writeln!(out, "  {}: (no values)", series.name)?;
            continue;
        };
        writeln!(
            out,
            "  {:<8} {} {} .. {} min {:.2} max {:.2}",
            series.name,
            sparkline(&values, SPARK_WIDTH),
            first.x,
            last.x,
            min,
            max
        )?;
    }
    Ok(())
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, value| match acc {
        None => Some((*value, *value)),
        Some((min, max)) => Some((min.min(*value), max.max(*value))),
    })
}

/// Downsamples `values` into at most `width` bucket averages.
fn sparkline(values: &[f64], width: usize) -> String {
    let Some((min, max)) = bounds(values) else {
        return String::new();
    };
    let buckets = width.min(values.len()).max(1);
    let span = max - min;

    (0..buckets)
        .map(|bucket| {
            let start = bucket * values.len() / buckets;
            let end = ((bucket + 1) * values.len() / buckets).max(start + 1);
            let slice = &values[start..end];
            let mean = slice.iter().sum::<f64>() / slice.len() as f64;
            let level = if span > 0.0 {
                (((mean - min) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use time::macros::datetime;
    use tickboard_core::{Action, Canvas, Cell, ChartPoint, Series};

    fn report(blocks: Vec<Block>, outcome: Outcome) -> Report {
        Report {
            run_id: Default::default(),
            action: Action::Quote,
            symbol: String::from("AAPL"),
            blocks,
            outcome,
        }
    }

    fn text(report: &Report) -> String {
        let mut buffer = Vec::new();
        write_text(&mut buffer, report).expect("render");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn tables_are_column_aligned() {
        let mut canvas = Canvas::default();
        canvas.heading("Previous Close Data");
        let mut table = Table::new(["ticker", "close"]);
        table.push_row(vec![Cell::text("AAPL"), Cell::Number(189.95)]);
        canvas.table(table);

        let rendered = text(&report(canvas.into_blocks(), Outcome::Completed));
        assert_eq!(
            rendered,
            "\n== Previous Close Data ==\nticker | close\n-------+-------\nAAPL   | 189.95\n"
        );
    }

    #[test]
    fn empty_tables_and_notices_are_visible() {
        let mut canvas = Canvas::default();
        canvas.field("Name", "Apple Inc.");
        canvas.table(Table::new(["ticker"]));

        let rendered = text(&report(
            canvas.into_blocks(),
            Outcome::NoData {
                message: String::from("No financial data available for this symbol."),
            },
        ));
        assert!(rendered.starts_with("Name: Apple Inc.\n"));
        assert!(rendered.contains("(no rows)\n"));
        assert!(rendered.ends_with("info: No financial data available for this symbol.\n"));
    }

    #[test]
    fn metrics_render_on_one_line() {
        let rendered = text(&report(
            vec![Block::Metrics {
                metrics: vec![Metric::new("Revenue", "1,000"), Metric::new("EPS", "N/A")],
            }],
            Outcome::Completed,
        ));
        assert_eq!(rendered, "Revenue: 1,000 | EPS: N/A\n");
    }

    #[test]
    fn charts_summarize_each_series() {
        let points = (0..4)
            .map(|i| ChartPoint {
                x: format!("2024-01-0{}", i + 1),
                y: (i > 0).then_some(i as f64),
            })
            .collect();
        let chart = Chart {
            title: String::from("AAPL close"),
            x_label: String::from("date"),
            series: vec![Series {
                name: String::from("50d_ma"),
                points,
            }],
        };

        let rendered = text(&report(vec![Block::Chart(chart)], Outcome::Completed));
        assert_eq!(
            rendered,
            "[chart] AAPL close\n  50d_ma   ▁▅█ 2024-01-01 .. 2024-01-04 min 1.00 max 3.00\n"
        );
    }

    #[test]
    fn json_envelope_carries_timestamp_and_status() {
        let mut buffer = Vec::new();
        let generated_at = datetime!(2026-10-14 12:00:00 UTC);
        write_json(
            &mut buffer,
            &report(Vec::new(), Outcome::Completed),
            generated_at,
            false,
        )
        .expect("render");

        let value: Value = serde_json::from_slice(&buffer).expect("json");
        assert_eq!(value["generated_at"], "2026-10-14T12:00:00Z");
        assert_eq!(value["action"], "quote");
        assert_eq!(value["outcome"]["status"], "completed");
    }

    #[test]
    fn flat_series_uses_lowest_level() {
        assert_eq!(sparkline(&[5.0, 5.0, 5.0], 10), "▁▁▁");
        assert_eq!(sparkline(&[], 10), "");
    }
}
