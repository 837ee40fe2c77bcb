//! Append-only report model produced by every action.
//!
//! An action writes [`Block`]s onto a [`Canvas`] as it goes. Blocks already
//! written stay in the final [`Report`] even when a later step fails, and the
//! [`Outcome`] records how the action ended. Renderers decide how each block
//! is presented.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::actions::ActionError;
use crate::format::NOT_AVAILABLE;

/// The three dashboard triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Details,
    Quote,
    History,
}

impl Action {
    pub const ALL: [Self; 3] = [Self::Details, Self::Quote, Self::History];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Quote => "quote",
            Self::History => "history",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Field { label: String, value: String },
    Metrics { metrics: Vec<Metric> },
    Table(Table),
    Chart(Chart),
}

/// One labelled value in a metric row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Table cell. Serializes as the bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Cell for a flattened JSON leaf; containers are shown as compact JSON.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Text(flag.to_string()),
            Value::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .or_else(|| number.as_f64().map(Self::Number))
                .unwrap_or_else(|| Self::Text(number.to_string())),
            Value::String(text) => Self::Text(text.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str(NOT_AVAILABLE),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{value:.0}")
            }
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Column used as the row index, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index: None,
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn indexed_by(mut self, column: impl Into<String>) -> Self {
        self.index = Some(column.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match columns");
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Line chart data; drawing is left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: Option<f64>,
}

/// Collects blocks in emission order.
#[derive(Debug, Default)]
pub struct Canvas {
    blocks: Vec<Block>,
}

impl Canvas {
    pub fn heading(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Heading { text: text.into() });
    }

    pub fn field(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.blocks.push(Block::Field {
            label: label.into(),
            value: value.into(),
        });
    }

    pub fn metrics(&mut self, metrics: Vec<Metric>) {
        self.blocks.push(Block::Metrics { metrics });
    }

    pub fn table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn chart(&mut self, chart: Chart) {
        self.blocks.push(Block::Chart(chart));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Completed,
    /// Expected empty result, shown as an informational notice.
    NoData { message: String },
    Failed { error: ActionError },
}

impl Outcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Everything one trigger produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub run_id: Uuid,
    pub action: Action,
    pub symbol: String,
    pub blocks: Vec<Block>,
    pub outcome: Outcome,
}

impl Report {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    /// Value of the first field block with `label`.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            Block::Field { label: l, value } if l == label => Some(value.as_str()),
            _ => None,
        })
    }
}
