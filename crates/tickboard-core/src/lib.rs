//! # Tickboard Core
//!
//! Domain types, the Polygon provider adapter and the three dashboard actions
//! behind the `tickboard` CLI.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`actions`] | Input validation and the Details, Quote and History actions |
//! | [`adapters`] | Provider adapters (Polygon) |
//! | [`config`] | Provider connection settings |
//! | [`domain`] | Symbol, credential, bars, company details, statements |
//! | [`error`] | Validation errors |
//! | [`flatten`] | Key-path flattening of JSON trees |
//! | [`format`] | Number and metric display helpers |
//! | [`http_client`] | HTTP client abstraction |
//! | [`indicators`] | Simple moving averages |
//! | [`provider`] | Provider trait and provider errors |
//! | [`report`] | Append-only report model |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickboard_core::{Action, Dashboard, InputContext, PolygonProvider};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let dashboard = Dashboard::new(PolygonProvider::default());
//!     let inputs = InputContext::new("AAPL", std::env::var("POLYGON_API_KEY").unwrap_or_default());
//!
//!     let report = dashboard.run(Action::Quote, &inputs).await;
//!     for table in report.tables() {
//!         println!("{} rows", table.len());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │  symbol + API key, one trigger
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Dashboard      │────▶│ Report (blocks + │
//! │  (actions)      │     │ outcome)         │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ MarketData      │────▶│ HTTP Client      │
//! │ Provider        │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Security
//!
//! - The API key lives in [`Credential`], which has no `Display`/`Serialize`
//!   and a redacted `Debug`
//! - Request logging records the endpoint path only, never the query string

pub mod actions;
pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod flatten;
pub mod format;
pub mod http_client;
pub mod indicators;
pub mod provider;
pub mod report;

pub use actions::{ActionError, Dashboard, InputContext, ValidatedInputs};
pub use adapters::PolygonProvider;
pub use config::ProviderConfig;
pub use domain::{
    date_from_millis, format_iso_date, today_utc, AggregateBar, CompanyDetails, Credential,
    DateRange, FinancialSnapshot, HistoryPoint, HistorySeries, Symbol,
};
pub use error::ValidationError;
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use provider::{MarketDataProvider, ProviderError, ProviderErrorKind};
pub use report::{
    Action, Block, Canvas, Cell, Chart, ChartPoint, Metric, Outcome, Report, Series, Table,
};
