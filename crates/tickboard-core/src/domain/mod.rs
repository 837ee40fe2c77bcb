//! # Domain Models
//!
//! Values that flow through a single dashboard action. None of them outlive
//! the action that created them.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, non-empty ticker text |
//! | [`Credential`] | Provider API key, redacted in `Debug` and never serialized |
//! | [`CompanyDetails`] | Identity fields from the ticker-details lookup |
//! | [`FinancialSnapshot`] | Latest statement period as a generic JSON tree |
//! | [`AggregateBar`] | One OHLCV bucket with a millisecond timestamp |
//! | [`HistorySeries`] | Date-sorted bars with 50/200-day moving averages |
//! | [`DateRange`] | Inclusive calendar range for aggregate queries |

mod calendar;
mod credential;
mod models;
mod symbol;

pub use calendar::{date_from_millis, format_iso_date, today_utc, DateRange};
pub use credential::Credential;
pub use models::{AggregateBar, CompanyDetails, FinancialSnapshot, HistoryPoint, HistorySeries};
pub use symbol::Symbol;
