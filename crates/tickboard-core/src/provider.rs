//! Market-data provider contract.
//!
//! Every call takes the credential explicitly; providers hold connection
//! settings only, never a user's key.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use thiserror::Error;

use crate::{AggregateBar, CompanyDetails, Credential, DateRange, FinancialSnapshot, Symbol};

/// Provider failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// No response was received.
    Transport,
    /// The key was rejected (401/403).
    Unauthorized,
    /// Unknown symbol or resource (404, or an empty lookup).
    NotFound,
    /// Any other non-success status.
    Status,
    /// The body was not the JSON shape expected.
    Decode,
    /// The body parsed but carried unusable values.
    InvalidData,
}

impl ProviderErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::InvalidData => "invalid_data",
        }
    }
}

/// Structured provider error carrying the upstream diagnostic verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    kind: ProviderErrorKind,
    status: Option<u16>,
    message: String,
}

impl ProviderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Transport,
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => ProviderErrorKind::Unauthorized,
            404 => ProviderErrorKind::NotFound,
            _ => ProviderErrorKind::Status,
        };
        Self {
            kind,
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::NotFound,
            status: None,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Decode,
            status: None,
            message: message.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidData,
            status: None,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub const fn http_status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Contract implemented by market-data backends.
pub trait MarketDataProvider: Send + Sync {
    /// Identity fields for one ticker.
    fn ticker_details<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<CompanyDetails, ProviderError>> + Send + 'a>>;

    /// Previous session's bar; zero bars is a valid answer.
    fn previous_close<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AggregateBar>, ProviderError>> + Send + 'a>>;

    /// Every daily bar in `range`, all pages collected.
    fn daily_aggregates<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AggregateBar>, ProviderError>> + Send + 'a>>;

    /// Latest statement period, or `None` when the provider has none.
    fn latest_financials<'a>(
        &'a self,
        symbol: &'a Symbol,
        credential: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Option<FinancialSnapshot>, ProviderError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_kinds() {
        assert_eq!(
            ProviderError::status(401, "bad key").kind(),
            ProviderErrorKind::Unauthorized
        );
        assert_eq!(
            ProviderError::status(404, "missing").kind(),
            ProviderErrorKind::NotFound
        );
        assert_eq!(
            ProviderError::status(502, "gateway").kind(),
            ProviderErrorKind::Status
        );
        assert_eq!(ProviderError::status(502, "gateway").http_status(), Some(502));
    }
}
