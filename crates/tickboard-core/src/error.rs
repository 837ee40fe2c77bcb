use thiserror::Error;

/// Validation errors raised before any provider call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing API key or symbol.")]
    MissingInputs,
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("API key cannot be empty")]
    MissingCredential,

    #[error("timestamp {millis}ms is outside the supported calendar range")]
    TimestampOutOfRange { millis: i64 },
    #[error("cannot offset {date} by {years} years")]
    DateOutOfRange { date: String, years: i32 },
}
