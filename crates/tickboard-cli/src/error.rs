use thiserror::Error;
use tickboard_core::{ActionError, Outcome};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to install log subscriber: {0}")]
    Logging(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Serialization(_) | Self::Timestamp(_) => 4,
            Self::Logging(_) | Self::Io(_) => 10,
        }
    }
}

/// Exit code for a rendered report. Empty results are not failures.
pub const fn outcome_exit_code(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Completed | Outcome::NoData { .. } => 0,
        Outcome::Failed {
            error: ActionError::Validation(_),
        } => 2,
        Outcome::Failed {
            error: ActionError::Provider(_),
        } => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickboard_core::{ProviderError, ValidationError};

    #[test]
    fn outcomes_map_to_exit_codes() {
        assert_eq!(outcome_exit_code(&Outcome::Completed), 0);
        assert_eq!(
            outcome_exit_code(&Outcome::NoData {
                message: String::from("none")
            }),
            0
        );
        assert_eq!(
            outcome_exit_code(&Outcome::Failed {
                error: ValidationError::EmptySymbol.into()
            }),
            2
        );
        assert_eq!(
            outcome_exit_code(&Outcome::Failed {
                error: ProviderError::transport("timed out").into()
            }),
            3
        );
    }

    #[test]
    fn io_errors_exit_with_ten() {
        let error = CliError::from(std::io::Error::other("broken pipe"));
        assert_eq!(error.exit_code(), 10);
    }
}
