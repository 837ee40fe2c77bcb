use std::fmt::{Debug, Formatter};

use crate::{Credential, Symbol, ValidationError};

/// Raw text of the two dashboard inputs for one trigger.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct InputContext {
    pub symbol: String,
    pub credential: String,
}

impl InputContext {
    pub fn new(symbol: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            credential: credential.into(),
        }
    }

    /// Both inputs must be non-empty after trimming; nothing else is checked.
    pub fn validate(&self) -> Result<ValidatedInputs, ValidationError> {
        match (Symbol::parse(&self.symbol), Credential::parse(&self.credential)) {
            (Ok(symbol), Ok(credential)) => Ok(ValidatedInputs { symbol, credential }),
            (Err(_), Err(_)) => Err(ValidationError::MissingInputs),
            (Err(error), Ok(_)) | (Ok(_), Err(error)) => Err(error),
        }
    }
}

impl Debug for InputContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputContext")
            .field("symbol", &self.symbol)
            .field("credential", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInputs {
    pub symbol: Symbol,
    pub credential: Credential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_missing_input() {
        assert_eq!(
            InputContext::new(" ", "key").validate(),
            Err(ValidationError::EmptySymbol)
        );
        assert_eq!(
            InputContext::new("AAPL", "\t").validate(),
            Err(ValidationError::MissingCredential)
        );
        assert_eq!(
            InputContext::new("", "").validate(),
            Err(ValidationError::MissingInputs)
        );
    }

    #[test]
    fn trims_both_inputs() {
        let validated = InputContext::new(" MSFT ", " key ").validate().expect("valid");
        assert_eq!(validated.symbol.as_str(), "MSFT");
        assert_eq!(validated.credential.expose(), "key");
    }

    #[test]
    fn debug_redacts_credential() {
        let rendered = format!("{:?}", InputContext::new("AAPL", "secret-key"));
        assert!(!rendered.contains("secret-key"));
    }
}
