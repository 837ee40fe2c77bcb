use std::fmt::{Debug, Formatter};

use crate::ValidationError;

/// Provider API key supplied by the user for one action.
///
/// Has no `Display` or `Serialize` implementation; the only way
/// to read the key is [`Credential::expose`], which call sites use when
/// building an authenticated request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingCredential);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
