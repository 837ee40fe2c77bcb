//! The three dashboard actions.
//!
//! [`Dashboard::run`] validates the inputs, runs one action to completion and
//! folds the result into a [`Report`]. Actions never call one another and keep
//! no state between runs.

mod details;
mod history;
mod input;
mod quote;

use serde::{Serialize, Serializer};
use thiserror::Error;
use time::Date;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::provider::{MarketDataProvider, ProviderError};
use crate::report::{Action, Canvas, Outcome, Report};
use crate::{today_utc, ValidationError};

pub use details::NO_FINANCIAL_DATA;
pub use history::{HISTORY_YEARS, NO_HISTORICAL_DATA};
pub use input::{InputContext, ValidatedInputs};

/// Why an action stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ActionError {
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Provider(_) => "provider",
        }
    }
}

impl Serialize for ActionError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct ErrorView<'a> {
            category: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            kind: Option<&'static str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            http_status: Option<u16>,
            message: &'a str,
        }

        let message = self.to_string();
        let view = match self {
            Self::Validation(_) => ErrorView {
                category: self.category(),
                kind: None,
                http_status: None,
                message: &message,
            },
            Self::Provider(error) => ErrorView {
                category: self.category(),
                kind: Some(error.kind().as_str()),
                http_status: error.http_status(),
                message: &message,
            },
        };
        view.serialize(serializer)
    }
}

/// Successful ending of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Completion {
    Completed,
    NoData(String),
}

/// Runs dashboard actions against one provider.
#[derive(Debug, Clone)]
pub struct Dashboard<P> {
    provider: P,
}

impl<P: MarketDataProvider> Dashboard<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs `action` with the current UTC date.
    pub async fn run(&self, action: Action, inputs: &InputContext) -> Report {
        self.run_as_of(action, inputs, today_utc()).await
    }

    /// Runs `action` treating `today` as the current date.
    pub async fn run_as_of(&self, action: Action, inputs: &InputContext, today: Date) -> Report {
        let run_id = Uuid::new_v4();
        let span = info_span!("action", action = action.as_str(), run_id = %run_id);

        async move {
            let mut canvas = Canvas::default();
            let result = match inputs.validate() {
                Ok(validated) => self.dispatch(action, &validated, today, &mut canvas).await,
                Err(error) => Err(ActionError::from(error)),
            };

            let outcome = match result {
                Ok(Completion::Completed) => {
                    info!(blocks = canvas.blocks().len(), "action completed");
                    Outcome::Completed
                }
                Ok(Completion::NoData(message)) => {
                    info!(blocks = canvas.blocks().len(), "action returned no data");
                    Outcome::NoData { message }
                }
                Err(error) => {
                    warn!(category = error.category(), error = %error, "action failed");
                    Outcome::Failed { error }
                }
            };

            Report {
                run_id,
                action,
                symbol: inputs.symbol.trim().to_owned(),
                blocks: canvas.into_blocks(),
                outcome,
            }
        }
        .instrument(span)
        .await
    }

    async fn dispatch(
        &self,
        action: Action,
        inputs: &ValidatedInputs,
        today: Date,
        canvas: &mut Canvas,
    ) -> Result<Completion, ActionError> {
        match action {
            Action::Details => details::run(&self.provider, inputs, canvas).await,
            Action::Quote => quote::run(&self.provider, inputs, canvas).await,
            Action::History => history::run(&self.provider, inputs, today, canvas).await,
        }
    }
}
