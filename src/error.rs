//! Unified error type used across the editor core.

use thiserror::Error;

use crate::model::AutomationId;
use crate::scene::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomationError {
    /// A catalog id has no step definition.
    #[error("unknown step id '{0}'")]
    UnknownStepId(String),

    #[error("automation {0} not found")]
    AutomationNotFound(AutomationId),

    #[error("failed to load automation: {0}")]
    LoadFailure(#[source] StoreError),

    #[error("failed to save automation: {0}")]
    SaveFailure(#[source] StoreError),

    /// A step node id that is not part of the automation.
    #[error("automation has no step '{0}'")]
    UnknownStep(String),

    #[error("automation has no edge '{0}'")]
    UnknownEdge(String),

    /// Every numeric suffix after the prefix is taken.
    #[error("no free '{0}' id left")]
    IdsExhausted(String),

    #[error("no step is being configured")]
    NoActiveStep,

    /// The scene is waiting on a load and refuses user actions.
    #[error("automation is still loading")]
    Busy,

    #[error("failed to parse automation JSON: {0}")]
    Parse(String),

    #[error("invalid editor config: {0}")]
    Config(String),
}

impl AutomationError {
    /// Stable short code, surfaced to the browser next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            AutomationError::UnknownStepId(_) => "C001",
            AutomationError::AutomationNotFound(_) => "S001",
            AutomationError::LoadFailure(_) => "S002",
            AutomationError::SaveFailure(_) => "S003",
            AutomationError::Busy => "S004",
            AutomationError::UnknownStep(_) => "G001",
            AutomationError::UnknownEdge(_) => "G002",
            AutomationError::IdsExhausted(_) => "G003",
            AutomationError::NoActiveStep => "P001",
            AutomationError::Parse(_) => "J001",
            AutomationError::Config(_) => "F001",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_id() {
        let err = AutomationError::UnknownStepId("nonexistent-id".into());
        assert_eq!(err.to_string(), "unknown step id 'nonexistent-id'");
        assert_eq!(err.code(), "C001");
    }

    #[test]
    fn store_errors_keep_their_message() {
        let err = AutomationError::SaveFailure(StoreError::new("disk full"));
        assert_eq!(err.to_string(), "failed to save automation: disk full");
    }
}
