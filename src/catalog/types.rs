//! Step kinds, categories and their static definitions.

use serde::{Deserialize, Serialize};

// =============================================================================
// CATEGORY
// =============================================================================

/// Where a step kind appears in the chooser. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StepCategory {
    Source,
    Logic,
    Destination,
}

impl StepCategory {
    pub const ALL: [StepCategory; 3] = [
        StepCategory::Source,
        StepCategory::Logic,
        StepCategory::Destination,
    ];
}

impl std::fmt::Display for StepCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepCategory::Source => write!(f, "Source"),
            StepCategory::Logic => write!(f, "Logic"),
            StepCategory::Destination => write!(f, "Destination"),
        }
    }
}

// =============================================================================
// KIND
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    // Sources
    EventSource,
    ActionSource,

    // Logic
    PauseForLogic,
    PauseUntilLogic,

    // Destinations
    GithubIssueDestination,
    UserPropertyDestination,
    CohortDestination,
    FeatureFlagDestination,
    WebhookDestination,
    SlackDestination,
    ZapierDestination,
    EmailDestination,
    InAppMessageDestination,
}

impl StepKind {
    pub const fn category(&self) -> StepCategory {
        match self {
            StepKind::EventSource | StepKind::ActionSource => StepCategory::Source,
            StepKind::PauseForLogic | StepKind::PauseUntilLogic => StepCategory::Logic,
            _ => StepCategory::Destination,
        }
    }
}

// =============================================================================
// DEFINITION
// =============================================================================

/// Opaque reference to an icon. The core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IconHandle(pub &'static str);

impl IconHandle {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub kind: StepKind,
    /// Human-readable catalog id, unique across the catalog.
    pub id: &'static str,
    pub category: StepCategory,
    pub label: &'static str,
    pub icon: IconHandle,
}

impl StepDefinition {
    pub fn config(&self) -> StepConfigView {
        StepConfigView {
            icon: self.icon,
            label: self.label.to_string(),
        }
    }
}

/// What a chooser button or form header shows for a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepConfigView {
    pub icon: IconHandle,
    pub label: String,
}
