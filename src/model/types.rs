//! Persisted automation shape, as exchanged with the automations API.

use serde::{Deserialize, Serialize};

use crate::catalog::{StepCatalog, StepKind};
use crate::error::AutomationError;

// =============================================================================
// ID
// =============================================================================

/// Route/API id: the sentinel `"new"` for an unsaved automation, otherwise
/// the numeric primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAutomationId", into = "RawAutomationId")]
pub enum AutomationId {
    New,
    Existing(u64),
}

impl AutomationId {
    pub fn parse(raw: &str) -> Result<Self, AutomationError> {
        if raw == "new" {
            return Ok(AutomationId::New);
        }
        raw.parse::<u64>()
            .map(AutomationId::Existing)
            .map_err(|_| AutomationError::Parse(format!("invalid automation id '{}'", raw)))
    }

    pub fn is_new(&self) -> bool {
        matches!(self, AutomationId::New)
    }

    pub fn existing(&self) -> Option<u64> {
        match self {
            AutomationId::New => None,
            AutomationId::Existing(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for AutomationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomationId::New => write!(f, "new"),
            AutomationId::Existing(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawAutomationId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawAutomationId> for AutomationId {
    type Error = String;

    fn try_from(raw: RawAutomationId) -> Result<Self, Self::Error> {
        match raw {
            RawAutomationId::Number(id) => Ok(AutomationId::Existing(id)),
            RawAutomationId::Text(text) => {
                AutomationId::parse(&text).map_err(|e| e.to_string())
            }
        }
    }
}

impl From<AutomationId> for RawAutomationId {
    fn from(id: AutomationId) -> Self {
        match id {
            AutomationId::New => RawAutomationId::Text("new".into()),
            AutomationId::Existing(id) => RawAutomationId::Number(id),
        }
    }
}

// =============================================================================
// AUTOMATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automation {
    pub id: AutomationId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<AutomationStep>,
    #[serde(default)]
    pub edges: Vec<AutomationEdge>,
}

impl Automation {
    /// Empty, unsaved automation.
    pub fn draft() -> Self {
        Automation {
            id: AutomationId::New,
            name: String::new(),
            steps: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn step(&self, id: &str) -> Option<&AutomationStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&AutomationEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationStep {
    pub id: String,
    pub kind: StepKind,
    /// User-facing override; falls back to the catalog label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AutomationStep {
    pub fn label(&self, catalog: &StepCatalog) -> &str {
        match &self.label {
            Some(label) => label.as_str(),
            None => catalog.definition(self.kind).map(|d| d.label).unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}
