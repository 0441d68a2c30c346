//! Catalog of automation step kinds available in the chooser.

pub mod types;

pub use types::*;

use std::collections::BTreeMap;

use crate::error::AutomationError;

/// Declaration order is the order the chooser lists steps in.
static STEP_DEFINITIONS: [StepDefinition; 13] = [
    step(StepKind::EventSource, "Event sent", "IconEvent"),
    step(StepKind::ActionSource, "Action triggered", "IconAction"),
    step(StepKind::PauseForLogic, "Pause for", "IconCoffee"),
    step(StepKind::PauseUntilLogic, "Pause until", "IconCoffee"),
    step(StepKind::GithubIssueDestination, "Create a Github ticket", "GithubIcon"),
    step(StepKind::UserPropertyDestination, "Set user property", "IconPerson"),
    step(StepKind::CohortDestination, "Add to cohort", "IconCohort"),
    step(StepKind::FeatureFlagDestination, "Add to feature flags", "IconFlag"),
    step(StepKind::WebhookDestination, "Send a webhook", "IconWebhook"),
    step(StepKind::SlackDestination, "Send to slack", "IconSlack"),
    step(StepKind::ZapierDestination, "Send to Zapier", "IconApps"),
    step(StepKind::EmailDestination, "Send an email", "IconArticle"),
    step(StepKind::InAppMessageDestination, "In-app message", "IconMonitor"),
];

static GLOBAL: StepCatalog = StepCatalog {
    steps: &STEP_DEFINITIONS,
};

const fn step(kind: StepKind, id: &'static str, icon: &'static str) -> StepDefinition {
    StepDefinition {
        kind,
        id,
        category: kind.category(),
        label: id,
        icon: IconHandle(icon),
    }
}

#[derive(Debug)]
pub struct StepCatalog {
    steps: &'static [StepDefinition],
}

impl StepCatalog {
    /// The process-wide registry. Immutable, safe to share across sessions.
    pub fn global() -> &'static StepCatalog {
        &GLOBAL
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    pub fn find(&self, id: &str) -> Option<&'static StepDefinition> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn definition(&self, kind: StepKind) -> Option<&'static StepDefinition> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    /// Group every definition under its category, keeping declaration order.
    pub fn list_steps_by_category(&self) -> StepsByCategory {
        let mut buckets: BTreeMap<StepCategory, Vec<&'static StepDefinition>> =
            StepCategory::ALL.iter().map(|c| (*c, Vec::new())).collect();
        for step in self.steps {
            buckets.entry(step.category).or_default().push(step);
        }
        StepsByCategory { buckets }
    }

    pub fn resolve_config(&self, id: &str) -> Result<StepConfigView, AutomationError> {
        self.find(id)
            .map(StepDefinition::config)
            .ok_or_else(|| AutomationError::UnknownStepId(id.to_string()))
    }
}

/// Shorthand for `StepCatalog::global().list_steps_by_category()`.
pub fn list_steps_by_category() -> StepsByCategory {
    StepCatalog::global().list_steps_by_category()
}

/// Shorthand for `StepCatalog::global().resolve_config(id)`.
pub fn resolve_config(id: &str) -> Result<StepConfigView, AutomationError> {
    StepCatalog::global().resolve_config(id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepsByCategory {
    buckets: BTreeMap<StepCategory, Vec<&'static StepDefinition>>,
}

impl StepsByCategory {
    pub fn get(&self, category: StepCategory) -> &[&'static StepDefinition] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories in declaration order, each with its steps.
    pub fn iter(&self) -> impl Iterator<Item = (StepCategory, &[&'static StepDefinition])> {
        self.buckets.iter().map(|(c, steps)| (*c, steps.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// One line per category: `Category: label, label`.
    pub fn outline(&self) -> String {
        self.iter()
            .map(|(category, steps)| {
                let labels: Vec<&str> = steps.iter().map(|s| s.label).collect();
                format!("{}: {}", category, labels.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
