#![allow(dead_code)]

use std::cell::Cell;

use automation_editor::catalog::StepKind;
use automation_editor::model::{self, Automation, AutomationEdge, AutomationId, AutomationStep};
use automation_editor::scene::{AutomationStore, InMemoryStore, StoreError};

// =============================================================================
// Automation builders
// =============================================================================

pub fn step(id: &str, kind: StepKind) -> AutomationStep {
    AutomationStep {
        id: id.into(),
        kind,
        label: None,
    }
}

pub fn edge(id: &str, source: &str, target: &str) -> AutomationEdge {
    AutomationEdge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
    }
}

pub fn automation(id: u64, steps: Vec<AutomationStep>, edges: Vec<AutomationEdge>) -> Automation {
    Automation {
        id: AutomationId::Existing(id),
        name: format!("Automation {}", id),
        steps,
        edges,
    }
}

pub fn webhook_flow() -> Automation {
    model::parse(include_str!("../fixtures/webhook_flow.json")).expect("fixture should parse")
}

pub fn branching_flow() -> Automation {
    model::parse(include_str!("../fixtures/branching_flow.json")).expect("fixture should parse")
}

/// Store seeded with the webhook fixture under id 12.
pub fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.insert(webhook_flow());
    store
}

// =============================================================================
// Store doubles
// =============================================================================

/// Fails every call with the given message.
pub struct FailingStore(pub &'static str);

impl AutomationStore for FailingStore {
    fn load(&self, _id: u64) -> Result<Option<Automation>, StoreError> {
        Err(StoreError::new(self.0))
    }

    fn save(&self, _automation: &Automation) -> Result<Automation, StoreError> {
        Err(StoreError::new(self.0))
    }
}

/// Wraps an in-memory store and counts loads.
pub struct CountingStore {
    pub inner: InMemoryStore,
    pub loads: Cell<usize>,
}

impl CountingStore {
    pub fn new(inner: InMemoryStore) -> Self {
        CountingStore {
            inner,
            loads: Cell::new(0),
        }
    }
}

impl AutomationStore for CountingStore {
    fn load(&self, id: u64) -> Result<Option<Automation>, StoreError> {
        self.loads.set(self.loads.get() + 1);
        self.inner.load(id)
    }

    fn save(&self, automation: &Automation) -> Result<Automation, StoreError> {
        self.inner.save(automation)
    }
}
