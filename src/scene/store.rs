//! Persistence collaborator: the automations API as the scene sees it.

use std::cell::RefCell;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{Automation, AutomationId};

/// Failure reported by the persistence layer. Not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
        }
    }
}

pub trait AutomationStore {
    /// `Ok(None)` when no automation has this id.
    fn load(&self, id: u64) -> Result<Option<Automation>, StoreError>;

    /// Create (for `AutomationId::New`) or update. Returns the stored copy.
    fn save(&self, automation: &Automation) -> Result<Automation, StoreError>;
}

/// Map-backed store. Assigns ids sequentially on create.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    automations: RefCell<BTreeMap<u64, Automation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an automation that already has an id. Drafts are ignored.
    pub fn insert(&self, automation: Automation) {
        if let AutomationId::Existing(id) = automation.id {
            self.automations.borrow_mut().insert(id, automation);
        }
    }

    pub fn len(&self) -> usize {
        self.automations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.automations.borrow().is_empty()
    }
}

impl AutomationStore for InMemoryStore {
    fn load(&self, id: u64) -> Result<Option<Automation>, StoreError> {
        Ok(self.automations.borrow().get(&id).cloned())
    }

    fn save(&self, automation: &Automation) -> Result<Automation, StoreError> {
        let mut automations = self.automations.borrow_mut();
        let id = match automation.id {
            AutomationId::New => automations.keys().next_back().map_or(1, |id| id + 1),
            AutomationId::Existing(id) if automations.contains_key(&id) => id,
            AutomationId::Existing(id) => {
                return Err(StoreError::new(format!("automation {} does not exist", id)));
            }
        };
        let mut stored = automation.clone();
        stored.id = AutomationId::Existing(id);
        automations.insert(id, stored.clone());
        Ok(stored)
    }
}
