//! Step configuration panel: which step (if any) is being added, and whether
//! the panel is visible.
//!
//! The machine is total: every event is defined in every state.
//!
//! | From            | Event                  | To              |
//! |-----------------|------------------------|-----------------|
//! | Closed          | `open_step_config`     | ChooserOpen     |
//! | ChooserOpen     | `open_step_config`     | ChooserOpen     |
//! | FormOpen(id)    | `open_step_config`     | FormOpen(id)    |
//! | any             | `set_active_step_id`   | FormOpen(id)    |
//! | any             | `close_step_config`    | Closed          |

pub mod view;

pub use view::PanelView;

use serde::Serialize;

use crate::catalog::{StepCatalog, StepConfigView, StepDefinition};
use crate::error::AutomationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    ChooserOpen,
    FormOpen(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPanel {
    is_open: bool,
    active_step_id: Option<String>,
}

impl ConfigPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active_step_id(&self) -> Option<&str> {
        self.active_step_id.as_deref()
    }

    pub fn state(&self) -> PanelState {
        match (self.is_open, &self.active_step_id) {
            (false, _) => PanelState::Closed,
            (true, None) => PanelState::ChooserOpen,
            (true, Some(id)) => PanelState::FormOpen(id.clone()),
        }
    }

    /// Show the panel. The chooser appears unless a step is already active.
    pub fn open_step_config(&mut self) {
        tracing::trace!(from = ?self.state(), "open_step_config");
        self.is_open = true;
    }

    /// Start configuring `id`. Opens the panel when it was closed.
    ///
    /// The id is stored as given, even when the catalog does not know it;
    /// use [`ConfigPanel::choose_step`] to validate first.
    pub fn set_active_step_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        tracing::trace!(from = ?self.state(), step = %id, "set_active_step_id");
        self.is_open = true;
        self.active_step_id = Some(id);
    }

    /// Validating variant of [`ConfigPanel::set_active_step_id`]. State is
    /// untouched on error.
    pub fn choose_step(
        &mut self,
        catalog: &StepCatalog,
        id: &str,
    ) -> Result<&'static StepDefinition, AutomationError> {
        let step = catalog
            .find(id)
            .ok_or_else(|| AutomationError::UnknownStepId(id.to_string()))?;
        self.set_active_step_id(step.id);
        Ok(step)
    }

    pub fn close_step_config(&mut self) {
        tracing::trace!(from = ?self.state(), "close_step_config");
        self.is_open = false;
        self.active_step_id = None;
    }

    pub fn active_step(&self, catalog: &StepCatalog) -> Option<&'static StepDefinition> {
        self.active_step_id.as_deref().and_then(|id| catalog.find(id))
    }

    pub fn active_step_config(&self, catalog: &StepCatalog) -> Option<StepConfigView> {
        self.active_step(catalog).map(StepDefinition::config)
    }

    pub fn view(&self, catalog: &StepCatalog) -> PanelView {
        PanelView::of(self, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_panel_is_closed() {
        let panel = ConfigPanel::new();
        assert_eq!(panel.state(), PanelState::Closed);
        assert_eq!(panel.active_step_id(), None);
    }

    #[test]
    fn reopening_keeps_active_step() {
        let mut panel = ConfigPanel::new();
        panel.set_active_step_id("Pause for");
        panel.open_step_config();
        assert_eq!(panel.state(), PanelState::FormOpen("Pause for".into()));
    }

    #[test]
    fn choose_step_rejects_unknown_id_without_changing_state() {
        let mut panel = ConfigPanel::new();
        panel.open_step_config();
        let err = panel
            .choose_step(StepCatalog::global(), "Send a fax")
            .unwrap_err();
        assert_eq!(err, AutomationError::UnknownStepId("Send a fax".into()));
        assert_eq!(panel.state(), PanelState::ChooserOpen);
    }
}
