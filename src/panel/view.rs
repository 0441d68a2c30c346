//! What the configuration panel shows for a given state.

use crate::catalog::{StepCatalog, StepConfigView, StepsByCategory};

use super::ConfigPanel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Hidden,
    /// Category-grouped picker, shown while no step is active.
    Chooser(StepsByCategory),
    /// Form header for the active step.
    Form { step_id: String, config: StepConfigView },
    /// The active id does not resolve to a catalog step.
    FormError { step_id: String },
}

impl PanelView {
    pub(super) fn of(panel: &ConfigPanel, catalog: &StepCatalog) -> Self {
        if !panel.is_open() {
            return PanelView::Hidden;
        }
        let Some(step_id) = panel.active_step_id() else {
            return PanelView::Chooser(catalog.list_steps_by_category());
        };
        match panel.active_step_config(catalog) {
            Some(config) => PanelView::Form {
                step_id: step_id.to_string(),
                config,
            },
            None => PanelView::FormError {
                step_id: step_id.to_string(),
            },
        }
    }

    /// Heading text as the panel renders it.
    pub fn heading(&self) -> Option<String> {
        match self {
            PanelView::Hidden => None,
            PanelView::Chooser(_) => Some("New step".to_string()),
            PanelView::Form { config, .. } => Some(format!("New step: {}", config.label)),
            PanelView::FormError { .. } => Some("Error loading step".to_string()),
        }
    }
}
