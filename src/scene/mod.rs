//! Automation scene: load state, the in-progress automation, and the step
//! configuration panel, composed into what the editor should show.
//!
//! Loads are split into [`AutomationScene::begin_load`] and
//! [`AutomationScene::finish_load`] so the caller can run the request however
//! it likes. Each request carries a token; only the response to the newest
//! request is applied.

pub mod store;

pub use store::{AutomationStore, InMemoryStore, StoreError};

use crate::catalog::{StepCatalog, StepKind};
use crate::config::{EditorConfig, GraphViewOptions};
use crate::error::AutomationError;
use crate::model::{Automation, AutomationId};
use crate::panel::{ConfigPanel, PanelView};
use crate::projection::{project_graph, FlowGraph, GraphLayout, PositionedNode};
use crate::validate::{validate_automation, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: u64,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Edits were discarded; complete the request with `finish_load`.
    Reload(LoadRequest),
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneView {
    Loading,
    NotFound,
    Editor {
        title: &'static str,
        graph_options: GraphViewOptions,
        panel: Option<PanelView>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    pub flow: FlowGraph,
    pub positions: Vec<PositionedNode>,
}

pub struct AutomationScene {
    automation_id: AutomationId,
    config: EditorConfig,
    automation: Option<Automation>,
    /// Last copy loaded from or saved to the store, without local edits.
    persisted: Option<Automation>,
    loading: bool,
    editing_existing: bool,
    panel: ConfigPanel,
    last_error: Option<AutomationError>,
    load_token: u64,
}

impl AutomationScene {
    /// A new automation starts from an empty draft; an existing one starts
    /// empty until loaded.
    pub fn new(automation_id: AutomationId, config: EditorConfig) -> Self {
        AutomationScene {
            automation_id,
            config,
            automation: automation_id.is_new().then(Automation::draft),
            persisted: None,
            loading: false,
            editing_existing: !automation_id.is_new(),
            panel: ConfigPanel::new(),
            last_error: None,
            load_token: 0,
        }
    }

    /// Create the scene and run the initial load against `store`.
    pub fn open(
        automation_id: AutomationId,
        config: EditorConfig,
        store: &impl AutomationStore,
    ) -> Self {
        let mut scene = Self::new(automation_id, config);
        scene.load_with(store);
        scene
    }

    pub fn automation_id(&self) -> AutomationId {
        self.automation_id
    }

    pub fn automation(&self) -> Option<&Automation> {
        self.automation.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn editing_existing(&self) -> bool {
        self.editing_existing
    }

    pub fn set_edit_automation(&mut self, editing: bool) {
        self.editing_existing = editing;
    }

    pub fn last_error(&self) -> Option<&AutomationError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn panel(&self) -> &ConfigPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ConfigPanel {
        &mut self.panel
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Issue a load for the persisted automation. Returns `None` for a new
    /// automation, which has nothing to load. Supersedes any load in flight.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        let id = self.automation_id.existing()?;
        self.load_token += 1;
        self.loading = true;
        self.last_error = None;
        tracing::debug!(automation = id, token = self.load_token, "loading automation");
        Some(LoadRequest {
            token: self.load_token,
            id,
        })
    }

    /// Apply a load response. Returns `false` when the response is stale and
    /// was discarded.
    pub fn finish_load(
        &mut self,
        token: u64,
        result: Result<Option<Automation>, StoreError>,
    ) -> bool {
        if !self.loading || token != self.load_token {
            tracing::debug!(token, current = self.load_token, "discarding stale load response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(Some(automation)) => {
                tracing::debug!(automation = %self.automation_id, "automation loaded");
                self.persisted = Some(automation.clone());
                self.automation = Some(automation);
            }
            Ok(None) => {
                tracing::debug!(automation = %self.automation_id, "automation not found");
                self.automation = None;
                self.persisted = None;
                self.last_error = Some(AutomationError::AutomationNotFound(self.automation_id));
            }
            Err(e) => {
                tracing::warn!(automation = %self.automation_id, error = %e, "failed to load automation");
                self.last_error = Some(AutomationError::LoadFailure(e));
            }
        }
        true
    }

    /// Run a load to completion against `store`.
    pub fn load_with(&mut self, store: &impl AutomationStore) {
        if let Some(request) = self.begin_load() {
            let result = store.load(request.id);
            self.finish_load(request.token, result);
        }
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    pub fn view(&self) -> SceneView {
        if self.loading {
            return SceneView::Loading;
        }
        if self.automation.is_none() && !self.automation_id.is_new() {
            return SceneView::NotFound;
        }
        let title = if self.editing_existing {
            "Edit automation"
        } else {
            "New automation"
        };
        SceneView::Editor {
            title,
            graph_options: self.config.graph_options(),
            panel: self
                .panel
                .is_open()
                .then(|| self.panel.view(StepCatalog::global())),
        }
    }

    /// Projected and laid-out graph of the in-progress automation.
    pub fn graph(&self, layout: &dyn GraphLayout) -> Option<SceneGraph> {
        if self.loading {
            return None;
        }
        let flow = project_graph(self.automation.as_ref()?);
        let positions = layout.layout(&flow);
        Some(SceneGraph { flow, positions })
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        self.automation
            .as_ref()
            .map(validate_automation)
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Step edits
    // -------------------------------------------------------------------------

    /// Append the step chosen in the panel as a child of `parent`, then close
    /// the panel.
    pub fn add_configured_step(&mut self, parent: Option<&str>) -> Result<String, AutomationError> {
        let kind = self.configured_kind()?;
        let automation = self.editable()?;
        let step_id = automation.append_step(kind, parent)?;
        self.panel.close_step_config();
        Ok(step_id)
    }

    /// Insert the step chosen in the panel on `edge_id`, then close the panel.
    pub fn insert_configured_step(&mut self, edge_id: &str) -> Result<String, AutomationError> {
        let kind = self.configured_kind()?;
        let automation = self.editable()?;
        let step_id = automation.insert_step_on_edge(edge_id, kind)?;
        self.panel.close_step_config();
        Ok(step_id)
    }

    fn configured_kind(&self) -> Result<StepKind, AutomationError> {
        let id = self
            .panel
            .active_step_id()
            .ok_or(AutomationError::NoActiveStep)?;
        self.panel
            .active_step(StepCatalog::global())
            .map(|step| step.kind)
            .ok_or_else(|| AutomationError::UnknownStepId(id.to_string()))
    }

    fn editable(&mut self) -> Result<&mut Automation, AutomationError> {
        if self.loading {
            return Err(AutomationError::Busy);
        }
        self.automation
            .as_mut()
            .ok_or(AutomationError::AutomationNotFound(self.automation_id))
    }

    // -------------------------------------------------------------------------
    // Cancel / save
    // -------------------------------------------------------------------------

    /// Discard edits. An existing automation being edited falls back to its
    /// persisted copy and is reloaded; a new one navigates back to the list.
    pub fn cancel(&mut self) -> Result<CancelOutcome, AutomationError> {
        if self.loading {
            return Err(AutomationError::Busy);
        }
        self.panel.close_step_config();
        if self.editing_existing {
            self.editing_existing = false;
            self.automation = self.persisted.clone();
            if let Some(request) = self.begin_load() {
                return Ok(CancelOutcome::Reload(request));
            }
        }
        Ok(CancelOutcome::Navigate(self.config.list_url.clone()))
    }

    /// [`AutomationScene::cancel`], completing any reload against `store`.
    pub fn cancel_with(
        &mut self,
        store: &impl AutomationStore,
    ) -> Result<CancelOutcome, AutomationError> {
        let outcome = self.cancel()?;
        if let CancelOutcome::Reload(request) = &outcome {
            let result = store.load(request.id);
            self.finish_load(request.token, result);
        }
        Ok(outcome)
    }

    /// Submit the in-progress automation. On success the stored copy replaces
    /// it and a newly created automation adopts its assigned id.
    pub fn save(&mut self, store: &impl AutomationStore) -> Result<&Automation, AutomationError> {
        let automation = self.editable()?;
        tracing::debug!(automation = %automation.id, steps = automation.steps.len(), "saving automation");
        match store.save(automation) {
            Ok(saved) => {
                self.automation_id = saved.id;
                self.editing_existing = true;
                self.last_error = None;
                self.persisted = Some(saved.clone());
                Ok(&*self.automation.insert(saved))
            }
            Err(e) => {
                tracing::warn!(automation = %self.automation_id, error = %e, "failed to save automation");
                let err = AutomationError::SaveFailure(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}
