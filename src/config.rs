//! Editor configuration. Every field has a default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::AutomationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Where cancelling a new automation navigates to.
    pub list_url: String,
    pub fit_view_padding: f64,
    pub min_zoom: f64,
    pub nodes_draggable: bool,
    pub nodes_connectable: bool,
    pub zoom_on_double_click: bool,
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            list_url: "/automations".into(),
            fit_view_padding: 0.95,
            min_zoom: 0.2,
            nodes_draggable: false,
            nodes_connectable: false,
            zoom_on_double_click: false,
            node_width: 200.0,
            node_height: 150.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, AutomationError> {
        let config: EditorConfig =
            serde_json::from_str(json).map_err(|e| AutomationError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), AutomationError> {
        if self.node_width <= 0.0 || self.node_height <= 0.0 {
            return Err(AutomationError::Config(format!(
                "node size must be positive, got {}x{}",
                self.node_width, self.node_height
            )));
        }
        if self.min_zoom <= 0.0 {
            return Err(AutomationError::Config(format!(
                "minZoom must be positive, got {}",
                self.min_zoom
            )));
        }
        Ok(())
    }

    pub fn graph_options(&self) -> GraphViewOptions {
        GraphViewOptions {
            fit_view: true,
            fit_view_padding: self.fit_view_padding,
            min_zoom: self.min_zoom,
            nodes_draggable: self.nodes_draggable,
            nodes_connectable: self.nodes_connectable,
            zoom_on_double_click: self.zoom_on_double_click,
        }
    }
}

/// Renderer-facing subset of the config.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphViewOptions {
    pub fit_view: bool,
    pub fit_view_padding: f64,
    pub min_zoom: f64,
    pub nodes_draggable: bool,
    pub nodes_connectable: bool,
    pub zoom_on_double_click: bool,
}
