//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::catalog::{StepCatalog, StepCategory, StepKind};
use crate::error::AutomationError;
use crate::projection::{project_graph, FlowGraph, GraphLayout, PositionedNode, TreeLayout};
use crate::validate::ValidationIssue;

/// The chooser's step options, grouped by category.
#[wasm_bindgen]
pub fn step_options() -> JsValue {
    serde_wasm_bindgen::to_value(&step_options_inner()).unwrap_or(JsValue::NULL)
}

fn step_options_inner() -> Vec<CategoryDto> {
    StepCatalog::global()
        .list_steps_by_category()
        .iter()
        .map(|(category, steps)| CategoryDto {
            category,
            steps: steps
                .iter()
                .map(|s| StepOptionDto {
                    id: s.id.to_string(),
                    kind: s.kind,
                    label: s.label.to_string(),
                    icon: s.icon.name().to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Resolve a catalog id to its icon and label.
/// Returns `{ "status": "ok", ... }` or `{ "status": "error", ... }`.
#[wasm_bindgen]
pub fn resolve_step_config(id: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&resolve_step_config_inner(id)).unwrap_or(JsValue::NULL)
}

fn resolve_step_config_inner(id: &str) -> Outcome<StepOptionDto> {
    match StepCatalog::global().find(id) {
        Some(step) => {
            let config = step.config();
            Outcome::Ok(StepOptionDto {
                id: step.id.to_string(),
                kind: step.kind,
                label: config.label,
                icon: config.icon.name().to_string(),
            })
        }
        None => Outcome::Error(vec![AutomationError::UnknownStepId(id.to_string()).into()]),
    }
}

/// Project an automation JSON into laid-out renderer nodes and edges.
#[wasm_bindgen]
pub fn project_automation(json: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&project_automation_inner(json)).unwrap_or(JsValue::NULL)
}

fn project_automation_inner(json: &str) -> Outcome<ProjectionDto> {
    let automation = match crate::model::parse(json) {
        Ok(a) => a,
        Err(e) => return Outcome::Error(vec![ErrorDto::from(e)]),
    };
    let graph = project_graph(&automation);
    let positions = TreeLayout::default().layout(&graph);
    Outcome::Ok(ProjectionDto { graph, positions })
}

/// Validate an automation JSON. Returns a JSON array of issues.
#[wasm_bindgen]
pub fn validate_automation_json(json: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&validate_automation_inner(json)).unwrap_or(JsValue::NULL)
}

fn validate_automation_inner(json: &str) -> Vec<ErrorDto> {
    match crate::model::parse(json) {
        Ok(automation) => crate::validate::validate_automation(&automation)
            .into_iter()
            .map(ErrorDto::from)
            .collect(),
        Err(e) => vec![ErrorDto::from(e)],
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    message: String,
    step_id: Option<String>,
}

impl From<AutomationError> for ErrorDto {
    fn from(e: AutomationError) -> Self {
        ErrorDto {
            code: e.code().to_string(),
            message: e.to_string(),
            step_id: None,
        }
    }
}

impl From<ValidationIssue> for ErrorDto {
    fn from(issue: ValidationIssue) -> Self {
        ErrorDto {
            code: issue.code.to_string(),
            message: issue.message,
            step_id: issue.step_id,
        }
    }
}

#[derive(serde::Serialize)]
struct CategoryDto {
    category: StepCategory,
    steps: Vec<StepOptionDto>,
}

#[derive(serde::Serialize)]
struct StepOptionDto {
    id: String,
    kind: StepKind,
    label: String,
    icon: String,
}

#[derive(serde::Serialize)]
struct ProjectionDto {
    graph: FlowGraph,
    positions: Vec<PositionedNode>,
}

#[derive(serde::Serialize)]
#[serde(tag = "status", content = "result")]
enum Outcome<T> {
    #[serde(rename = "ok")]
    Ok(T),
    #[serde(rename = "error")]
    Error(Vec<ErrorDto>),
}
