//! Integration tests for the automation scene: loading, view selection,
//! cancel/save and step edits driven by the configuration panel.

mod helpers;

use automation_editor::catalog::StepKind;
use automation_editor::config::EditorConfig;
use automation_editor::model::AutomationId;
use automation_editor::panel::PanelView;
use automation_editor::projection::TreeLayout;
use automation_editor::scene::{AutomationScene, AutomationStore, CancelOutcome, InMemoryStore, SceneView};
use automation_editor::AutomationError;

use helpers::*;

fn existing_scene(store: &impl AutomationStore) -> AutomationScene {
    AutomationScene::open(AutomationId::Existing(12), EditorConfig::default(), store)
}

#[test]
fn new_automation_renders_editor_without_loading() {
    let scene = AutomationScene::new(AutomationId::New, EditorConfig::default());
    let SceneView::Editor { title, panel, graph_options } = scene.view() else {
        panic!("expected the editor");
    };
    assert_eq!(title, "New automation");
    assert!(panel.is_none());
    assert!(!graph_options.nodes_draggable);
    assert_eq!(graph_options.fit_view_padding, 0.95);
}

#[test]
fn loading_wins_over_everything() {
    let mut scene = AutomationScene::new(AutomationId::Existing(12), EditorConfig::default());
    scene.panel_mut().open_step_config();
    let request = scene.begin_load().expect("existing automation loads");
    assert_eq!(request.id, 12);
    assert_eq!(scene.view(), SceneView::Loading);
    assert!(scene.graph(&TreeLayout::default()).is_none());
}

#[test]
fn loaded_automation_renders_edit_title() {
    let scene = existing_scene(&seeded_store());
    assert!(!scene.is_loading());
    assert!(matches!(
        scene.view(),
        SceneView::Editor { title: "Edit automation", .. }
    ));
    assert_eq!(scene.automation().unwrap().steps.len(), 3);
}

#[test]
fn missing_automation_renders_not_found() {
    let scene = AutomationScene::open(
        AutomationId::Existing(99),
        EditorConfig::default(),
        &seeded_store(),
    );
    assert_eq!(scene.view(), SceneView::NotFound);
    assert_eq!(
        scene.last_error(),
        Some(&AutomationError::AutomationNotFound(AutomationId::Existing(99)))
    );
}

#[test]
fn load_failure_is_recorded() {
    let scene = existing_scene(&FailingStore("connection reset"));
    assert_eq!(scene.view(), SceneView::NotFound);
    let err = scene.last_error().unwrap();
    assert_eq!(err.code(), "S002");
    assert_eq!(err.to_string(), "failed to load automation: connection reset");
}

#[test]
fn new_automation_has_nothing_to_load() {
    let mut scene = AutomationScene::new(AutomationId::New, EditorConfig::default());
    assert!(scene.begin_load().is_none());
    assert!(!scene.is_loading());
}

#[test]
fn stale_load_response_is_discarded() {
    let store = seeded_store();
    let mut scene = AutomationScene::new(AutomationId::Existing(12), EditorConfig::default());

    let first = scene.begin_load().unwrap();
    let second = scene.begin_load().unwrap();
    assert!(second.token > first.token);

    assert!(!scene.finish_load(first.token, Ok(None)));
    assert!(scene.is_loading());

    assert!(scene.finish_load(second.token, store.load(second.id)));
    assert!(scene.automation().is_some());

    // A late duplicate of an applied response changes nothing.
    assert!(!scene.finish_load(second.token, Ok(None)));
    assert!(scene.automation().is_some());
}

#[test]
fn panel_is_rendered_only_when_open() {
    let mut scene = existing_scene(&seeded_store());
    scene.panel_mut().open_step_config();
    let SceneView::Editor { panel, .. } = scene.view() else {
        panic!("expected the editor");
    };
    assert!(matches!(panel, Some(PanelView::Chooser(_))));

    scene.panel_mut().close_step_config();
    let SceneView::Editor { panel, .. } = scene.view() else {
        panic!("expected the editor");
    };
    assert!(panel.is_none());
}

#[test]
fn configured_step_is_appended_and_panel_closes() {
    let mut scene = existing_scene(&seeded_store());
    scene.panel_mut().open_step_config();
    scene.panel_mut().set_active_step_id("Send to slack");

    let id = scene.add_configured_step(Some("step-3")).unwrap();
    assert_eq!(id, "step-4");
    assert!(!scene.panel().is_open());

    let graph = scene.graph(&TreeLayout::default()).unwrap();
    assert_eq!(graph.flow.node("step-4").unwrap().label, "Send to slack");
    assert_eq!(graph.positions.len(), graph.flow.nodes.len());
}

#[test]
fn configured_step_inserted_on_edge() {
    let mut scene = existing_scene(&seeded_store());
    scene.panel_mut().set_active_step_id("Pause until");
    let id = scene.insert_configured_step("edge-1").unwrap();
    let automation = scene.automation().unwrap();
    assert_eq!(automation.edge("edge-1").unwrap().target, id);
    assert!(scene.issues().is_empty());
}

#[test]
fn adding_without_active_step_fails() {
    let mut scene = existing_scene(&seeded_store());
    scene.panel_mut().open_step_config();
    assert_eq!(scene.add_configured_step(None), Err(AutomationError::NoActiveStep));
    assert!(scene.panel().is_open());
}

#[test]
fn adding_an_unknown_step_fails_and_keeps_panel_open() {
    let mut scene = existing_scene(&seeded_store());
    scene.panel_mut().set_active_step_id("Send a fax");
    assert_eq!(
        scene.add_configured_step(None),
        Err(AutomationError::UnknownStepId("Send a fax".into()))
    );
    assert!(scene.panel().is_open());
    assert_eq!(scene.automation().unwrap().steps.len(), 3);
}

#[test]
fn cancel_new_navigates_to_list() {
    let mut scene = AutomationScene::new(
        AutomationId::New,
        EditorConfig::from_json(r#"{"listUrl": "/project/1/automations"}"#).unwrap(),
    );
    let outcome = scene.cancel_with(&InMemoryStore::new()).unwrap();
    assert_eq!(outcome, CancelOutcome::Navigate("/project/1/automations".into()));
}

#[test]
fn cancel_existing_discards_edits_and_reloads() {
    let store = CountingStore::new(seeded_store());
    let mut scene = existing_scene(&store);
    assert_eq!(store.loads.get(), 1);

    scene.panel_mut().set_active_step_id("Send an email");
    scene.add_configured_step(None).unwrap();
    assert_eq!(scene.automation().unwrap().steps.len(), 4);

    let outcome = scene.cancel_with(&store).unwrap();
    assert!(matches!(outcome, CancelOutcome::Reload(_)));
    assert_eq!(store.loads.get(), 2);
    assert_eq!(scene.automation().unwrap().steps.len(), 3);
    assert!(!scene.editing_existing());
}

#[test]
fn cancel_keeps_persisted_copy_when_reload_fails() {
    let mut scene = existing_scene(&seeded_store());
    scene.panel_mut().set_active_step_id("Send an email");
    scene.add_configured_step(None).unwrap();
    assert_eq!(scene.automation().unwrap().steps.len(), 4);

    let outcome = scene.cancel_with(&FailingStore("offline")).unwrap();
    assert!(matches!(outcome, CancelOutcome::Reload(_)));
    assert_eq!(scene.automation().unwrap().steps.len(), 3);
    assert!(matches!(scene.view(), SceneView::Editor { .. }));
    assert_eq!(scene.last_error().unwrap().code(), "S002");
}

#[test]
fn title_follows_editing_flag_after_cancel() {
    let store = seeded_store();
    let mut scene = existing_scene(&store);
    scene.cancel_with(&store).unwrap();
    assert!(matches!(
        scene.view(),
        SceneView::Editor { title: "New automation", .. }
    ));
    assert_eq!(
        scene.cancel().unwrap(),
        CancelOutcome::Navigate("/automations".into())
    );
}

#[test]
fn cancel_and_save_refused_while_loading() {
    let store = seeded_store();
    let mut scene = AutomationScene::new(AutomationId::Existing(12), EditorConfig::default());
    scene.begin_load();
    assert_eq!(scene.cancel(), Err(AutomationError::Busy));
    assert_eq!(scene.save(&store).unwrap_err(), AutomationError::Busy);
}

#[test]
fn saving_new_automation_adopts_assigned_id() {
    let store = InMemoryStore::new();
    let mut scene = AutomationScene::new(AutomationId::New, EditorConfig::default());
    scene.panel_mut().set_active_step_id("Event sent");
    scene.add_configured_step(None).unwrap();

    let saved = scene.save(&store).unwrap();
    assert_eq!(saved.id, AutomationId::Existing(1));
    assert_eq!(saved.steps[0].kind, StepKind::EventSource);

    assert_eq!(scene.automation_id(), AutomationId::Existing(1));
    assert!(scene.editing_existing());
    assert!(matches!(
        scene.view(),
        SceneView::Editor { title: "Edit automation", .. }
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn save_failure_is_surfaced_and_edits_kept() {
    let mut scene = AutomationScene::new(AutomationId::New, EditorConfig::default());
    scene.panel_mut().set_active_step_id("Action triggered");
    scene.add_configured_step(None).unwrap();

    let err = scene.save(&FailingStore("quota exceeded")).unwrap_err();
    assert_eq!(err.code(), "S003");
    assert_eq!(scene.last_error(), Some(&err));
    assert_eq!(scene.automation_id(), AutomationId::New);
    assert_eq!(scene.automation().unwrap().steps.len(), 1);
}
