//! Integration tests for the recomputation controller.

use std::sync::Arc;

use inspector_core::{ActionTarget, InspectorController, InspectorHost, InspectorInputs, Notice};
use inspector_model::{
    ActionKind, AppDefinition, ClipboardError, DataSource, DataSourceRegistry, EntityCategory,
    IconSource, InspectorOptions, QueryDefinition, RecomputePolicy, RuntimeState,
    SelectedComponent, WidgetDefinition,
};
use serde_json::{Value, json};

fn shared_state(value: Value) -> Arc<RuntimeState> {
    Arc::new(RuntimeState::from_value(value).expect("state fixture"))
}

fn sample_state() -> Arc<RuntimeState> {
    shared_state(json!({
        "components": {"b": {"id": "2"}, "a": {"id": "1"}},
        "queries": {}
    }))
}

#[test]
fn same_inputs_reuse_the_projection() {
    let state = sample_state();
    let app = AppDefinition::new();
    let registry = DataSourceRegistry::default();
    let mut controller = InspectorController::default();

    let first = controller.refresh(&InspectorInputs::new(&state, &app, &registry));
    let second = controller.refresh(&InspectorInputs::new(&state, &app, &registry));

    assert!(Arc::ptr_eq(&first.projection, &second.projection));
    assert_eq!(controller.stats().projections, 1);
    assert_eq!(controller.stats().reused, 1);
}

#[test]
fn equal_but_new_state_recomputes() {
    let app = AppDefinition::new();
    let registry = DataSourceRegistry::default();
    let mut controller = InspectorController::default();

    let first = controller.refresh(&InspectorInputs::new(&sample_state(), &app, &registry));
    let second = controller.refresh(&InspectorInputs::new(&sample_state(), &app, &registry));

    assert!(!Arc::ptr_eq(&first.projection, &second.projection));
    assert_eq!(first.projection, second.projection);
    assert_eq!(controller.stats().projections, 2);
}

#[test]
fn state_only_policy_misses_query_renames() {
    let state = sample_state();
    let registry = DataSourceRegistry::default();
    let options = InspectorOptions::default().with_recompute(RecomputePolicy::StateOnly);
    let mut controller = InspectorController::new(options);

    let app = AppDefinition::new().with_queries(vec![QueryDefinition::new("q-1", "before")]);
    let first = controller.refresh(&InspectorInputs::new(&state, &app, &registry));
    assert_eq!(first.tree().entity_names(EntityCategory::Queries), vec!["before"]);

    let renamed = app.with_queries(vec![QueryDefinition::new("q-1", "after")]);
    let stale = controller.refresh(&InspectorInputs::new(&state, &renamed, &registry));
    assert_eq!(stale.tree().entity_names(EntityCategory::Queries), vec!["before"]);
    assert_eq!(controller.stats().projections, 1);
}

#[test]
fn tracked_policy_picks_up_query_renames() {
    let state = sample_state();
    let registry = DataSourceRegistry::default();
    let mut controller = InspectorController::default();

    let app = AppDefinition::new().with_queries(vec![QueryDefinition::new("q-1", "before")]);
    controller.refresh(&InspectorInputs::new(&state, &app, &registry));

    let renamed = app.with_queries(vec![QueryDefinition::new("q-1", "after")]);
    let fresh = controller.refresh(&InspectorInputs::new(&state, &renamed, &registry));

    assert_eq!(fresh.tree().entity_names(EntityCategory::Queries), vec!["after"]);
    assert_eq!(controller.stats().projections, 2);
}

#[test]
fn tracked_policy_picks_up_new_plugins() {
    let state = shared_state(json!({"queries": {"list": {"kind": "airtable"}}}));
    let app = AppDefinition::new();
    let mut controller = InspectorController::default();

    let before = controller.refresh(&InspectorInputs::new(
        &state,
        &app,
        &DataSourceRegistry::default(),
    ));
    assert!(before.icons().get("list").is_none());

    let registry = DataSourceRegistry::new(vec![DataSource::new("airtable", "Airtable")]);
    let after = controller.refresh(&InspectorInputs::new(&state, &app, &registry));
    assert_eq!(
        after.icons().get("list"),
        Some(&IconSource::Named("airtable".to_string()))
    );
}

#[test]
fn selection_is_rebuilt_only_when_it_changes() {
    let state = sample_state();
    let registry = DataSourceRegistry::default();
    let mut controller = InspectorController::default();

    let app = AppDefinition::new().with_selected(Some(SelectedComponent {
        id: Some("c-1".to_string()),
        component: Some(WidgetDefinition {
            name: "button1".to_string(),
            widget_type: "Button".to_string(),
        }),
    }));

    let first = controller.refresh(&InspectorInputs::new(&state, &app, &registry));
    let second = controller.refresh(&InspectorInputs::new(&state, &app, &registry));
    assert!(Arc::ptr_eq(&first.selection, &second.selection));
    assert_eq!(first.selection.id.as_deref(), Some("c-1"));
    assert_eq!(first.selection.component_name.as_deref(), Some("button1"));

    let cleared = app.with_selected(None);
    let third = controller.refresh(&InspectorInputs::new(&state, &cleared, &registry));
    assert!(third.selection.is_empty());
    assert_eq!(controller.stats().selections, 2);
    // The projection did not depend on the selection.
    assert_eq!(controller.stats().projections, 1);
}

#[test]
fn invalidate_forces_a_rebuild() {
    let state = sample_state();
    let app = AppDefinition::new();
    let registry = DataSourceRegistry::default();
    let mut controller = InspectorController::default();

    controller.refresh(&InspectorInputs::new(&state, &app, &registry));
    controller.invalidate();
    controller.refresh(&InspectorInputs::new(&state, &app, &registry));

    assert_eq!(controller.stats().projections, 2);
    assert_eq!(controller.stats().selections, 2);
}

#[test]
fn model_annotates_entities_and_routes_by_path() {
    let state = sample_state();
    let app = AppDefinition::new();
    let registry = DataSourceRegistry::default();
    let mut controller = InspectorController::default();

    let model = controller.refresh(&InspectorInputs::new(&state, &app, &registry));

    let node = model.tree().entity(EntityCategory::Components, "a").unwrap();
    assert_eq!(
        node.actions,
        vec![
            ActionKind::SelectWidget,
            ActionKind::DeleteWidget,
            ActionKind::CopyValue
        ]
    );

    let routed: Vec<ActionKind> = model
        .actions_at(&["components", "a"])
        .into_iter()
        .map(|b| b.kind)
        .collect();
    assert_eq!(routed, node.actions);

    let labels: Vec<&str> = model
        .actions_at(&["components", "a", "id"])
        .into_iter()
        .map(|b| b.label())
        .collect();
    assert_eq!(labels, vec!["Copy value"]);
}

#[derive(Default)]
struct ClipboardOnly {
    text: Option<String>,
    notices: Vec<Notice>,
}

impl InspectorHost for ClipboardOnly {
    fn run_query(&mut self, _query_id: Option<&str>, _node: &ActionTarget<'_>) {}

    fn select_component(&mut self, _component_id: Option<&str>, _component: &Value) {}

    fn remove_component(&mut self, _component: &Value) {}

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[test]
fn model_dispatches_on_resolved_paths() {
    let state = sample_state();
    let app = AppDefinition::new();
    let registry = DataSourceRegistry::default();
    let mut controller = InspectorController::default();
    let model = controller.refresh(&InspectorInputs::new(&state, &app, &registry));
    let mut host = ClipboardOnly::default();

    assert!(model.dispatch(ActionKind::CopyValue, &["components", "b"], &mut host));
    assert_eq!(host.text.as_deref(), Some("{\n  \"id\": \"2\"\n}"));
    assert_eq!(host.notices.len(), 1);

    assert!(!model.dispatch(ActionKind::CopyValue, &["components", "zzz"], &mut host));
    assert_eq!(host.notices.len(), 1);
}

#[test]
fn hiding_queries_in_code_keeps_live_query_data() {
    let state = shared_state(json!({
        "queries": {"getUsers": {"isLoading": false, "data": [1]}}
    }));
    let app = AppDefinition::new().with_queries(vec![QueryDefinition::new("q-1", "getUsers")]);
    let registry = DataSourceRegistry::default();
    let options = InspectorOptions {
        hidden_categories: vec!["queries".to_string(), "errors".to_string()],
        ..InspectorOptions::default()
    };
    let mut controller = InspectorController::new(options);

    let model = controller.refresh(&InspectorInputs::new(&state, &app, &registry));

    assert_eq!(
        model.tree().entity(EntityCategory::Queries, "getUsers").unwrap().value,
        json!({"isLoading": false, "data": [1], "id": "q-1"})
    );
}
