//! Integration tests for action routing and dispatch.

use inspector_core::{
    ActionRouter, ActionScope, ActionTarget, COPY_SUCCESS_MESSAGE, FIRST_LEVEL, InspectorHost,
    Notice, NoticeLevel, dispatch,
};
use inspector_model::{ActionKind, ClipboardError, CopyFormat, EntityCategory};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    RunQuery(Option<String>, Vec<String>),
    Select(Option<String>, Value),
    Remove(Value),
    Clipboard(String),
    Notify(Notice),
}

#[derive(Default)]
struct RecordingHost {
    calls: Vec<Call>,
    clipboard_broken: bool,
}

impl InspectorHost for RecordingHost {
    fn run_query(&mut self, query_id: Option<&str>, node: &ActionTarget<'_>) {
        self.calls.push(Call::RunQuery(
            query_id.map(str::to_string),
            node.path.iter().map(|s| s.to_string()).collect(),
        ));
    }

    fn select_component(&mut self, component_id: Option<&str>, component: &Value) {
        self.calls
            .push(Call::Select(component_id.map(str::to_string), component.clone()));
    }

    fn remove_component(&mut self, component: &Value) {
        self.calls.push(Call::Remove(component.clone()));
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.clipboard_broken {
            return Err(ClipboardError::new("permission denied"));
        }
        self.calls.push(Call::Clipboard(text.to_string()));
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.calls.push(Call::Notify(notice));
    }
}

fn labels(bindings: &[inspector_core::ActionBinding]) -> Vec<&'static str> {
    bindings.iter().map(|b| b.label()).collect()
}

#[test]
fn components_get_select_then_delete_at_first_level() {
    let router = ActionRouter::standard();
    assert_eq!(
        labels(router.route(ActionScope::Components, FIRST_LEVEL)),
        vec!["Select Widget", "Delete Widget"]
    );
    let select = &router.route(ActionScope::Components, FIRST_LEVEL)[0];
    assert!(select.on_select);
}

#[test]
fn deeper_nodes_only_copy() {
    let router = ActionRouter::standard();
    for depth in [0, 2, 3, 10] {
        assert_eq!(
            labels(router.route(ActionScope::Components, depth)),
            vec!["Copy value"]
        );
        assert_eq!(
            labels(router.route(ActionScope::Queries, depth)),
            vec!["Copy value"]
        );
    }
}

#[test]
fn queries_get_run_query_at_first_level() {
    let router = ActionRouter::standard();
    assert_eq!(
        labels(router.route(ActionScope::Queries, FIRST_LEVEL)),
        vec!["Run Query"]
    );
}

#[test]
fn all_scope_is_copy_at_any_depth() {
    let router = ActionRouter::standard();
    for depth in 0..5 {
        assert_eq!(labels(router.route(ActionScope::All, depth)), vec!["Copy value"]);
    }
}

#[test]
fn node_actions_append_copy_once() {
    let router = ActionRouter::standard();
    let kinds: Vec<ActionKind> = router
        .node_actions(Some(EntityCategory::Components), FIRST_LEVEL)
        .into_iter()
        .map(|b| b.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ActionKind::SelectWidget,
            ActionKind::DeleteWidget,
            ActionKind::CopyValue
        ]
    );

    let kinds: Vec<ActionKind> = router
        .node_actions(Some(EntityCategory::Queries), 2)
        .into_iter()
        .map(|b| b.kind)
        .collect();
    assert_eq!(kinds, vec![ActionKind::CopyValue]);

    assert_eq!(router.node_actions(None, FIRST_LEVEL).len(), 1);
}

#[test]
fn run_query_passes_id_and_node() {
    let value = json!({"id": "q-1", "isLoading": false});
    let path = ["queries", "getUsers"];
    let mut host = RecordingHost::default();

    dispatch(
        ActionKind::RunQuery,
        &ActionTarget::new(&path, &value),
        &mut host,
        CopyFormat::Pretty,
    );

    assert_eq!(
        host.calls,
        vec![Call::RunQuery(
            Some("q-1".to_string()),
            vec!["queries".to_string(), "getUsers".to_string()]
        )]
    );
}

#[test]
fn select_and_delete_forward_the_component() {
    let value = json!({"id": "c-1", "value": "x"});
    let path = ["components", "textInput1"];
    let target = ActionTarget::new(&path, &value);
    let mut host = RecordingHost::default();

    dispatch(ActionKind::SelectWidget, &target, &mut host, CopyFormat::Pretty);
    dispatch(ActionKind::DeleteWidget, &target, &mut host, CopyFormat::Pretty);

    assert_eq!(
        host.calls,
        vec![
            Call::Select(Some("c-1".to_string()), value.clone()),
            Call::Remove(value.clone()),
        ]
    );
}

#[test]
fn dispatch_does_not_check_the_target_exists() {
    let value = json!({"value": "orphan"});
    let path = ["components", "gone"];
    let mut host = RecordingHost::default();

    dispatch(
        ActionKind::SelectWidget,
        &ActionTarget::new(&path, &value),
        &mut host,
        CopyFormat::Pretty,
    );

    assert_eq!(host.calls, vec![Call::Select(None, value.clone())]);
}

#[test]
fn copy_strips_backslashes_and_signals_success() {
    let value = json!({"a": "x\\y"});
    let path = ["components", "a"];
    let mut host = RecordingHost::default();

    dispatch(
        ActionKind::CopyValue,
        &ActionTarget::new(&path, &value),
        &mut host,
        CopyFormat::Compact,
    );

    assert_eq!(
        host.calls,
        vec![
            Call::Clipboard(r#"{"a":"xy"}"#.to_string()),
            Call::Notify(Notice::success(COPY_SUCCESS_MESSAGE)),
        ]
    );
}

#[test]
fn pretty_copy_also_strips_escaped_quotes() {
    let value = json!({"quote": "say \"hi\""});
    let path = ["globals"];
    let mut host = RecordingHost::default();

    dispatch(
        ActionKind::CopyValue,
        &ActionTarget::new(&path, &value),
        &mut host,
        CopyFormat::Pretty,
    );

    assert_eq!(
        host.calls[0],
        Call::Clipboard("{\n  \"quote\": \"say \"hi\"\"\n}".to_string())
    );
}

#[test]
fn failed_clipboard_write_reports_an_error() {
    let value = json!(1);
    let path = ["globals", "count"];
    let mut host = RecordingHost {
        clipboard_broken: true,
        ..RecordingHost::default()
    };

    dispatch(
        ActionKind::CopyValue,
        &ActionTarget::new(&path, &value),
        &mut host,
        CopyFormat::Pretty,
    );

    assert_eq!(host.calls.len(), 1);
    match &host.calls[0] {
        Call::Notify(notice) => {
            assert_eq!(notice.level, NoticeLevel::Error);
            assert!(notice.message.contains("permission denied"));
        }
        other => panic!("expected an error notice, got {other:?}"),
    }
}
