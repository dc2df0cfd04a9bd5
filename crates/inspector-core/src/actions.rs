//! Action routing and dispatch.
//!
//! Actions are registered per category, not per node: a query or component
//! gets its category's actions only at the first level below the category,
//! and every node at any depth can copy its value. The host owns every
//! mutation; dispatch only forwards to it and never checks that the target
//! still exists.

use std::fmt;

use inspector_model::{ActionKind, ClipboardError, CopyFormat, EntityCategory};
use serde_json::Value;
use tracing::{debug, warn};

/// Depth of an entity directly below its category node.
pub const FIRST_LEVEL: usize = 1;

pub const COPY_SUCCESS_MESSAGE: &str = "Copied to the clipboard";

/// Category tag an action set is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionScope {
    Queries,
    Components,
    All,
}

impl ActionScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queries => "queries",
            Self::Components => "components",
            Self::All => "all",
        }
    }
}

impl From<EntityCategory> for ActionScope {
    fn from(category: EntityCategory) -> Self {
        match category {
            EntityCategory::Queries => Self::Queries,
            EntityCategory::Components => Self::Components,
        }
    }
}

impl fmt::Display for ActionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionIcon {
    Asset {
        src: &'static str,
        width: u32,
        height: u32,
    },
    Named(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub kind: ActionKind,
    pub icon: Option<ActionIcon>,
    /// Also fired when the node itself is selected.
    pub on_select: bool,
}

impl ActionBinding {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            icon: None,
            on_select: false,
        }
    }

    pub fn with_icon(mut self, icon: ActionIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn on_select(mut self) -> Self {
        self.on_select = true;
        self
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    pub scope: ActionScope,
    pub bindings: Vec<ActionBinding>,
    pub first_level_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRouter {
    sets: Vec<ActionSet>,
}

impl Default for ActionRouter {
    fn default() -> Self {
        Self::standard()
    }
}

impl ActionRouter {
    pub fn new(sets: Vec<ActionSet>) -> Self {
        Self { sets }
    }

    /// The inspector's action table.
    pub fn standard() -> Self {
        Self::new(vec![
            ActionSet {
                scope: ActionScope::Queries,
                bindings: vec![ActionBinding::new(ActionKind::RunQuery).with_icon(
                    ActionIcon::Asset {
                        src: "assets/images/icons/editor/play.svg",
                        width: 8,
                        height: 8,
                    },
                )],
                first_level_only: true,
            },
            ActionSet {
                scope: ActionScope::Components,
                bindings: vec![
                    ActionBinding::new(ActionKind::SelectWidget).on_select(),
                    ActionBinding::new(ActionKind::DeleteWidget)
                        .with_icon(ActionIcon::Named("trash")),
                ],
                first_level_only: true,
            },
            ActionSet {
                scope: ActionScope::All,
                bindings: vec![ActionBinding::new(ActionKind::CopyValue)],
                first_level_only: false,
            },
        ])
    }

    pub fn set(&self, scope: ActionScope) -> Option<&ActionSet> {
        self.sets.iter().find(|s| s.scope == scope)
    }

    /// Actions of `scope` at `depth`.
    ///
    /// A first-level-only set is offered at [`FIRST_LEVEL`] and nowhere
    /// else; everywhere else the `all` set applies.
    pub fn route(&self, scope: ActionScope, depth: usize) -> &[ActionBinding] {
        match self.set(scope) {
            Some(set) if !set.first_level_only || depth == FIRST_LEVEL => &set.bindings,
            _ => self.all(),
        }
    }

    /// Everything a node offers: its category's actions, then `all`.
    pub fn node_actions(
        &self,
        category: Option<EntityCategory>,
        depth: usize,
    ) -> Vec<&ActionBinding> {
        let mut actions: Vec<&ActionBinding> = match category {
            Some(category) => self.route(category.into(), depth).iter().collect(),
            None => Vec::new(),
        };
        for binding in self.all() {
            if !actions.iter().any(|a| a.kind == binding.kind) {
                actions.push(binding);
            }
        }
        actions
    }

    fn all(&self) -> &[ActionBinding] {
        self.set(ActionScope::All)
            .map(|s| s.bindings.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePosition {
    TopCenter,
}

/// A toast shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub position: NoticePosition,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            position: NoticePosition::TopCenter,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            position: NoticePosition::TopCenter,
        }
    }
}

/// The node an action is dispatched on.
#[derive(Debug, Clone, Copy)]
pub struct ActionTarget<'a> {
    pub path: &'a [&'a str],
    pub value: &'a Value,
}

impl<'a> ActionTarget<'a> {
    pub fn new(path: &'a [&'a str], value: &'a Value) -> Self {
        Self { path, value }
    }

    pub fn key(&self) -> Option<&'a str> {
        self.path.last().copied()
    }

    /// The `id` field of the node's value, when it is a string.
    pub fn entity_id(&self) -> Option<&'a str> {
        self.value.get("id").and_then(Value::as_str)
    }
}

/// Mutation and notification entry points supplied by the host.
pub trait InspectorHost {
    fn run_query(&mut self, query_id: Option<&str>, node: &ActionTarget<'_>);

    fn select_component(&mut self, component_id: Option<&str>, component: &Value);

    fn remove_component(&mut self, component: &Value);

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn notify(&mut self, notice: Notice);
}

/// Text placed on the clipboard by "Copy value".
///
/// Backslashes are stripped: the text is meant for pasting into
/// human-readable places, not for parsing back.
pub fn clipboard_text(value: &Value, format: CopyFormat) -> serde_json::Result<String> {
    let text = match format {
        CopyFormat::Pretty => serde_json::to_string_pretty(value)?,
        CopyFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(text.replace('\\', ""))
}

pub fn dispatch(
    kind: ActionKind,
    target: &ActionTarget<'_>,
    host: &mut dyn InspectorHost,
    format: CopyFormat,
) {
    debug!(action = %kind, path = ?target.path, "dispatching inspector action");
    match kind {
        ActionKind::RunQuery => host.run_query(target.entity_id(), target),
        ActionKind::SelectWidget => host.select_component(target.entity_id(), target.value),
        ActionKind::DeleteWidget => host.remove_component(target.value),
        ActionKind::CopyValue => copy_to_clipboard(target.value, format, host),
    }
}

fn copy_to_clipboard(value: &Value, format: CopyFormat, host: &mut dyn InspectorHost) {
    let text = match clipboard_text(value, format) {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "value could not be serialized for the clipboard");
            host.notify(Notice::error(format!("Could not copy value: {error}")));
            return;
        }
    };
    match host.write_clipboard(&text) {
        Ok(()) => host.notify(Notice::success(COPY_SUCCESS_MESSAGE)),
        Err(error) => {
            warn!(%error, "clipboard write failed");
            host.notify(Notice::error(format!("Could not copy to the clipboard: {error}")));
        }
    }
}
