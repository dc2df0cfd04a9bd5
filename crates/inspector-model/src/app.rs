//! The parts of the application definition the inspector reads.
//!
//! Each dependency is held behind its own `Arc` so a host can swap one of
//! them (say, the query list after a rename) without touching the others,
//! and so the recomputation controller can tell which one changed by
//! pointer identity alone.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::datasource::DataSourceKind;
use crate::error::Result;

/// Widget metadata stored for a component on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefinition {
    /// Display name, unique within the app.
    pub name: String,
    /// Widget type, e.g. `Button` or `RadioButton`.
    #[serde(rename = "component")]
    pub widget_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub component: WidgetDefinition,
}

impl ComponentDefinition {
    pub fn new(name: impl Into<String>, widget_type: impl Into<String>) -> Self {
        Self {
            component: WidgetDefinition {
                name: name.into(),
                widget_type: widget_type.into(),
            },
        }
    }
}

/// Component definitions keyed by component id.
pub type ComponentDefinitions = BTreeMap<String, ComponentDefinition>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: Option<DataSourceKind>,
}

impl QueryDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<DataSourceKind>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// The component currently focused on the design canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedComponent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub component: Option<WidgetDefinition>,
}

/// Descriptor of the selection handed to the renderer.
///
/// Both fields are `None` when nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    pub id: Option<String>,
    pub component_name: Option<String>,
}

impl SelectionDescriptor {
    pub fn from_selected(selected: Option<&SelectedComponent>) -> Self {
        match selected {
            Some(selected) => Self {
                id: selected.id.clone(),
                component_name: selected.component.as_ref().map(|w| w.name.clone()),
            },
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.component_name.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDefinition {
    #[serde(default)]
    pub components: Arc<ComponentDefinitions>,
    #[serde(default)]
    pub queries: Arc<Vec<QueryDefinition>>,
    #[serde(default)]
    pub selected_component: Option<Arc<SelectedComponent>>,
}

impl AppDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_components(mut self, components: ComponentDefinitions) -> Self {
        self.components = Arc::new(components);
        self
    }

    pub fn with_queries(mut self, queries: Vec<QueryDefinition>) -> Self {
        self.queries = Arc::new(queries);
        self
    }

    pub fn with_selected(mut self, selected: Option<SelectedComponent>) -> Self {
        self.selected_component = selected.map(Arc::new);
        self
    }

    /// Last definition with this name wins, matching how names are keyed.
    pub fn query_named(&self, name: &str) -> Option<&QueryDefinition> {
        self.queries.iter().rev().find(|q| q.name == name)
    }
}
