//! Runtime-state snapshots produced by the builder.
//!
//! The builder keeps one mutable JSON object describing everything it has
//! executed so far: live component outputs, query results, globals, and a
//! few internal bookkeeping categories. The inspector only ever reads a
//! snapshot of it.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{InspectorError, Result};
use crate::lookup::json_kind;

/// Top-level categories whose children are user-named entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Components,
    Queries,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 2] = [EntityCategory::Components, EntityCategory::Queries];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Components => "components",
            Self::Queries => "queries",
        }
    }

    /// Match a top-level category name, exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "components" => Some(Self::Components),
            "queries" => Some(Self::Queries),
            _ => None,
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read-only snapshot of the builder's runtime state.
///
/// Top-level keys are categories. Insertion order is kept so opaque
/// categories reach the display tree in the order the builder wrote them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeState {
    categories: Map<String, Value>,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; the root must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(categories) => Ok(Self { categories }),
            other => Err(InspectorError::StateNotObject {
                found: json_kind(&other),
            }),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with_category(mut self, name: impl Into<String>, value: Value) -> Self {
        self.categories.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.categories.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.categories.get(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
