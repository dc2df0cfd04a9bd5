use serde::{Deserialize, Serialize};

use crate::state::EntityCategory;

/// Where the renderer should take an entity's icon from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum IconSource {
    /// Inline SVG payload shipped with a plugin.
    Embedded(String),
    /// Built-in icon looked up by data-source kind tag.
    Named(String),
    /// Static asset path.
    Asset(String),
}

impl IconSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Embedded(data) => format!("embedded ({} bytes)", data.len()),
            Self::Named(name) => format!("named:{name}"),
            Self::Asset(path) => path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconBinding {
    pub category: EntityCategory,
    pub key: String,
    pub source: IconSource,
}

/// Icons resolved for one projection, in tree order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconIndex {
    bindings: Vec<IconBinding>,
}

impl IconIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, binding: IconBinding) {
        self.bindings.push(binding);
    }

    /// Look up by entity name alone. Queries shadow components.
    pub fn get(&self, key: &str) -> Option<&IconSource> {
        self.get_in(EntityCategory::Queries, key)
            .or_else(|| self.get_in(EntityCategory::Components, key))
    }

    pub fn get_in(&self, category: EntityCategory, key: &str) -> Option<&IconSource> {
        self.bindings
            .iter()
            .find(|b| b.category == category && b.key == key)
            .map(|b| &b.source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<IconBinding> for IconIndex {
    fn from_iter<I: IntoIterator<Item = IconBinding>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}
