//! The display tree: a normalized, ordered projection of a runtime state.
//!
//! A tree is a list of categories. `components` and `queries` hold entity
//! nodes sorted by [`compare_names`]; every other category is carried as an
//! opaque JSON value. Values below the first level are plain JSON leaves and
//! are reached by path.

use std::borrow::Cow;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::action::ActionKind;
use crate::icon::IconSource;
use crate::lookup::compare_names;
use crate::state::{EntityCategory, RuntimeState};

/// A named component or query.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityNode {
    pub category: EntityCategory,
    pub name: String,
    pub value: Value,
    pub icon: Option<IconSource>,
    pub actions: Vec<ActionKind>,
}

impl EntityNode {
    pub fn new(category: EntityCategory, name: impl Into<String>, value: Value) -> Self {
        Self {
            category,
            name: name.into(),
            value,
            icon: None,
            actions: Vec::new(),
        }
    }

    /// The `id` field of the record, when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.value.get("id").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryBody {
    Entities(Vec<EntityNode>),
    Opaque(Value),
}

impl CategoryBody {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Entities(nodes) => Value::Object(
                nodes
                    .iter()
                    .map(|n| (n.name.clone(), n.value.clone()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Opaque(value) => value.clone(),
        }
    }
}

impl Serialize for CategoryBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Entities(nodes) => {
                let mut map = serializer.serialize_map(Some(nodes.len()))?;
                for node in nodes {
                    map.serialize_entry(&node.name, &node.value)?;
                }
                map.end()
            }
            Self::Opaque(value) => value.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub name: String,
    pub body: CategoryBody,
}

impl CategoryNode {
    pub fn entities(category: EntityCategory, nodes: Vec<EntityNode>) -> Self {
        Self {
            name: category.as_str().to_string(),
            body: CategoryBody::Entities(nodes),
        }
    }

    pub fn opaque(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            body: CategoryBody::Opaque(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayTree {
    categories: Vec<CategoryNode>,
}

impl DisplayTree {
    pub fn new(categories: Vec<CategoryNode>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[CategoryNode] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn category(&self, name: &str) -> Option<&CategoryNode> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Entity nodes of a category, empty when the category is absent.
    pub fn entities(&self, category: EntityCategory) -> &[EntityNode] {
        match self.category(category.as_str()).map(|c| &c.body) {
            Some(CategoryBody::Entities(nodes)) => nodes,
            _ => &[],
        }
    }

    pub fn entity_names(&self, category: EntityCategory) -> Vec<&str> {
        self.entities(category)
            .iter()
            .map(|n| n.name.as_str())
            .collect()
    }

    /// Entities are kept sorted, so this is a binary search.
    pub fn entity(&self, category: EntityCategory, name: &str) -> Option<&EntityNode> {
        let nodes = self.entities(category);
        nodes
            .binary_search_by(|n| compare_names(&n.name, name))
            .ok()
            .map(|idx| &nodes[idx])
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut EntityNode> {
        self.categories
            .iter_mut()
            .filter_map(|c| match &mut c.body {
                CategoryBody::Entities(nodes) => Some(nodes.iter_mut()),
                CategoryBody::Opaque(_) => None,
            })
            .flatten()
    }

    /// Value of the node at `path`; the first segment names a category.
    ///
    /// Objects are walked by key and arrays by decimal index. The category
    /// node of an entity category has no stored value of its own, so it is
    /// rebuilt.
    pub fn value_at(&self, path: &[&str]) -> Option<Cow<'_, Value>> {
        let (head, rest) = path.split_first()?;
        let category = self.category(head)?;
        match &category.body {
            CategoryBody::Entities(nodes) => match rest.split_first() {
                None => Some(Cow::Owned(category.body.to_value())),
                Some((name, rest)) => {
                    let idx = nodes
                        .binary_search_by(|n| compare_names(&n.name, name))
                        .ok()?;
                    descend(&nodes[idx].value, rest).map(Cow::Borrowed)
                }
            },
            CategoryBody::Opaque(value) => descend(value, rest).map(Cow::Borrowed),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.categories
                .iter()
                .map(|c| (c.name.clone(), c.body.to_value()))
                .collect(),
        )
    }

    /// Turn the tree back into a runtime state, e.g. to normalize it again.
    pub fn to_state(&self) -> RuntimeState {
        self.categories
            .iter()
            .fold(RuntimeState::new(), |state, c| {
                state.with_category(c.name.clone(), c.body.to_value())
            })
    }
}

impl Serialize for DisplayTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.body)?;
        }
        map.end()
    }
}

fn descend<'a>(mut value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    for segment in path {
        value = match value {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(value)
}
