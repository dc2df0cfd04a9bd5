//! Tree normalization.
//!
//! Builds a [`DisplayTree`] straight from a runtime state without copying
//! the state first:
//!
//! 1. Synthesize `{ id }` records for every query definition.
//! 2. Walk the state's categories in order, dropping hidden ones.
//! 3. For `components` and `queries`, merge in the synthesized records and
//!    sort the entities by [`compare_names`].
//! 4. Clone every other category as-is.
//!
//! The input state is only read, so a caller may keep sharing it.

use inspector_model::lookup::{json_kind, sort_by_name};
use inspector_model::{
    CategoryNode, DisplayTree, EntityCategory, EntityNode, InspectorOptions, QueryDefinition,
    RuntimeState,
};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Map every query definition's name to `{ "id": ... }`.
pub fn synthesize_queries(definitions: &[QueryDefinition]) -> Map<String, Value> {
    let mut queries = Map::new();
    for definition in definitions {
        queries.insert(definition.name.clone(), json!({ "id": definition.id }));
    }
    queries
}

/// Deep-merge `source` into `target`.
///
/// Objects merge key by key; any other source value replaces the target.
pub fn merge_value(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

pub fn normalize_state(
    state: &RuntimeState,
    queries: &[QueryDefinition],
    options: &InspectorOptions,
) -> DisplayTree {
    let synthesized = synthesize_queries(queries);
    let mut categories = Vec::with_capacity(state.len() + 1);
    let mut seen_components = false;
    let mut seen_queries = false;

    for (name, value) in state.categories() {
        if options.is_hidden(name) {
            debug!(category = name, "hiding category");
            continue;
        }
        let node = match EntityCategory::from_name(name) {
            Some(category @ EntityCategory::Components) => {
                seen_components = true;
                CategoryNode::entities(category, entity_nodes(category, Some(value), None))
            }
            Some(category @ EntityCategory::Queries) => {
                seen_queries = true;
                CategoryNode::entities(
                    category,
                    entity_nodes(category, Some(value), Some(&synthesized)),
                )
            }
            None => CategoryNode::opaque(name, value.clone()),
        };
        categories.push(node);
    }

    if !seen_components {
        categories.push(CategoryNode::entities(
            EntityCategory::Components,
            Vec::new(),
        ));
    }
    if !seen_queries {
        categories.push(CategoryNode::entities(
            EntityCategory::Queries,
            entity_nodes(EntityCategory::Queries, None, Some(&synthesized)),
        ));
    }

    DisplayTree::new(categories)
}

fn entity_nodes(
    category: EntityCategory,
    value: Option<&Value>,
    overlay: Option<&Map<String, Value>>,
) -> Vec<EntityNode> {
    let mut records = match value {
        Some(Value::Object(records)) => records.clone(),
        Some(other) => {
            warn!(
                category = %category,
                found = json_kind(other),
                "entity category is not an object; showing it empty"
            );
            Map::new()
        }
        None => Map::new(),
    };

    if let Some(overlay) = overlay {
        for (name, meta) in overlay {
            match records.get_mut(name) {
                Some(record) => merge_value(record, meta),
                None => {
                    records.insert(name.clone(), meta.clone());
                }
            }
        }
    }

    let mut entries: Vec<(String, Value)> = records.into_iter().collect();
    sort_by_name(&mut entries);
    entries
        .into_iter()
        .map(|(name, value)| EntityNode::new(category, name, value))
        .collect()
}
