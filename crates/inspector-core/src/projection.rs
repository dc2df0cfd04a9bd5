use inspector_model::{
    AppDefinition, DataSourceRegistry, DisplayTree, EntityCategory, IconBinding, IconIndex,
    InspectorOptions, RuntimeState,
};
use tracing::debug_span;

use crate::actions::{ActionRouter, FIRST_LEVEL};
use crate::icons::IconResolver;
use crate::normalize::normalize_state;

/// A normalized tree with its icon and action annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub tree: DisplayTree,
    pub icons: IconIndex,
}

/// Run the whole pipeline once: normalize, resolve icons, attach actions.
///
/// Each entity gets the same action list a renderer sees at its path.
pub fn project(
    state: &RuntimeState,
    app: &AppDefinition,
    data_sources: &DataSourceRegistry,
    router: &ActionRouter,
    options: &InspectorOptions,
) -> Projection {
    let span = debug_span!(
        "project",
        categories = state.len(),
        components = tracing::field::Empty,
        queries = tracing::field::Empty,
        icons = tracing::field::Empty,
    );
    let _guard = span.enter();

    let mut tree = normalize_state(state, &app.queries, options);
    let resolver = IconResolver::new(app, data_sources);
    let mut icons = IconIndex::new();

    for node in tree.entities_mut() {
        node.icon = resolver.resolve(node.category, &node.name, &node.value);
        if let Some(source) = &node.icon {
            icons.push(IconBinding {
                category: node.category,
                key: node.name.clone(),
                source: source.clone(),
            });
        }
        node.actions = router
            .node_actions(Some(node.category), FIRST_LEVEL)
            .into_iter()
            .map(|binding| binding.kind)
            .collect();
    }

    span.record("components", tree.entities(EntityCategory::Components).len());
    span.record("queries", tree.entities(EntityCategory::Queries).len());
    span.record("icons", icons.len());

    Projection { tree, icons }
}
