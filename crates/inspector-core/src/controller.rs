//! Recomputation control.
//!
//! A host calls [`InspectorController::refresh`] on every render tick. The
//! projection is rebuilt only when one of its tracked inputs is a different
//! `Arc` than last time; the selection descriptor is rebuilt only when the
//! selected component is. Everything else returns the cached `Arc`s.

use std::borrow::Cow;
use std::sync::Arc;

use inspector_model::{
    ActionKind, AppDefinition, ComponentDefinitions, CopyFormat, DataSource, DataSourceRegistry,
    DisplayTree, EntityCategory, IconIndex, InspectorOptions, QueryDefinition, RecomputePolicy,
    RuntimeState, SelectedComponent, SelectionDescriptor,
};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::actions::{ActionBinding, ActionRouter, ActionTarget, InspectorHost, dispatch};
use crate::projection::{Projection, project};

/// Inputs of one refresh. The state is shared so its identity can be kept.
#[derive(Debug, Clone, Copy)]
pub struct InspectorInputs<'a> {
    pub state: &'a Arc<RuntimeState>,
    pub app: &'a AppDefinition,
    pub data_sources: &'a DataSourceRegistry,
}

impl<'a> InspectorInputs<'a> {
    pub fn new(
        state: &'a Arc<RuntimeState>,
        app: &'a AppDefinition,
        data_sources: &'a DataSourceRegistry,
    ) -> Self {
        Self {
            state,
            app,
            data_sources,
        }
    }
}

#[derive(Debug)]
struct ProjectionKey {
    state: Arc<RuntimeState>,
    queries: Option<Arc<Vec<QueryDefinition>>>,
    components: Option<Arc<ComponentDefinitions>>,
    plugins: Option<Arc<Vec<DataSource>>>,
}

impl ProjectionKey {
    fn capture(inputs: &InspectorInputs<'_>, policy: RecomputePolicy) -> Self {
        let tracked = policy == RecomputePolicy::Tracked;
        Self {
            state: Arc::clone(inputs.state),
            queries: tracked.then(|| Arc::clone(&inputs.app.queries)),
            components: tracked.then(|| Arc::clone(&inputs.app.components)),
            plugins: tracked.then(|| Arc::clone(inputs.data_sources.plugins())),
        }
    }

    fn matches(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
            && same(&self.queries, &other.queries)
            && same(&self.components, &other.components)
            && same(&self.plugins, &other.plugins)
    }
}

fn same<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// How often each cached output was rebuilt or reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    pub projections: u64,
    pub selections: u64,
    pub reused: u64,
}

/// What the renderer receives after a refresh.
#[derive(Debug, Clone)]
pub struct InspectorModel {
    pub projection: Arc<Projection>,
    pub selection: Arc<SelectionDescriptor>,
    pub router: Arc<ActionRouter>,
    pub copy_format: CopyFormat,
}

impl InspectorModel {
    pub fn tree(&self) -> &DisplayTree {
        &self.projection.tree
    }

    pub fn icons(&self) -> &IconIndex {
        &self.projection.icons
    }

    /// Actions offered by the node at `path` (first segment is the category).
    pub fn actions_at(&self, path: &[&str]) -> Vec<&ActionBinding> {
        let category = path.first().and_then(|head| EntityCategory::from_name(head));
        let depth = path.len().saturating_sub(1);
        self.router.node_actions(category, depth)
    }

    pub fn value_at(&self, path: &[&str]) -> Option<Cow<'_, Value>> {
        self.projection.tree.value_at(path)
    }

    /// Dispatch `kind` on the node at `path`. Returns `false` when the path
    /// does not resolve to a node.
    pub fn dispatch(&self, kind: ActionKind, path: &[&str], host: &mut dyn InspectorHost) -> bool {
        let Some(value) = self.value_at(path) else {
            debug!(action = %kind, ?path, "no node at path");
            return false;
        };
        let target = ActionTarget::new(path, &value);
        dispatch(kind, &target, host, self.copy_format);
        true
    }
}

#[derive(Debug)]
pub struct InspectorController {
    options: InspectorOptions,
    router: Arc<ActionRouter>,
    projection: Option<(ProjectionKey, Arc<Projection>)>,
    selection: Option<(Option<Arc<SelectedComponent>>, Arc<SelectionDescriptor>)>,
    stats: RecomputeStats,
}

impl Default for InspectorController {
    fn default() -> Self {
        Self::new(InspectorOptions::default())
    }
}

impl InspectorController {
    pub fn new(options: InspectorOptions) -> Self {
        if let Err(error) = options.validate() {
            warn!(%error, "ignoring part of the inspector options");
        }
        Self {
            options,
            router: Arc::new(ActionRouter::standard()),
            projection: None,
            selection: None,
            stats: RecomputeStats::default(),
        }
    }

    pub fn stats(&self) -> RecomputeStats {
        self.stats
    }

    /// Drop cached outputs so the next refresh rebuilds them.
    pub fn invalidate(&mut self) {
        self.projection = None;
        self.selection = None;
    }

    pub fn refresh(&mut self, inputs: &InspectorInputs<'_>) -> InspectorModel {
        InspectorModel {
            projection: self.projection_for(inputs),
            selection: self.selection_for(inputs.app),
            router: Arc::clone(&self.router),
            copy_format: self.options.copy_format,
        }
    }

    fn projection_for(&mut self, inputs: &InspectorInputs<'_>) -> Arc<Projection> {
        let key = ProjectionKey::capture(inputs, self.options.recompute);
        if let Some((cached_key, projection)) = &self.projection
            && cached_key.matches(&key)
        {
            trace!("projection inputs unchanged");
            self.stats.reused += 1;
            return Arc::clone(projection);
        }

        debug!(policy = ?self.options.recompute, "recomputing projection");
        let projection = Arc::new(project(
            inputs.state,
            inputs.app,
            inputs.data_sources,
            &self.router,
            &self.options,
        ));
        self.stats.projections += 1;
        self.projection = Some((key, Arc::clone(&projection)));
        projection
    }

    fn selection_for(&mut self, app: &AppDefinition) -> Arc<SelectionDescriptor> {
        let current = app.selected_component.clone();
        if let Some((cached, descriptor)) = &self.selection
            && same(cached, &current)
        {
            return Arc::clone(descriptor);
        }

        let descriptor = Arc::new(SelectionDescriptor::from_selected(current.as_deref()));
        self.stats.selections += 1;
        self.selection = Some((current, Arc::clone(&descriptor)));
        descriptor
    }
}
