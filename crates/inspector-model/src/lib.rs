#![deny(unsafe_code)]

pub mod action;
pub mod app;
pub mod datasource;
pub mod error;
pub mod icon;
pub mod lookup;
pub mod options;
pub mod state;
pub mod tree;

pub use action::ActionKind;
pub use app::{
    AppDefinition, ComponentDefinition, ComponentDefinitions, QueryDefinition, SelectedComponent,
    SelectionDescriptor, WidgetDefinition,
};
pub use datasource::{DataSource, DataSourceKind, DataSourceRegistry, builtin_data_sources};
pub use error::{ClipboardError, InspectorError, Result};
pub use icon::{IconBinding, IconIndex, IconSource};
pub use lookup::compare_names;
pub use options::{CopyFormat, InspectorOptions, RecomputePolicy};
pub use state::{EntityCategory, RuntimeState};
pub use tree::{CategoryBody, CategoryNode, DisplayTree, EntityNode};
