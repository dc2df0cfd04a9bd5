//! Icon resolution for entities in the display tree.
//!
//! Queries are matched by data-source kind against the built-in list and
//! the installed plugins. Components are matched by id against the app's
//! component definitions; a component whose definition carries a different
//! name (renamed, or stale) gets no icon.

use std::borrow::Cow;

use inspector_model::{
    AppDefinition, DataSourceKind, DataSourceRegistry, EntityCategory, IconSource,
};
use serde_json::Value;
use tracing::trace;

const WIDGET_ICON_DIR: &str = "assets/images/icons/widgets";

/// Asset path of a widget type's icon.
pub fn widget_icon_path(widget_type: &str) -> String {
    let file = match widget_type.to_lowercase().as_str() {
        "radiobutton" => "radio-button".to_string(),
        other => other.to_string(),
    };
    format!("{WIDGET_ICON_DIR}/{file}.svg")
}

pub struct IconResolver<'a> {
    app: &'a AppDefinition,
    data_sources: &'a DataSourceRegistry,
}

impl<'a> IconResolver<'a> {
    pub fn new(app: &'a AppDefinition, data_sources: &'a DataSourceRegistry) -> Self {
        Self { app, data_sources }
    }

    pub fn resolve(
        &self,
        category: EntityCategory,
        name: &str,
        record: &Value,
    ) -> Option<IconSource> {
        match category {
            EntityCategory::Queries => self.query_icon(name, record),
            EntityCategory::Components => self.component_icon(name, record),
        }
    }

    /// The record's own `kind` wins; the definition's kind is the fallback.
    pub fn query_icon(&self, name: &str, record: &Value) -> Option<IconSource> {
        let kind = match record.get("kind").and_then(Value::as_str) {
            Some(tag) => DataSourceKind::parse(tag),
            None => self.app.query_named(name)?.kind.clone()?,
        };
        let Some(source) = self.data_sources.find(&kind) else {
            trace!(query = name, kind = %kind, "no data source for query kind");
            return None;
        };
        Some(match source.embedded_icon() {
            Some(data) => IconSource::Embedded(data.to_string()),
            None => IconSource::Named(source.kind.as_str().to_string()),
        })
    }

    /// Numeric ids are matched by their decimal form.
    pub fn component_icon(&self, name: &str, record: &Value) -> Option<IconSource> {
        let id = match record.get("id")? {
            Value::String(id) => Cow::Borrowed(id.as_str()),
            Value::Number(id) => Cow::Owned(id.to_string()),
            _ => return None,
        };
        let Some(definition) = self.app.components.get(&*id) else {
            trace!(component = name, id = %id, "no definition for component id");
            return None;
        };
        if definition.component.name != name {
            trace!(
                component = name,
                defined_as = %definition.component.name,
                "component name differs from its definition"
            );
            return None;
        }
        Some(IconSource::Asset(widget_icon_path(
            &definition.component.widget_type,
        )))
    }
}
