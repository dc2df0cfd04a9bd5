//! Data-source kinds and the registry queries are matched against.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind tag of a data source.
///
/// The built-in kinds are spelled out; anything else (plugin kinds, or
/// kinds this version does not know about) lands in [`DataSourceKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataSourceKind {
    ToolJetDb,
    RestApi,
    RunJs,
    RunPy,
    Other(String),
}

impl DataSourceKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "tooljetdb" => Self::ToolJetDb,
            "restapi" => Self::RestApi,
            "runjs" => Self::RunJs,
            "runpy" => Self::RunPy,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ToolJetDb => "tooljetdb",
            Self::RestApi => "restapi",
            Self::RunJs => "runjs",
            Self::RunPy => "runpy",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for DataSourceKind {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<String> for DataSourceKind {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<DataSourceKind> for String {
    fn from(kind: DataSourceKind) -> Self {
        match kind {
            DataSourceKind::Other(tag) => tag,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconFile {
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourcePlugin {
    #[serde(rename = "iconFile", default)]
    pub icon_file: Option<IconFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub kind: DataSourceKind,
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub plugin: Option<DataSourcePlugin>,
}

impl DataSource {
    pub fn new(kind: impl Into<DataSourceKind>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            name: name.into(),
            plugin: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach an embedded icon payload, as plugin data sources carry.
    pub fn with_icon_data(mut self, data: impl Into<String>) -> Self {
        self.plugin = Some(DataSourcePlugin {
            icon_file: Some(IconFile { data: data.into() }),
        });
        self
    }

    pub fn embedded_icon(&self) -> Option<&str> {
        self.plugin
            .as_ref()
            .and_then(|p| p.icon_file.as_ref())
            .map(|f| f.data.as_str())
    }
}

/// The data sources every app has, before any plugin is installed.
pub fn builtin_data_sources() -> Vec<DataSource> {
    vec![
        DataSource::new(DataSourceKind::ToolJetDb, "Tooljet Database"),
        DataSource::new(DataSourceKind::RestApi, "REST API"),
        DataSource::new(DataSourceKind::RunJs, "Run JavaScript code").with_id("runjs"),
        DataSource::new(DataSourceKind::RunPy, "Run Python code").with_id("runpy"),
    ]
}

/// Built-in data sources followed by plugin-provided ones.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceRegistry {
    builtin: Vec<DataSource>,
    plugins: Arc<Vec<DataSource>>,
}

impl Default for DataSourceRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl DataSourceRegistry {
    pub fn new(plugins: Vec<DataSource>) -> Self {
        Self::with_shared_plugins(Arc::new(plugins))
    }

    pub fn with_shared_plugins(plugins: Arc<Vec<DataSource>>) -> Self {
        Self {
            builtin: builtin_data_sources(),
            plugins,
        }
    }

    /// Load a plugin list from a JSON array file.
    pub fn from_plugins_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let plugins: Vec<DataSource> = serde_json::from_str(&text)?;
        Ok(Self::new(plugins))
    }

    pub fn plugins(&self) -> &Arc<Vec<DataSource>> {
        &self.plugins
    }

    /// First entry of the given kind; built-ins are searched first.
    pub fn find(&self, kind: &DataSourceKind) -> Option<&DataSource> {
        self.iter().find(|ds| &ds.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataSource> {
        self.builtin.iter().chain(self.plugins.iter())
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_as_plain_tags() {
        let json = serde_json::to_string(&DataSourceKind::RestApi).unwrap();
        assert_eq!(json, "\"restapi\"");
        let kind: DataSourceKind = serde_json::from_str("\"airtable\"").unwrap();
        assert_eq!(kind, DataSourceKind::Other("airtable".to_string()));
        assert!(!kind.is_builtin());
    }

    #[test]
    fn builtins_are_searched_before_plugins() {
        let registry = DataSourceRegistry::new(vec![
            DataSource::new("restapi", "Shadow REST").with_icon_data("<svg/>"),
            DataSource::new("airtable", "Airtable"),
        ]);
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.find(&DataSourceKind::RestApi).unwrap().name, "REST API");
        assert_eq!(
            registry.find(&"airtable".into()).unwrap().name,
            "Airtable"
        );
        assert!(registry.find(&"mongodb".into()).is_none());
    }

    #[test]
    fn plugin_icon_payload_is_read_from_manifest_shape() {
        let ds: DataSource = serde_json::from_str(
            r#"{"kind":"airtable","id":"p1","name":"Airtable","plugin":{"iconFile":{"data":"<svg/>"}}}"#,
        )
        .unwrap();
        assert_eq!(ds.embedded_icon(), Some("<svg/>"));
    }
}
