//! Configuration options for the inspector projection.

use serde::{Deserialize, Serialize};

use crate::error::{InspectorError, Result};
use crate::state::EntityCategory;

/// Categories removed from the tree unless configured otherwise.
pub const DEFAULT_HIDDEN_CATEGORIES: &[&str] = &["errors", "client", "server"];

/// Which input identities invalidate a cached projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputePolicy {
    /// Runtime state, query definitions, component definitions and plugin
    /// data sources are all tracked.
    #[default]
    Tracked,
    /// Only the runtime state is tracked. A query rename is not picked up
    /// until the state itself changes.
    StateOnly,
}

/// Text layout of "Copy value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyFormat {
    /// Two-space indented JSON.
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorOptions {
    pub recompute: RecomputePolicy,
    pub copy_format: CopyFormat,
    /// Top-level categories never shown.
    pub hidden_categories: Vec<String>,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            recompute: RecomputePolicy::default(),
            copy_format: CopyFormat::default(),
            hidden_categories: DEFAULT_HIDDEN_CATEGORIES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

impl InspectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recompute(mut self, policy: RecomputePolicy) -> Self {
        self.recompute = policy;
        self
    }

    pub fn with_copy_format(mut self, format: CopyFormat) -> Self {
        self.copy_format = format;
        self
    }

    /// Entity categories are never hidden, whatever the list says.
    pub fn is_hidden(&self, category: &str) -> bool {
        EntityCategory::from_name(category).is_none()
            && self.hidden_categories.iter().any(|c| c == category)
    }

    /// Reject settings that would hide the entity categories themselves.
    pub fn validate(&self) -> Result<()> {
        for name in &self.hidden_categories {
            if EntityCategory::from_name(name).is_some() {
                return Err(InspectorError::InvalidConfig {
                    message: format!("category '{name}' cannot be hidden"),
                });
            }
        }
        Ok(())
    }
}
