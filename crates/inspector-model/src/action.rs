use std::fmt;

use serde::{Deserialize, Serialize};

/// Operations a node in the inspector tree can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    RunQuery,
    SelectWidget,
    DeleteWidget,
    CopyValue,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::RunQuery => "Run Query",
            Self::SelectWidget => "Select Widget",
            Self::DeleteWidget => "Delete Widget",
            Self::CopyValue => "Copy value",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
