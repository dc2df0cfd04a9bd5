use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("runtime state must be a JSON object, found {found}")]
    StateNotObject { found: &'static str },
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, InspectorError>;

/// Failure reported by a host whose clipboard cannot be written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard unavailable: {reason}")]
pub struct ClipboardError {
    pub reason: String,
}

impl ClipboardError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
