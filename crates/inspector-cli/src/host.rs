//! A terminal-backed [`InspectorHost`].

use std::io::Write;

use inspector_core::{ActionTarget, InspectorHost, Notice, NoticeLevel};
use inspector_model::ClipboardError;
use serde_json::Value;
use tracing::{error, info};

/// Writes clipboard text to `out` and reports everything else to the log.
///
/// The CLI has no editor to mutate, so query runs and widget selection or
/// removal are only logged.
#[derive(Debug)]
pub struct TerminalHost<W> {
    out: W,
    notices: Vec<Notice>,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            notices: Vec::new(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> InspectorHost for TerminalHost<W> {
    fn run_query(&mut self, query_id: Option<&str>, node: &ActionTarget<'_>) {
        info!(query_id, name = node.key(), "run query requested");
    }

    fn select_component(&mut self, component_id: Option<&str>, _component: &Value) {
        info!(component_id, "select component requested");
    }

    fn remove_component(&mut self, component: &Value) {
        let component_id = component.get("id").and_then(Value::as_str);
        info!(component_id, "remove component requested");
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        writeln!(self.out, "{text}")
            .and_then(|()| self.out.flush())
            .map_err(|err| ClipboardError::new(err.to_string()))
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "notice"),
            NoticeLevel::Error => error!(message = %notice.message, "notice"),
        }
        self.notices.push(notice);
    }
}
