use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use inspector_core::{InspectorController, InspectorInputs, InspectorModel, NoticeLevel};
use inspector_model::{
    ActionKind, AppDefinition, DataSourceRegistry, InspectorOptions, RuntimeState,
};
use tracing::{debug, info_span};

use crate::config::load_options;
use crate::host::TerminalHost;
use crate::render::{action_table, icon_table};

/// Files named on the command line.
#[derive(Debug, Clone, Default)]
pub struct InputFiles {
    pub state: PathBuf,
    pub app: Option<PathBuf>,
    pub data_sources: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Everything one command needs, read from disk.
#[derive(Debug)]
pub struct LoadedInputs {
    pub state: Arc<RuntimeState>,
    pub app: AppDefinition,
    pub data_sources: DataSourceRegistry,
    pub options: InspectorOptions,
}

impl LoadedInputs {
    pub fn load(files: &InputFiles) -> Result<Self> {
        let state = RuntimeState::from_path(&files.state)
            .with_context(|| format!("read runtime state {}", files.state.display()))?;
        let app = match &files.app {
            Some(path) => AppDefinition::from_path(path)
                .with_context(|| format!("read app definition {}", path.display()))?,
            None => AppDefinition::new(),
        };
        let data_sources = match &files.data_sources {
            Some(path) => DataSourceRegistry::from_plugins_path(path)
                .with_context(|| format!("read data sources {}", path.display()))?,
            None => DataSourceRegistry::default(),
        };
        let options = load_options(files.config.as_deref())?;
        debug!(
            categories = state.len(),
            queries = app.queries.len(),
            plugins = data_sources.plugins().len(),
            "inputs loaded"
        );
        Ok(Self {
            state: Arc::new(state),
            app,
            data_sources,
            options,
        })
    }

    pub fn model(&self) -> InspectorModel {
        let mut controller = InspectorController::new(self.options.clone());
        controller.refresh(&InspectorInputs::new(&self.state, &self.app, &self.data_sources))
    }
}

/// Split a dotted path such as `components.alpha` into segments.
///
/// `\.` stands for a literal dot and `\\` for a backslash, so a key like
/// `a.b` is written `components.a\.b`.
pub fn parse_path(dotted: &str) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = dotted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('.' | '\\')) => current.push(escaped),
                Some(other) => bail!("invalid path '{dotted}': unknown escape '\\{other}'"),
                None => bail!("invalid path '{dotted}': trailing backslash"),
            },
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    if segments.iter().any(String::is_empty) {
        bail!("invalid path '{dotted}': empty segment");
    }
    Ok(segments)
}

pub fn run_tree(files: &InputFiles) -> Result<String> {
    let _span = info_span!("tree", state = %files.state.display()).entered();
    let model = LoadedInputs::load(files)?.model();
    serde_json::to_string_pretty(model.tree()).context("serialize tree")
}

pub fn run_icons(files: &InputFiles) -> Result<Table> {
    let _span = info_span!("icons", state = %files.state.display()).entered();
    let model = LoadedInputs::load(files)?.model();
    Ok(icon_table(model.icons()))
}

pub fn run_actions(files: &InputFiles, path: &str) -> Result<Table> {
    let _span = info_span!("actions", path).entered();
    let segments = parse_path(path)?;
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    let model = LoadedInputs::load(files)?.model();
    if model.value_at(&segments).is_none() {
        bail!("no node at '{path}'");
    }
    Ok(action_table(&model.actions_at(&segments)))
}

/// Copy the value at `path` to `out`.
pub fn run_copy<W: Write>(files: &InputFiles, path: &str, out: W) -> Result<W> {
    let _span = info_span!("copy", path).entered();
    let segments = parse_path(path)?;
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    let model = LoadedInputs::load(files)?.model();
    let mut host = TerminalHost::new(out);
    if !model.dispatch(ActionKind::CopyValue, &segments, &mut host) {
        bail!("no node at '{path}'");
    }
    if let Some(notice) = host.last_notice()
        && notice.level == NoticeLevel::Error
    {
        bail!("{}", notice.message);
    }
    Ok(host.into_inner())
}
