//! Host harness for the inspector tree model.

pub mod commands;
pub mod config;
pub mod host;
pub mod logging;
pub mod render;
