//! Inspector tree model for the app builder's runtime state.
//!
//! The pipeline runs in four stages:
//!
//! 1. [`normalize`] turns a [`RuntimeState`](inspector_model::RuntimeState)
//!    into an ordered [`DisplayTree`](inspector_model::DisplayTree).
//! 2. [`icons`] resolves an icon for each component and query.
//! 3. [`actions`] attaches the per-category action lists.
//! 4. [`controller`] decides when the first three stages need to run again.
//!
//! Nothing here mutates the host's state; mutations go through
//! [`InspectorHost`].

#![deny(unsafe_code)]

pub mod actions;
pub mod controller;
pub mod icons;
pub mod normalize;
pub mod projection;

pub use actions::{
    ActionBinding, ActionIcon, ActionRouter, ActionScope, ActionSet, ActionTarget,
    COPY_SUCCESS_MESSAGE, FIRST_LEVEL, InspectorHost, Notice, NoticeLevel, NoticePosition,
    clipboard_text, dispatch,
};
pub use controller::{InspectorController, InspectorInputs, InspectorModel, RecomputeStats};
pub use icons::{IconResolver, widget_icon_path};
pub use normalize::{merge_value, normalize_state, synthesize_queries};
pub use projection::{Projection, project};
