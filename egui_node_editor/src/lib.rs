//! Standalone egui-based node graph editor widget.
//!
//! This crate provides a reusable node editor UI with no domain-specific dependencies.
//! Users implement the [`NodeEditorDataSource`] and [`NodeEditorMutator`] traits to
//! connect their own data model, then attach the features they want to an
//! [`AreaPlugin`]:
//!
//! - [`ContextMenuPlugin`] for right-click menus,
//! - [`ConnectionPlugin`] for dragging connections between pins,
//! - [`RenderPlugin`] for drawing nodes and menus.

pub mod drawing;
mod interactions;
mod node_rendering;
pub mod plugins;
pub mod state;
pub mod theme;
pub mod traits;
pub mod types;
pub mod widget;

pub use plugins::{
    AreaExtension, AreaPlugin, ConnectionPlugin, ConnectionPreset, ContextMenuItem,
    ContextMenuPlugin, PluginError, RenderPlugin, RenderPreset,
};
pub use state::NodeEditorState;
pub use theme::NodeEditorTheme;
pub use traits::{NodeEditorDataSource, NodeEditorMutator};
pub use types::*;
pub use widget::{NodeEditorWidget, PendingActions};
