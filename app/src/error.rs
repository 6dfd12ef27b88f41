use egui_node_editor::PluginError;
use thiserror::Error;
use vidixy::LibraryError;

/// Reasons the editor could not be brought up.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Mount point '{0}' not found on the surface")]
    MountNotFound(String),
    #[error("Plugin setup failed: {0}")]
    Plugin(#[from] PluginError),
    #[error("Node registration failed: {0}")]
    Library(#[from] LibraryError),
}
