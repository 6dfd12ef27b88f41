//! The root container of a node graph.

mod events;
mod node_editor;

pub use events::EditorEvent;
pub use node_editor::NodeEditor;
