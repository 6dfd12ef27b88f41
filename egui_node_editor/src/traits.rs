//! Trait definitions for decoupling the node editor from domain-specific types.

use uuid::Uuid;

use crate::types::{ConnectionView, ControlValueView, NodeDisplay};

/// Read-only data source for the node editor.
pub trait NodeEditorDataSource {
    /// IDs of all nodes to draw, bottom-most first.
    fn node_ids(&self) -> Vec<Uuid>;

    /// Get display information for a node.
    fn get_node_display(&self, id: Uuid) -> Option<NodeDisplay>;

    /// Get all connections between the displayed nodes.
    fn get_connections(&self) -> Vec<ConnectionView>;
}

/// Mutation interface for the node editor.
///
/// Errors are reported as strings; the widget logs and drops them.
pub trait NodeEditorMutator {
    /// Create a node of the given type.
    fn add_node(&mut self, type_id: &str) -> Result<Uuid, String>;

    /// Remove a node and its connections.
    fn remove_node(&mut self, node_id: Uuid) -> Result<(), String>;

    /// Connect an output pin to an input pin.
    fn add_connection(
        &mut self,
        from_node: Uuid,
        from_pin: &str,
        to_node: Uuid,
        to_pin: &str,
    ) -> Result<Uuid, String>;

    /// Remove a connection by ID.
    fn remove_connection(&mut self, connection_id: Uuid) -> Result<(), String>;

    /// Store an edited control value.
    fn set_control_value(
        &mut self,
        node_id: Uuid,
        control: &str,
        value: ControlValueView,
    ) -> Result<(), String>;
}
