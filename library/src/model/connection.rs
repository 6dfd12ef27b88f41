//! Connections between an output port and an input port.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a specific port on a specific node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PortId {
    pub node_id: Uuid,
    pub key: String,
}

impl PortId {
    pub fn new(node_id: Uuid, key: &str) -> Self {
        Self {
            node_id,
            key: key.to_string(),
        }
    }
}

/// An edge of the graph.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Connection {
    pub id: Uuid,
    /// Source port (output)
    pub from: PortId,
    /// Destination port (input)
    pub to: PortId,
}

impl Connection {
    pub fn new(from: PortId, to: PortId) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
        }
    }

    pub fn touches(&self, node_id: Uuid) -> bool {
        self.from.node_id == node_id || self.to.node_id == node_id
    }
}
