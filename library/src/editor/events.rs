use std::fmt;

use uuid::Uuid;

/// Notification emitted by [`super::NodeEditor`] after each mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    NodeCreated(Uuid),
    NodeRemoved(Uuid),
    ConnectionCreated(Uuid),
    ConnectionRemoved(Uuid),
    ControlChanged { node_id: Uuid, key: String },
    Cleared,
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorEvent::NodeCreated(id) => write!(f, "node created {}", id),
            EditorEvent::NodeRemoved(id) => write!(f, "node removed {}", id),
            EditorEvent::ConnectionCreated(id) => write!(f, "connection created {}", id),
            EditorEvent::ConnectionRemoved(id) => write!(f, "connection removed {}", id),
            EditorEvent::ControlChanged { node_id, key } => {
                write!(f, "control '{}' changed on {}", key, node_id)
            }
            EditorEvent::Cleared => f.write_str("cleared"),
        }
    }
}
