use uuid::Uuid;

use crate::editor::events::EditorEvent;
use crate::error::{LibraryError, Result};
use crate::model::{Connection, ControlValue, Node, PortId};

type Listener = Box<dyn FnMut(&EditorEvent)>;

/// Owns the placed nodes and the connections between them.
///
/// Every mutation is validated here; subscribers see an [`EditorEvent`]
/// for each change that went through.
#[derive(Default)]
pub struct NodeEditor {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    listeners: Vec<Listener>,
}

impl NodeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener called after every successful mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: EditorEvent) {
        log::debug!("NodeEditor: {}", event);
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    // ---------------------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------------------

    pub fn add_node(&mut self, node: Node) -> Result<Uuid> {
        if self.get_node(node.id).is_some() {
            return Err(LibraryError::DuplicateNode(node.id));
        }
        let id = node.id;
        self.nodes.push(node);
        self.emit(EditorEvent::NodeCreated(id));
        Ok(id)
    }

    /// Removes a node together with every connection attached to it.
    pub fn remove_node(&mut self, node_id: Uuid) -> Result<Node> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or(LibraryError::NodeNotFound(node_id))?;

        let attached: Vec<Uuid> = self
            .connections
            .iter()
            .filter(|c| c.touches(node_id))
            .map(|c| c.id)
            .collect();
        for connection_id in attached {
            self.remove_connection(connection_id)?;
        }

        let node = self.nodes.remove(index);
        self.emit(EditorEvent::NodeRemoved(node_id));
        Ok(node)
    }

    pub fn get_node(&self, node_id: Uuid) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn set_control_value(
        &mut self,
        node_id: Uuid,
        key: &str,
        value: ControlValue,
    ) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .ok_or(LibraryError::NodeNotFound(node_id))?;
        let control = node
            .control_mut(key)
            .ok_or_else(|| LibraryError::ControlNotFound {
                node_id,
                key: key.to_string(),
            })?;
        if control.value() == &value {
            return Ok(());
        }
        control.set_value(key, value)?;
        self.emit(EditorEvent::ControlChanged {
            node_id,
            key: key.to_string(),
        });
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Connections
    // ---------------------------------------------------------------------

    /// Connects an output to an input.
    ///
    /// The output socket must be compatible with the input socket. An input
    /// that accepts a single connection has its previous connection replaced.
    pub fn add_connection(&mut self, from: PortId, to: PortId) -> Result<Uuid> {
        self.validate_connection(&from, &to)?;

        let single_input = self
            .get_node(to.node_id)
            .and_then(|n| n.input(&to.key))
            .is_some_and(|p| !p.multiple_connections);
        if single_input {
            let replaced: Vec<Uuid> = self
                .connections
                .iter()
                .filter(|c| c.to == to)
                .map(|c| c.id)
                .collect();
            for connection_id in replaced {
                self.remove_connection(connection_id)?;
            }
        }

        let connection = Connection::new(from, to);
        let id = connection.id;
        self.connections.push(connection);
        self.emit(EditorEvent::ConnectionCreated(id));
        Ok(id)
    }

    fn validate_connection(&self, from: &PortId, to: &PortId) -> Result<()> {
        let source = self
            .get_node(from.node_id)
            .ok_or(LibraryError::NodeNotFound(from.node_id))?;
        let target = self
            .get_node(to.node_id)
            .ok_or(LibraryError::NodeNotFound(to.node_id))?;

        if from.node_id == to.node_id {
            return Err(LibraryError::InvalidConnection(
                "a node cannot connect to itself".to_string(),
            ));
        }

        let output = source.output(&from.key).ok_or_else(|| {
            if source.input(&from.key).is_some() {
                LibraryError::InvalidConnection(format!(
                    "'{}' is an input, connections start at an output",
                    from.key
                ))
            } else {
                LibraryError::PortNotFound {
                    node_id: from.node_id,
                    key: from.key.clone(),
                }
            }
        })?;
        let input = target.input(&to.key).ok_or_else(|| {
            if target.output(&to.key).is_some() {
                LibraryError::InvalidConnection(format!(
                    "'{}' is an output, connections end at an input",
                    to.key
                ))
            } else {
                LibraryError::PortNotFound {
                    node_id: to.node_id,
                    key: to.key.clone(),
                }
            }
        })?;

        if !output.socket.is_compatible_with(&input.socket) {
            return Err(LibraryError::SocketMismatch {
                output: output.socket.name().to_string(),
                input: input.socket.name().to_string(),
            });
        }

        if self
            .connections
            .iter()
            .any(|c| &c.from == from && &c.to == to)
        {
            return Err(LibraryError::InvalidConnection(
                "connection already exists".to_string(),
            ));
        }
        Ok(())
    }

    pub fn remove_connection(&mut self, connection_id: Uuid) -> Result<Connection> {
        let index = self
            .connections
            .iter()
            .position(|c| c.id == connection_id)
            .ok_or(LibraryError::ConnectionNotFound(connection_id))?;
        let connection = self.connections.remove(index);
        self.emit(EditorEvent::ConnectionRemoved(connection_id));
        Ok(connection)
    }

    pub fn get_connection(&self, connection_id: Uuid) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections ending at the given input.
    pub fn connections_to<'a>(&'a self, to: &'a PortId) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| &c.to == to)
    }

    pub fn clear(&mut self) {
        self.connections.clear();
        self.nodes.clear();
        self.emit(EditorEvent::Cleared);
    }
}
