//! Graph nodes and their typed ports.

use uuid::Uuid;

use crate::error::{LibraryError, Result};
use crate::model::control::InputControl;
use crate::model::socket::Socket;

/// Direction of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

/// A named connection point typed by a socket.
#[derive(Clone, Debug)]
pub struct Port {
    /// Key used by connections (e.g. "port", "sum")
    pub key: String,
    /// Label shown in the UI
    pub label: String,
    pub direction: PortDirection,
    pub socket: Socket,
    /// Whether more than one connection may attach to this port
    pub multiple_connections: bool,
}

impl Port {
    /// Inputs accept a single connection unless told otherwise.
    pub fn input(key: &str, socket: Socket) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_string(),
            direction: PortDirection::Input,
            socket,
            multiple_connections: false,
        }
    }

    /// Outputs fan out to any number of inputs.
    pub fn output(key: &str, socket: Socket) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_string(),
            direction: PortDirection::Output,
            socket,
            multiple_connections: true,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_multiple_connections(mut self, multiple: bool) -> Self {
        self.multiple_connections = multiple;
        self
    }
}

/// A placeable unit of the graph.
///
/// Controls, inputs and outputs keep their insertion order; keys are unique
/// within each of the three lists.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: Uuid,
    /// Display name of the node type that produced this node.
    pub label: String,
    controls: Vec<(String, InputControl)>,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
}

impl Node {
    pub fn new(label: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.to_string(),
            controls: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn add_control(&mut self, key: &str, control: InputControl) -> Result<()> {
        if self.control(key).is_some() {
            return Err(LibraryError::DuplicateKey(key.to_string()));
        }
        self.controls.push((key.to_string(), control));
        Ok(())
    }

    pub fn add_input(&mut self, port: Port) -> Result<()> {
        if self.input(&port.key).is_some() {
            return Err(LibraryError::DuplicateKey(port.key));
        }
        self.inputs.push(Port {
            direction: PortDirection::Input,
            ..port
        });
        Ok(())
    }

    pub fn add_output(&mut self, port: Port) -> Result<()> {
        if self.output(&port.key).is_some() {
            return Err(LibraryError::DuplicateKey(port.key));
        }
        self.outputs.push(Port {
            direction: PortDirection::Output,
            ..port
        });
        Ok(())
    }

    pub fn controls(&self) -> impl Iterator<Item = (&str, &InputControl)> {
        self.controls.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn control(&self, key: &str) -> Option<&InputControl> {
        self.controls.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    pub fn control_mut(&mut self, key: &str) -> Option<&mut InputControl> {
        self.controls
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
    }

    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    pub fn input(&self, key: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.key == key)
    }

    pub fn output(&self, key: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_are_rejected_per_list() {
        let socket = Socket::new("text");
        let mut node = Node::new("Test");
        node.add_control("port", InputControl::text()).unwrap();
        node.add_output(Port::output("port", socket.clone())).unwrap();
        node.add_input(Port::input("port", socket.clone())).unwrap();

        assert!(matches!(
            node.add_control("port", InputControl::text()),
            Err(LibraryError::DuplicateKey(_))
        ));
        assert!(node.add_output(Port::output("port", socket)).is_err());
        assert_eq!(node.controls().count(), 1);
        assert_eq!(node.outputs().len(), 1);
    }

    #[test]
    fn add_input_forces_direction() {
        let mut node = Node::new("Test");
        node.add_input(Port::output("a", Socket::new("text"))).unwrap();
        assert_eq!(node.inputs()[0].direction, PortDirection::Input);
    }

    #[test]
    fn controls_keep_insertion_order() {
        let mut node = Node::new("Test");
        node.add_control("b", InputControl::text()).unwrap();
        node.add_control("a", InputControl::number()).unwrap();
        let keys: Vec<&str> = node.controls().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
