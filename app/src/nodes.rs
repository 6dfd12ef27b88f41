//! Node types offered by the editor.

use vidixy::{InputControl, Node, NodeFactory, Port, Socket};

/// Name of the socket shared by every text port.
pub const TEXT_SOCKET: &str = "text";

/// A node with one free-text control `port` and one text output `port`.
pub struct NodeA {
    socket: Socket,
}

impl NodeA {
    pub const NAME: &'static str = "NodeA";

    /// `socket` is captured once and handed to every node created later.
    pub fn new(socket: Socket) -> Self {
        Self { socket }
    }
}

impl NodeFactory for NodeA {
    fn display_name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Free text exposed on a text output"
    }

    fn create(&self) -> vidixy::Result<Node> {
        let mut node = Node::new(Self::NAME);
        node.add_control("port", InputControl::text())?;
        node.add_output(Port::output("port", self.socket.clone()))?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidixy::{ControlValue, Operation, SocketTable};

    #[test]
    fn node_a_has_one_control_and_one_output() {
        let mut sockets = SocketTable::new();
        let socket = sockets.get_or_create(TEXT_SOCKET);
        let node = NodeA::new(socket.clone()).create().unwrap();

        assert_eq!(node.label, "NodeA");
        let controls: Vec<_> = node.controls().collect();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].0, "port");
        assert_eq!(controls[0].1.value(), &ControlValue::text(""));
        assert!(!controls[0].1.is_readonly());

        assert!(node.inputs().is_empty());
        assert_eq!(node.outputs().len(), 1);
        let output = &node.outputs()[0];
        assert_eq!(output.key, "port");
        assert!(Socket::ptr_eq(&output.socket, &socket));
    }

    #[test]
    fn every_instance_shares_the_socket() {
        let socket = Socket::new(TEXT_SOCKET);
        let factory = NodeA::new(socket.clone());
        let a = factory.create().unwrap();
        let b = factory.create().unwrap();
        assert_ne!(a.id, b.id);
        assert!(Socket::ptr_eq(&a.outputs()[0].socket, &b.outputs()[0].socket));
        assert!(Socket::ptr_eq(&a.outputs()[0].socket, &socket));
    }

    #[test]
    fn node_a_passes_its_text_through() {
        assert_eq!(NodeA::new(Socket::new(TEXT_SOCKET)).operation(), Operation::Identity);
    }
}
