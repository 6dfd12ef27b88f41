//! Graph data model: sockets, controls, nodes and connections.

pub mod connection;
pub mod control;
pub mod node;
pub mod socket;

pub use connection::{Connection, PortId};
pub use control::{ControlValue, InputControl, InputKind};
pub use node::{Node, Port, PortDirection};
pub use socket::{Socket, SocketTable};
