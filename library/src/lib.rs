//! Graph core of the Vidixy node editor.
//!
//! Nodes carry ordered controls and typed ports; [`NodeEditor`] owns them and
//! validates connections by socket; [`NodeRegistry`] offers node types to the
//! creation menu; [`DataflowEngine`] evaluates outputs.

pub mod editor;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod plugin;

pub use editor::{EditorEvent, NodeEditor};
pub use error::{LibraryError, Result};
pub use evaluation::{DataflowEngine, Operation, Outputs};
pub use model::{
    Connection, ControlValue, InputControl, InputKind, Node, Port, PortDirection, PortId, Socket,
    SocketTable,
};
pub use plugin::{NodeFactory, NodeRegistry, NodeTypeSummary, node_factory};
