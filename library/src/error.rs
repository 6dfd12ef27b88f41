use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Node not found: {0}")]
    NodeNotFound(Uuid),
    #[error("Node already in the editor: {0}")]
    DuplicateNode(Uuid),
    #[error("Connection not found: {0}")]
    ConnectionNotFound(Uuid),
    #[error("Port '{key}' not found on node {node_id}")]
    PortNotFound { node_id: Uuid, key: String },
    #[error("Control '{key}' not found on node {node_id}")]
    ControlNotFound { node_id: Uuid, key: String },
    #[error("Duplicate key '{0}' on node")]
    DuplicateKey(String),
    #[error("Node type already registered: {0}")]
    DuplicateNodeType(String),
    #[error("Invalid node definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),
    #[error("Socket '{output}' is not compatible with socket '{input}'")]
    SocketMismatch { output: String, input: String },
    #[error("Invalid connection: {0}")]
    InvalidConnection(String),
    #[error("Control '{0}' is readonly")]
    ReadonlyControl(String),
    #[error("Control '{key}' expects a {expected} value")]
    ControlKindMismatch { key: String, expected: String },
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
