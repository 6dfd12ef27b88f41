//! Dataflow evaluation of the node graph.

pub mod engine;

pub use engine::{DataflowEngine, Outputs};

use serde::{Deserialize, Serialize};

/// How a node computes its outputs from its controls and inputs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Output *i* takes the value of control *i*, falling back to input *i*.
    #[default]
    Identity,
    /// Every output carries the numeric sum of all connected input values.
    Sum,
    /// The node produces nothing.
    None,
}
