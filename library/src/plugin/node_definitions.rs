//! Built-in demo node types.

use crate::evaluation::Operation;
use crate::model::{ControlValue, InputKind};
use crate::plugin::node_types::NodeDefinition;

/// Socket shared by the numeric built-ins.
pub const NUMBER_SOCKET: &str = "Number";

pub fn builtin_definitions() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition::new("number")
            .with_description("Emits the number typed into its control")
            .with_control("Number", InputKind::Number, Some(ControlValue::number(1.0)))
            .with_output("number", NUMBER_SOCKET)
            .with_operation(Operation::Identity),
        NodeDefinition::new("add")
            .with_description("Adds two numbers")
            .with_input("a", NUMBER_SOCKET)
            .with_input("b", NUMBER_SOCKET)
            .with_output("sum", NUMBER_SOCKET)
            .with_operation(Operation::Sum),
    ]
}
