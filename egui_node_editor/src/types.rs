//! Lightweight data types for the node editor UI.

use uuid::Uuid;

/// Information about a pin for rendering.
#[derive(Clone, Debug)]
pub struct PinInfo {
    pub name: String,
    pub display_name: String,
    pub is_output: bool,
    /// Socket name, used for coloring.
    pub socket: String,
}

impl PinInfo {
    pub fn input(name: &str, display_name: &str, socket: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            is_output: false,
            socket: socket.to_string(),
        }
    }

    pub fn output(name: &str, display_name: &str, socket: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            is_output: true,
            socket: socket.to_string(),
        }
    }
}

/// Value of an inline control as seen by the widget.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlValueView {
    Text(String),
    Number(f64),
}

/// An inline control on a node.
#[derive(Clone, Debug)]
pub struct ControlView {
    pub name: String,
    pub value: ControlValueView,
    pub readonly: bool,
}

/// A connection between two pins (view data).
#[derive(Clone, Debug)]
pub struct ConnectionView {
    pub id: Uuid,
    pub from_node: Uuid,
    pub from_pin: String,
    pub to_node: Uuid,
    pub to_pin: String,
}

/// How a node should be displayed.
#[derive(Clone, Debug)]
pub struct NodeDisplay {
    pub label: String,
    pub pins: Vec<PinInfo>,
    pub controls: Vec<ControlView>,
}

impl NodeDisplay {
    pub fn inputs(&self) -> impl Iterator<Item = &PinInfo> {
        self.pins.iter().filter(|p| !p.is_output)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &PinInfo> {
        self.pins.iter().filter(|p| p.is_output)
    }
}

/// Node type information for the context menu.
#[derive(Clone, Debug)]
pub struct NodeTypeInfo {
    pub type_id: String,
    pub display_name: String,
    pub category: Option<String>,
}
