//! Node types: the [`NodeFactory`] capability and the registry that offers
//! them to the creation menu.

pub mod node_definitions;
pub mod node_types;

pub use node_definitions::builtin_definitions;
pub use node_types::{
    ControlDefinition, DefinedNode, NodeDefinition, PortDefinition, load_definitions,
    normalize_name, register_definitions,
};

use crate::error::{LibraryError, Result};
use crate::evaluation::Operation;
use crate::model::Node;

/// A kind of node that can be placed in the editor.
pub trait NodeFactory {
    /// Name shown in the creation menu; also the label of created nodes.
    fn display_name(&self) -> &str;

    /// Submenu the type is listed under. `None` lists it at the top level.
    fn category(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> &str {
        ""
    }

    /// How the dataflow engine computes outputs for nodes of this type.
    fn operation(&self) -> Operation {
        Operation::Identity
    }

    /// Builds a fresh node with its controls and ports attached.
    fn create(&self) -> Result<Node>;
}

/// A factory backed by a closure.
pub struct FnNodeFactory<F> {
    name: String,
    build: F,
}

/// Wraps a closure as a [`NodeFactory`] named `name`.
pub fn node_factory<F>(name: &str, build: F) -> FnNodeFactory<F>
where
    F: Fn() -> Result<Node>,
{
    FnNodeFactory {
        name: name.to_string(),
        build,
    }
}

impl<F> NodeFactory for FnNodeFactory<F>
where
    F: Fn() -> Result<Node>,
{
    fn display_name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> Result<Node> {
        (self.build)()
    }
}

/// Summary of a registered node type, for menus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeTypeSummary {
    pub name: String,
    pub category: Option<String>,
    pub description: String,
}

/// Node factories keyed by display name, in registration order.
#[derive(Default)]
pub struct NodeRegistry {
    factories: Vec<Box<dyn NodeFactory>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, factory: impl NodeFactory + 'static) -> Result<()> {
        self.register_boxed(Box::new(factory))
    }

    pub fn register_boxed(&mut self, factory: Box<dyn NodeFactory>) -> Result<()> {
        let name = factory.display_name();
        if self.contains(name) {
            return Err(LibraryError::DuplicateNodeType(name.to_string()));
        }
        log::debug!("NodeRegistry: registered '{}'", name);
        self.factories.push(factory);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn NodeFactory> {
        self.factories
            .iter()
            .find(|f| f.display_name() == name)
            .map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Creates a node of the named type, labelled with that name.
    pub fn create(&self, name: &str) -> Result<Node> {
        let factory = self
            .get(name)
            .ok_or_else(|| LibraryError::UnknownNodeType(name.to_string()))?;
        let mut node = factory.create()?;
        node.label = factory.display_name().to_string();
        Ok(node)
    }

    pub fn node_types(&self) -> Vec<NodeTypeSummary> {
        self.factories
            .iter()
            .map(|f| NodeTypeSummary {
                name: f.display_name().to_string(),
                category: f.category().map(str::to_string),
                description: f.description().to_string(),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn NodeFactory> {
        self.factories.iter().map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
