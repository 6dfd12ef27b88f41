//! Pull-based evaluation: a node's inputs are computed by evaluating the
//! nodes feeding them, each node at most once per fetch.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::editor::NodeEditor;
use crate::error::{LibraryError, Result};
use crate::evaluation::Operation;
use crate::model::{ControlValue, Node, PortId};
use crate::plugin::NodeRegistry;

/// Output values of one node, in output order.
pub type Outputs = Vec<(String, ControlValue)>;

/// Maps node labels to the [`Operation`] that evaluates them.
#[derive(Default, Debug, Clone)]
pub struct DataflowEngine {
    operations: HashMap<String, Operation>,
}

impl DataflowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up the operation of every registered node type.
    pub fn from_registry(registry: &NodeRegistry) -> Self {
        let mut engine = Self::new();
        for factory in registry.iter() {
            engine.register(factory.display_name(), factory.operation());
        }
        engine
    }

    pub fn register(&mut self, label: &str, operation: Operation) {
        self.operations.insert(label.to_string(), operation);
    }

    /// Unregistered labels evaluate as [`Operation::Identity`].
    pub fn operation_for(&self, label: &str) -> Operation {
        self.operations.get(label).copied().unwrap_or_default()
    }

    /// Evaluates the outputs of `node_id`.
    pub fn fetch(&self, editor: &NodeEditor, node_id: Uuid) -> Result<Outputs> {
        let mut cache = HashMap::new();
        let mut visiting = HashSet::new();
        self.evaluate(editor, node_id, &mut cache, &mut visiting)
    }

    fn evaluate(
        &self,
        editor: &NodeEditor,
        node_id: Uuid,
        cache: &mut HashMap<Uuid, Outputs>,
        visiting: &mut HashSet<Uuid>,
    ) -> Result<Outputs> {
        if let Some(outputs) = cache.get(&node_id) {
            return Ok(outputs.clone());
        }
        if !visiting.insert(node_id) {
            return Err(LibraryError::Evaluation(format!(
                "cycle detected at node {}",
                node_id
            )));
        }

        let node = editor
            .get_node(node_id)
            .ok_or(LibraryError::NodeNotFound(node_id))?;

        let mut inputs: Vec<Vec<ControlValue>> = Vec::with_capacity(node.inputs().len());
        for port in node.inputs() {
            let target = PortId::new(node_id, &port.key);
            let mut values = Vec::new();
            for connection in editor.connections_to(&target) {
                let upstream = self.evaluate(editor, connection.from.node_id, cache, visiting)?;
                if let Some((_, value)) = upstream.iter().find(|(k, _)| *k == connection.from.key)
                {
                    values.push(value.clone());
                }
            }
            inputs.push(values);
        }

        let outputs = self.apply(node, &inputs)?;
        visiting.remove(&node_id);
        cache.insert(node_id, outputs.clone());
        Ok(outputs)
    }

    fn apply(&self, node: &Node, inputs: &[Vec<ControlValue>]) -> Result<Outputs> {
        match self.operation_for(&node.label) {
            Operation::Identity => {
                let controls: Vec<&ControlValue> = node.controls().map(|(_, c)| c.value()).collect();
                let outputs = node
                    .outputs()
                    .iter()
                    .enumerate()
                    .filter_map(|(i, port)| {
                        controls
                            .get(i)
                            .map(|v| (*v).clone())
                            .or_else(|| inputs.get(i).and_then(|vals| vals.first().cloned()))
                            .map(|v| (port.key.clone(), v))
                    })
                    .collect();
                Ok(outputs)
            }
            Operation::Sum => {
                let mut total = 0.0;
                for value in inputs.iter().flatten() {
                    total += value.as_number().ok_or_else(|| {
                        LibraryError::Evaluation(format!(
                            "'{}' cannot add non-numeric value '{}'",
                            node.label, value
                        ))
                    })?;
                }
                Ok(node
                    .outputs()
                    .iter()
                    .map(|port| (port.key.clone(), ControlValue::number(total)))
                    .collect())
            }
            Operation::None => Ok(Vec::new()),
        }
    }
}
