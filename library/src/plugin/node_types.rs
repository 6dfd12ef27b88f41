//! Data-driven node types.
//!
//! A [`NodeDefinition`] lists the inputs, controls and outputs of a node type.
//! Definitions are either built in (see `node_definitions`) or loaded from
//! TOML files containing `[[node]]` tables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use std::collections::HashSet;

use crate::error::{LibraryError, Result};
use crate::evaluation::Operation;
use crate::model::{ControlValue, InputControl, InputKind, Node, Port, Socket, SocketTable};
use crate::plugin::{NodeFactory, NodeRegistry};

fn default_category() -> String {
    "General".to_string()
}

/// An input or output of a node type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PortDefinition {
    pub name: String,
    /// Name of the socket typing this port
    pub socket: String,
    #[serde(default)]
    pub description: String,
}

/// An inline control of a node type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ControlDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(default)]
    pub default: Option<ControlValue>,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeDefinition {
    /// Identifier, used to derive the display name when `name` is absent
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub inputs: Vec<PortDefinition>,
    #[serde(default)]
    pub controls: Vec<ControlDefinition>,
    #[serde(default)]
    pub outputs: Vec<PortDefinition>,
    #[serde(default)]
    pub operation: Operation,
}

impl NodeDefinition {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            description: String::new(),
            category: default_category(),
            inputs: Vec::new(),
            controls: Vec::new(),
            outputs: Vec::new(),
            operation: Operation::default(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_input(mut self, name: &str, socket: &str) -> Self {
        self.inputs.push(PortDefinition {
            name: name.to_string(),
            socket: socket.to_string(),
            description: String::new(),
        });
        self
    }

    pub fn with_control(mut self, name: &str, kind: InputKind, default: Option<ControlValue>) -> Self {
        self.controls.push(ControlDefinition {
            name: name.to_string(),
            kind,
            default,
            description: String::new(),
        });
        self
    }

    pub fn with_output(mut self, name: &str, socket: &str) -> Self {
        self.outputs.push(PortDefinition {
            name: name.to_string(),
            socket: socket.to_string(),
            description: String::new(),
        });
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Explicit name, or the id run through [`normalize_name`].
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| normalize_name(&self.id))
    }
}

/// Turns an identifier into a display name: `"string_join"` → `"String Join"`.
///
/// Underscores become spaces. A letter is upper-cased when it follows a
/// non-letter and lower-cased otherwise, so `"add_2d"` → `"Add 2D"`.
pub fn normalize_name(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut after_letter = false;
    for c in id.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

/// A [`NodeDefinition`] with its sockets resolved, ready to create nodes.
#[derive(Clone, Debug)]
pub struct DefinedNode {
    definition: NodeDefinition,
    display_name: String,
    inputs: Vec<Socket>,
    outputs: Vec<Socket>,
}

impl DefinedNode {
    /// Resolves every port socket through `sockets`, so ports naming the same
    /// socket share one instance across all node types.
    ///
    /// Fails with [`LibraryError::InvalidDefinition`] when a name repeats within
    /// the inputs, the controls or the outputs.
    pub fn new(definition: NodeDefinition, sockets: &mut SocketTable) -> Result<Self> {
        check_unique(&definition.id, "input", definition.inputs.iter().map(|p| &p.name))?;
        check_unique(&definition.id, "control", definition.controls.iter().map(|c| &c.name))?;
        check_unique(&definition.id, "output", definition.outputs.iter().map(|p| &p.name))?;

        let inputs = definition
            .inputs
            .iter()
            .map(|p| sockets.get_or_create(&p.socket))
            .collect();
        let outputs = definition
            .outputs
            .iter()
            .map(|p| sockets.get_or_create(&p.socket))
            .collect();
        Ok(Self {
            display_name: definition.display_name(),
            definition,
            inputs,
            outputs,
        })
    }

    pub fn definition(&self) -> &NodeDefinition {
        &self.definition
    }
}

fn check_unique<'a>(
    id: &str,
    kind: &str,
    names: impl Iterator<Item = &'a String>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(LibraryError::InvalidDefinition {
                id: id.to_string(),
                reason: format!("{} '{}' is declared twice", kind, name),
            });
        }
    }
    Ok(())
}

impl NodeFactory for DefinedNode {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn category(&self) -> Option<&str> {
        Some(&self.definition.category)
    }

    fn description(&self) -> &str {
        &self.definition.description
    }

    fn operation(&self) -> Operation {
        self.definition.operation
    }

    fn create(&self) -> Result<Node> {
        let mut node = Node::new(&self.display_name);
        for (def, socket) in self.definition.inputs.iter().zip(&self.inputs) {
            node.add_input(Port::input(&def.name, socket.clone()))?;
        }
        for def in &self.definition.controls {
            let mut control = InputControl::new(def.kind);
            if let Some(default) = &def.default {
                control = control.with_initial(default.clone());
            }
            node.add_control(&def.name, control)?;
        }
        for (def, socket) in self.definition.outputs.iter().zip(&self.outputs) {
            node.add_output(Port::output(&def.name, socket.clone()))?;
        }
        Ok(node)
    }
}

/// Registers every definition, resolving sockets through `sockets`.
pub fn register_definitions(
    registry: &mut NodeRegistry,
    sockets: &mut SocketTable,
    definitions: impl IntoIterator<Item = NodeDefinition>,
) -> Result<()> {
    for definition in definitions {
        registry.register(DefinedNode::new(definition, sockets)?)?;
    }
    Ok(())
}

#[derive(Deserialize)]
struct DefinitionFile {
    #[serde(default, rename = "node")]
    nodes: Vec<NodeDefinition>,
}

/// Loads definitions from every `*.toml` file below `dir`.
///
/// Files whose stem starts with `_` are skipped. Files are read in path
/// order so registration order is stable.
pub fn load_definitions(dir: &Path) -> Result<Vec<NodeDefinition>> {
    let mut files = Vec::new();
    collect_definition_files(dir, &mut files)?;
    files.sort();

    let mut definitions = Vec::new();
    for path in files {
        let text = fs::read_to_string(&path)?;
        let file: DefinitionFile = toml::from_str(&text)?;
        log::info!(
            "Loaded {} node definition(s) from {}",
            file.nodes.len(),
            path.display()
        );
        definitions.extend(file.nodes);
    }
    Ok(definitions)
}

fn collect_definition_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_definition_files(&path, files)?;
            continue;
        }
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let hidden = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.starts_with('_'));
        if is_toml && !hidden {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_title_cases_words() {
        assert_eq!(normalize_name("number"), "Number");
        assert_eq!(normalize_name("string_join"), "String Join");
        assert_eq!(normalize_name("rGB_split"), "Rgb Split");
    }

    #[test]
    fn normalize_name_capitalises_after_digits_and_punctuation() {
        assert_eq!(normalize_name("vec3d"), "Vec3D");
        assert_eq!(normalize_name("add_2d"), "Add 2D");
        assert_eq!(normalize_name("hello-world"), "Hello-World");
        assert_eq!(normalize_name("__x"), "  X");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn display_name_prefers_explicit_name() {
        let def = NodeDefinition::new("add_numbers").with_name("Plus");
        assert_eq!(def.display_name(), "Plus");
        assert_eq!(NodeDefinition::new("add_numbers").display_name(), "Add Numbers");
    }

    #[test]
    fn definition_parses_with_defaults() {
        let text = r#"
            [[node]]
            id = "greeting"

            [[node.controls]]
            name = "text"
            type = "text"
            default = "hi"

            [[node.outputs]]
            name = "out"
            socket = "text"
        "#;
        let file: DefinitionFile = toml::from_str(text).unwrap();
        let def = &file.nodes[0];
        assert_eq!(def.category, "General");
        assert_eq!(def.operation, Operation::Identity);
        assert_eq!(def.controls[0].kind, InputKind::Text);
        assert_eq!(def.controls[0].default, Some(ControlValue::text("hi")));
        assert!(def.inputs.is_empty());
    }

    #[test]
    fn integer_default_becomes_a_number() {
        let text = r#"
            [[node]]
            id = "n"
            controls = [{ name = "N", type = "number", default = 3 }]
        "#;
        let file: DefinitionFile = toml::from_str(text).unwrap();
        assert_eq!(file.nodes[0].controls[0].default, Some(ControlValue::number(3.0)));
    }

    #[test]
    fn defined_nodes_share_sockets() {
        let mut sockets = SocketTable::new();
        let a = DefinedNode::new(
            NodeDefinition::new("a").with_output("out", "Number"),
            &mut sockets,
        )
        .unwrap();
        let b = DefinedNode::new(
            NodeDefinition::new("b").with_input("in", "Number"),
            &mut sockets,
        )
        .unwrap();
        let out = a.create().unwrap();
        let inp = b.create().unwrap();
        assert!(Socket::ptr_eq(
            &out.output("out").unwrap().socket,
            &inp.input("in").unwrap().socket
        ));
    }
}
