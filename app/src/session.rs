//! A running editor: the graph plus the area it is drawn in.

use egui_node_editor::{
    AreaPlugin, ConnectionView, ControlValueView, ControlView, NodeDisplay, NodeEditorDataSource,
    NodeEditorMutator, NodeEditorTheme, NodeEditorWidget, NodeTypeInfo, PinInfo,
};
use uuid::Uuid;
use vidixy::{
    ControlValue, DataflowEngine, Node, NodeEditor, NodeRegistry, Outputs, PortId, Socket,
    SocketTable,
};

use crate::mount::MountPoint;

/// Graph side of a session, exposed to the widget through the data-source
/// and mutator traits.
pub struct EditorGraph {
    pub editor: NodeEditor,
    pub registry: NodeRegistry,
    pub engine: DataflowEngine,
    pub sockets: SocketTable,
    /// The socket every `NodeA` output is typed by.
    pub text_socket: Socket,
}

impl EditorGraph {
    /// Create a node from the registry and place it in the editor.
    pub fn create_node(&mut self, type_name: &str) -> vidixy::Result<Uuid> {
        let node = self.registry.create(type_name)?;
        self.editor.add_node(node)
    }

    pub fn node_types(&self) -> Vec<NodeTypeInfo> {
        self.registry
            .node_types()
            .into_iter()
            .map(|t| NodeTypeInfo {
                type_id: t.name.clone(),
                display_name: t.name,
                category: t.category,
            })
            .collect()
    }

    /// Evaluate a node's outputs.
    pub fn outputs(&self, node_id: Uuid) -> vidixy::Result<Outputs> {
        self.engine.fetch(&self.editor, node_id)
    }
}

fn to_view(value: &ControlValue) -> ControlValueView {
    match value {
        ControlValue::Number(n) => ControlValueView::Number(n.into_inner()),
        ControlValue::Text(t) => ControlValueView::Text(t.clone()),
    }
}

fn from_view(value: ControlValueView) -> ControlValue {
    match value {
        ControlValueView::Number(n) => ControlValue::number(n),
        ControlValueView::Text(t) => ControlValue::Text(t),
    }
}

fn node_display(node: &Node) -> NodeDisplay {
    let mut pins: Vec<PinInfo> = node
        .outputs()
        .iter()
        .map(|p| PinInfo::output(&p.key, &p.label, p.socket.name()))
        .collect();
    pins.extend(
        node.inputs()
            .iter()
            .map(|p| PinInfo::input(&p.key, &p.label, p.socket.name())),
    );
    NodeDisplay {
        label: node.label.clone(),
        pins,
        controls: node
            .controls()
            .map(|(key, control)| ControlView {
                name: key.to_string(),
                value: to_view(control.value()),
                readonly: control.is_readonly(),
            })
            .collect(),
    }
}

impl NodeEditorDataSource for EditorGraph {
    fn node_ids(&self) -> Vec<Uuid> {
        self.editor.nodes().iter().map(|n| n.id).collect()
    }

    fn get_node_display(&self, id: Uuid) -> Option<NodeDisplay> {
        self.editor.get_node(id).map(node_display)
    }

    fn get_connections(&self) -> Vec<ConnectionView> {
        self.editor
            .connections()
            .iter()
            .map(|c| ConnectionView {
                id: c.id,
                from_node: c.from.node_id,
                from_pin: c.from.key.clone(),
                to_node: c.to.node_id,
                to_pin: c.to.key.clone(),
            })
            .collect()
    }
}

impl NodeEditorMutator for EditorGraph {
    fn add_node(&mut self, type_id: &str) -> Result<Uuid, String> {
        self.create_node(type_id).map_err(|e| e.to_string())
    }

    fn remove_node(&mut self, node_id: Uuid) -> Result<(), String> {
        self.editor
            .remove_node(node_id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn add_connection(
        &mut self,
        from_node: Uuid,
        from_pin: &str,
        to_node: Uuid,
        to_pin: &str,
    ) -> Result<Uuid, String> {
        self.editor
            .add_connection(PortId::new(from_node, from_pin), PortId::new(to_node, to_pin))
            .map_err(|e| e.to_string())
    }

    fn remove_connection(&mut self, connection_id: Uuid) -> Result<(), String> {
        self.editor
            .remove_connection(connection_id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn set_control_value(
        &mut self,
        node_id: Uuid,
        control: &str,
        value: ControlValueView,
    ) -> Result<(), String> {
        self.editor
            .set_control_value(node_id, control, from_view(value))
            .map_err(|e| e.to_string())
    }
}

/// A fully wired editor mounted on one region of the surface.
pub struct EditorSession {
    pub graph: EditorGraph,
    pub area: AreaPlugin,
    mount: MountPoint,
}

impl EditorSession {
    pub(crate) fn new(graph: EditorGraph, area: AreaPlugin, mount: MountPoint) -> Self {
        Self { graph, area, mount }
    }

    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    /// Draw the editor into `ui` and apply what the user did. Returns the
    /// node clicked this frame, if any.
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &NodeEditorTheme) -> Option<Uuid> {
        let pending = NodeEditorWidget::new(&mut self.area, theme).show(ui, &self.graph);
        let selected = pending.selected_node;
        if !pending.is_empty() {
            pending.apply(&mut self.graph, self.area.state_mut());
        }
        selected
    }
}
