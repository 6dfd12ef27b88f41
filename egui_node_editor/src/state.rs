//! UI state for the node editor.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Canvas state owned by an [`crate::AreaPlugin`].
pub struct NodeEditorState {
    /// Pan offset in screen pixels.
    pub pan: egui::Vec2,
    /// Zoom level (1.0 = 100%).
    pub zoom: f32,
    /// Node positions in graph space.
    pub node_positions: HashMap<Uuid, egui::Pos2>,
    /// Currently selected nodes.
    pub selected_nodes: HashSet<Uuid>,
    /// Currently selected connections.
    pub selected_connections: HashSet<Uuid>,
    /// Drag state for nodes.
    pub dragging: Option<DragState>,
    /// Connection creation state.
    pub connecting: Option<ConnectingState>,
    /// Context menu state (right-click on empty space).
    pub context_menu: Option<ContextMenuState>,
    /// Node-specific context menu (right-click on a node).
    pub node_context_menu: Option<NodeContextMenuState>,
    /// Search text for context menu.
    pub context_search: String,
    /// Box selection state.
    pub box_selecting: Option<BoxSelectState>,
}

impl Default for NodeEditorState {
    fn default() -> Self {
        Self {
            pan: egui::Vec2::ZERO,
            zoom: 1.0,
            node_positions: HashMap::new(),
            selected_nodes: HashSet::new(),
            selected_connections: HashSet::new(),
            dragging: None,
            connecting: None,
            context_menu: None,
            node_context_menu: None,
            context_search: String::new(),
            box_selecting: None,
        }
    }
}

impl NodeEditorState {
    /// Convert a screen position into graph space.
    pub fn screen_to_graph(&self, canvas_min: egui::Pos2, screen: egui::Pos2) -> egui::Pos2 {
        ((screen - canvas_min - self.pan) / self.zoom).to_pos2()
    }

    /// Convert a graph position into screen space.
    pub fn graph_to_screen(&self, canvas_min: egui::Pos2, graph: egui::Pos2) -> egui::Pos2 {
        canvas_min + graph.to_vec2() * self.zoom + self.pan
    }

    /// Forget everything about a node that is gone.
    pub fn forget_node(&mut self, node_id: Uuid) {
        self.node_positions.remove(&node_id);
        self.selected_nodes.remove(&node_id);
        if self
            .node_context_menu
            .as_ref()
            .is_some_and(|m| m.node_id == node_id)
        {
            self.node_context_menu = None;
        }
    }
}

pub struct DragState {
    pub node_ids: Vec<Uuid>,
}

pub struct ConnectingState {
    pub from_node: Uuid,
    pub from_pin: String,
    pub is_output: bool,
    pub mouse_pos: egui::Pos2,
}

#[derive(Clone)]
pub struct ContextMenuState {
    pub screen_pos: egui::Pos2,
    /// Where a node picked from the menu is placed.
    pub graph_pos: egui::Pos2,
}

#[derive(Clone)]
pub struct NodeContextMenuState {
    pub screen_pos: egui::Pos2,
    pub node_id: Uuid,
}

pub struct BoxSelectState {
    pub start: egui::Pos2,
    pub current: egui::Pos2,
}
