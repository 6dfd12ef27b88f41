//! Main node editor widget.

use egui::{self, Color32, Pos2, Rect, Stroke, StrokeKind};
use std::collections::HashMap;
use uuid::Uuid;

use crate::drawing::{bezier_points, draw_grid, draw_polyline};
use crate::interactions::{self, InteractionContext};
use crate::node_rendering::{self, NodeLayout};
use crate::plugins::AreaPlugin;
use crate::state::NodeEditorState;
use crate::theme::NodeEditorTheme;
use crate::traits::{NodeEditorDataSource, NodeEditorMutator};
use crate::types::{ControlValueView, PinInfo};

// ---------------------------------------------------------------------------
// PendingActions
// ---------------------------------------------------------------------------

/// Pending mutations collected during the render phase, applied after.
#[derive(Default, Debug)]
pub struct PendingActions {
    pub nodes_to_remove: Vec<Uuid>,
    pub connections_to_remove: Vec<Uuid>,
    /// (from_node, from_pin, to_node, to_pin)
    pub connections_to_add: Vec<(Uuid, String, Uuid, String)>,
    /// (type_id, graph position)
    pub nodes_to_add: Vec<(String, Pos2)>,
    pub control_updates: Vec<(Uuid, String, ControlValueView)>,
    /// Node clicked this frame, for inspector sync.
    pub selected_node: Option<Uuid>,
}

impl PendingActions {
    /// Apply everything through `mutator`. Rejected mutations are logged and
    /// skipped; the rest still go through.
    pub fn apply(self, mutator: &mut dyn NodeEditorMutator, state: &mut NodeEditorState) {
        for (node_id, control, value) in self.control_updates {
            if let Err(e) = mutator.set_control_value(node_id, &control, value) {
                log::warn!("Failed to set control '{}' on {}: {}", control, node_id, e);
            }
        }
        for conn_id in self.connections_to_remove {
            if let Err(e) = mutator.remove_connection(conn_id) {
                log::warn!("Failed to remove connection {}: {}", conn_id, e);
            }
            state.selected_connections.remove(&conn_id);
        }
        for node_id in self.nodes_to_remove {
            match mutator.remove_node(node_id) {
                Ok(()) => state.forget_node(node_id),
                Err(e) => log::warn!("Failed to remove node {}: {}", node_id, e),
            }
        }
        for (from_node, from_pin, to_node, to_pin) in self.connections_to_add {
            if let Err(e) = mutator.add_connection(from_node, &from_pin, to_node, &to_pin) {
                log::warn!(
                    "Rejected connection {}.{} -> {}.{}: {}",
                    from_node,
                    from_pin,
                    to_node,
                    to_pin,
                    e
                );
            }
        }
        for (type_id, pos) in self.nodes_to_add {
            match mutator.add_node(&type_id) {
                Ok(id) => {
                    state.node_positions.insert(id, pos);
                }
                Err(e) => log::warn!("Failed to add node '{}': {}", type_id, e),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes_to_remove.is_empty()
            && self.connections_to_remove.is_empty()
            && self.connections_to_add.is_empty()
            && self.nodes_to_add.is_empty()
            && self.control_updates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pin position tracking
// ---------------------------------------------------------------------------

/// Screen position of a rendered pin.
pub(crate) struct PinScreen {
    pub pos: Pos2,
    pub node_id: Uuid,
    pub name: String,
    pub is_output: bool,
    pub socket: String,
}

impl PinScreen {
    pub fn new(node_id: Uuid, pin: &PinInfo, pos: Pos2) -> Self {
        Self {
            pos,
            node_id,
            name: pin.name.clone(),
            is_output: pin.is_output,
            socket: pin.socket.clone(),
        }
    }
}

pub(crate) struct NodeInteraction {
    pub id: Uuid,
    pub rect: Rect,
}

/// A drawn connection, kept for click selection.
pub(crate) struct ConnectionCurve {
    pub id: Uuid,
    pub points: Vec<Pos2>,
}

// ---------------------------------------------------------------------------
// NodeEditorWidget
// ---------------------------------------------------------------------------

pub struct NodeEditorWidget<'a> {
    area: &'a mut AreaPlugin,
    theme: &'a NodeEditorTheme,
}

impl<'a> NodeEditorWidget<'a> {
    pub fn new(area: &'a mut AreaPlugin, theme: &'a NodeEditorTheme) -> Self {
        Self { area, theme }
    }

    /// Show the node editor. Returns pending actions to apply via mutator.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        source: &dyn NodeEditorDataSource,
    ) -> PendingActions {
        let renders_nodes = self.area.renders_nodes();
        let renders_menus = self.area.renders_menus();
        let can_connect = self.area.can_connect();
        let (min_zoom, max_zoom) = self.area.zoom_bounds();
        let AreaPlugin {
            id: area_id,
            state,
            context_menu,
            ..
        } = &mut *self.area;
        let area_id = *area_id;

        if !(min_zoom..=max_zoom).contains(&state.zoom) {
            state.zoom = state.zoom.clamp(min_zoom, max_zoom);
        }

        let node_ids = source.node_ids();
        let mut placed = state.node_positions.len();
        for &id in &node_ids {
            state.node_positions.entry(id).or_insert_with(|| {
                let step = placed as f32 * 30.0;
                placed += 1;
                Pos2::new(50.0 + step, 50.0 + step)
            });
        }

        // Selected connections may have gone with a removed node
        let connections = source.get_connections();
        state
            .selected_connections
            .retain(|id| connections.iter().any(|c| c.id == *id));

        // Main canvas
        let available = ui.available_rect_before_wrap();
        let (canvas_response, painter) =
            ui.allocate_painter(available.size(), egui::Sense::click_and_drag());
        let canvas_rect = canvas_response.rect;

        // Zoom via scroll wheel, anchored at the pointer
        if let Some(hover) = ui.input(|i| i.pointer.hover_pos()) {
            if canvas_rect.contains(hover) {
                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll != 0.0 {
                    let old_zoom = state.zoom;
                    let new_zoom = (old_zoom + scroll * 0.002).clamp(min_zoom, max_zoom);
                    let graph_pos = (hover - canvas_rect.min - state.pan) / old_zoom;
                    state.pan = hover - canvas_rect.min - graph_pos * new_zoom;
                    state.zoom = new_zoom;
                }
            }
        }
        let zoom = state.zoom;

        if canvas_response.dragged_by(egui::PointerButton::Middle) {
            state.pan += canvas_response.drag_delta();
        }

        painter.rect_filled(canvas_rect, 0.0, self.theme.background_color);
        if renders_nodes {
            draw_grid(
                &painter,
                canvas_rect,
                state.pan,
                self.theme.grid_color,
                self.theme.grid_spacing * zoom,
            );
        }

        let mut pin_screens: Vec<PinScreen> = Vec::new();
        let mut node_interactions: Vec<NodeInteraction> = Vec::new();
        let mut curves: Vec<ConnectionCurve> = Vec::new();
        let mut control_updates = Vec::new();

        if renders_nodes {
            for &node_id in &node_ids {
                let Some(display) = source.get_node_display(node_id) else {
                    continue;
                };
                let pos = state
                    .node_positions
                    .get(&node_id)
                    .copied()
                    .unwrap_or(Pos2::ZERO);
                let layout =
                    NodeLayout::new(&display, state.graph_to_screen(canvas_rect.min, pos), self.theme, zoom);
                let is_selected = state.selected_nodes.contains(&node_id);

                node_rendering::draw_node_chrome(
                    &painter,
                    &layout,
                    self.theme,
                    &display.label,
                    is_selected,
                    zoom,
                );
                node_rendering::draw_pins(
                    &painter,
                    &layout,
                    self.theme,
                    node_id,
                    &display,
                    zoom,
                    &mut pin_screens,
                );
                for (control, value) in
                    node_rendering::show_controls(ui, area_id, &layout, node_id, &display)
                {
                    control_updates.push((node_id, control, value));
                }
                node_interactions.push(NodeInteraction {
                    id: node_id,
                    rect: layout.node_rect,
                });
            }

            let pin_map: HashMap<(Uuid, &str, bool), &PinScreen> = pin_screens
                .iter()
                .map(|p| ((p.node_id, p.name.as_str(), p.is_output), p))
                .collect();

            // Connections on top of nodes
            for conn in &connections {
                let from = pin_map.get(&(conn.from_node, conn.from_pin.as_str(), true));
                let to = pin_map.get(&(conn.to_node, conn.to_pin.as_str(), false));
                let (Some(from), Some(to)) = (from, to) else {
                    continue;
                };
                let color = if state.selected_connections.contains(&conn.id) {
                    self.theme.connection_selected_color
                } else {
                    (self.theme.socket_color)(&from.socket)
                };
                let points = bezier_points(from.pos, to.pos);
                draw_polyline(&painter, &points, 2.0 * zoom, color);
                curves.push(ConnectionCurve {
                    id: conn.id,
                    points,
                });
            }

            if let Some(ref connecting) = state.connecting {
                if let Some(start) = pin_map.get(&(
                    connecting.from_node,
                    connecting.from_pin.as_str(),
                    connecting.is_output,
                )) {
                    let (a, b) = if connecting.is_output {
                        (start.pos, connecting.mouse_pos)
                    } else {
                        (connecting.mouse_pos, start.pos)
                    };
                    draw_polyline(
                        &painter,
                        &bezier_points(a, b),
                        2.0 * zoom,
                        Color32::from_rgb(200, 200, 200),
                    );
                }
            }
        }

        if node_ids.is_empty() && renders_menus {
            painter.text(
                canvas_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Right-click to add a node",
                egui::FontId::proportional(14.0),
                self.theme.pin_label_color.gamma_multiply(0.5),
            );
        }

        if let Some(ref bs) = state.box_selecting {
            let sel_rect = Rect::from_two_pos(bs.start, bs.current);
            painter.rect_filled(sel_rect, 0.0, self.theme.selection_color.gamma_multiply(0.12));
            painter.rect_stroke(
                sel_rect,
                0.0,
                Stroke::new(1.0, self.theme.selection_color),
                StrokeKind::Outside,
            );
        }

        let ctx = InteractionContext {
            ui: &*ui,
            area_id,
            canvas_rect,
            canvas_response: &canvas_response,
            nodes: &node_interactions,
            pin_screens: &pin_screens,
            curves: &curves,
            menu_items: context_menu
                .as_ref()
                .filter(|_| renders_menus)
                .map(|m| m.items()),
            can_connect,
            theme: self.theme,
            zoom,
            hit_radius: self.theme.pin_radius * zoom * 4.0,
        };
        let mut pending = interactions::handle_interactions(state, &ctx);
        pending.control_updates.extend(control_updates);
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConnectionView, NodeDisplay};

    /// Records every call; node ids are handed out in order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        reject_connections: bool,
    }

    impl NodeEditorMutator for Recorder {
        fn add_node(&mut self, type_id: &str) -> Result<Uuid, String> {
            self.calls.push(format!("add_node {}", type_id));
            Ok(Uuid::from_u128(self.calls.len() as u128))
        }

        fn remove_node(&mut self, _node_id: Uuid) -> Result<(), String> {
            self.calls.push("remove_node".into());
            Ok(())
        }

        fn add_connection(
            &mut self,
            _from_node: Uuid,
            from_pin: &str,
            _to_node: Uuid,
            to_pin: &str,
        ) -> Result<Uuid, String> {
            self.calls.push(format!("add_connection {}->{}", from_pin, to_pin));
            if self.reject_connections {
                Err("incompatible sockets".into())
            } else {
                Ok(Uuid::new_v4())
            }
        }

        fn remove_connection(&mut self, _connection_id: Uuid) -> Result<(), String> {
            self.calls.push("remove_connection".into());
            Ok(())
        }

        fn set_control_value(
            &mut self,
            _node_id: Uuid,
            control: &str,
            _value: ControlValueView,
        ) -> Result<(), String> {
            self.calls.push(format!("set_control_value {}", control));
            Ok(())
        }
    }

    struct EmptySource;

    impl NodeEditorDataSource for EmptySource {
        fn node_ids(&self) -> Vec<Uuid> {
            vec![]
        }

        fn get_node_display(&self, _id: Uuid) -> Option<NodeDisplay> {
            None
        }

        fn get_connections(&self) -> Vec<ConnectionView> {
            vec![]
        }
    }

    #[test]
    fn apply_runs_in_order_and_places_new_nodes() {
        let removed = Uuid::new_v4();
        let mut state = NodeEditorState::default();
        state.node_positions.insert(removed, Pos2::ZERO);
        state.selected_nodes.insert(removed);

        let pending = PendingActions {
            nodes_to_remove: vec![removed],
            connections_to_add: vec![(Uuid::new_v4(), "out".into(), Uuid::new_v4(), "in".into())],
            nodes_to_add: vec![("NodeA".into(), Pos2::new(40.0, 60.0))],
            control_updates: vec![(
                Uuid::new_v4(),
                "port".into(),
                ControlValueView::Text("hi".into()),
            )],
            ..Default::default()
        };
        assert!(!pending.is_empty());

        let mut recorder = Recorder::default();
        pending.apply(&mut recorder, &mut state);
        assert_eq!(
            recorder.calls,
            vec![
                "set_control_value port",
                "remove_node",
                "add_connection out->in",
                "add_node NodeA",
            ]
        );
        assert!(!state.node_positions.contains_key(&removed));
        assert!(state.selected_nodes.is_empty());
        assert_eq!(
            state.node_positions.get(&Uuid::from_u128(4)),
            Some(&Pos2::new(40.0, 60.0))
        );
    }

    #[test]
    fn rejected_mutations_do_not_stop_the_rest() {
        let mut state = NodeEditorState::default();
        let pending = PendingActions {
            connections_to_add: vec![(Uuid::new_v4(), "a".into(), Uuid::new_v4(), "b".into())],
            nodes_to_add: vec![("NodeA".into(), Pos2::ZERO)],
            ..Default::default()
        };
        let mut recorder = Recorder {
            reject_connections: true,
            ..Default::default()
        };
        pending.apply(&mut recorder, &mut state);
        assert_eq!(recorder.calls.len(), 2);
        assert_eq!(state.node_positions.len(), 1);
    }

    #[test]
    fn default_is_empty() {
        let pending = PendingActions {
            selected_node: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(pending.is_empty());
    }

    struct OneConnection(Uuid);

    impl NodeEditorDataSource for OneConnection {
        fn node_ids(&self) -> Vec<Uuid> {
            vec![]
        }

        fn get_node_display(&self, _id: Uuid) -> Option<NodeDisplay> {
            None
        }

        fn get_connections(&self) -> Vec<ConnectionView> {
            vec![ConnectionView {
                id: self.0,
                from_node: Uuid::new_v4(),
                from_pin: "port".into(),
                to_node: Uuid::new_v4(),
                to_pin: "in".into(),
            }]
        }
    }

    #[test]
    fn selection_drops_connections_that_no_longer_exist() {
        let kept = Uuid::new_v4();
        let gone = Uuid::new_v4();
        let mut area = AreaPlugin::new(egui::Id::new("prune"));
        area.state_mut().selected_connections.extend([kept, gone]);
        let theme = NodeEditorTheme::default();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                NodeEditorWidget::new(&mut area, &theme).show(ui, &OneConnection(kept));
            });
        });
        assert_eq!(
            area.state().selected_connections.iter().copied().collect::<Vec<_>>(),
            vec![kept]
        );

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                NodeEditorWidget::new(&mut area, &theme).show(ui, &EmptySource);
            });
        });
        assert!(area.state().selected_connections.is_empty());
    }

    #[test]
    fn zoom_is_clamped_to_area_bounds() {
        let mut area = AreaPlugin::new(egui::Id::new("zoom")).with_zoom_bounds(0.5, 2.0);
        area.state_mut().zoom = 9.0;
        let theme = NodeEditorTheme::default();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                NodeEditorWidget::new(&mut area, &theme).show(ui, &EmptySource);
            });
        });
        assert_eq!(area.state().zoom, 2.0);
    }
}
