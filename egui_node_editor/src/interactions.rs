//! Pointer and keyboard handling for the node editor, plus the two context menus.

use egui::{self, Pos2, Rect, Vec2};
use uuid::Uuid;

use crate::drawing::distance_to_polyline;
use crate::plugins::ContextMenuItem;
use crate::state::{
    BoxSelectState, ConnectingState, ContextMenuState, DragState, NodeContextMenuState,
    NodeEditorState,
};
use crate::theme::NodeEditorTheme;
use crate::widget::{ConnectionCurve, NodeInteraction, PendingActions, PinScreen};

/// Pixel distance within which a click selects a connection.
const CONNECTION_HIT_DISTANCE: f32 = 6.0;

/// Context passed to interaction handlers (avoids threading many parameters).
pub(crate) struct InteractionContext<'a> {
    pub ui: &'a egui::Ui,
    pub area_id: egui::Id,
    pub canvas_rect: Rect,
    pub canvas_response: &'a egui::Response,
    pub nodes: &'a [NodeInteraction],
    pub pin_screens: &'a [PinScreen],
    pub curves: &'a [ConnectionCurve],
    /// `None` when the area renders no menus.
    pub menu_items: Option<&'a [ContextMenuItem]>,
    pub can_connect: bool,
    pub theme: &'a NodeEditorTheme,
    pub zoom: f32,
    pub hit_radius: f32,
}

pub(crate) fn handle_interactions(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
) -> PendingActions {
    let mut pending = PendingActions::default();
    let pointer_pos = ctx.ui.input(|i| i.pointer.hover_pos());

    handle_active_drag(state, ctx);
    handle_drag_stop(state, ctx, pointer_pos, &mut pending);
    handle_drag_start(state, ctx, pointer_pos, &mut pending);
    handle_connecting_update(state, pointer_pos);
    handle_single_click(state, ctx, pointer_pos, &mut pending);
    handle_right_click(state, ctx, pointer_pos);
    render_context_menu(state, ctx, &mut pending);
    render_node_context_menu(state, ctx, &mut pending);
    handle_delete_key(state, ctx, &mut pending);

    pending
}

// ---------------------------------------------------------------------------
// Hit-testing helpers
// ---------------------------------------------------------------------------

/// Find the closest pin within hit_radius of pos.
pub(crate) fn find_nearest_pin<'a>(
    pin_screens: &'a [PinScreen],
    pos: Pos2,
    hit_radius: f32,
    exclude_node: Option<Uuid>,
    require_output: Option<bool>,
) -> Option<&'a PinScreen> {
    pin_screens
        .iter()
        .filter(|ps| exclude_node != Some(ps.node_id))
        .filter(|ps| require_output.is_none_or(|req| ps.is_output == req))
        .map(|ps| (pos.distance(ps.pos), ps))
        .filter(|(d, _)| *d < hit_radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, ps)| ps)
}

fn find_nearest_curve(curves: &[ConnectionCurve], pos: Pos2) -> Option<Uuid> {
    curves
        .iter()
        .map(|c| (distance_to_polyline(&c.points, pos), c.id))
        .filter(|(d, _)| *d <= CONNECTION_HIT_DISTANCE)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

// ---------------------------------------------------------------------------
// Individual interaction handlers
// ---------------------------------------------------------------------------

fn handle_active_drag(state: &mut NodeEditorState, ctx: &InteractionContext) {
    if !ctx.canvas_response.dragged_by(egui::PointerButton::Primary) {
        return;
    }
    let delta = ctx.canvas_response.drag_delta() / ctx.zoom;

    if let Some(ref drag) = state.dragging {
        for nid in &drag.node_ids {
            if let Some(pos) = state.node_positions.get_mut(nid) {
                *pos += delta;
            }
        }
    } else if let Some(ref mut bs) = state.box_selecting {
        if let Some(pos) = ctx.ui.input(|i| i.pointer.hover_pos()) {
            bs.current = pos;
        }
    }
}

fn handle_drag_stop(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx
        .canvas_response
        .drag_stopped_by(egui::PointerButton::Primary)
    {
        return;
    }

    // Finish connection; output and input are normalized here
    if let (Some(connecting), Some(pos)) = (state.connecting.take(), pointer_pos) {
        let target = find_nearest_pin(
            ctx.pin_screens,
            pos,
            ctx.hit_radius,
            Some(connecting.from_node),
            Some(!connecting.is_output),
        );
        if let Some(target) = target {
            if connecting.is_output {
                pending.connections_to_add.push((
                    connecting.from_node,
                    connecting.from_pin,
                    target.node_id,
                    target.name.clone(),
                ));
            } else {
                pending.connections_to_add.push((
                    target.node_id,
                    target.name.clone(),
                    connecting.from_node,
                    connecting.from_pin,
                ));
            }
        }
    }

    if let Some(bs) = state.box_selecting.take() {
        let sel_rect = Rect::from_two_pos(bs.start, bs.current);
        if !ctx.ui.input(|i| i.modifiers.shift) {
            state.selected_nodes.clear();
        }
        for node in ctx.nodes {
            if sel_rect.intersects(node.rect) {
                state.selected_nodes.insert(node.id);
            }
        }
    }

    state.connecting = None;
    state.dragging = None;
}

fn handle_drag_start(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx
        .canvas_response
        .drag_started_by(egui::PointerButton::Primary)
    {
        return;
    }
    let Some(pos) = pointer_pos else { return };

    // 1. Pin hit starts a connection
    if ctx.can_connect {
        if let Some(ps) = find_nearest_pin(ctx.pin_screens, pos, ctx.hit_radius, None, None) {
            state.connecting = Some(ConnectingState {
                from_node: ps.node_id,
                from_pin: ps.name.clone(),
                is_output: ps.is_output,
                mouse_pos: pos,
            });
            return;
        }
    }

    // 2. Node header drags the selection
    let header_h = ctx.theme.header_height * ctx.zoom;
    for node in ctx.nodes.iter().rev() {
        let header_rect =
            Rect::from_min_size(node.rect.min, Vec2::new(node.rect.width(), header_h));
        if header_rect.contains(pos) {
            if !state.selected_nodes.contains(&node.id) && !ctx.ui.input(|i| i.modifiers.shift) {
                state.selected_nodes.clear();
            }
            state.selected_nodes.insert(node.id);
            pending.selected_node = Some(node.id);
            state.dragging = Some(DragState {
                node_ids: state.selected_nodes.iter().copied().collect(),
            });
            return;
        }
    }

    // 3. Empty space starts box selection
    if !ctx.nodes.iter().any(|n| n.rect.contains(pos)) {
        state.box_selecting = Some(BoxSelectState {
            start: pos,
            current: pos,
        });
    }
}

fn handle_connecting_update(state: &mut NodeEditorState, pointer_pos: Option<Pos2>) {
    if let (Some(connecting), Some(pos)) = (state.connecting.as_mut(), pointer_pos) {
        connecting.mouse_pos = pos;
    }
}

fn handle_single_click(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx.canvas_response.clicked() {
        return;
    }
    let Some(pos) = pointer_pos else { return };
    let shift = ctx.ui.input(|i| i.modifiers.shift);

    state.context_menu = None;
    state.node_context_menu = None;

    if let Some(node) = ctx.nodes.iter().rev().find(|n| n.rect.contains(pos)) {
        if !shift {
            state.selected_nodes.clear();
            state.selected_connections.clear();
        }
        state.selected_nodes.insert(node.id);
        pending.selected_node = Some(node.id);
        return;
    }

    if !shift {
        state.selected_nodes.clear();
        state.selected_connections.clear();
    }
    if let Some(conn_id) = find_nearest_curve(ctx.curves, pos) {
        state.selected_connections.insert(conn_id);
    }
}

fn handle_right_click(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
) {
    if ctx.menu_items.is_none() || !ctx.canvas_response.secondary_clicked() {
        return;
    }
    let Some(pos) = pointer_pos else { return };

    if let Some(node) = ctx.nodes.iter().rev().find(|n| n.rect.contains(pos)) {
        state.node_context_menu = Some(NodeContextMenuState {
            screen_pos: pos,
            node_id: node.id,
        });
        state.context_menu = None;
        return;
    }

    state.context_menu = Some(ContextMenuState {
        screen_pos: pos,
        graph_pos: state.screen_to_graph(ctx.canvas_rect.min, pos),
    });
    state.context_search.clear();
    state.node_context_menu = None;
}

fn render_context_menu(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
    pending: &mut PendingActions,
) {
    let Some(items) = ctx.menu_items else {
        state.context_menu = None;
        return;
    };
    let Some(menu) = state.context_menu.clone() else {
        return;
    };

    let mut picked: Option<&ContextMenuItem> = None;
    let mut close = false;
    egui::Area::new(ctx.area_id.with("context_menu"))
        .order(egui::Order::Foreground)
        .fixed_pos(menu.screen_pos)
        .show(ctx.ui.ctx(), |ui| {
            egui::Frame::menu(ui.style()).show(ui, |ui| {
                ui.set_max_width(250.0);
                ui.label("Add Node");
                ui.separator();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.context_search)
                        .id(ctx.area_id.with("context_search"))
                        .hint_text("Search..."),
                );
                if !response.has_focus() && !response.lost_focus() {
                    response.request_focus();
                }
                ui.separator();

                let search = state.context_search.to_lowercase();
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| {
                        if !search.is_empty() {
                            let mut any = false;
                            for item in items.iter().filter(|i| {
                                i.label.to_lowercase().contains(&search)
                                    || i.type_id.to_lowercase().contains(&search)
                            }) {
                                any = true;
                                if ui.button(&item.label).clicked() {
                                    picked = Some(item);
                                }
                            }
                            if !any {
                                ui.weak("No matching nodes");
                            }
                            return;
                        }

                        for item in items.iter().filter(|i| i.category.is_none()) {
                            if ui.button(&item.label).clicked() {
                                picked = Some(item);
                            }
                        }
                        let mut categories: Vec<&str> =
                            items.iter().filter_map(|i| i.category.as_deref()).collect();
                        categories.sort_unstable();
                        categories.dedup();
                        for category in categories {
                            ui.menu_button(category, |ui| {
                                for item in items
                                    .iter()
                                    .filter(|i| i.category.as_deref() == Some(category))
                                {
                                    if ui.button(&item.label).clicked() {
                                        picked = Some(item);
                                    }
                                }
                            });
                        }
                    });
            });
        });

    if let Some(item) = picked {
        pending
            .nodes_to_add
            .push((item.type_id.clone(), menu.graph_pos));
        close = true;
    }
    if close || ctx.ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.context_menu = None;
    }
}

fn render_node_context_menu(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
    pending: &mut PendingActions,
) {
    if ctx.menu_items.is_none() {
        state.node_context_menu = None;
        return;
    }
    let Some(menu) = state.node_context_menu.clone() else {
        return;
    };

    let mut close = false;
    let sel_count = state.selected_nodes.len();
    let delete_selection = sel_count > 1 && state.selected_nodes.contains(&menu.node_id);
    egui::Area::new(ctx.area_id.with("node_context_menu"))
        .order(egui::Order::Foreground)
        .fixed_pos(menu.screen_pos)
        .show(ctx.ui.ctx(), |ui| {
            egui::Frame::menu(ui.style()).show(ui, |ui| {
                ui.set_max_width(180.0);
                if delete_selection {
                    let label = format!("Delete Selected ({})", sel_count);
                    if ui.button(&label).clicked() {
                        pending.nodes_to_remove.extend(state.selected_nodes.drain());
                        close = true;
                    }
                } else if ui.button("Delete Node").clicked() {
                    pending.nodes_to_remove.push(menu.node_id);
                    state.selected_nodes.remove(&menu.node_id);
                    close = true;
                }
            });
        });
    if close || ctx.ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.node_context_menu = None;
    }
}

fn handle_delete_key(
    state: &mut NodeEditorState,
    ctx: &InteractionContext,
    pending: &mut PendingActions,
) {
    // Keys typed into a control belong to the control.
    if ctx.ui.ctx().memory(|m| m.focused().is_some()) {
        return;
    }
    if ctx
        .ui
        .input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
    {
        pending.nodes_to_remove.extend(state.selected_nodes.drain());
        pending
            .connections_to_remove
            .extend(state.selected_connections.drain());
    }
}
