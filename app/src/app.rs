use eframe::egui::{self, Visuals};
use egui_node_editor::NodeEditorTheme;
use uuid::Uuid;

use crate::session::EditorSession;

pub struct VidixyApp {
    pub session: EditorSession,
    theme: NodeEditorTheme,
    selected_node: Option<Uuid>,
}

impl VidixyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: EditorSession) -> Self {
        cc.egui_ctx.set_visuals(Visuals::dark());
        log::info!("Rendering the editor into '{}'", session.mount().id());
        Self::from_session(session)
    }

    pub fn from_session(session: EditorSession) -> Self {
        Self {
            session,
            theme: NodeEditorTheme::default(),
            selected_node: None,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("inspector")
            .default_width(220.0)
            .show(ctx, |ui| self.inspector(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(node_id) = self.session.show(ui, &self.theme) {
                    self.selected_node = Some(node_id);
                }
            });
    }

    /// Label and evaluated outputs of the selected node.
    fn inspector(&self, ui: &mut egui::Ui) {
        ui.heading("Inspector");
        ui.separator();

        let graph = &self.session.graph;
        let Some(node) = self.selected_node.and_then(|id| graph.editor.get_node(id)) else {
            ui.weak("No node selected");
            return;
        };
        ui.strong(&node.label);
        match graph.outputs(node.id) {
            Ok(outputs) if outputs.is_empty() => {
                ui.weak("No outputs");
            }
            Ok(outputs) => {
                egui::Grid::new("inspector_outputs")
                    .num_columns(2)
                    .show(ui, |ui| {
                        for (key, value) in outputs {
                            ui.label(key);
                            ui.monospace(value.to_string());
                            ui.end_row();
                        }
                    });
            }
            Err(e) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
        }
    }
}

impl eframe::App for VidixyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::create_editor;
    use crate::config::EditorOptions;
    use crate::mount::{CONTAINER_ID, Surface};
    use egui_kittest::Harness;
    use egui_kittest::kittest::Queryable;
    use egui_node_editor::{ControlValueView, NodeEditorMutator};
    use egui_node_editor::state::ContextMenuState;

    fn app() -> VidixyApp {
        let mount = Surface::from_ids([CONTAINER_ID]).find(CONTAINER_ID).unwrap();
        VidixyApp::from_session(create_editor(mount, &EditorOptions::default()).unwrap())
    }

    #[test]
    fn empty_editor_shows_inspector_placeholder() {
        let mut harness = Harness::builder()
            .with_size(egui::vec2(900.0, 600.0))
            .build_state(|ctx, app: &mut VidixyApp| app.show(ctx), app());
        harness.run_steps(2);
        assert!(harness.query_by_label("Inspector").is_some());
        assert!(harness.query_by_label("No node selected").is_some());
    }

    #[test]
    fn context_menu_places_node_a() {
        let mut app = app();
        app.session.area.state_mut().context_menu = Some(ContextMenuState {
            screen_pos: egui::pos2(40.0, 40.0),
            graph_pos: egui::pos2(200.0, 150.0),
        });
        let mut harness = Harness::builder()
            .with_size(egui::vec2(900.0, 600.0))
            .build_state(|ctx, app: &mut VidixyApp| app.show(ctx), app);
        harness.run_steps(2);
        harness.get_by_label("NodeA").click();
        harness.run_steps(2);

        let session = &harness.state().session;
        let nodes = session.graph.editor.nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].label, "NodeA");
        assert_eq!(
            session.area.state().node_positions.get(&nodes[0].id),
            Some(&egui::pos2(200.0, 150.0))
        );
    }

    #[test]
    fn inspector_shows_evaluated_text() {
        let mut app = app();
        let id = app.session.graph.add_node("NodeA").unwrap();
        app.session
            .graph
            .set_control_value(id, "port", ControlValueView::Text("hello".into()))
            .unwrap();
        app.selected_node = Some(id);
        let mut harness = Harness::builder()
            .with_size(egui::vec2(900.0, 600.0))
            .build_state(|ctx, app: &mut VidixyApp| app.show(ctx), app);
        harness.run_steps(2);
        assert!(harness.query_by_label("hello").is_some());
    }
}
