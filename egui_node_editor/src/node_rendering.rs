//! Node layout and the classic node look: header, outputs, controls, inputs.

use egui::{self, Color32, Pos2, Rect, Stroke, StrokeKind, Vec2};
use uuid::Uuid;

use crate::theme::NodeEditorTheme;
use crate::types::{ControlValueView, NodeDisplay, PinInfo};
use crate::widget::PinScreen;

/// Pre-computed screen layout for a node.
pub(crate) struct NodeLayout {
    pub node_rect: Rect,
    pub header_h: f32,
    pub pin_row_h: f32,
    pub control_row_h: f32,
    pub pin_r: f32,
    pub pin_margin: f32,
    pub rounding: f32,
    pub outputs_y: f32,
    pub controls_y: f32,
    pub inputs_y: f32,
}

impl NodeLayout {
    pub fn new(display: &NodeDisplay, screen_pos: Pos2, theme: &NodeEditorTheme, zoom: f32) -> Self {
        let header_h = theme.header_height * zoom;
        let pin_row_h = theme.pin_row_height * zoom;
        let control_row_h = theme.control_row_height * zoom;
        let pad = 4.0 * zoom;

        let outputs_y = screen_pos.y + header_h + pad;
        let controls_y = outputs_y + display.outputs().count() as f32 * pin_row_h;
        let inputs_y = controls_y + display.controls.len() as f32 * control_row_h;
        let bottom = inputs_y + display.inputs().count() as f32 * pin_row_h + pad;

        Self {
            node_rect: Rect::from_min_max(
                screen_pos,
                Pos2::new(screen_pos.x + theme.node_width * zoom, bottom),
            ),
            header_h,
            pin_row_h,
            control_row_h,
            pin_r: theme.pin_radius * zoom,
            pin_margin: theme.pin_margin * zoom,
            rounding: theme.node_rounding * zoom,
            outputs_y,
            controls_y,
            inputs_y,
        }
    }

    /// Screen rect of the `index`-th control row, inset from the node edges.
    pub fn control_rect(&self, index: usize) -> Rect {
        let top = self.controls_y + index as f32 * self.control_row_h;
        let inset = self.pin_margin * 0.5;
        Rect::from_min_max(
            Pos2::new(self.node_rect.min.x + inset, top + 2.0),
            Pos2::new(self.node_rect.max.x - inset, top + self.control_row_h - 2.0),
        )
    }
}

/// Draw the node body, header and selection outline.
pub(crate) fn draw_node_chrome(
    painter: &egui::Painter,
    layout: &NodeLayout,
    theme: &NodeEditorTheme,
    label: &str,
    is_selected: bool,
    zoom: f32,
) {
    let body_color = if is_selected {
        theme.node_body_selected_color
    } else {
        theme.node_body_color
    };
    painter.rect_filled(layout.node_rect, layout.rounding, body_color);

    if is_selected {
        painter.rect_stroke(
            layout.node_rect,
            layout.rounding,
            Stroke::new(2.0 * zoom, theme.selection_color),
            StrokeKind::Outside,
        );
    }

    let header_rect = Rect::from_min_size(
        layout.node_rect.min,
        Vec2::new(layout.node_rect.width(), layout.header_h),
    );
    let r = layout.rounding.clamp(0.0, 255.0) as u8;
    painter.rect_filled(
        header_rect,
        egui::CornerRadius {
            nw: r,
            ne: r,
            sw: 0,
            se: 0,
        },
        (theme.header_color)(label),
    );
    painter.text(
        header_rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(12.0 * zoom),
        Color32::WHITE,
    );
}

/// Draw output pins on the right and input pins on the left, pushing a
/// [`PinScreen`] for each so connections and hit-testing can find them.
pub(crate) fn draw_pins(
    painter: &egui::Painter,
    layout: &NodeLayout,
    theme: &NodeEditorTheme,
    node_id: Uuid,
    display: &NodeDisplay,
    zoom: f32,
    pin_screens: &mut Vec<PinScreen>,
) {
    for (i, pin) in display.outputs().enumerate() {
        let cy = layout.outputs_y + (i as f32 + 0.5) * layout.pin_row_h;
        let p = Pos2::new(layout.node_rect.max.x - layout.pin_margin, cy);
        draw_pin(painter, layout, theme, pin, p, egui::Align2::RIGHT_CENTER, zoom);
        pin_screens.push(PinScreen::new(node_id, pin, p));
    }

    for (i, pin) in display.inputs().enumerate() {
        let cy = layout.inputs_y + (i as f32 + 0.5) * layout.pin_row_h;
        let p = Pos2::new(layout.node_rect.min.x + layout.pin_margin, cy);
        draw_pin(painter, layout, theme, pin, p, egui::Align2::LEFT_CENTER, zoom);
        pin_screens.push(PinScreen::new(node_id, pin, p));
    }
}

fn draw_pin(
    painter: &egui::Painter,
    layout: &NodeLayout,
    theme: &NodeEditorTheme,
    pin: &PinInfo,
    pos: Pos2,
    align: egui::Align2,
    zoom: f32,
) {
    painter.circle_filled(pos, layout.pin_r, (theme.socket_color)(&pin.socket));
    let gap = layout.pin_r + 4.0 * zoom;
    let text_pos = if pin.is_output {
        pos - Vec2::new(gap, 0.0)
    } else {
        pos + Vec2::new(gap, 0.0)
    };
    painter.text(
        text_pos,
        align,
        &pin.display_name,
        egui::FontId::proportional(10.0 * zoom),
        theme.pin_label_color,
    );
}

/// Place the inline controls of a node. Returns `(control, new value)` for
/// every control the user edited this frame.
pub(crate) fn show_controls(
    ui: &mut egui::Ui,
    area_id: egui::Id,
    layout: &NodeLayout,
    node_id: Uuid,
    display: &NodeDisplay,
) -> Vec<(String, ControlValueView)> {
    let mut edits = Vec::new();
    for (i, control) in display.controls.iter().enumerate() {
        let rect = layout.control_rect(i);
        let id = area_id.with((node_id, control.name.as_str()));
        match &control.value {
            ControlValueView::Text(text) => {
                let mut buffer = text.clone();
                let response = ui.put(
                    rect,
                    egui::TextEdit::singleline(&mut buffer)
                        .id(id)
                        .hint_text(control.name.as_str())
                        .interactive(!control.readonly),
                );
                if response.changed() && buffer != *text {
                    edits.push((control.name.clone(), ControlValueView::Text(buffer)));
                }
            }
            ControlValueView::Number(value) if control.readonly => {
                ui.put(rect, egui::Label::new(format!("{}: {}", control.name, value)));
            }
            ControlValueView::Number(value) => {
                let mut buffer = *value;
                let response = ui.put(
                    rect,
                    egui::DragValue::new(&mut buffer)
                        .speed(0.1)
                        .prefix(format!("{}: ", control.name)),
                );
                if response.changed() && buffer != *value {
                    edits.push((control.name.clone(), ControlValueView::Number(buffer)));
                }
            }
        }
    }
    edits
}
