//! Theming for the node editor.

use egui::Color32;

/// Theme configuration for the node editor.
pub struct NodeEditorTheme {
    /// Pin and connection color based on socket name.
    pub socket_color: Box<dyn Fn(&str) -> Color32>,
    /// Header color based on node label.
    pub header_color: Box<dyn Fn(&str) -> Color32>,
    /// Node width in pixels.
    pub node_width: f32,
    /// Header height in pixels.
    pub header_height: f32,
    /// Pin row height in pixels.
    pub pin_row_height: f32,
    /// Control row height in pixels.
    pub control_row_height: f32,
    /// Pin circle radius.
    pub pin_radius: f32,
    /// Pin margin from node edge.
    pub pin_margin: f32,
    /// Corner rounding for nodes.
    pub node_rounding: f32,
    /// Background color.
    pub background_color: Color32,
    /// Grid line color.
    pub grid_color: Color32,
    /// Grid spacing.
    pub grid_spacing: f32,
    /// Node body color (unselected).
    pub node_body_color: Color32,
    /// Node body color (selected).
    pub node_body_selected_color: Color32,
    /// Selection outline color.
    pub selection_color: Color32,
    /// Pin label color.
    pub pin_label_color: Color32,
    /// Connection color (selected).
    pub connection_selected_color: Color32,
}

impl Default for NodeEditorTheme {
    fn default() -> Self {
        Self {
            socket_color: Box::new(default_socket_color),
            header_color: Box::new(|_| Color32::from_rgb(60, 80, 120)),
            node_width: 180.0,
            header_height: 24.0,
            pin_row_height: 20.0,
            control_row_height: 26.0,
            pin_radius: 5.0,
            pin_margin: 12.0,
            node_rounding: 4.0,
            background_color: Color32::from_rgb(30, 30, 30),
            grid_color: Color32::from_rgb(40, 40, 40),
            grid_spacing: 50.0,
            node_body_color: Color32::from_rgb(45, 45, 50),
            node_body_selected_color: Color32::from_rgb(55, 55, 65),
            selection_color: Color32::from_rgb(100, 150, 255),
            pin_label_color: Color32::from_rgb(200, 200, 200),
            connection_selected_color: Color32::WHITE,
        }
    }
}

fn default_socket_color(socket: &str) -> Color32 {
    match socket.to_ascii_lowercase().as_str() {
        "text" | "string" => Color32::from_rgb(109, 238, 200), // Teal
        "number" | "scalar" => Color32::from_rgb(109, 200, 238), // Cyan
        "boolean" => Color32::from_rgb(238, 238, 109), // Yellow-green
        "image" => Color32::from_rgb(238, 200, 150),  // Peach
        "color" => Color32::from_rgb(150, 238, 120),  // Light green
        _ => Color32::from_rgb(150, 150, 150),        // Grey
    }
}
