//! The area (pannable, zoomable canvas) and the plugins attached to it.
//!
//! An [`AreaPlugin`] is bound to a mount id and owns the canvas state. The
//! interaction and rendering features are opt-in: a context-menu plugin, a
//! connection plugin and a render plugin are attached with
//! [`AreaPlugin::use_plugin`], each at most once.

use thiserror::Error;

use crate::state::NodeEditorState;
use crate::types::NodeTypeInfo;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("{0} plugin is already attached to the area")]
    AlreadyAttached(&'static str),
    #[error("{0} plugin has no presets")]
    NoPresets(&'static str),
}

// ---------------------------------------------------------------------------
// Context menu
// ---------------------------------------------------------------------------

/// A creatable entry of the "Add Node" menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextMenuItem {
    pub label: String,
    /// Passed to [`crate::NodeEditorMutator::add_node`] when picked.
    pub type_id: String,
    /// Submenu; `None` lists the item at the top level.
    pub category: Option<String>,
}

impl ContextMenuItem {
    pub fn new(label: &str, type_id: &str) -> Self {
        Self {
            label: label.to_string(),
            type_id: type_id.to_string(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// One item per node type, labelled with its display name.
    pub fn classic(types: impl IntoIterator<Item = NodeTypeInfo>) -> Vec<Self> {
        types
            .into_iter()
            .map(|t| Self {
                label: t.display_name,
                type_id: t.type_id,
                category: t.category,
            })
            .collect()
    }
}

/// Right-click menus: "Add Node" on the canvas, "Delete" on nodes.
pub struct ContextMenuPlugin {
    items: Vec<ContextMenuItem>,
}

impl ContextMenuPlugin {
    pub fn new(items: Vec<ContextMenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ContextMenuItem] {
        &self.items
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionPreset {
    /// Drag from a pin and drop on a pin of the opposite direction.
    Classic,
}

/// Connection dragging between pins.
#[derive(Default)]
pub struct ConnectionPlugin {
    presets: Vec<ConnectionPreset>,
}

impl ConnectionPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_preset(&mut self, preset: ConnectionPreset) {
        if !self.presets.contains(&preset) {
            self.presets.push(preset);
        }
    }

    pub fn has_preset(&self, preset: ConnectionPreset) -> bool {
        self.presets.contains(&preset)
    }
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPreset {
    /// Nodes, pins, inline controls and connections.
    Classic,
    /// The context menus.
    ContextMenu,
}

/// Draws the graph into the area.
#[derive(Default)]
pub struct RenderPlugin {
    presets: Vec<RenderPreset>,
}

impl RenderPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_preset(&mut self, preset: RenderPreset) {
        if !self.presets.contains(&preset) {
            self.presets.push(preset);
        }
    }

    pub fn has_preset(&self, preset: RenderPreset) -> bool {
        self.presets.contains(&preset)
    }
}

// ---------------------------------------------------------------------------
// Area
// ---------------------------------------------------------------------------

/// Anything that can be attached to an [`AreaPlugin`].
pub enum AreaExtension {
    ContextMenu(ContextMenuPlugin),
    Connection(ConnectionPlugin),
    Render(RenderPlugin),
}

impl From<ContextMenuPlugin> for AreaExtension {
    fn from(plugin: ContextMenuPlugin) -> Self {
        AreaExtension::ContextMenu(plugin)
    }
}

impl From<ConnectionPlugin> for AreaExtension {
    fn from(plugin: ConnectionPlugin) -> Self {
        AreaExtension::Connection(plugin)
    }
}

impl From<RenderPlugin> for AreaExtension {
    fn from(plugin: RenderPlugin) -> Self {
        AreaExtension::Render(plugin)
    }
}

pub struct AreaPlugin {
    pub(crate) id: egui::Id,
    pub(crate) state: NodeEditorState,
    pub(crate) min_zoom: f32,
    pub(crate) max_zoom: f32,
    pub(crate) context_menu: Option<ContextMenuPlugin>,
    pub(crate) connection: Option<ConnectionPlugin>,
    pub(crate) render: Option<RenderPlugin>,
}

impl AreaPlugin {
    /// Create an area mounted at `id`. Menu and control ids derive from it,
    /// so two areas never share widget state.
    pub fn new(id: egui::Id) -> Self {
        Self {
            id,
            state: NodeEditorState::default(),
            min_zoom: 0.2,
            max_zoom: 3.0,
            context_menu: None,
            connection: None,
            render: None,
        }
    }

    /// Zoom limits; reversed bounds are swapped and the minimum stays positive.
    pub fn with_zoom_bounds(mut self, min: f32, max: f32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min_zoom = lo.max(0.01);
        self.max_zoom = hi.max(self.min_zoom);
        self.state.zoom = self.state.zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    pub fn use_plugin(&mut self, plugin: impl Into<AreaExtension>) -> Result<(), PluginError> {
        match plugin.into() {
            AreaExtension::ContextMenu(p) => {
                if self.context_menu.is_some() {
                    return Err(PluginError::AlreadyAttached("context menu"));
                }
                log::debug!("Area {:?}: context menu with {} item(s)", self.id, p.items.len());
                self.context_menu = Some(p);
            }
            AreaExtension::Connection(p) => {
                if self.connection.is_some() {
                    return Err(PluginError::AlreadyAttached("connection"));
                }
                if p.presets.is_empty() {
                    return Err(PluginError::NoPresets("connection"));
                }
                log::debug!("Area {:?}: connection presets {:?}", self.id, p.presets);
                self.connection = Some(p);
            }
            AreaExtension::Render(p) => {
                if self.render.is_some() {
                    return Err(PluginError::AlreadyAttached("render"));
                }
                if p.presets.is_empty() {
                    return Err(PluginError::NoPresets("render"));
                }
                log::debug!("Area {:?}: render presets {:?}", self.id, p.presets);
                self.render = Some(p);
            }
        }
        Ok(())
    }

    pub fn id(&self) -> egui::Id {
        self.id
    }

    pub fn state(&self) -> &NodeEditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut NodeEditorState {
        &mut self.state
    }

    pub fn zoom_bounds(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn context_menu(&self) -> Option<&ContextMenuPlugin> {
        self.context_menu.as_ref()
    }

    pub fn connection(&self) -> Option<&ConnectionPlugin> {
        self.connection.as_ref()
    }

    pub fn render(&self) -> Option<&RenderPlugin> {
        self.render.as_ref()
    }

    pub(crate) fn renders_nodes(&self) -> bool {
        self.render
            .as_ref()
            .is_some_and(|r| r.has_preset(RenderPreset::Classic))
    }

    pub(crate) fn renders_menus(&self) -> bool {
        self.context_menu.is_some()
            && self
                .render
                .as_ref()
                .is_some_and(|r| r.has_preset(RenderPreset::ContextMenu))
    }

    pub(crate) fn can_connect(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|c| c.has_preset(ConnectionPreset::Classic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_render() -> RenderPlugin {
        let mut render = RenderPlugin::new();
        render.add_preset(RenderPreset::Classic);
        render.add_preset(RenderPreset::ContextMenu);
        render
    }

    #[test]
    fn plugins_attach_once() {
        let mut area = AreaPlugin::new(egui::Id::new("area"));
        area.use_plugin(ContextMenuPlugin::new(vec![])).unwrap();
        assert_eq!(
            area.use_plugin(ContextMenuPlugin::new(vec![])),
            Err(PluginError::AlreadyAttached("context menu"))
        );
        area.use_plugin(classic_render()).unwrap();
        assert_eq!(
            area.use_plugin(classic_render()),
            Err(PluginError::AlreadyAttached("render"))
        );
    }

    #[test]
    fn plugins_without_presets_are_rejected() {
        let mut area = AreaPlugin::new(egui::Id::new("area"));
        assert_eq!(
            area.use_plugin(ConnectionPlugin::new()),
            Err(PluginError::NoPresets("connection"))
        );
        assert_eq!(
            area.use_plugin(RenderPlugin::new()),
            Err(PluginError::NoPresets("render"))
        );
        assert!(area.connection().is_none());
        assert!(!area.can_connect());
    }

    #[test]
    fn menus_need_both_plugin_and_preset() {
        let mut area = AreaPlugin::new(egui::Id::new("area"));
        let mut render = RenderPlugin::new();
        render.add_preset(RenderPreset::Classic);
        area.use_plugin(render).unwrap();
        area.use_plugin(ContextMenuPlugin::new(vec![])).unwrap();
        assert!(area.renders_nodes());
        assert!(!area.renders_menus());
    }

    #[test]
    fn zoom_bounds_are_normalized() {
        let area = AreaPlugin::new(egui::Id::new("area")).with_zoom_bounds(4.0, 0.5);
        assert_eq!(area.zoom_bounds(), (0.5, 4.0));
        let area = AreaPlugin::new(egui::Id::new("area")).with_zoom_bounds(-1.0, 0.0);
        assert_eq!(area.zoom_bounds(), (0.01, 0.01));
        assert_eq!(area.state().zoom, 0.01);
    }

    #[test]
    fn classic_items_keep_category() {
        let items = ContextMenuItem::classic(vec![
            NodeTypeInfo {
                type_id: "NodeA".into(),
                display_name: "NodeA".into(),
                category: None,
            },
            NodeTypeInfo {
                type_id: "Add".into(),
                display_name: "Add".into(),
                category: Some("General".into()),
            },
        ]);
        assert_eq!(items[0], ContextMenuItem::new("NodeA", "NodeA"));
        assert_eq!(items[1].category.as_deref(), Some("General"));
    }
}
