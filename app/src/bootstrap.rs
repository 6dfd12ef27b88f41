//! Builds a ready-to-use editor on a mount point.

use egui_node_editor::{
    AreaPlugin, ConnectionPlugin, ConnectionPreset, ContextMenuItem, ContextMenuPlugin,
    RenderPlugin, RenderPreset,
};
use vidixy::plugin::{builtin_definitions, load_definitions, register_definitions};
use vidixy::{DataflowEngine, NodeEditor, NodeRegistry, SocketTable};

use crate::config::EditorOptions;
use crate::error::BootstrapError;
use crate::mount::MountPoint;
use crate::nodes::{NodeA, TEXT_SOCKET};
use crate::session::{EditorGraph, EditorSession};

/// Create the editor on `container`, register its node types and attach the
/// area plugins: context menu, classic connections, then classic and
/// context-menu rendering.
///
/// Nothing is retried; the caller decides what a failure means.
pub fn create_editor(
    container: MountPoint,
    options: &EditorOptions,
) -> Result<EditorSession, BootstrapError> {
    let mut editor = NodeEditor::new();
    editor.subscribe(|event| log::debug!("Editor: {}", event));

    let mut area = AreaPlugin::new(container.egui_id())
        .with_zoom_bounds(options.min_zoom, options.max_zoom);

    let mut sockets = SocketTable::new();
    let text_socket = sockets.get_or_create(TEXT_SOCKET);

    let mut registry = NodeRegistry::new();
    registry.register(NodeA::new(text_socket.clone()))?;
    if options.builtin_nodes {
        register_definitions(&mut registry, &mut sockets, builtin_definitions())?;
    }
    if let Some(dir) = &options.nodes_dir {
        register_definitions(&mut registry, &mut sockets, load_definitions(dir)?)?;
    }

    let graph = EditorGraph {
        engine: DataflowEngine::from_registry(&registry),
        editor,
        registry,
        sockets,
        text_socket,
    };

    area.use_plugin(ContextMenuPlugin::new(ContextMenuItem::classic(
        graph.node_types(),
    )))?;

    let mut connection = ConnectionPlugin::new();
    connection.add_preset(ConnectionPreset::Classic);
    area.use_plugin(connection)?;

    let mut render = RenderPlugin::new();
    render.add_preset(RenderPreset::Classic);
    render.add_preset(RenderPreset::ContextMenu);
    area.use_plugin(render)?;

    log::info!(
        "Editor mounted on '{}' with {} node type(s)",
        container.id(),
        graph.registry.len()
    );
    Ok(EditorSession::new(graph, area, container))
}
