use std::cell::RefCell;
use std::rc::Rc;

use vidixy::{
    EditorEvent, InputControl, LibraryError, Node, NodeEditor, Port, PortId, Socket, ControlValue,
};

fn source(socket: &Socket) -> Node {
    let mut node = Node::new("Source");
    node.add_control("port", InputControl::text()).unwrap();
    node.add_output(Port::output("port", socket.clone())).unwrap();
    node
}

fn sink(socket: &Socket) -> Node {
    let mut node = Node::new("Sink");
    node.add_input(Port::input("in", socket.clone())).unwrap();
    node
}

#[test]
fn like_typed_ports_connect() {
    let text = Socket::new("text");
    let mut editor = NodeEditor::new();
    let a = editor.add_node(source(&text)).unwrap();
    let b = editor.add_node(sink(&text)).unwrap();

    let id = editor
        .add_connection(PortId::new(a, "port"), PortId::new(b, "in"))
        .expect("like-typed connection should succeed");

    let connection = editor.get_connection(id).unwrap();
    assert_eq!(connection.from, PortId::new(a, "port"));
    assert_eq!(connection.to, PortId::new(b, "in"));
}

#[test]
fn differently_typed_ports_are_rejected() {
    let mut editor = NodeEditor::new();
    let a = editor.add_node(source(&Socket::new("text"))).unwrap();
    let b = editor.add_node(sink(&Socket::new("Number"))).unwrap();

    let err = editor
        .add_connection(PortId::new(a, "port"), PortId::new(b, "in"))
        .unwrap_err();
    assert!(matches!(err, LibraryError::SocketMismatch { .. }));
    assert!(editor.connections().is_empty());
}

#[test]
fn output_to_output_is_rejected() {
    let text = Socket::new("text");
    let mut editor = NodeEditor::new();
    let a = editor.add_node(source(&text)).unwrap();
    let b = editor.add_node(source(&text)).unwrap();

    let err = editor
        .add_connection(PortId::new(a, "port"), PortId::new(b, "port"))
        .unwrap_err();
    assert!(matches!(err, LibraryError::InvalidConnection(_)));
}

#[test]
fn unknown_ports_and_self_connections_are_rejected() {
    let text = Socket::new("text");
    let mut node = source(&text);
    node.add_input(Port::input("in", text.clone())).unwrap();

    let mut editor = NodeEditor::new();
    let a = editor.add_node(node).unwrap();
    let b = editor.add_node(sink(&text)).unwrap();

    assert!(matches!(
        editor.add_connection(PortId::new(a, "port"), PortId::new(a, "in")),
        Err(LibraryError::InvalidConnection(_))
    ));
    assert!(matches!(
        editor.add_connection(PortId::new(a, "nope"), PortId::new(b, "in")),
        Err(LibraryError::PortNotFound { .. })
    ));
}

#[test]
fn duplicate_connection_is_rejected() {
    let text = Socket::new("text");
    let mut editor = NodeEditor::new();
    let a = editor.add_node(source(&text)).unwrap();
    let mut multi = Node::new("Multi");
    multi
        .add_input(Port::input("in", text.clone()).with_multiple_connections(true))
        .unwrap();
    let b = editor.add_node(multi).unwrap();

    editor
        .add_connection(PortId::new(a, "port"), PortId::new(b, "in"))
        .unwrap();
    assert!(
        editor
            .add_connection(PortId::new(a, "port"), PortId::new(b, "in"))
            .is_err()
    );
    assert_eq!(editor.connections().len(), 1);
}

#[test]
fn single_input_connection_is_replaced() {
    let text = Socket::new("text");
    let mut editor = NodeEditor::new();
    let a = editor.add_node(source(&text)).unwrap();
    let b = editor.add_node(source(&text)).unwrap();
    let c = editor.add_node(sink(&text)).unwrap();

    let first = editor
        .add_connection(PortId::new(a, "port"), PortId::new(c, "in"))
        .unwrap();
    let second = editor
        .add_connection(PortId::new(b, "port"), PortId::new(c, "in"))
        .unwrap();

    assert!(editor.get_connection(first).is_none());
    assert!(editor.get_connection(second).is_some());
    assert_eq!(editor.connections().len(), 1);
}

#[test]
fn removing_a_node_removes_its_connections() {
    let text = Socket::new("text");
    let mut editor = NodeEditor::new();
    let a = editor.add_node(source(&text)).unwrap();
    let b = editor.add_node(sink(&text)).unwrap();
    editor
        .add_connection(PortId::new(a, "port"), PortId::new(b, "in"))
        .unwrap();

    let removed = editor.remove_node(a).unwrap();
    assert_eq!(removed.id, a);
    assert!(editor.connections().is_empty());
    assert_eq!(editor.nodes().len(), 1);
    assert!(matches!(
        editor.remove_node(a),
        Err(LibraryError::NodeNotFound(_))
    ));
}

#[test]
fn control_values_are_independent_per_node() {
    let text = Socket::new("text");
    let mut editor = NodeEditor::new();
    let a = editor.add_node(source(&text)).unwrap();
    let b = editor.add_node(source(&text)).unwrap();

    editor
        .set_control_value(a, "port", ControlValue::text("hello"))
        .unwrap();

    let value_of = |id| editor.get_node(id).unwrap().control("port").unwrap().value().clone();
    assert_eq!(value_of(a), ControlValue::text("hello"));
    assert_eq!(value_of(b), ControlValue::text(""));
}

#[test]
fn subscribers_see_every_event_in_order() {
    let events: Rc<RefCell<Vec<EditorEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink_events = events.clone();

    let text = Socket::new("text");
    let mut editor = NodeEditor::new();
    editor.subscribe(move |e| sink_events.borrow_mut().push(e.clone()));

    let a = editor.add_node(source(&text)).unwrap();
    let b = editor.add_node(sink(&text)).unwrap();
    let c = editor
        .add_connection(PortId::new(a, "port"), PortId::new(b, "in"))
        .unwrap();
    editor
        .set_control_value(a, "port", ControlValue::text("x"))
        .unwrap();
    // Same value again is not a change.
    editor
        .set_control_value(a, "port", ControlValue::text("x"))
        .unwrap();
    editor.remove_node(b).unwrap();
    editor.clear();

    assert_eq!(
        *events.borrow(),
        vec![
            EditorEvent::NodeCreated(a),
            EditorEvent::NodeCreated(b),
            EditorEvent::ConnectionCreated(c),
            EditorEvent::ControlChanged {
                node_id: a,
                key: "port".to_string()
            },
            EditorEvent::ConnectionRemoved(c),
            EditorEvent::NodeRemoved(b),
            EditorEvent::Cleared,
        ]
    );
}

#[test]
fn adding_the_same_node_twice_fails() {
    let mut editor = NodeEditor::new();
    let node = source(&Socket::new("text"));
    editor.add_node(node.clone()).unwrap();
    assert!(matches!(
        editor.add_node(node),
        Err(LibraryError::DuplicateNode(_))
    ));
}
