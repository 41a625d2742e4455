//! Edge cases: empty input, escaping, wide labels, deep nesting

use blueprint::core::{RenderConfig, DEFAULT_MESSAGE_SPACING};
use blueprint::plugins::sequence::{Actor, Message, MessageGeometry, SequenceDiagram};
use blueprint::primitives::{Component, Container, Element, Node, Scene};
use blueprint::{parse, render, render_svg, render_text, CharacterSet};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[test]
fn test_empty_scene() {
    let html = render(r#"{"elements": []}"#).unwrap();
    assert_eq!(html, "<div class=\"bp-scene\"></div>");
}

#[test]
fn test_diagram_without_messages() {
    let diagram = SequenceDiagram::new(vec![Actor::new("a"), Actor::new("b")], vec![]);
    let layout = diagram.layout(DEFAULT_MESSAGE_SPACING).unwrap();
    assert!(layout.messages.is_empty());
    assert!(layout.lifeline_bottom > layout.lifeline_top);
    assert!(diagram.render_svg(&RenderConfig::default()).is_ok());
}

#[test]
fn test_diagram_without_actors() {
    let diagram = SequenceDiagram::default();
    let layout = diagram.layout(DEFAULT_MESSAGE_SPACING).unwrap();
    assert!(layout.actors.is_empty());
    assert_eq!(diagram.render_text(CharacterSet::Unicode).unwrap(), "");
}

#[test]
fn test_header_only_notation() {
    let db = parse("sequence\n").unwrap();
    assert_eq!(db.actor_count(), 0);
    assert_eq!(render_text("sequence", CharacterSet::Ascii).unwrap(), "");
}

#[test]
fn test_markup_is_escaped() {
    let html = render(
        r#"{"title": "A & B", "elements": [
            {"type": "node", "label": "<script>alert(1)</script>"},
            {"type": "sequence", "actors": [{"id": "x", "label": "\"quoted\""}],
             "messages": [{"id": "1", "from": "x", "to": "x", "label": "a < b"}]}
        ]}"#,
    )
    .unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("A &amp; B"));
    assert!(html.contains("&quot;quoted&quot;"));
    assert!(html.contains("a &lt; b"));
}

#[test]
fn test_multiline_node_label() {
    let html = Node::new("line one\nline two")
        .to_html(&RenderConfig::default())
        .unwrap();
    assert_eq!(html.matches("bp-node__line").count(), 2);
}

#[test]
fn test_wide_label_widens_actor_gap() {
    let short = SequenceDiagram::new(
        vec![Actor::new("a"), Actor::new("b")],
        vec![Message::new("1", "a", "b", "x")],
    );
    let long = SequenceDiagram::new(
        vec![Actor::new("a"), Actor::new("b")],
        vec![Message::new(
            "1",
            "a",
            "b",
            "a very long message label that cannot fit between two narrow actors",
        )],
    );
    let gap = |d: &SequenceDiagram| {
        let layout = d.layout(DEFAULT_MESSAGE_SPACING).unwrap();
        layout.actors[1].x - layout.actors[0].x
    };
    assert!(gap(&long) > gap(&short));
}

#[test]
fn test_self_loop_on_last_actor_stays_inside() {
    let diagram = SequenceDiagram::new(
        vec![Actor::new("a"), Actor::new("b")],
        vec![Message::new("1", "b", "b", "recompute everything")],
    );
    let layout = diagram.layout(DEFAULT_MESSAGE_SPACING).unwrap();
    match layout.messages[0].geometry {
        MessageGeometry::SelfLoop { x, width, .. } => assert!(x + width < layout.width),
        other => panic!("expected a self loop, got {:?}", other),
    }
}

#[test]
fn test_wide_characters_in_labels() {
    let text = render_text(
        "sequence\nactor a \"注文サービス\"\nactor b\na ->> b : 保存",
        CharacterSet::Unicode,
    )
    .unwrap();
    assert!(text.contains("注文サービス"));
    assert!(text.contains("保存"));

    let lines: Vec<&str> = text.lines().collect();
    let header: Vec<usize> = lines[..3].iter().map(|l| l.width()).collect();
    assert_eq!(header[0], header[1], "label row wider than its border:\n{text}");
    assert_eq!(header[1], header[2], "bottom border out of line:\n{text}");

    let tees = columns_of(lines[2], '┬');
    let lifelines = columns_of(lines.last().unwrap(), '│');
    assert_eq!(tees.len(), 2);
    assert_eq!(tees, lifelines, "lifelines drift from their headers:\n{text}");
}

/// Display columns at which `target` appears in `line`
fn columns_of(line: &str, target: char) -> Vec<usize> {
    let mut col = 0;
    let mut found = Vec::new();
    for c in line.chars() {
        if c == target {
            found.push(col);
        }
        col += c.width().unwrap_or(0);
    }
    found
}

#[test]
fn test_adjacent_messages_with_same_pair_stack() {
    let svg = render_svg("sequence\nactor a\nactor b\na ->> b : one\na ->> b : two\na ->> b : three")
        .unwrap();
    let ys: Vec<f64> = svg
        .match_indices("data-y=\"")
        .map(|(i, _)| {
            let rest = &svg[i + 8..];
            rest[..rest.find('"').unwrap()].parse().unwrap()
        })
        .collect();
    assert_eq!(ys.len(), 3);
    assert!(ys[0] < ys[1] && ys[1] < ys[2]);
    assert_eq!(ys[1] - ys[0], DEFAULT_MESSAGE_SPACING);
}

#[test]
fn test_deeply_nested_containers() {
    let mut element: Element = Node::new("leaf").into();
    for depth in 0..200 {
        element = Container::new(format!("level {depth}")).with_child(element).into();
    }
    let scene = Scene::new(vec![element]);
    let html = scene.render_html(&RenderConfig::default()).unwrap();
    assert_eq!(html.matches("<section").count(), 200);
    assert!(html.contains("leaf"));
}

#[test]
fn test_sequence_nested_in_tooltip_is_validated() {
    let err = render(
        r#"{"elements": [{"type": "tooltip", "content": "details",
            "child": {"type": "sequence", "actors": [{"id": "a"}],
                      "messages": [{"id": "1", "from": "a", "to": "b"}]}}]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown actor 'b'"));
}

#[test]
fn test_spacing_from_config_and_override() {
    let notation = "sequence\nactor a\nactor b\na ->> b : one\nb -->> a : two";
    let orchestrator = blueprint::plugins::Orchestrator::with_all_plugins()
        .with_config(RenderConfig::default().with_message_spacing(100.0));
    let svg = orchestrator.process_svg(notation).unwrap();
    assert!(svg.contains("data-y=\"92\""));
    assert!(svg.contains("data-y=\"192\""));

    let overridden = orchestrator
        .process_svg(&format!("sequence\nspacing 10\n{}", &notation["sequence\n".len()..]))
        .unwrap();
    assert!(overridden.contains("data-y=\"92\""));
    assert!(overridden.contains("data-y=\"102\""));
}
