//! Integration tests for the public API

use blueprint::prelude::*;
use blueprint::primitives::{TooltipEvent, TooltipState};
use blueprint::{parse, render, render_svg, render_text};

const CHECKOUT: &str = r#"sequence
title Checkout
actor web "Storefront" client
actor svc "Order Service" service : Validates and stores orders
actor db "Postgres" database
web ->> svc : POST /orders
svc ->> db : INSERT order | Runs inside a transaction
db -->> svc : ok
svc -) svc : emit OrderPlaced
svc -->> web : 201 Created
"#;

#[test]
fn test_parse_checkout() {
    let db = parse(CHECKOUT).unwrap();
    assert_eq!(db.title(), Some("Checkout"));
    assert_eq!(db.actor_count(), 3);
    assert_eq!(db.message_count(), 5);
    assert_eq!(db.actor("svc").unwrap().variant, ActorVariant::Service);
    assert_eq!(db.messages()[3].variant, MessageVariant::Async);
    assert!(db.messages()[3].is_self_message());
    assert!(db.messages()[1].tooltip.is_some());
}

#[test]
fn test_render_svg_structure() {
    let svg = render_svg(CHECKOUT).unwrap();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("<title id=\"bp-title\">Checkout</title>"));
    assert_eq!(svg.matches("data-actor-id=").count(), 3);
    assert_eq!(svg.matches("data-message-id=").count(), 5);
    assert!(svg.contains("role=\"tooltip\""));
}

#[test]
fn test_tooltip_ids_are_unique_per_diagram() {
    let html = render(
        r#"{"elements": [
            {"type": "sequence", "actors": [{"id": "a", "tooltip": "first"}]},
            {"type": "sequence", "actors": [{"id": "a", "tooltip": "second"}]}
        ]}"#,
    )
    .unwrap();
    assert!(html.contains("id=\"bp-seq-1-actor-0-tip\""));
    assert!(html.contains("id=\"bp-seq-2-actor-0-tip\""));
}

#[test]
fn test_render_text_preview() {
    let text = render_text(CHECKOUT, CharacterSet::Unicode).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with('┌'));
    assert!(text.contains("Order Service"));
    assert!(text.contains("emit OrderPlaced"));
    assert!(text.contains('▷') || text.contains('◀'));
}

#[test]
fn test_pipeline_by_hand() {
    let parser = SequenceParser::new();
    let mut database = SequenceDatabase::new();
    parser.parse(CHECKOUT, &mut database).unwrap();
    assert!(parser.can_parse(CHECKOUT));

    let layout = SequenceLayoutAlgorithm::new().layout(&database).unwrap();
    assert_eq!(layout.actors.len(), 3);
    assert!(layout.width > 0.0 && layout.height > 0.0);

    let svg = SequenceSvgRenderer::new().render(&database).unwrap();
    let preview = SequenceAsciiRenderer::with_style(CharacterSet::Ascii)
        .render(&database)
        .unwrap();
    assert!(svg.contains("Postgres"));
    assert!(preview.is_ascii());
}

#[test]
fn test_detectors() {
    assert!(SequenceDetector::new().detect(CHECKOUT));
    assert!(!SequenceDetector::new().detect(r#"{"elements": []}"#));
    assert!(blueprint::primitives::SceneDetector::new().detect(r#"{"elements": []}"#));
}

#[test]
fn test_build_scene_in_code() {
    let scene = Scene::new(vec![
        Container::new("Ingest")
            .with_color(ContainerColor::Teal)
            .recommended()
            .with_layout(Arrangement::Row)
            .with_child(
                Tooltip::new(
                    StructuredContent::new()
                        .with_heading("Kafka")
                        .with_item("3 brokers")
                        .with_item("7 day retention"),
                    Node::new("events")
                        .with_variant(NodeVariant::Queue)
                        .with_size(Size::Md)
                        .with_tab_index(1),
                ),
            )
            .with_child(Arrow::new(ArrowDirection::Right).with_label("stream"))
            .with_child(Node::new("warehouse").with_variant(NodeVariant::Sink))
            .into(),
        SequenceDiagram::new(
            vec![Actor::new("producer"), Actor::new("broker")],
            vec![Message::new("1", "producer", "broker", "publish")],
        )
        .into(),
    ])
    .with_title("Streaming");

    let html = scene.render_html(&RenderConfig::default()).unwrap();
    assert!(html.contains("bp-container--teal"));
    assert!(html.contains("Recommended"));
    assert!(html.contains("bp-node--queue bp-node--md"));
    assert!(html.contains("<p class=\"bp-tooltip__heading\">Kafka</p>"));
    assert!(html.contains("<svg"));
    assert_eq!(scene.sequences().len(), 1);
}

#[test]
fn test_orchestrator_load() {
    let orchestrator = Orchestrator::with_all_plugins();
    match orchestrator.load(CHECKOUT).unwrap() {
        Document::Sequence(db) => assert_eq!(db.actor_count(), 3),
        other => panic!("expected a sequence, got {}", other.kind()),
    }
    let doc = orchestrator.load(r#"{"elements": []}"#).unwrap();
    assert_eq!(doc.kind(), "scene");
}

#[test]
fn test_tooltip_state_machine() {
    let mut state = TooltipState::new();
    assert!(!state.is_visible());

    state.handle(TooltipEvent::PointerEnter);
    assert!(state.is_visible());
    state.handle(TooltipEvent::Escape);
    assert!(!state.is_visible());
    state.handle(TooltipEvent::Focus);
    assert!(state.is_visible());
    state.handle(TooltipEvent::PointerLeave);
    assert!(state.is_visible());
    state.handle(TooltipEvent::Blur);
    assert!(!state.is_visible());
}

#[test]
fn test_tooltip_content_forms() {
    let plain: TooltipContent = serde_json::from_str("\"Primary store\"").unwrap();
    assert_eq!(plain.plain_text(), "Primary store");

    let rich: TooltipContent =
        serde_json::from_str(r#"{"heading": "Postgres", "paragraphs": ["OLTP"], "items": ["HA"]}"#)
            .unwrap();
    assert_eq!(rich.heading(), Some("Postgres"));
    assert_eq!(rich.lines(), vec!["Postgres", "OLTP", "• HA"]);
}
