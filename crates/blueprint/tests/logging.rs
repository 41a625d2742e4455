//! Tests for logging initialization and logging around the pipeline

use blueprint::core::logging::{init_logging, LogFormat};
use blueprint::{render, render_text, CharacterSet, NodeVariant};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert_eq!(variants.len(), 3);
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_init_logging_repeatedly_does_not_panic() {
    // Only the first call installs a subscriber; later calls report an error
    for level in ["trace", "debug", "info", "warn", "error", "off"] {
        let _ = init_logging(Some(level), Some("compact"));
    }
    let _ = init_logging(None, None);
}

#[test]
fn test_init_logging_invalid_format() {
    assert!(init_logging(Some("info"), Some("invalid_format")).is_err());
}

#[test]
fn test_pipeline_runs_with_trace_logging() {
    let _ = init_logging(Some("trace"), Some("json"));

    let html = render(
        r#"{"elements": [
            {"type": "node", "label": "Cache", "variant": "not-a-variant"},
            {"type": "sequence", "actors": [{"id": "a"}, {"id": "b"}],
             "messages": [{"id": "1", "from": "a", "to": "b", "label": "get"}]}
        ]}"#,
    )
    .unwrap();
    assert!(html.contains("bp-node--default"));

    let text = render_text("sequence\nactor a\na -) a : tick", CharacterSet::Unicode).unwrap();
    assert!(text.contains("tick"));
}

#[test]
fn test_lenient_parse_falls_back_with_warning() {
    let _ = init_logging(Some("warn"), Some("compact"));
    assert_eq!(NodeVariant::parse_lenient("datbase"), NodeVariant::Default);
    assert_eq!(NodeVariant::parse_lenient("database"), NodeVariant::Database);
}
