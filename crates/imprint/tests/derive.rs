//! Tests for `#[derive(Shape)]`.

use std::collections::{BTreeMap, HashMap};

use imprint::{compile, Field, Node, Scalar, Shape, ShapeDescriptor, ToNode};
use insta::assert_snapshot;

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Shape)]
struct Point {
    metric: String,
    #[shape(rename = "ts")]
    timestamp: i64,
    value: f64,
    #[shape(skip)]
    #[allow(dead_code)]
    retries: u32,
}

#[derive(Shape)]
struct Tagged {
    #[shape(flatten)]
    point: Point,
    tags: HashMap<String, String>,
    owner: Option<String>,
}

#[derive(Shape)]
struct Envelope<T> {
    kind: String,
    body: T,
}

#[derive(Shape)]
struct Keywords {
    r#type: String,
}

fn point() -> Point {
    Point {
        metric: "cpu".to_string(),
        timestamp: 1000,
        value: 0.5,
        retries: 3,
    }
}

// ============================================================================
// Descriptors
// ============================================================================

#[test]
fn test_fields_in_declaration_order() {
    let shape = point().describe();
    assert_eq!(
        shape,
        ShapeDescriptor::new(vec![
            Field::property("metric", Node::Scalar(Scalar::String("cpu".to_string()))),
            Field::property("ts", Node::Scalar(Scalar::Int(1000))),
            Field::property("value", Node::Scalar(Scalar::Float(0.5))),
        ])
    );
}

#[test]
fn test_nested_is_struct_node() {
    let node = point().to_node();
    assert!(matches!(node, Node::Struct(ref s) if s.fields.len() == 3));
}

#[test]
fn test_flatten_is_unlabeled() {
    let tagged = Tagged {
        point: point(),
        tags: HashMap::new(),
        owner: None,
    };
    let shape = tagged.describe();
    assert_eq!(shape.fields[0].label, None);
    assert_eq!(shape.fields[1].label.as_deref(), Some("tags"));
    assert_eq!(shape.fields[2].node, Node::Scalar(Scalar::Null));
}

#[test]
fn test_raw_identifier() {
    let shape = Keywords {
        r#type: "gauge".to_string(),
    }
    .describe();
    assert_eq!(shape.fields[0].label.as_deref(), Some("type"));
}

// ============================================================================
// Compiled output
// ============================================================================

#[test]
fn test_flattened_template() {
    let tagged = Tagged {
        point: point(),
        tags: HashMap::from([
            ("zone".to_string(), "eu".to_string()),
            ("host".to_string(), "a".to_string()),
        ]),
        owner: Some("ops".to_string()),
    };

    let template = compile(&tagged.describe(), &["value", "tags.host"]).unwrap();
    assert_snapshot!(
        template.to_string(),
        @r#"{"metric":"cpu","ts":1000,"value":{{ value }},"tags":{"host":{{ tags.host }},"zone":"eu"},"owner":"ops"}"#
    );
}

#[test]
fn test_generic_struct() {
    let envelope = Envelope {
        kind: "point".to_string(),
        body: BTreeMap::from([("a".to_string(), vec![1i64, 2])]),
    };

    let template = compile(&envelope.describe(), &["body.a[0]"]).unwrap();
    assert_snapshot!(
        template.to_string(),
        @r#"{"kind":"point","body":{"a":[{{ body.a[0] }},2]}}"#
    );
}

#[test]
fn test_nested_generic_shape() {
    let envelope = Envelope {
        kind: "wrapped".to_string(),
        body: point(),
    };

    let template = compile(&envelope.describe(), &["body.metric"]).unwrap();
    assert_snapshot!(
        template.to_string(),
        @r#"{"kind":"wrapped","body":{"metric":{{ body.metric }},"ts":1000,"value":0.5}}"#
    );
}
