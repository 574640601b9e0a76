use super::{is_identifier, write_body, write_expression};
use crate::ast::{Block, Body, Expression};
use crate::parser::{parse_body, parse_expression};
use crate::value::{expression_to_value, value_to_expression};
use serde_json::json;

#[test]
fn writes_blocks_with_labels_and_indentation() {
    let mut step = Body::new();
    step.push_attribute("operationId", Expression::String("getPet".to_string()));
    let mut workflow = Body::new();
    workflow.push_attribute("summary", Expression::String("line one\nline \"two\"".to_string()));
    workflow.push_block(Block::new("step", vec!["get".to_string()], step));
    let mut body = Body::new();
    body.push_attribute("arazzo", Expression::String("1.0.0".to_string()));
    body.push_block(Block::new("workflow", vec!["pets".to_string()], workflow));

    let text = write_body(&body);
    assert_eq!(
        text,
        "arazzo = \"1.0.0\"\n\nworkflow \"pets\" {\n  summary = \"line one\\nline \\\"two\\\"\"\n\n  step \"get\" {\n    operationId = \"getPet\"\n  }\n}\n"
    );

    let reparsed = parse_body(&text).expect("reparse");
    let workflow = reparsed.blocks().next().expect("workflow block");
    assert_eq!(
        workflow.body.attribute("summary").map(|attribute| &attribute.expr),
        Some(&Expression::String("line one\nline \"two\"".to_string()))
    );
}

#[test]
fn quotes_object_keys_that_are_not_identifiers() {
    let expr = value_to_expression(&json!({"$ref": "#/a", "null": 1, "plain-key": [1, {"a": true}]}));
    let text = write_expression(&expr);
    assert!(text.contains("\"$ref\" = \"#/a\""));
    assert!(text.contains("\"null\" = 1"));
    assert!(text.contains("plain-key = [\n"));

    let reparsed = parse_expression(&text).expect("reparse");
    assert_eq!(
        expression_to_value(&reparsed).expect("evaluate"),
        json!({"$ref": "#/a", "null": 1, "plain-key": [1, {"a": true}]})
    );
}

#[test]
fn empty_collections_stay_inline() {
    assert_eq!(write_expression(&value_to_expression(&json!({}))), "{}");
    assert_eq!(write_expression(&value_to_expression(&json!([]))), "[]");
}

#[test]
fn identifier_rules() {
    assert!(is_identifier("x-vendor_1"));
    assert!(is_identifier("_ref"));
    assert!(!is_identifier("$ref"));
    assert!(!is_identifier("1abc"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("has space"));
}
