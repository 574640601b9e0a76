use super::{Criterion, CriterionExpressionType, CriterionKind, JSONPATH_VERSION};
use crate::documents::CriterionType;
use serde_json::json;

#[test]
fn type_and_version_build_expression_type() {
    let criterion: Criterion = serde_json::from_value(json!({
        "context": "$response.body",
        "condition": "$.pets.length > 0",
        "type": "jsonpath",
        "version": JSONPATH_VERSION,
        "x-note": "checked"
    }))
    .expect("decode");

    assert_eq!(
        criterion.kind,
        Some(CriterionKind::Expression(CriterionExpressionType {
            kind: CriterionType::JsonPath,
            version: JSONPATH_VERSION.to_string(),
        }))
    );
    assert_eq!(criterion.extensions.get("x-note"), Some(&json!("checked")));
}

#[test]
fn type_alone_stays_plain() {
    let criterion: Criterion =
        serde_json::from_value(json!({"condition": "^2", "context": "$statusCode", "type": "regex"}))
            .expect("decode");
    assert_eq!(criterion.kind, Some(CriterionKind::Plain(CriterionType::Regex)));
    assert_eq!(criterion.criterion_type(), Some(&CriterionType::Regex));
}

#[test]
fn version_without_type_is_dropped() {
    let criterion: Criterion =
        serde_json::from_value(json!({"condition": "$statusCode == 200", "version": "xpath-30"}))
            .expect("decode");
    assert_eq!(criterion.kind, None);
    assert_eq!(
        serde_json::to_value(&criterion).expect("encode"),
        json!({"condition": "$statusCode == 200"})
    );
}

#[test]
fn expression_type_encodes_flat() {
    let criterion = Criterion::new("//pet[1]").with_expression_type(
        "$response.body",
        CriterionType::XPath,
        "xpath-20",
    );
    assert_eq!(
        serde_json::to_value(&criterion).expect("encode"),
        json!({
            "context": "$response.body",
            "condition": "//pet[1]",
            "type": "xpath",
            "version": "xpath-20"
        })
    );
}
