use super::{encode_document, encode_document_with_options, EncodeError, EncodeOptions};
use crate::documents::{
    ArazzoDocument, Components, FailureAction, Info, Parameter, ParameterLocation, Step,
    SuccessAction, Workflow,
};
use crate::parse::{decode_document, DocumentFormat};
use serde_json::json;

fn sample_document() -> ArazzoDocument {
    let mut step = Step::new("find");
    step.operation_id = Some("findPets".to_string());
    step.on_success.push(SuccessAction::end("done").into());

    let mut workflow = Workflow::new("buy");
    workflow.inputs = Some(json!({
        "type": "object",
        "properties": {"owner": {"$ref": "#/components/inputs/owner"}}
    }));
    workflow.steps.push(step);

    ArazzoDocument {
        arazzo: "1.0.0".to_string(),
        info: Some(Info {
            title: "Pets".to_string(),
            version: "1.0.0".to_string(),
            ..Info::default()
        }),
        workflows: vec![workflow],
        ..ArazzoDocument::default()
    }
}

#[test]
fn auto_encodes_json_compact_or_pretty() {
    let document = sample_document();
    let compact = encode_document(&document, DocumentFormat::Auto).expect("encodes");
    assert!(compact.starts_with("{\"arazzo\":\"1.0.0\""));
    assert!(!compact.contains('\n'));

    let pretty = encode_document_with_options(
        &document,
        &EncodeOptions {
            pretty: true,
            ..EncodeOptions::default()
        },
    )
    .expect("encodes");
    assert!(pretty.starts_with("{\n  \"arazzo\": \"1.0.0\""));
}

#[test]
fn yaml_output_decodes_back() {
    let document = sample_document();
    let yaml = encode_document(&document, DocumentFormat::Yaml).expect("encodes");
    assert!(yaml.contains("workflowId: buy"));
    assert_eq!(decode_document(&yaml, DocumentFormat::Yaml).expect("decodes"), document);
}

#[test]
fn block_output_uses_labels_and_schema_blocks() {
    let document = sample_document();
    let text = encode_document(&document, DocumentFormat::Hcl).expect("encodes");

    assert!(text.starts_with("arazzo = \"1.0.0\"\n\ninfo {\n"));
    assert!(text.contains("workflow \"buy\" {\n"));
    assert!(text.contains("  inputs {\n"));
    assert!(text.contains("_ref = \"#/components/inputs/owner\""));
    assert!(text.contains("  step \"find\" {\n    operationId = \"findPets\"\n"));
    assert!(text.contains("    onSuccess \"done\" {\n      type = \"end\"\n    }\n"));

    assert_eq!(decode_document(&text, DocumentFormat::Hcl).expect("decodes"), document);
}

#[test]
fn block_encoding_leaves_the_document_untouched() {
    let document = sample_document();
    let before = document.clone();
    encode_document(&document, DocumentFormat::Hcl).expect("encodes");
    assert_eq!(document, before);
}

#[test]
fn component_names_are_written_only_when_they_differ() {
    let mut components = Components::default();
    components.parameters.insert(
        "page".to_string(),
        Parameter::new("page", ParameterLocation::Query, json!(1)),
    );
    components.parameters.insert(
        "legacy-size".to_string(),
        Parameter::new("size", ParameterLocation::Query, json!(20)),
    );
    let document = ArazzoDocument {
        arazzo: "1.0.0".to_string(),
        components: Some(components),
        ..ArazzoDocument::default()
    };

    let text = encode_document(&document, DocumentFormat::Hcl).expect("encodes");
    assert!(text.contains("  parameter \"legacy-size\" {\n    name = \"size\"\n"));
    assert!(text.contains("  parameter \"page\" {\n    in = \"query\"\n"));
    assert_eq!(decode_document(&text, DocumentFormat::Hcl).expect("decodes"), document);
}

#[test]
fn irregular_extension_keys_are_grouped() {
    let mut document = sample_document();
    document
        .extensions
        .insert("x-plain", json!(true))
        .expect("extension key");
    document
        .extensions
        .insert("x-with space", json!({"a": 1}))
        .expect("extension key");

    let text = encode_document(&document, DocumentFormat::Hcl).expect("encodes");
    assert!(text.contains("x-plain = true\n"));
    assert!(text.contains("extensions = {\n  \"x-with space\" = {\n"));
    assert_eq!(decode_document(&text, DocumentFormat::Hcl).expect("decodes"), document);
}

#[test]
fn non_finite_retry_delay_cannot_be_written() {
    let mut workflow = Workflow::new("w");
    workflow
        .failure_actions
        .push(FailureAction::retry("again", f64::NAN, 3).into());
    let document = ArazzoDocument {
        workflows: vec![workflow],
        ..ArazzoDocument::default()
    };

    let err = encode_document(&document, DocumentFormat::Hcl).expect_err("must fail");
    assert!(matches!(err, EncodeError::NonFiniteNumber { .. }));
    assert_eq!(
        err.to_string(),
        "retryAfter of failure action \"again\" is not a finite number"
    );
}
