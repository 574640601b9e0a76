//! Hand-written block syntax documents read through the public entry points.

use arazzo_sdk::{
    decode_document, decode_document_with_options, encode_document, BridgeOptions,
    CriterionType, DecodeError, DecodeOptions, DocumentFormat, FailureActionOrReusable,
    ParameterOrReusable,
};
use serde_json::json;

const PET_FLOW: &str = r##"
# Pet adoption flow
arazzo = "1.0.0"
x-maintainer = "platform"

info {
  title   = "Adopt a pet"
  version = "1.2.0"
}

sourceDescription "petstore" {
  url  = "https://example.com/petstore.yaml"
  type = "openapi"
}

workflow "adopt" {
  summary   = "Adopt the first pet that matches"
  dependsOn = ["login"]
  outputs = {
    adoptionId = "$steps.adopt.outputs.id"
  }

  inputs {
    type = "object"
    properties {
      species {
        _ref = "#/components/inputs/species"
      }
    }
  }

  parameter "Authorization" {
    in    = "header"
    value = "$inputs.token"
  }

  parameter {
    reference = "$components.parameters.trace"
  }

  step "search" {
    operationId = "findPets"
    parameters  = [{ name = "species", in = "query", value = "$inputs.species" }]
    outputs = {
      id = "$response.body#/0/id"
    }

    successCriterion {
      condition = "$statusCode == 200"
    }

    successCriterion {
      context   = "$response.body"
      condition = "$[0]"
      expressionType {
        type    = "jsonpath"
        version = "draft-goessner-dispatch-jsonpath-00"
      }
    }

    onSuccess "next" {
      type   = "goto"
      stepId = "adopt"
    }
  }

  step "adopt" {
    operationPath = "{$sourceDescriptions.petstore.url}#/paths/~1adoptions/post"

    requestBody {
      contentType = "application/json"
      payload {
        petId = "{$steps.search.outputs.id}"
        notes = ["gentle", "indoor"]
      }
      replacement {
        target = "/petId"
        value  = "$steps.search.outputs.id"
      }
    }

    outputs = {
      id = "$response.body#/id"
    }
  }

  failureAction "backoff" {
    type       = "retry"
    retryAfter = 0.75
    retryLimit = 4
  }
}

components {
  parameter "trace" {
    in    = "header"
    value = "abc"
  }
}
"##;

#[test]
fn hand_written_flow_decodes_and_validates() {
    let document = decode_document(PET_FLOW, DocumentFormat::Auto).expect("decodes");

    assert_eq!(document.extensions.get("x-maintainer"), Some(&json!("platform")));
    let workflow = document.workflow("adopt").expect("workflow");
    assert_eq!(workflow.depends_on, vec!["login".to_string()]);
    assert_eq!(
        workflow.inputs,
        Some(json!({
            "type": "object",
            "properties": {"species": {"$ref": "#/components/inputs/species"}}
        }))
    );
    assert!(matches!(&workflow.parameters[0], ParameterOrReusable::Parameter(p) if p.name == "Authorization"));
    assert!(matches!(&workflow.parameters[1], ParameterOrReusable::Reusable(r) if r.reference == "$components.parameters.trace"));

    let search = workflow.step("search").expect("search step");
    assert_eq!(search.success_criteria.len(), 2);
    assert_eq!(search.success_criteria[1].criterion_type(), Some(&CriterionType::JsonPath));
    assert_eq!(
        search.parameters,
        vec![json!({"name": "species", "in": "query", "value": "$inputs.species"})]
    );

    let adopt = workflow.step("adopt").expect("adopt step");
    let body = adopt.request_body.as_ref().expect("request body");
    assert_eq!(
        body.payload,
        Some(json!({"petId": "{$steps.search.outputs.id}", "notes": ["gentle", "indoor"]}))
    );
    assert_eq!(body.replacements[0].target, "/petId");

    match &workflow.failure_actions[0] {
        FailureActionOrReusable::FailureAction(action) => {
            assert_eq!(action.name, "backoff");
            assert_eq!(action.retry_after, Some(0.75));
            assert_eq!(action.retry_limit, Some(4));
        }
        other => panic!("expected a concrete failure action, got {other:?}"),
    }

    let components = document.components.as_ref().expect("components");
    assert!(components.parameters.contains_key("trace"));

    let result = document.validate();
    assert!(result.is_valid(), "{}", result.message());
}

#[test]
fn decoded_flow_survives_json_and_back() {
    let document = decode_document(PET_FLOW, DocumentFormat::Hcl).expect("decodes");
    let json = encode_document(&document, DocumentFormat::Json).expect("encodes");
    assert!(json.contains("\"$ref\":\"#/components/inputs/species\""));

    let from_json = decode_document(&json, DocumentFormat::Json).expect("json decodes");
    assert_eq!(from_json, document);

    let blocks = encode_document(&from_json, DocumentFormat::Hcl).expect("encodes blocks");
    assert_eq!(decode_document(&blocks, DocumentFormat::Hcl).expect("decodes"), document);
}

#[test]
fn extra_meta_keywords_are_restored_when_configured() {
    let input = r##"
workflow "w" {
  inputs {
    _custom = "kept"
    _ref    = "#/x"
  }
}
"##;
    let default = decode_document(input, DocumentFormat::Hcl).expect("decodes");
    assert_eq!(default.workflows[0].inputs, Some(json!({"_custom": "kept", "$ref": "#/x"})));

    let options = DecodeOptions {
        format: DocumentFormat::Hcl,
        bridge: BridgeOptions::default().with_meta_keyword("$custom"),
    };
    let configured = decode_document_with_options(input, &options).expect("decodes");
    assert_eq!(configured.workflows[0].inputs, Some(json!({"$custom": "kept", "$ref": "#/x"})));
}

#[test]
fn every_block_problem_is_reported_with_the_partial_document() {
    let input = r##"
arazzo = "1.0.0"

info {
  title   = 42
  version = "1.0.0"
}

workflow "w" {
  step "a" {
    operationId = ["not", "a", "string"]
  }

  step "b" {
    workflowId = "other"
  }
}
"##;
    let err = decode_document(input, DocumentFormat::Hcl).expect_err("decode fails");
    let block = match err {
        DecodeError::Block(block) => block,
        other => panic!("expected block decode errors, got {other:?}"),
    };

    assert_eq!(
        block.messages,
        vec![
            "info: attribute \"title\": expected string, got number".to_string(),
            "workflow \"w\" > step \"a\": attribute \"operationId\": expected string, got tuple"
                .to_string(),
        ]
    );
    assert_eq!(block.document.workflows[0].steps.len(), 2);
    assert_eq!(block.document.workflows[0].steps[1].workflow_id.as_deref(), Some("other"));
}

#[test]
fn syntax_errors_stop_before_decoding() {
    let err = decode_document("workflow \"w\" {\n  step \"a\" {\n", DocumentFormat::Hcl)
        .expect_err("unterminated block");
    assert!(matches!(err, DecodeError::Syntax(_)), "{err:?}");
}

#[test]
fn number_literals_with_runaway_exponents_are_syntax_errors() {
    let err = decode_document("arazzo = \"1.0.0\"\nx-tiny = 1e-4294967297\n", DocumentFormat::Hcl)
        .expect_err("exponent out of range");
    assert!(
        matches!(err, DecodeError::Syntax(arazzo_hcl::ParseError::NumberOutOfRange { .. })),
        "{err:?}"
    );

    let err = decode_document("arazzo = \"1.0.0\"\nx-big = 1e200000\n", DocumentFormat::Hcl)
        .expect_err("exponent out of range");
    assert!(matches!(err, DecodeError::Syntax(_)), "{err:?}");
}

#[test]
fn deeply_nested_values_are_syntax_errors() {
    let text = format!("arazzo = \"1.0.0\"\nx-deep = {}{}\n", "[".repeat(5000), "]".repeat(5000));
    let err = decode_document(&text, DocumentFormat::Hcl).expect_err("too deep");
    assert!(
        matches!(err, DecodeError::Syntax(arazzo_hcl::ParseError::NestingTooDeep { .. })),
        "{err:?}"
    );
}

#[test]
fn heredoc_descriptions_keep_literal_markers() {
    let input = "arazzo = \"1.0.0\"\n\nworkflow \"w\" {\n  description = <<-EOT\n    Uses $${inputs.token} literally\n    EOT\n}\n";
    let document = decode_document(input, DocumentFormat::Hcl).expect("decodes");
    assert_eq!(
        document.workflows[0].description.as_deref(),
        Some("Uses ${inputs.token} literally\n")
    );
}

#[test]
fn file_extensions_select_the_format() {
    assert_eq!(DocumentFormat::from_path("flows/adopt.hcl"), Some(DocumentFormat::Hcl));
    assert_eq!(DocumentFormat::from_path("flows/adopt.arazzo.YML"), Some(DocumentFormat::Yaml));
    assert_eq!(DocumentFormat::from_path("flows/adopt.json"), Some(DocumentFormat::Json));
    assert_eq!(DocumentFormat::from_path("flows/adopt"), None);
}
