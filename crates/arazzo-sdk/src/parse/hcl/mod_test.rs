use super::decode_hcl;
use crate::bridge::BridgeOptions;
use crate::documents::{
    ArazzoDocument, CriterionKind, CriterionType, FailureActionOrReusable, FailureActionType,
    ParameterLocation, ParameterOrReusable, SourceDescriptionType, SuccessActionOrReusable,
};
use crate::parse::{BlockDecodeError, DecodeError};
use serde_json::json;

fn decode(input: &str) -> ArazzoDocument {
    decode_hcl(input, &BridgeOptions::default()).expect("block document decodes")
}

fn decode_failure(input: &str) -> BlockDecodeError {
    match decode_hcl(input, &BridgeOptions::default()) {
        Err(DecodeError::Block(err)) => err,
        other => panic!("expected block decode error, got {other:?}"),
    }
}

#[test]
fn labels_name_the_nodes() {
    let document = decode(
        r##"
arazzo = "1.0.0"
x-generator = "hand"

info {
  title   = "Pet purchase"
  version = "1.0.0"
}

sourceDescription "petstore" {
  url  = "https://example.com/openapi.json"
  type = "openapi"
}

workflow "buy" {
  summary   = "Buy a pet"
  dependsOn = ["login"]
  outputs   = { petId = "$steps.find.outputs.id" }

  step "find" {
    operationId = "findPets"
    parameters  = [{ name = "status", in = "query", value = "available" }]
    outputs     = { id = "$response.body#/0/id" }
  }
}
"##,
    );

    assert_eq!(document.arazzo, "1.0.0");
    assert_eq!(document.extensions.get("x-generator"), Some(&json!("hand")));
    assert_eq!(document.info.as_ref().map(|info| info.title.as_str()), Some("Pet purchase"));
    let source = &document.source_descriptions[0];
    assert_eq!(source.name, "petstore");
    assert_eq!(source.kind, Some(SourceDescriptionType::OpenApi));

    let workflow = document.workflow("buy").expect("workflow");
    assert_eq!(workflow.depends_on, vec!["login".to_string()]);
    assert_eq!(workflow.outputs["petId"], "$steps.find.outputs.id");
    let step = workflow.step("find").expect("step");
    assert_eq!(step.operation_id.as_deref(), Some("findPets"));
    assert_eq!(
        step.parameters,
        vec![json!({"name": "status", "in": "query", "value": "available"})]
    );
}

#[test]
fn inputs_blocks_restore_schema_keywords() {
    let document = decode(
        r##"
workflow "buy" {
  inputs {
    type = "object"
    properties {
      owner {
        _ref = "#/components/inputs/owner"
      }
    }
  }
}
"##,
    );
    assert_eq!(
        document.workflows[0].inputs,
        Some(json!({
            "type": "object",
            "properties": {"owner": {"$ref": "#/components/inputs/owner"}}
        }))
    );
}

#[test]
fn criteria_accept_both_type_forms() {
    let document = decode(
        r##"
workflow "w" {
  step "s" {
    operationId = "op"
    successCriterion {
      condition = "$statusCode == 200"
    }
    successCriterion {
      context   = "$response.body"
      condition = "$.pets"
      type      = "jsonpath"
      version   = "draft-goessner-dispatch-jsonpath-00"
    }
    successCriterion {
      context   = "$response.body"
      condition = "//pet"
      expressionType {
        type    = "xpath"
        version = "xpath-30"
      }
    }
    successCriterion {
      context   = "$response.body"
      condition = "^ok"
      type      = "regex"
    }
  }
}
"##,
    );
    let criteria = &document.workflows[0].steps[0].success_criteria;
    assert_eq!(criteria[0].kind, None);
    assert_eq!(criteria[1].kind.as_ref().and_then(CriterionKind::version), Some("draft-goessner-dispatch-jsonpath-00"));
    assert_eq!(criteria[2].criterion_type(), Some(&CriterionType::XPath));
    assert_eq!(criteria[2].kind.as_ref().and_then(CriterionKind::version), Some("xpath-30"));
    assert_eq!(criteria[3].kind, Some(CriterionKind::Plain(CriterionType::Regex)));
}

#[test]
fn conflicting_criterion_forms_are_reported() {
    let err = decode_failure(
        r##"
workflow "w" {
  step "s" {
    successCriterion {
      condition = "x"
      type      = "jsonpath"
      expressionType {
        type    = "jsonpath"
        version = "draft-goessner-dispatch-jsonpath-00"
      }
    }
    successCriterion {
      condition = "y"
      version   = "xpath-10"
    }
  }
}
"##,
    );
    assert_eq!(err.messages.len(), 2);
    assert!(err.messages[0].starts_with("workflow \"w\" > step \"s\" > successCriterion: criterion cannot combine"));
    assert_eq!(
        err.messages[1],
        "workflow \"w\" > step \"s\" > successCriterion: attribute \"version\" requires \"type\" to be set"
    );
}

#[test]
fn reusable_forms_select_the_reference_branch() {
    let document = decode(
        r##"
workflow "w" {
  parameter {
    reference = "$components.parameters.page"
    value     = 2
  }
  parameter "limit" {
    in    = "query"
    value = 10
  }

  step "s" {
    operationId = "op"

    onSuccess {
      reference = "$components.successActions.done"
    }

    onFailure {
      reusable {
        reference = "$components.failureActions.retry"
        value {
          retryLimit = 5
        }
      }
    }

    onFailure "giveUp" {
      type = "end"
    }
  }
}
"##,
    );
    let workflow = &document.workflows[0];
    match &workflow.parameters[0] {
        ParameterOrReusable::Reusable(reusable) => {
            assert_eq!(reusable.reference, "$components.parameters.page");
            assert_eq!(reusable.value, Some(json!(2)));
        }
        other => panic!("expected reusable parameter, got {other:?}"),
    }
    match &workflow.parameters[1] {
        ParameterOrReusable::Parameter(parameter) => {
            assert_eq!(parameter.name, "limit");
            assert_eq!(parameter.location, Some(ParameterLocation::Query));
            assert_eq!(parameter.value, Some(json!(10)));
        }
        other => panic!("expected parameter, got {other:?}"),
    }

    let step = &workflow.steps[0];
    assert!(matches!(&step.on_success[0], SuccessActionOrReusable::Reusable(r) if r.reference == "$components.successActions.done"));
    match &step.on_failure[0] {
        FailureActionOrReusable::Reusable(reusable) => {
            assert_eq!(reusable.value, Some(json!({"retryLimit": 5})));
        }
        other => panic!("expected reusable action, got {other:?}"),
    }
    match &step.on_failure[1] {
        FailureActionOrReusable::FailureAction(action) => {
            assert_eq!(action.name, "giveUp");
            assert_eq!(action.kind, Some(FailureActionType::End));
        }
        other => panic!("expected failure action, got {other:?}"),
    }
}

#[test]
fn components_use_labels_unless_named() {
    let document = decode(
        r##"
components {
  inputs {
    credentials {
      type = "object"
    }
  }

  parameter "page" {
    in    = "query"
    value = 1
  }

  parameter "legacy-size" {
    name = "size"
    in   = "query"
  }

  failureAction "retry" {
    type       = "retry"
    retryAfter = 1.5
    retryLimit = 3
    criterion {
      condition = "$statusCode == 503"
    }
  }
}
"##,
    );
    let components = document.components.expect("components");
    assert_eq!(components.inputs["credentials"], json!({"type": "object"}));
    assert_eq!(components.parameters["page"].name, "page");
    assert_eq!(components.parameters["legacy-size"].name, "size");
    let retry = &components.failure_actions["retry"];
    assert_eq!(retry.name, "retry");
    assert_eq!(retry.retry_after, Some(1.5));
    assert_eq!(retry.retry_limit, Some(3));
    assert_eq!(retry.criteria[0].condition, "$statusCode == 503");
}

#[test]
fn failures_accumulate_and_keep_the_partial_document() {
    let err = decode_failure(
        r##"
arazzo = "1.0.0"

workflow "w" {
  step "a" {
    operationId = 5
  }

  step "b" {
    operationId = "ok"
    description = true
  }

  failureAction "retry" {
    retryLimit = 1.5
  }
}
"##,
    );
    assert_eq!(
        err.messages,
        vec![
            "workflow \"w\" > step \"a\": attribute \"operationId\": expected string, got number".to_string(),
            "workflow \"w\" > step \"b\": attribute \"description\": expected string, got bool".to_string(),
            "workflow \"w\" > failureAction \"retry\": attribute \"retryLimit\": number 1.5 is not an integer".to_string(),
        ]
    );
    assert!(err.to_string().contains("; "));

    let partial = err.document;
    assert_eq!(partial.arazzo, "1.0.0");
    let workflow = &partial.workflows[0];
    assert_eq!(workflow.steps.len(), 2);
    assert_eq!(workflow.steps[0].operation_id, None);
    assert_eq!(workflow.steps[1].operation_id.as_deref(), Some("ok"));
}

#[test]
fn unevaluable_extensions_are_skipped() {
    let document = decode(
        r##"
info {
  title     = "t"
  version   = "1"
  x-dynamic = var.region
  x-static  = "eu"
}
"##,
    );
    let info = document.info.expect("info");
    assert_eq!(info.extensions.get("x-dynamic"), None);
    assert_eq!(info.extensions.get("x-static"), Some(&json!("eu")));
}

#[test]
fn extension_objects_carry_irregular_keys() {
    let document = decode(
        r##"
workflow "w" {
  extensions = {
    "x-rate limit" = 10
  }
}
"##,
    );
    assert_eq!(document.workflows[0].extensions.get("x-rate limit"), Some(&json!(10)));

    let err = decode_failure("extensions = { plain = 1 }\n");
    assert_eq!(err.messages, vec!["extension key `plain` must start with `x-`".to_string()]);
}

#[test]
fn template_strings_are_rejected() {
    let err = decode_failure("arazzo = \"${version}\"\n");
    assert_eq!(err.messages.len(), 1);
    assert!(err.messages[0].starts_with("attribute \"arazzo\": template interpolation"));
}

#[test]
fn singleton_blocks_cannot_repeat() {
    let err = decode_failure("info {\n  title = \"a\"\n}\n\ninfo {\n  title = \"b\"\n}\n");
    assert_eq!(err.messages, vec!["duplicate block \"info\"".to_string()]);
    assert_eq!(err.document.info.map(|info| info.title), Some("a".to_string()));
}
