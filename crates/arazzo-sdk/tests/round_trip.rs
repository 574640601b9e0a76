//! Format round trips over a document that uses every node type, with
//! extensions attached at each of them.

use arazzo_sdk::{
    decode_document, encode_document, ArazzoDocument, DocumentFormat, FailureActionOrReusable,
    StepParameter, SuccessActionOrReusable,
};
use proptest::prelude::*;
use serde_json::{json, Value};

const FULL_DOCUMENT: &str = r##"{
  "arazzo": "1.0.0",
  "info": {
    "title": "Pet purchase",
    "summary": "Find and buy a pet",
    "version": "2.1.0",
    "x-audience": {"teams": ["store", "billing"], "public": false}
  },
  "sourceDescriptions": [
    {"name": "petstore", "url": "https://example.com/openapi.json", "type": "openapi", "x-owner": "store"},
    {"name": "auth-flows", "url": "./auth.arazzo.json", "type": "arazzo"}
  ],
  "workflows": [
    {
      "workflowId": "buy-pet",
      "summary": "Buy the first available pet",
      "description": "Line one\nLine \"two\" with a \\ backslash",
      "inputs": {
        "type": "object",
        "$defs": {"token": {"type": "string", "$comment": "bearer"}},
        "properties": {
          "token": {"$ref": "#/$defs/token"},
          "budget": {"type": "number", "minimum": 0.5}
        },
        "required": ["token"]
      },
      "dependsOn": ["login"],
      "parameters": [
        {"name": "Authorization", "in": "header", "value": "$inputs.token", "x-secret": true},
        {"reference": "$components.parameters.page", "value": 3}
      ],
      "successActions": [{"reference": "$components.successActions.done"}],
      "failureActions": [
        {
          "name": "retryOnBusy",
          "type": "retry",
          "retryAfter": 1.5,
          "retryLimit": 3,
          "criteria": [{"condition": "$statusCode == 503"}],
          "x-backoff": "linear"
        }
      ],
      "outputs": {"petId": "$steps.find.outputs.id", "receipt.url": "$steps.buy.outputs.url"},
      "x-tier": 2,
      "steps": [
        {
          "stepId": "find",
          "description": "Search for available pets",
          "operationId": "findPets",
          "parameters": [
            {"name": "status", "in": "query", "value": "available"},
            "page",
            {"reference": "$components.parameters.page"}
          ],
          "successCriteria": [
            {"condition": "$statusCode == 200"},
            {"context": "$response.body", "condition": "^\\[", "type": "regex"},
            {
              "context": "$response.body",
              "condition": "$[?(@.status == 'available')]",
              "type": "jsonpath",
              "version": "draft-goessner-dispatch-jsonpath-00",
              "x-note": "filter"
            }
          ],
          "onSuccess": [
            {
              "name": "toBuy",
              "type": "goto",
              "stepId": "buy",
              "criteria": [{"context": "$response.body", "condition": "$.length > 0", "type": "simple"}]
            }
          ],
          "onFailure": [
            {"reference": "$components.failureActions.retry", "value": {"retryLimit": 5}}
          ],
          "outputs": {"id": "$response.body#/0/id"},
          "x-timeout-ms": 2500
        },
        {
          "stepId": "buy",
          "operationPath": "{$sourceDescriptions.petstore.url}#/paths/~1orders/post",
          "requestBody": {
            "contentType": "application/json",
            "payload": {"petId": "{$steps.find.outputs.id}", "note": "template ${literal} and %{directive}", "quantity": 1, "gift": null},
            "replacements": [
              {"target": "/quantity", "value": "$inputs.quantity", "x-why": "override"}
            ],
            "x-compressed": false
          },
          "outputs": {"url": "$response.header.Location"}
        },
        {
          "stepId": "notify",
          "workflowId": "$sourceDescriptions.auth-flows.notify",
          "onSuccess": [{"name": "finish", "type": "end"}]
        }
      ]
    }
  ],
  "components": {
    "inputs": {
      "pagination": {"type": "object", "properties": {"page": {"type": "integer", "default": 1}}}
    },
    "parameters": {
      "page": {"name": "page", "in": "query", "value": 1, "x-deprecated": false}
    },
    "successActions": {
      "done": {"name": "done", "type": "end"}
    },
    "failureActions": {
      "retry": {"name": "retryOnce", "type": "retry", "retryAfter": 2.5, "retryLimit": 1}
    },
    "x-generated-by": "hand"
  },
  "x-document-id": "purchase-001"
}"##;

fn full_document() -> ArazzoDocument {
    decode_document(FULL_DOCUMENT, DocumentFormat::Json).expect("fixture decodes")
}

#[test]
fn fixture_decodes_every_branch() {
    let document = full_document();
    let workflow = document.workflow("buy-pet").expect("workflow");

    assert_eq!(document.extensions.get("x-document-id"), Some(&json!("purchase-001")));
    assert!(matches!(workflow.success_actions[0], SuccessActionOrReusable::Reusable(_)));
    assert!(matches!(workflow.failure_actions[0], FailureActionOrReusable::FailureAction(_)));

    let find = workflow.step("find").expect("find step");
    let entries = find.parameter_entries();
    assert!(matches!(entries[0], StepParameter::Parameter(_)));
    assert!(matches!(entries[1], StepParameter::Opaque(Value::String(_))));
    assert!(matches!(entries[2], StepParameter::Reusable(_)));

    let buy = workflow.step("buy").expect("buy step");
    let payload = buy
        .request_body
        .as_ref()
        .and_then(|body| body.payload.as_ref())
        .expect("payload");
    assert_eq!(payload["gift"], Value::Null);

    assert!(document.validate().is_valid(), "{}", document.validate().message());
}

#[test]
fn json_round_trip_is_lossless() {
    let document = full_document();
    let compact = encode_document(&document, DocumentFormat::Json).expect("encodes");
    assert_eq!(decode_document(&compact, DocumentFormat::Json).expect("decodes"), document);

    let reencoded: Value = serde_json::from_str(&compact).expect("json");
    let original: Value = serde_json::from_str(FULL_DOCUMENT).expect("json");
    assert_eq!(reencoded, original);
}

#[test]
fn yaml_round_trip_is_lossless() {
    let document = full_document();
    let yaml = encode_document(&document, DocumentFormat::Yaml).expect("encodes");
    assert_eq!(decode_document(&yaml, DocumentFormat::Yaml).expect("decodes"), document);
}

#[test]
fn block_syntax_round_trip_keeps_every_field() {
    let document = full_document();
    let text = encode_document(&document, DocumentFormat::Hcl).expect("encodes");

    assert!(text.contains("workflow \"buy-pet\" {"));
    assert!(text.contains("_ref = \"#/$defs/token\""));
    assert!(text.contains("\"template $${literal} and %%{directive}\""));
    assert!(text.contains("description = \"Line one\\nLine \\\"two\\\" with a \\\\ backslash\""));
    assert!(text.contains("  failureAction \"retry\" {\n    name = \"retryOnce\"\n"));

    let decoded = decode_document(&text, DocumentFormat::Hcl).expect("block text decodes");
    assert_eq!(decoded, document);
}

#[test]
fn block_syntax_round_trip_through_auto_detection() {
    let document = full_document();
    let text = encode_document(&document, DocumentFormat::Hcl).expect("encodes");
    assert_eq!(decode_document(&text, DocumentFormat::Auto).expect("decodes"), document);
}

#[test]
fn integral_floats_come_back_as_integers_in_opaque_values() {
    let mut document = full_document();
    document.workflows[0].steps[0].parameters = vec![json!({"name": "ratio", "value": 1.0})];

    let text = encode_document(&document, DocumentFormat::Hcl).expect("encodes");
    let decoded = decode_document(&text, DocumentFormat::Hcl).expect("decodes");
    assert_eq!(decoded.workflows[0].steps[0].parameters, vec![json!({"name": "ratio", "value": 1})]);
}

#[test]
fn wide_floats_come_back_as_floats() {
    let mut document = full_document();
    document.workflows[0].steps[0].parameters = vec![
        json!({"name": "huge", "value": 1e300}),
        json!({"name": "tiny", "value": -2.5e-300}),
    ];

    let text = encode_document(&document, DocumentFormat::Hcl).expect("encodes");
    let decoded = decode_document(&text, DocumentFormat::Hcl).expect("decodes");
    assert_eq!(decoded.workflows[0].steps[0].parameters, document.workflows[0].steps[0].parameters);
    assert!(decoded.workflows[0].steps[0].parameters[0]["value"].is_f64());
}

#[test]
fn oversized_numbers_survive_as_decimal_strings() {
    let text = r#"
arazzo = "1.0.0"

workflow "w" {
  inputs {
    type    = "integer"
    maximum = 123456789012345678901234567890
    epsilon = 1e-400
    small   = 0.25
    count   = 18446744073709551615
  }
}
"#;
    let document = decode_document(text, DocumentFormat::Hcl).expect("decodes");
    let inputs = document.workflows[0].inputs.as_ref().expect("inputs");
    assert_eq!(inputs["maximum"], json!("123456789012345678901234567890"));
    assert!(inputs["epsilon"].is_string());
    assert_eq!(inputs["small"], json!(0.25));
    assert_eq!(inputs["count"], json!(u64::MAX));
}

fn extension_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z$ _-]{1,8}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn extensions_survive_every_format(
        key in "x-[a-z][a-z0-9 .-]{0,10}",
        value in extension_value(),
    ) {
        let mut document = full_document();
        document.extensions.insert(key.clone(), value.clone()).expect("extension key");
        document.workflows[0].steps[1]
            .extensions
            .insert(key.clone(), value.clone())
            .expect("extension key");
        if let Some(info) = document.info.as_mut() {
            info.extensions.insert(key.clone(), value.clone()).expect("extension key");
        }

        for format in [DocumentFormat::Json, DocumentFormat::Yaml, DocumentFormat::Hcl] {
            let encoded = encode_document(&document, format).expect("encodes");
            let decoded = decode_document(&encoded, format).expect("decodes");
            prop_assert_eq!(decoded.extensions.get(&key), Some(&value));
            prop_assert_eq!(&decoded, &document);
        }
    }
}
