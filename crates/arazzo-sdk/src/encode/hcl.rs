use super::EncodeError;
use crate::bridge::{to_block_keys, unrestorable_keys, value_fits_blocks, value_to_body, BridgeOptions};
use crate::documents::{
    ArazzoDocument, Components, Criterion, CriterionKind, FailureAction, FailureActionOrReusable,
    Info, Parameter, ParameterOrReusable, RequestBody, ReusableObject, SourceDescription, Step,
    SuccessAction, SuccessActionOrReusable, Workflow,
};
use arazzo_core::Extensions;
use arazzo_hcl::{
    is_identifier, number_to_decimal, value_to_expression, write_body, Attribute, Block, Body,
    Decimal, Expression, Pos, Structure,
};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Renders a document in the block syntax. The document is only read;
/// schema-shaped values are key-transformed into fresh copies.
pub(super) fn encode_hcl(
    document: &ArazzoDocument,
    bridge: &BridgeOptions,
) -> Result<String, EncodeError> {
    let encoder = Encoder { bridge };
    let mut body = Body::new();
    body.push_attribute("arazzo", string(&document.arazzo));
    push_extensions(&mut body, &document.extensions);
    if let Some(info) = &document.info {
        body.push_block(Block::new("info", Vec::new(), info_body(info)));
    }
    for source in &document.source_descriptions {
        body.push_block(Block::new(
            "sourceDescription",
            vec![source.name.clone()],
            source_body(source),
        ));
    }
    for workflow in &document.workflows {
        body.push_block(Block::new(
            "workflow",
            vec![workflow.workflow_id.clone()],
            encoder.workflow_body(workflow)?,
        ));
    }
    if let Some(components) = &document.components {
        body.push_block(Block::new("components", Vec::new(), encoder.components_body(components)?));
    }
    Ok(write_body(&body))
}

struct Encoder<'a> {
    bridge: &'a BridgeOptions,
}

impl Encoder<'_> {
    fn workflow_body(&self, workflow: &Workflow) -> Result<Body, EncodeError> {
        let mut body = Body::new();
        push_optional(&mut body, "summary", &workflow.summary);
        push_optional(&mut body, "description", &workflow.description);
        if !workflow.depends_on.is_empty() {
            body.push_attribute(
                "dependsOn",
                Expression::Array(workflow.depends_on.iter().map(|id| string(id)).collect()),
            );
        }
        push_string_map(&mut body, "outputs", &workflow.outputs);
        push_extensions(&mut body, &workflow.extensions);
        if let Some(inputs) = &workflow.inputs {
            self.push_schema(&mut body, "inputs", inputs);
        }
        for parameter in &workflow.parameters {
            body.push_block(parameter_entry(parameter));
        }
        for step in &workflow.steps {
            body.push_block(Block::new("step", vec![step.step_id.clone()], step_body(step)?));
        }
        for action in &workflow.success_actions {
            body.push_block(success_action_entry("successAction", action));
        }
        for action in &workflow.failure_actions {
            body.push_block(failure_action_entry("failureAction", action)?);
        }
        Ok(body)
    }

    fn components_body(&self, components: &Components) -> Result<Body, EncodeError> {
        let mut body = Body::new();
        push_extensions(&mut body, &components.extensions);
        if !components.inputs.is_empty() {
            let inputs: Map<String, Value> = components
                .inputs
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            self.push_schema(&mut body, "inputs", &Value::Object(inputs));
        }
        for (key, parameter) in &components.parameters {
            let mut parameter_body = parameter_body(parameter);
            push_name_override(&mut parameter_body, key, &parameter.name);
            body.push_block(Block::new("parameter", vec![key.clone()], parameter_body));
        }
        for (key, action) in &components.success_actions {
            let mut action_body = success_action_body(action);
            push_name_override(&mut action_body, key, &action.name);
            body.push_block(Block::new("successAction", vec![key.clone()], action_body));
        }
        for (key, action) in &components.failure_actions {
            let mut action_body = failure_action_body(action)?;
            push_name_override(&mut action_body, key, &action.name);
            body.push_block(Block::new("failureAction", vec![key.clone()], action_body));
        }
        Ok(body)
    }

    /// Writes nested blocks when every key allows it, an object attribute
    /// otherwise.
    fn push_schema(&self, body: &mut Body, key: &str, value: &Value) {
        for lost in unrestorable_keys(value, self.bridge) {
            tracing::warn!(field = key, key = %lost, "schema key will not be restored when decoding");
        }
        let converted = to_block_keys(value);
        match &converted {
            Value::Object(entries) if value_fits_blocks(&converted) => {
                body.push_block(Block::new(key, Vec::new(), value_to_body(entries)));
            }
            _ => body.push_attribute(key, value_to_expression(&converted)),
        }
    }
}

fn info_body(info: &Info) -> Body {
    let mut body = Body::new();
    body.push_attribute("title", string(&info.title));
    push_optional(&mut body, "summary", &info.summary);
    push_optional(&mut body, "description", &info.description);
    body.push_attribute("version", string(&info.version));
    push_extensions(&mut body, &info.extensions);
    body
}

fn source_body(source: &SourceDescription) -> Body {
    let mut body = Body::new();
    body.push_attribute("url", string(&source.url));
    if let Some(kind) = &source.kind {
        body.push_attribute("type", string(kind.as_str()));
    }
    push_extensions(&mut body, &source.extensions);
    body
}

fn step_body(step: &Step) -> Result<Body, EncodeError> {
    let mut body = Body::new();
    push_optional(&mut body, "description", &step.description);
    push_optional(&mut body, "operationId", &step.operation_id);
    push_optional(&mut body, "operationPath", &step.operation_path);
    push_optional(&mut body, "workflowId", &step.workflow_id);
    if !step.parameters.is_empty() {
        body.push_attribute(
            "parameters",
            Expression::Array(step.parameters.iter().map(value_to_expression).collect()),
        );
    }
    push_string_map(&mut body, "outputs", &step.outputs);
    push_extensions(&mut body, &step.extensions);
    if let Some(request_body) = &step.request_body {
        body.push_block(Block::new("requestBody", Vec::new(), request_body_body(request_body)));
    }
    for criterion in &step.success_criteria {
        body.push_block(Block::new("successCriterion", Vec::new(), criterion_body(criterion)));
    }
    for action in &step.on_success {
        body.push_block(success_action_entry("onSuccess", action));
    }
    for action in &step.on_failure {
        body.push_block(failure_action_entry("onFailure", action)?);
    }
    Ok(body)
}

fn request_body_body(request_body: &RequestBody) -> Body {
    let mut body = Body::new();
    push_optional(&mut body, "contentType", &request_body.content_type);
    if let Some(payload) = &request_body.payload {
        body.push_attribute("payload", value_to_expression(payload));
    }
    push_extensions(&mut body, &request_body.extensions);
    for replacement in &request_body.replacements {
        let mut replacement_body = Body::new();
        replacement_body.push_attribute("target", string(&replacement.target));
        replacement_body.push_attribute("value", string(&replacement.value));
        push_extensions(&mut replacement_body, &replacement.extensions);
        body.push_block(Block::new("replacement", Vec::new(), replacement_body));
    }
    body
}

fn criterion_body(criterion: &Criterion) -> Body {
    let mut body = Body::new();
    push_optional(&mut body, "context", &criterion.context);
    body.push_attribute("condition", string(&criterion.condition));
    if let Some(kind) = &criterion.kind {
        body.push_attribute("type", string(kind.criterion_type().as_str()));
        if let CriterionKind::Expression(expression) = kind {
            body.push_attribute("version", string(&expression.version));
        }
    }
    push_extensions(&mut body, &criterion.extensions);
    body
}

fn success_action_entry(identifier: &str, entry: &SuccessActionOrReusable) -> Block {
    match entry {
        SuccessActionOrReusable::SuccessAction(action) => Block::new(
            identifier,
            vec![action.name.clone()],
            success_action_body(action),
        ),
        SuccessActionOrReusable::Reusable(reusable) => {
            Block::new(identifier, Vec::new(), reusable_body(reusable))
        }
    }
}

fn failure_action_entry(identifier: &str, entry: &FailureActionOrReusable) -> Result<Block, EncodeError> {
    Ok(match entry {
        FailureActionOrReusable::FailureAction(action) => Block::new(
            identifier,
            vec![action.name.clone()],
            failure_action_body(action)?,
        ),
        FailureActionOrReusable::Reusable(reusable) => {
            Block::new(identifier, Vec::new(), reusable_body(reusable))
        }
    })
}

fn parameter_entry(entry: &ParameterOrReusable) -> Block {
    match entry {
        ParameterOrReusable::Parameter(parameter) => Block::new(
            "parameter",
            vec![parameter.name.clone()],
            parameter_body(parameter),
        ),
        ParameterOrReusable::Reusable(reusable) => {
            Block::new("parameter", Vec::new(), reusable_body(reusable))
        }
    }
}

fn success_action_body(action: &SuccessAction) -> Body {
    let mut body = Body::new();
    if let Some(kind) = &action.kind {
        body.push_attribute("type", string(kind.as_str()));
    }
    push_optional(&mut body, "workflowId", &action.workflow_id);
    push_optional(&mut body, "stepId", &action.step_id);
    push_extensions(&mut body, &action.extensions);
    for criterion in &action.criteria {
        body.push_block(Block::new("criterion", Vec::new(), criterion_body(criterion)));
    }
    body
}

fn failure_action_body(action: &FailureAction) -> Result<Body, EncodeError> {
    let mut body = Body::new();
    if let Some(kind) = &action.kind {
        body.push_attribute("type", string(kind.as_str()));
    }
    push_optional(&mut body, "workflowId", &action.workflow_id);
    push_optional(&mut body, "stepId", &action.step_id);
    if let Some(retry_after) = action.retry_after {
        let decimal = Number::from_f64(retry_after)
            .as_ref()
            .and_then(number_to_decimal)
            .ok_or_else(|| EncodeError::NonFiniteNumber {
                field: format!("retryAfter of failure action \"{}\"", action.name),
            })?;
        body.push_attribute("retryAfter", Expression::Number(decimal));
    }
    if let Some(retry_limit) = action.retry_limit {
        body.push_attribute("retryLimit", Expression::Number(Decimal::from(retry_limit)));
    }
    push_extensions(&mut body, &action.extensions);
    for criterion in &action.criteria {
        body.push_block(Block::new("criterion", Vec::new(), criterion_body(criterion)));
    }
    Ok(body)
}

fn parameter_body(parameter: &Parameter) -> Body {
    let mut body = Body::new();
    if let Some(location) = &parameter.location {
        body.push_attribute("in", string(location.as_str()));
    }
    if let Some(value) = &parameter.value {
        body.push_attribute("value", value_to_expression(value));
    }
    push_extensions(&mut body, &parameter.extensions);
    body
}

fn reusable_body(reusable: &ReusableObject) -> Body {
    let mut body = Body::new();
    body.push_attribute("reference", string(&reusable.reference));
    if let Some(value) = &reusable.value {
        body.push_attribute("value", value_to_expression(value));
    }
    body
}

/// Component entries are labelled by their key; the name is written only
/// when it says something else.
fn push_name_override(body: &mut Body, key: &str, name: &str) {
    if key != name {
        body.structures.insert(
            0,
            Structure::Attribute(Attribute {
                key: "name".to_string(),
                expr: string(name),
                pos: Pos::default(),
            }),
        );
    }
}

/// Extensions with identifier keys become attributes; the rest are grouped
/// into one `extensions` object.
fn push_extensions(body: &mut Body, extensions: &Extensions) {
    let mut irregular = Vec::new();
    for (key, value) in extensions {
        if is_identifier(key) {
            body.push_attribute(key.clone(), value_to_expression(value));
        } else {
            irregular.push((key.clone(), value_to_expression(value)));
        }
    }
    if !irregular.is_empty() {
        body.push_attribute("extensions", Expression::Object(irregular));
    }
}

fn push_optional(body: &mut Body, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        body.push_attribute(key, string(value));
    }
}

fn push_string_map(body: &mut Body, key: &str, map: &BTreeMap<String, String>) {
    if !map.is_empty() {
        body.push_attribute(
            key,
            Expression::Object(
                map.iter()
                    .map(|(name, value)| (name.clone(), string(value)))
                    .collect(),
            ),
        );
    }
}

fn string(value: &str) -> Expression {
    Expression::String(value.to_string())
}
