use super::{value_type, Decoder};
use crate::bridge::from_block_keys;
use crate::documents::{
    Criterion, CriterionExpressionType, CriterionKind, CriterionType, FailureAction,
    FailureActionOrReusable, FailureActionType, Parameter, ParameterLocation, ParameterOrReusable,
    PayloadReplacement, RequestBody, ReusableObject, Step, SuccessAction, SuccessActionOrReusable,
    SuccessActionType, Workflow,
};
use arazzo_hcl::{Attribute, Block, Body, Structure};
use serde_json::Value;

impl Decoder<'_> {
    pub(super) fn workflow(&mut self, block: &Block) -> Workflow {
        let mut workflow = Workflow::new(self.label(block));
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "summary" => workflow.summary = self.string(attribute),
                    "description" => workflow.description = self.string(attribute),
                    "dependsOn" => workflow.depends_on = self.string_list(attribute).unwrap_or_default(),
                    "outputs" => workflow.outputs = self.string_map(attribute).unwrap_or_default(),
                    "inputs" => {
                        let inputs = self.evaluate(attribute);
                        self.workflow_inputs(&mut workflow, inputs, &attribute.key);
                    }
                    _ => self.other_attribute(attribute, &mut workflow.extensions),
                },
                Structure::Block(nested) => match nested.identifier.as_str() {
                    "inputs" => {
                        let inputs = self.schema_block(nested);
                        self.workflow_inputs(&mut workflow, inputs, &nested.identifier);
                    }
                    "step" => {
                        let step = self.within(nested, |decoder| decoder.step(nested));
                        workflow.steps.push(step);
                    }
                    "successAction" => {
                        let action = self.within(nested, |decoder| decoder.success_action_entry(nested));
                        workflow.success_actions.push(action);
                    }
                    "failureAction" => {
                        let action = self.within(nested, |decoder| decoder.failure_action_entry(nested));
                        workflow.failure_actions.push(action);
                    }
                    "parameter" => {
                        let parameter = self.within(nested, |decoder| decoder.parameter_entry(nested));
                        workflow.parameters.push(parameter);
                    }
                    _ => self.other_block(nested),
                },
            }
        }
        workflow
    }

    fn workflow_inputs(&mut self, workflow: &mut Workflow, inputs: Option<Value>, key: &str) {
        let Some(inputs) = inputs else {
            return;
        };
        if workflow.inputs.is_some() {
            self.report(format!("\"{key}\" is defined more than once"));
            return;
        }
        workflow.inputs = Some(from_block_keys(&inputs, self.bridge));
    }

    fn step(&mut self, block: &Block) -> Step {
        let mut step = Step::new(self.label(block));
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "description" => step.description = self.string(attribute),
                    "operationId" => step.operation_id = self.string(attribute),
                    "operationPath" => step.operation_path = self.string(attribute),
                    "workflowId" => step.workflow_id = self.string(attribute),
                    "outputs" => step.outputs = self.string_map(attribute).unwrap_or_default(),
                    "parameters" => step.parameters = self.parameter_list(attribute),
                    _ => self.other_attribute(attribute, &mut step.extensions),
                },
                Structure::Block(nested) => match nested.identifier.as_str() {
                    "requestBody" => {
                        let body = self.within(nested, |decoder| decoder.request_body(nested));
                        self.set_once(&mut step.request_body, body, nested);
                    }
                    "successCriterion" => {
                        let criterion = self.within(nested, |decoder| decoder.criterion(nested));
                        step.success_criteria.push(criterion);
                    }
                    "onSuccess" => {
                        let action = self.within(nested, |decoder| decoder.success_action_entry(nested));
                        step.on_success.push(action);
                    }
                    "onFailure" => {
                        let action = self.within(nested, |decoder| decoder.failure_action_entry(nested));
                        step.on_failure.push(action);
                    }
                    _ => self.other_block(nested),
                },
            }
        }
        step
    }

    fn parameter_list(&mut self, attribute: &Attribute) -> Vec<Value> {
        match self.evaluate(attribute) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.mismatch(attribute, "tuple", value_type(&other));
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn request_body(&mut self, block: &Block) -> RequestBody {
        self.no_labels(block);
        let mut request_body = RequestBody::default();
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "contentType" => request_body.content_type = self.string(attribute),
                    "payload" => {
                        let payload = self.evaluate(attribute);
                        self.payload(&mut request_body, payload);
                    }
                    _ => self.other_attribute(attribute, &mut request_body.extensions),
                },
                Structure::Block(nested) => match nested.identifier.as_str() {
                    "payload" => {
                        let payload = self.schema_block(nested);
                        self.payload(&mut request_body, payload);
                    }
                    "replacement" => {
                        let replacement = self.within(nested, |decoder| decoder.replacement(nested));
                        request_body.replacements.push(replacement);
                    }
                    _ => self.other_block(nested),
                },
            }
        }
        request_body
    }

    fn payload(&mut self, request_body: &mut RequestBody, payload: Option<Value>) {
        let Some(payload) = payload else {
            return;
        };
        if request_body.payload.is_some() {
            self.report("\"payload\" is defined more than once");
            return;
        }
        request_body.payload = Some(payload);
    }

    fn replacement(&mut self, block: &Block) -> PayloadReplacement {
        self.no_labels(block);
        let mut replacement = PayloadReplacement::default();
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "target" => replacement.target = self.string(attribute).unwrap_or_default(),
                    "value" => replacement.value = self.string(attribute).unwrap_or_default(),
                    _ => self.other_attribute(attribute, &mut replacement.extensions),
                },
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        replacement
    }

    /// Accepts `type`/`version` attributes or an `expressionType` block, but
    /// not both.
    pub(super) fn criterion(&mut self, block: &Block) -> Criterion {
        self.no_labels(block);
        let mut criterion = Criterion::default();
        let mut kind = None;
        let mut version = None;
        let mut expression_type: Option<(Option<String>, Option<String>)> = None;
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "context" => criterion.context = self.string(attribute),
                    "condition" => criterion.condition = self.string(attribute).unwrap_or_default(),
                    "type" => kind = self.string(attribute),
                    "version" => version = self.string(attribute),
                    _ => self.other_attribute(attribute, &mut criterion.extensions),
                },
                Structure::Block(nested) if nested.identifier == "expressionType" => {
                    let decoded = self.within(nested, |decoder| decoder.expression_type(nested));
                    if expression_type.is_some() {
                        self.report("duplicate block \"expressionType\"");
                    } else {
                        expression_type = Some(decoded);
                    }
                }
                Structure::Block(nested) => self.other_block(nested),
            }
        }

        if let Some((block_kind, block_version)) = expression_type {
            if kind.is_some() || version.is_some() {
                self.report("criterion cannot combine \"type\"/\"version\" attributes with an \"expressionType\" block");
            } else {
                kind = block_kind;
                version = block_version;
            }
        }

        criterion.kind = match (kind, version) {
            (Some(kind), Some(version)) => Some(CriterionKind::Expression(CriterionExpressionType {
                kind: CriterionType::from(kind),
                version,
            })),
            (Some(kind), None) => Some(CriterionKind::Plain(CriterionType::from(kind))),
            (None, Some(_)) => {
                self.report("attribute \"version\" requires \"type\" to be set");
                None
            }
            (None, None) => None,
        };
        criterion
    }

    fn expression_type(&mut self, block: &Block) -> (Option<String>, Option<String>) {
        self.no_labels(block);
        let mut kind = None;
        let mut version = None;
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "type" => kind = self.string(attribute),
                    "version" => version = self.string(attribute),
                    _ => tracing::trace!(attribute = %attribute.key, "ignoring attribute of expression type"),
                },
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        (kind, version)
    }

    pub(super) fn success_action_entry(&mut self, block: &Block) -> SuccessActionOrReusable {
        match self.reusable(block) {
            Some(reusable) => reusable.into(),
            None => self.success_action(block).into(),
        }
    }

    pub(super) fn failure_action_entry(&mut self, block: &Block) -> FailureActionOrReusable {
        match self.reusable(block) {
            Some(reusable) => reusable.into(),
            None => self.failure_action(block).into(),
        }
    }

    pub(super) fn parameter_entry(&mut self, block: &Block) -> ParameterOrReusable {
        match self.reusable(block) {
            Some(reusable) => reusable.into(),
            None => self.parameter(block).into(),
        }
    }

    pub(super) fn success_action(&mut self, block: &Block) -> SuccessAction {
        let mut action = SuccessAction {
            name: self.label(block),
            ..SuccessAction::default()
        };
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "name" => action.name = self.string(attribute).unwrap_or_default(),
                    "type" => action.kind = self.string(attribute).map(SuccessActionType::from),
                    "workflowId" => action.workflow_id = self.string(attribute),
                    "stepId" => action.step_id = self.string(attribute),
                    _ => self.other_attribute(attribute, &mut action.extensions),
                },
                Structure::Block(nested) if nested.identifier == "criterion" => {
                    let criterion = self.within(nested, |decoder| decoder.criterion(nested));
                    action.criteria.push(criterion);
                }
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        action
    }

    pub(super) fn failure_action(&mut self, block: &Block) -> FailureAction {
        let mut action = FailureAction {
            name: self.label(block),
            ..FailureAction::default()
        };
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "name" => action.name = self.string(attribute).unwrap_or_default(),
                    "type" => action.kind = self.string(attribute).map(FailureActionType::from),
                    "workflowId" => action.workflow_id = self.string(attribute),
                    "stepId" => action.step_id = self.string(attribute),
                    "retryAfter" => action.retry_after = self.float(attribute),
                    "retryLimit" => action.retry_limit = self.integer(attribute),
                    _ => self.other_attribute(attribute, &mut action.extensions),
                },
                Structure::Block(nested) if nested.identifier == "criterion" => {
                    let criterion = self.within(nested, |decoder| decoder.criterion(nested));
                    action.criteria.push(criterion);
                }
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        action
    }

    pub(super) fn parameter(&mut self, block: &Block) -> Parameter {
        let mut parameter = Parameter {
            name: self.label(block),
            ..Parameter::default()
        };
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "name" => parameter.name = self.string(attribute).unwrap_or_default(),
                    "in" => parameter.location = self.string(attribute).map(ParameterLocation::from),
                    "value" => parameter.value = self.evaluate(attribute),
                    _ => self.other_attribute(attribute, &mut parameter.extensions),
                },
                Structure::Block(nested) if nested.identifier == "value" => {
                    if parameter.value.is_some() {
                        self.report("\"value\" is defined more than once");
                    } else {
                        parameter.value = self.schema_block(nested);
                    }
                }
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        parameter
    }

    /// A nested `reusable` block or a `reference` attribute selects the
    /// reusable branch of a one-of entry.
    fn reusable(&mut self, block: &Block) -> Option<ReusableObject> {
        if let Some(inner) = block.body.blocks().find(|inner| inner.identifier == "reusable") {
            return Some(self.within(inner, |decoder| decoder.reusable_body(&inner.body)));
        }
        if block.body.attribute("reference").is_some() {
            return Some(self.reusable_body(&block.body));
        }
        None
    }

    fn reusable_body(&mut self, body: &Body) -> ReusableObject {
        let mut reusable = ReusableObject::default();
        for structure in &body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "reference" => reusable.reference = self.string(attribute).unwrap_or_default(),
                    "value" => reusable.value = self.evaluate(attribute),
                    _ => tracing::trace!(attribute = %attribute.key, "ignoring attribute of reusable object"),
                },
                Structure::Block(nested) if nested.identifier == "value" => {
                    if reusable.value.is_some() {
                        self.report("\"value\" is defined more than once");
                    } else {
                        reusable.value = self.schema_block(nested);
                    }
                }
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        reusable
    }
}
