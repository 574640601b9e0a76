use super::actions::{
    validate_criterion, validate_failure_action, validate_parameter, validate_reusable,
    validate_success_action,
};
use super::{is_blank, name_pattern, MISSING, MISSING_OR_EMPTY};
use crate::documents::{
    FailureActionOrReusable, ParameterOrReusable, RequestBody, Step, SuccessActionOrReusable,
    Workflow,
};
use arazzo_core::{FieldPath, ValidationResult};
use std::collections::{BTreeMap, HashSet};

pub(super) fn validate_workflow(workflow: &Workflow, path: &FieldPath, result: &mut ValidationResult) {
    if workflow.workflow_id.is_empty() {
        result.push(path.with_key("workflowId"), MISSING);
    }

    let steps_path = path.with_key("steps");
    if workflow.steps.is_empty() {
        result.push(steps_path, MISSING_OR_EMPTY);
    } else {
        let mut ids = HashSet::new();
        for (index, step) in workflow.steps.iter().enumerate() {
            let step_path = steps_path.with_index(index);
            validate_step(step, &step_path, result);
            if !step.step_id.is_empty() && !ids.insert(step.step_id.as_str()) {
                result.push(
                    step_path.with_key("stepId"),
                    format!("duplicate stepId: {}", step.step_id),
                );
            }
        }
    }

    check_output_names(&workflow.outputs, &path.with_key("outputs"), result);
    validate_success_entries(&workflow.success_actions, &path.with_key("successActions"), result);
    validate_failure_entries(&workflow.failure_actions, &path.with_key("failureActions"), result);

    let parameters_path = path.with_key("parameters");
    for (index, entry) in workflow.parameters.iter().enumerate() {
        let entry_path = parameters_path.with_index(index);
        match entry {
            ParameterOrReusable::Parameter(parameter) => {
                validate_parameter(parameter, &entry_path, result)
            }
            ParameterOrReusable::Reusable(reusable) => validate_reusable(reusable, &entry_path, result),
        }
    }
}

fn validate_step(step: &Step, path: &FieldPath, result: &mut ValidationResult) {
    if step.step_id.is_empty() {
        result.push(path.with_key("stepId"), MISSING);
    }

    let targets = [&step.operation_id, &step.operation_path, &step.workflow_id]
        .into_iter()
        .filter(|target| !is_blank(target.as_deref()))
        .count();
    match targets {
        0 => result.push(
            path.clone(),
            "must have one of: operationId, operationPath, or workflowId",
        ),
        1 => {}
        _ => result.push(
            path.clone(),
            "must have only one of: operationId, operationPath, or workflowId",
        ),
    }

    check_output_names(&step.outputs, &path.with_key("outputs"), result);

    if let Some(request_body) = &step.request_body {
        validate_request_body(request_body, &path.with_key("requestBody"), result);
    }

    let criteria_path = path.with_key("successCriteria");
    for (index, criterion) in step.success_criteria.iter().enumerate() {
        validate_criterion(criterion, &criteria_path.with_index(index), result);
    }

    validate_success_entries(&step.on_success, &path.with_key("onSuccess"), result);
    validate_failure_entries(&step.on_failure, &path.with_key("onFailure"), result);
}

fn validate_request_body(request_body: &RequestBody, path: &FieldPath, result: &mut ValidationResult) {
    let replacements_path = path.with_key("replacements");
    for (index, replacement) in request_body.replacements.iter().enumerate() {
        let replacement_path = replacements_path.with_index(index);
        if replacement.target.is_empty() {
            result.push(replacement_path.with_key("target"), MISSING);
        }
        if replacement.value.is_empty() {
            result.push(replacement_path.with_key("value"), MISSING);
        }
    }
}

fn validate_success_entries(
    entries: &[SuccessActionOrReusable],
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    for (index, entry) in entries.iter().enumerate() {
        let entry_path = path.with_index(index);
        match entry {
            SuccessActionOrReusable::SuccessAction(action) => {
                validate_success_action(action, &entry_path, result)
            }
            SuccessActionOrReusable::Reusable(reusable) => {
                validate_reusable(reusable, &entry_path, result)
            }
        }
    }
}

fn validate_failure_entries(
    entries: &[FailureActionOrReusable],
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    for (index, entry) in entries.iter().enumerate() {
        let entry_path = path.with_index(index);
        match entry {
            FailureActionOrReusable::FailureAction(action) => {
                validate_failure_action(action, &entry_path, result)
            }
            FailureActionOrReusable::Reusable(reusable) => {
                validate_reusable(reusable, &entry_path, result)
            }
        }
    }
}

fn check_output_names(outputs: &BTreeMap<String, String>, path: &FieldPath, result: &mut ValidationResult) {
    for key in outputs.keys() {
        if !name_pattern().is_match(key) {
            result.push(
                path.with_key(key.as_str()),
                format!("output name must match pattern ^[a-zA-Z0-9\\.\\-_]+$; got {key}"),
            );
        }
    }
}
