use super::{is_blank, MISSING};
use crate::documents::{
    Criterion, CriterionExpressionType, CriterionKind, CriterionType, FailureAction,
    FailureActionType, Parameter, ReusableObject, SuccessAction, SuccessActionType,
    JSONPATH_VERSION, XPATH_VERSIONS,
};
use arazzo_core::{FieldPath, ValidationResult};

pub(super) fn validate_success_action(
    action: &SuccessAction,
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    if action.name.is_empty() {
        result.push(path.with_key("name"), MISSING);
    }
    let kind = action.kind.as_ref().filter(|kind| !kind.as_str().is_empty());
    match kind {
        None => result.push(path.with_key("type"), MISSING),
        Some(kind) if !kind.is_known() => result.push(
            path.with_key("type"),
            format!("must be 'end' or 'goto'; got {kind}"),
        ),
        Some(_) => {}
    }
    if kind == Some(&SuccessActionType::Goto) {
        check_goto_target(action.workflow_id.as_deref(), action.step_id.as_deref(), path, result);
    }
    validate_criteria(&action.criteria, path, result);
}

pub(super) fn validate_failure_action(
    action: &FailureAction,
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    if action.name.is_empty() {
        result.push(path.with_key("name"), MISSING);
    }
    let kind = action.kind.as_ref().filter(|kind| !kind.as_str().is_empty());
    match kind {
        None => result.push(path.with_key("type"), MISSING),
        Some(kind) if !kind.is_known() => result.push(
            path.with_key("type"),
            format!("must be 'end', 'goto', or 'retry'; got {kind}"),
        ),
        Some(_) => {}
    }
    if kind == Some(&FailureActionType::Goto) {
        check_goto_target(action.workflow_id.as_deref(), action.step_id.as_deref(), path, result);
    }
    if action.retry_after.is_some_and(|delay| delay < 0.0) {
        result.push(path.with_key("retryAfter"), "must be non-negative");
    }
    if action.retry_limit.is_some_and(|limit| limit < 0) {
        result.push(path.with_key("retryLimit"), "must be non-negative");
    }
    validate_criteria(&action.criteria, path, result);
}

fn check_goto_target(
    workflow_id: Option<&str>,
    step_id: Option<&str>,
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    match (is_blank(workflow_id), is_blank(step_id)) {
        (true, true) => result.push(path.clone(), "goto action requires either workflowId or stepId"),
        (false, false) => {
            result.push(path.clone(), "goto action cannot have both workflowId and stepId")
        }
        _ => {}
    }
}

fn validate_criteria(criteria: &[Criterion], action_path: &FieldPath, result: &mut ValidationResult) {
    let criteria_path = action_path.with_key("criteria");
    for (index, criterion) in criteria.iter().enumerate() {
        validate_criterion(criterion, &criteria_path.with_index(index), result);
    }
}

pub(super) fn validate_criterion(criterion: &Criterion, path: &FieldPath, result: &mut ValidationResult) {
    if criterion.condition.is_empty() {
        result.push(path.with_key("condition"), MISSING);
    }

    let kind = criterion
        .criterion_type()
        .filter(|kind| !kind.as_str().is_empty());
    if let Some(kind) = kind {
        if is_blank(criterion.context.as_deref()) {
            result.push(path.with_key("context"), "required when type is specified");
        }
        if !kind.is_known() {
            result.push(
                path.with_key("type"),
                format!("must be one of: simple, regex, jsonpath, xpath; got {kind}"),
            );
        }
    }

    if let Some(CriterionKind::Expression(expression)) = &criterion.kind {
        validate_expression_type(expression, path, result);
    }
}

/// Expression types report against the criterion's own `type` and `version`
/// fields.
fn validate_expression_type(
    expression: &CriterionExpressionType,
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    let type_path = path.with_key("type");
    match &expression.kind {
        kind if kind.as_str().is_empty() => result.push(type_path, MISSING),
        CriterionType::JsonPath | CriterionType::XPath => {}
        other => result.push(
            type_path,
            format!("must be 'jsonpath' or 'xpath' for expression type; got {other}"),
        ),
    }

    let version_path = path.with_key("version");
    let version = expression.version.as_str();
    if version.is_empty() {
        result.push(version_path, MISSING);
        return;
    }
    match expression.kind {
        CriterionType::JsonPath if version != JSONPATH_VERSION => result.push(
            version_path,
            format!("for jsonpath type, must be '{JSONPATH_VERSION}'; got {version}"),
        ),
        CriterionType::XPath if !XPATH_VERSIONS.contains(&version) => result.push(
            version_path,
            format!(
                "for xpath type, must be one of: {}; got {version}",
                XPATH_VERSIONS.join(", ")
            ),
        ),
        _ => {}
    }
}

pub(super) fn validate_parameter(parameter: &Parameter, path: &FieldPath, result: &mut ValidationResult) {
    if parameter.name.is_empty() {
        result.push(path.with_key("name"), MISSING);
    }
    if parameter.value.is_none() {
        result.push(path.with_key("value"), MISSING);
    }
    if let Some(location) = &parameter.location {
        if !location.as_str().is_empty() && !location.is_known() {
            result.push(
                path.with_key("in"),
                format!("must be one of: path, query, header, cookie; got {location}"),
            );
        }
    }
}

pub(super) fn validate_reusable(reusable: &ReusableObject, path: &FieldPath, result: &mut ValidationResult) {
    if reusable.reference.is_empty() {
        result.push(path.with_key("reference"), MISSING);
    }
}
