use super::actions::{validate_failure_action, validate_parameter, validate_success_action};
use super::workflow::validate_workflow;
use super::{name_pattern, source_name_pattern, version_pattern, MISSING, MISSING_OR_EMPTY};
use crate::documents::{ArazzoDocument, Components, Info, SourceDescription};
use arazzo_core::{FieldPath, ValidationResult};
use std::collections::HashSet;

pub(super) fn validate_root(document: &ArazzoDocument, result: &mut ValidationResult) {
    let root = FieldPath::root();

    let version_path = root.with_key("arazzo");
    if document.arazzo.is_empty() {
        result.push(version_path, MISSING);
    } else if !version_pattern().is_match(&document.arazzo) {
        result.push(
            version_path,
            format!(
                "must match pattern ^1\\.0\\.\\d+(-.+)?$; got {}",
                document.arazzo
            ),
        );
    }

    match &document.info {
        Some(info) => validate_info(info, &root.with_key("info"), result),
        None => result.push(root.with_key("info"), MISSING),
    }

    let sources_path = root.with_key("sourceDescriptions");
    if document.source_descriptions.is_empty() {
        result.push(sources_path, MISSING_OR_EMPTY);
    } else {
        let mut names = HashSet::new();
        for (index, source) in document.source_descriptions.iter().enumerate() {
            let path = sources_path.with_index(index);
            validate_source_description(source, &path, result);
            if !source.name.is_empty() && !names.insert(source.name.as_str()) {
                result.push(
                    path.with_key("name"),
                    format!("duplicate source description name: {}", source.name),
                );
            }
        }
    }

    let workflows_path = root.with_key("workflows");
    if document.workflows.is_empty() {
        result.push(workflows_path, MISSING_OR_EMPTY);
    } else {
        let mut ids = HashSet::new();
        for (index, workflow) in document.workflows.iter().enumerate() {
            let path = workflows_path.with_index(index);
            validate_workflow(workflow, &path, result);
            if !workflow.workflow_id.is_empty() && !ids.insert(workflow.workflow_id.as_str()) {
                result.push(
                    path.with_key("workflowId"),
                    format!("duplicate workflowId: {}", workflow.workflow_id),
                );
            }
        }
    }

    if let Some(components) = &document.components {
        validate_components(components, &root.with_key("components"), result);
    }
}

fn validate_info(info: &Info, path: &FieldPath, result: &mut ValidationResult) {
    if info.title.is_empty() {
        result.push(path.with_key("title"), MISSING);
    }
    if info.version.is_empty() {
        result.push(path.with_key("version"), MISSING);
    }
}

fn validate_source_description(
    source: &SourceDescription,
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    if source.name.is_empty() {
        result.push(path.with_key("name"), MISSING);
    } else if !source_name_pattern().is_match(&source.name) {
        result.push(
            path.with_key("name"),
            format!("must match pattern ^[A-Za-z0-9_\\-]+$; got {}", source.name),
        );
    }

    if source.url.is_empty() {
        result.push(path.with_key("url"), MISSING);
    }

    if let Some(kind) = &source.kind {
        if !kind.as_str().is_empty() && !kind.is_known() {
            result.push(
                path.with_key("type"),
                format!("must be 'arazzo' or 'openapi'; got {kind}"),
            );
        }
    }
}

fn validate_components(components: &Components, path: &FieldPath, result: &mut ValidationResult) {
    let inputs_path = path.with_key("inputs");
    for name in components.inputs.keys() {
        check_component_name(name, &inputs_path, result);
    }

    let parameters_path = path.with_key("parameters");
    for (name, parameter) in &components.parameters {
        check_component_name(name, &parameters_path, result);
        validate_parameter(parameter, &parameters_path.with_key(name.as_str()), result);
    }

    let success_path = path.with_key("successActions");
    for (name, action) in &components.success_actions {
        check_component_name(name, &success_path, result);
        validate_success_action(action, &success_path.with_key(name.as_str()), result);
    }

    let failure_path = path.with_key("failureActions");
    for (name, action) in &components.failure_actions {
        check_component_name(name, &failure_path, result);
        validate_failure_action(action, &failure_path.with_key(name.as_str()), result);
    }
}

fn check_component_name(name: &str, map_path: &FieldPath, result: &mut ValidationResult) {
    if !name_pattern().is_match(name) {
        result.push(
            map_path.with_key(name),
            format!("component name must match pattern ^[a-zA-Z0-9\\.\\-_]+$; got {name}"),
        );
    }
}
