use super::actions::{FailureActionOrReusable, SuccessActionOrReusable};
use super::criterion::Criterion;
use super::parameter::{Parameter, ParameterOrReusable};
use super::request_body::RequestBody;
use super::reusable::ReusableObject;
use arazzo_core::Extensions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub step_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// Entries may be full parameters, reusable references, or bare values
    /// (for example a parameter name) left for tooling to resolve.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_success: Vec<SuccessActionOrReusable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_failure: Vec<FailureActionOrReusable>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,
    #[serde(flatten, default)]
    pub extensions: Extensions,
}

/// One entry of [`Step::parameters`], classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum StepParameter<'a> {
    Parameter(Parameter),
    Reusable(ReusableObject),
    Opaque(&'a Value),
}

impl Step {
    pub fn new(step_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            ..Self::default()
        }
    }

    pub fn is_operation_step(&self) -> bool {
        is_set(&self.operation_id) || is_set(&self.operation_path)
    }

    pub fn is_workflow_step(&self) -> bool {
        is_set(&self.workflow_id)
    }

    pub fn push_parameter(&mut self, parameter: ParameterOrReusable) -> Result<(), serde_json::Error> {
        self.parameters.push(serde_json::to_value(parameter)?);
        Ok(())
    }

    pub fn parameter_entries(&self) -> Vec<StepParameter<'_>> {
        self.parameters.iter().map(classify_parameter).collect()
    }
}

fn classify_parameter(value: &Value) -> StepParameter<'_> {
    let Some(object) = value.as_object() else {
        return StepParameter::Opaque(value);
    };
    if object.contains_key("reference") {
        if let Ok(reusable) = serde_json::from_value::<ReusableObject>(value.clone()) {
            return StepParameter::Reusable(reusable);
        }
    } else if object.contains_key("name") {
        if let Ok(parameter) = serde_json::from_value::<Parameter>(value.clone()) {
            return StepParameter::Parameter(parameter);
        }
    }
    StepParameter::Opaque(value)
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.is_empty())
}

#[cfg(test)]
#[path = "step_test.rs"]
mod tests;
