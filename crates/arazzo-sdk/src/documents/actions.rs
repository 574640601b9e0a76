use super::criterion::Criterion;
use super::enums::{FailureActionType, SuccessActionType};
use super::reusable::one_of_reusable;
use arazzo_core::Extensions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAction {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SuccessActionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl SuccessAction {
    pub fn end(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(SuccessActionType::End),
            ..Self::default()
        }
    }

    pub fn goto_step(name: impl Into<String>, step_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(SuccessActionType::Goto),
            step_id: Some(step_id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureAction {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureActionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    /// Seconds to wait before retrying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl FailureAction {
    pub fn retry(name: impl Into<String>, retry_after: f64, retry_limit: i64) -> Self {
        Self {
            name: name.into(),
            kind: Some(FailureActionType::Retry),
            retry_after: Some(retry_after),
            retry_limit: Some(retry_limit),
            ..Self::default()
        }
    }
}

one_of_reusable!(SuccessActionOrReusable, SuccessAction(SuccessAction));
one_of_reusable!(FailureActionOrReusable, FailureAction(FailureAction));
