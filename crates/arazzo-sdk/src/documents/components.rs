use super::actions::{FailureAction, SuccessAction};
use super::parameter::Parameter;
use arazzo_core::Extensions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub success_actions: BTreeMap<String, SuccessAction>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failure_actions: BTreeMap<String, FailureAction>,
    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
            && self.parameters.is_empty()
            && self.success_actions.is_empty()
            && self.failure_actions.is_empty()
            && self.extensions.is_empty()
    }
}
