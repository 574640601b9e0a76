use super::enums::ParameterLocation;
use super::reusable::{deserialize_present, one_of_reusable};
use arazzo_core::Extensions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    /// `Some(Value::Null)` is an explicit `null`, `None` means the key is absent.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation, value: Value) -> Self {
        Self {
            name: name.into(),
            location: Some(location),
            value: Some(value),
            extensions: Extensions::new(),
        }
    }
}

one_of_reusable!(ParameterOrReusable, Parameter(Parameter));
