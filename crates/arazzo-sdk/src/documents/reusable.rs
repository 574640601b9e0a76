use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reference to a component, e.g. `$components.parameters.page`, with an
/// optional value override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReusableObject {
    #[serde(default)]
    pub reference: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

impl ReusableObject {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            value: None,
        }
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)`; an absent key stays `None`
/// through `#[serde(default)]`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub(crate) fn has_reference(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("reference"))
}

/// Declares a two-branch wrapper that decodes to the reusable branch when the
/// raw object carries a `reference` key.
macro_rules! one_of_reusable {
    ($(#[$meta:meta])* $name:ident, $variant:ident($concrete:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        #[serde(untagged)]
        pub enum $name {
            $variant($concrete),
            Reusable($crate::documents::ReusableObject),
        }

        impl $name {
            pub fn as_reusable(&self) -> Option<&$crate::documents::ReusableObject> {
                match self {
                    Self::Reusable(reusable) => Some(reusable),
                    Self::$variant(_) => None,
                }
            }
        }

        impl From<$concrete> for $name {
            fn from(value: $concrete) -> Self {
                Self::$variant(value)
            }
        }

        impl From<$crate::documents::ReusableObject> for $name {
            fn from(value: $crate::documents::ReusableObject) -> Self {
                Self::Reusable(value)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use serde::de::Error;
                let raw = serde_json::Value::deserialize(deserializer)?;
                if $crate::documents::reusable::has_reference(&raw) {
                    serde_json::from_value(raw)
                        .map(Self::Reusable)
                        .map_err(D::Error::custom)
                } else {
                    serde_json::from_value(raw)
                        .map(Self::$variant)
                        .map_err(D::Error::custom)
                }
            }
        }
    };
}

pub(crate) use one_of_reusable;

#[cfg(test)]
#[path = "reusable_test.rs"]
mod tests;
