use super::DecodeError;
use crate::documents::ArazzoDocument;

/// YAML goes through a JSON value so both formats share one set of
/// deserializers.
pub fn decode_yaml(input: &str) -> Result<ArazzoDocument, DecodeError> {
    let yaml_value: serde_yaml::Value = serde_yaml::from_str(input)?;
    let value = serde_json::to_value(yaml_value)?;
    Ok(serde_json::from_value::<ArazzoDocument>(value)?)
}
