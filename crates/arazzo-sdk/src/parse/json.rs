use super::DecodeError;
use crate::documents::ArazzoDocument;

pub fn decode_json(input: &str) -> Result<ArazzoDocument, DecodeError> {
    Ok(serde_json::from_str::<ArazzoDocument>(input)?)
}
