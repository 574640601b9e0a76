use arazzo_hcl::{expression_to_value, is_identifier, value_to_expression, Block, Body, EvalError, Structure};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaBlockError {
    #[error("attribute \"{key}\": {source}")]
    Eval { key: String, source: EvalError },
    #[error("block \"{0}\" must not have labels")]
    UnexpectedLabels(String),
    #[error("\"{0}\" is defined more than once")]
    Duplicate(String),
}

/// True for non-empty objects whose keys can all be written as attribute or
/// block names.
pub fn value_fits_blocks(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| !object.is_empty() && object.keys().all(|key| is_identifier(key)))
}

/// Writes an object as a body: nested objects that fit become blocks,
/// everything else becomes an attribute.
pub fn value_to_body(object: &Map<String, Value>) -> Body {
    let mut body = Body::new();
    for (key, value) in object {
        match value {
            Value::Object(nested) if value_fits_blocks(value) => {
                body.push_block(Block::new(key.clone(), Vec::new(), value_to_body(nested)));
            }
            _ => body.push_attribute(key.clone(), value_to_expression(value)),
        }
    }
    body
}

pub fn body_to_value(body: &Body) -> Result<Value, SchemaBlockError> {
    let mut out = Map::new();
    for structure in &body.structures {
        let (key, value) = match structure {
            Structure::Attribute(attribute) => {
                let value = expression_to_value(&attribute.expr).map_err(|source| {
                    SchemaBlockError::Eval {
                        key: attribute.key.clone(),
                        source,
                    }
                })?;
                (attribute.key.clone(), value)
            }
            Structure::Block(block) => {
                if !block.labels.is_empty() {
                    return Err(SchemaBlockError::UnexpectedLabels(block.identifier.clone()));
                }
                (block.identifier.clone(), body_to_value(&block.body)?)
            }
        };
        if out.contains_key(&key) {
            return Err(SchemaBlockError::Duplicate(key));
        }
        out.insert(key, value);
    }
    Ok(Value::Object(out))
}

#[cfg(test)]
#[path = "schema_blocks_test.rs"]
mod tests;
