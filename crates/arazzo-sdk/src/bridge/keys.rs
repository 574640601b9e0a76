use super::BridgeOptions;
use serde_json::{Map, Value};

pub const SCHEMA_KEY_PREFIX: char = '$';
pub const BLOCK_KEY_PREFIX: char = '_';

/// Rewrites every `$`-prefixed map key, at any depth, to start with `_`.
pub fn to_block_keys(value: &Value) -> Value {
    transform_keys(value, &|key| match key.strip_prefix(SCHEMA_KEY_PREFIX) {
        Some(rest) => format!("{BLOCK_KEY_PREFIX}{rest}"),
        None => key.to_string(),
    })
}

/// Restores the `$` prefix on keys listed in `options.meta_keywords`. Other
/// `_`-prefixed keys are left alone.
pub fn from_block_keys(value: &Value, options: &BridgeOptions) -> Value {
    transform_keys(value, &|key| {
        options
            .restores(key)
            .unwrap_or_else(|| key.to_string())
    })
}

/// `$`-prefixed keys, at any depth, that `from_block_keys` would not restore
/// after `to_block_keys`.
pub fn unrestorable_keys(value: &Value, options: &BridgeOptions) -> Vec<String> {
    let mut found = Vec::new();
    collect_unrestorable(value, options, &mut found);
    found
}

fn collect_unrestorable(value: &Value, options: &BridgeOptions, found: &mut Vec<String>) {
    match value {
        Value::Object(entries) => {
            for (key, nested) in entries {
                if key.starts_with(SCHEMA_KEY_PREFIX)
                    && !options.meta_keywords.iter().any(|keyword| keyword == key)
                    && !found.contains(key)
                {
                    found.push(key.clone());
                }
                collect_unrestorable(nested, options, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_unrestorable(item, options, found);
            }
        }
        _ => {}
    }
}

fn transform_keys(value: &Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(entries) => {
            let mut out = Map::new();
            for (key, nested) in entries {
                out.insert(rename(key), transform_keys(nested, rename));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| transform_keys(item, rename))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
#[path = "keys_test.rs"]
mod tests;
