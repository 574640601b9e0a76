use crate::ast::Expression;
use crate::numeric::Decimal;
use serde_json::{Map, Number, Value};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("variables are not allowed here: {0}")]
    Traversal(String),
    #[error("template interpolation is not supported: \"{0}\"")]
    Template(String),
    #[error("function calls are not supported: {0}()")]
    FunctionCall(String),
}

/// Evaluates a literal expression into a JSON value.
pub fn expression_to_value(expr: &Expression) -> Result<Value, EvalError> {
    match expr {
        Expression::Null => Ok(Value::Null),
        Expression::Bool(value) => Ok(Value::Bool(*value)),
        Expression::Number(value) => Ok(decimal_to_value(value)),
        Expression::String(value) => Ok(Value::String(value.clone())),
        Expression::Template(raw) => Err(EvalError::Template(raw.clone())),
        Expression::Traversal(parts) => Err(EvalError::Traversal(parts.join("."))),
        Expression::FunctionCall { name, .. } => Err(EvalError::FunctionCall(name.clone())),
        Expression::Array(items) => items
            .iter()
            .map(expression_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Expression::Object(entries) => {
            let mut out = Map::new();
            for (key, value) in entries {
                out.insert(key.clone(), expression_to_value(value)?);
            }
            Ok(Value::Object(out))
        }
    }
}

pub fn value_to_expression(value: &Value) -> Expression {
    match value {
        Value::Null => Expression::Null,
        Value::Bool(value) => Expression::Bool(*value),
        Value::Number(number) => match number_to_decimal(number) {
            Some(decimal) => Expression::Number(decimal),
            None => Expression::String(number.to_string()),
        },
        Value::String(value) => Expression::String(value.clone()),
        Value::Array(items) => Expression::Array(items.iter().map(value_to_expression).collect()),
        Value::Object(entries) => Expression::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), value_to_expression(value)))
                .collect(),
        ),
    }
}

/// Integral numbers that fit 64 bits become JSON integers, fractional numbers
/// become `f64`. Wider integers become `f64` only when the float holds them
/// exactly. Anything else is kept exactly as a decimal string.
pub fn decimal_to_value(decimal: &Decimal) -> Value {
    if decimal.is_integer() {
        if let Some(value) = decimal.to_i64() {
            return Value::from(value);
        }
        if let Some(value) = decimal.to_u64() {
            return Value::from(value);
        }
        return match exact_f64(decimal).and_then(Number::from_f64) {
            Some(number) => Value::Number(number),
            None => Value::String(decimal.to_string()),
        };
    }
    match decimal.to_f64().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(decimal.to_string()),
    }
}

pub fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(value) = number.as_i64() {
        return Some(Decimal::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(Decimal::from(value));
    }
    let value = number.as_f64()?;
    Decimal::parse(&value.to_string()).ok()
}

fn exact_f64(decimal: &Decimal) -> Option<f64> {
    let value = decimal.to_f64()?;
    let back = Decimal::parse(&value.to_string()).ok()?;
    (back == *decimal).then_some(value)
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
