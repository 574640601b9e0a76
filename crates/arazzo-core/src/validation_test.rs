use super::ValidationResult;
use crate::FieldPath;

#[test]
fn empty_result_is_valid_with_empty_message() {
    let result = ValidationResult::new();
    assert!(result.is_valid());
    assert_eq!(result.message(), "");
}

#[test]
fn message_joins_every_error_in_order() {
    let mut result = ValidationResult::new();
    result.push(FieldPath::from("arazzo"), "required field is missing");
    result.push(
        FieldPath::from("workflows").with_index(0).with_key("steps"),
        "required field is missing or empty (minItems: 1)",
    );

    assert!(!result.is_valid());
    assert_eq!(result.len(), 2);
    assert_eq!(
        result.to_string(),
        "arazzo: required field is missing; workflows[0].steps: required field is missing or empty (minItems: 1)"
    );
}

#[test]
fn result_is_usable_as_error() {
    let mut result = ValidationResult::new();
    result.push(FieldPath::from("info"), "required field is missing");
    let boxed: Box<dyn std::error::Error> = Box::new(result);
    assert_eq!(boxed.to_string(), "info: required field is missing");
}
