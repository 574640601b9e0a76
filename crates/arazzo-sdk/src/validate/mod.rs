//! Structural validation of a decoded document.
//!
//! Every rule is checked on every node; nothing short-circuits. Errors come
//! back in traversal order with the path of the offending field.

mod actions;
mod document;
mod workflow;

use crate::documents::ArazzoDocument;
use arazzo_core::ValidationResult;
use regex::Regex;
use std::sync::OnceLock;

pub(crate) const MISSING: &str = "required field is missing";
pub(crate) const MISSING_OR_EMPTY: &str = "required field is missing or empty (minItems: 1)";

pub fn validate_document(document: &ArazzoDocument) -> ValidationResult {
    let mut result = ValidationResult::new();
    document::validate_root(document, &mut result);
    tracing::debug!(errors = result.len(), "validated arazzo document");
    result
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^1\.0\.\d+(-.+)?$").expect("valid regex"))
}

fn source_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid regex"))
}

/// Shared by component keys and output names.
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9\.\-_]+$").expect("valid regex"))
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
