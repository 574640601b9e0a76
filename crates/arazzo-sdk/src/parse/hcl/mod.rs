//! Block-syntax decoding.
//!
//! Every attribute and block is decoded independently. Failures are collected
//! with the enclosing block chain as a prefix and reported together, alongside
//! whatever part of the document did decode.

mod nodes;

use super::DecodeError;
use crate::bridge::{body_to_value, from_block_keys, BridgeOptions};
use crate::documents::{ArazzoDocument, Components, Info, SourceDescription, SourceDescriptionType};
use arazzo_core::{is_extension_key, Extensions};
use arazzo_hcl::{expression_to_value, parse_body, Attribute, Block, Body, Expression, Structure};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("block syntax decode failed: {}", .messages.join("; "))]
pub struct BlockDecodeError {
    pub messages: Vec<String>,
    /// Everything that decoded before and around the failures.
    pub document: Box<ArazzoDocument>,
}

pub(super) fn decode_hcl(input: &str, bridge: &BridgeOptions) -> Result<ArazzoDocument, DecodeError> {
    let body = parse_body(input)?;
    let mut decoder = Decoder::new(bridge);
    let document = decoder.document(&body);
    if decoder.messages.is_empty() {
        return Ok(document);
    }
    Err(BlockDecodeError {
        messages: decoder.messages,
        document: Box::new(document),
    }
    .into())
}

struct Decoder<'a> {
    bridge: &'a BridgeOptions,
    scopes: Vec<String>,
    messages: Vec<String>,
}

impl<'a> Decoder<'a> {
    fn new(bridge: &'a BridgeOptions) -> Self {
        Self {
            bridge,
            scopes: Vec::new(),
            messages: Vec::new(),
        }
    }

    fn document(&mut self, body: &Body) -> ArazzoDocument {
        let mut document = ArazzoDocument::default();
        for structure in &body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "arazzo" => {
                        if let Some(version) = self.string(attribute) {
                            document.arazzo = version;
                        }
                    }
                    _ => self.other_attribute(attribute, &mut document.extensions),
                },
                Structure::Block(block) => match block.identifier.as_str() {
                    "info" => {
                        let info = self.within(block, |decoder| decoder.info(block));
                        self.set_once(&mut document.info, info, block);
                    }
                    "sourceDescription" => {
                        let source = self.within(block, |decoder| decoder.source_description(block));
                        document.source_descriptions.push(source);
                    }
                    "workflow" => {
                        let workflow = self.within(block, |decoder| decoder.workflow(block));
                        document.workflows.push(workflow);
                    }
                    "components" => {
                        let components = self.within(block, |decoder| decoder.components(block));
                        self.set_once(&mut document.components, components, block);
                    }
                    _ => self.other_block(block),
                },
            }
        }
        document
    }

    fn info(&mut self, block: &Block) -> Info {
        self.no_labels(block);
        let mut info = Info::default();
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "title" => info.title = self.string(attribute).unwrap_or_default(),
                    "summary" => info.summary = self.string(attribute),
                    "description" => info.description = self.string(attribute),
                    "version" => info.version = self.string(attribute).unwrap_or_default(),
                    _ => self.other_attribute(attribute, &mut info.extensions),
                },
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        info
    }

    fn source_description(&mut self, block: &Block) -> SourceDescription {
        let mut source = SourceDescription {
            name: self.label(block),
            ..SourceDescription::default()
        };
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "url" => source.url = self.string(attribute).unwrap_or_default(),
                    "type" => {
                        source.kind = self.string(attribute).map(SourceDescriptionType::from);
                    }
                    _ => self.other_attribute(attribute, &mut source.extensions),
                },
                Structure::Block(nested) => self.other_block(nested),
            }
        }
        source
    }

    fn components(&mut self, block: &Block) -> Components {
        self.no_labels(block);
        let mut components = Components::default();
        for structure in &block.body.structures {
            match structure {
                Structure::Attribute(attribute) => match attribute.key.as_str() {
                    "inputs" => {
                        if let Some(inputs) = self.evaluate(attribute) {
                            self.component_inputs(&mut components, inputs);
                        }
                    }
                    _ => self.other_attribute(attribute, &mut components.extensions),
                },
                Structure::Block(nested) => match nested.identifier.as_str() {
                    "inputs" => {
                        if let Some(inputs) = self.schema_block(nested) {
                            self.component_inputs(&mut components, inputs);
                        }
                    }
                    "parameter" => {
                        let key = self.required_label(nested);
                        let parameter = self.within(nested, |decoder| decoder.parameter(nested));
                        self.insert_component(&mut components.parameters, key, parameter);
                    }
                    "successAction" => {
                        let key = self.required_label(nested);
                        let action = self.within(nested, |decoder| decoder.success_action(nested));
                        self.insert_component(&mut components.success_actions, key, action);
                    }
                    "failureAction" => {
                        let key = self.required_label(nested);
                        let action = self.within(nested, |decoder| decoder.failure_action(nested));
                        self.insert_component(&mut components.failure_actions, key, action);
                    }
                    _ => self.other_block(nested),
                },
            }
        }
        components
    }

    fn component_inputs(&mut self, components: &mut Components, inputs: Value) {
        match from_block_keys(&inputs, self.bridge) {
            Value::Object(entries) => {
                for (key, value) in entries {
                    self.insert_component(&mut components.inputs, Some(key), value);
                }
            }
            other => self.report(format!(
                "attribute \"inputs\": expected object, got {}",
                value_type(&other)
            )),
        }
    }

    fn insert_component<T>(&mut self, map: &mut BTreeMap<String, T>, key: Option<String>, value: T) {
        let Some(key) = key else {
            return;
        };
        if map.contains_key(&key) {
            self.report(format!("duplicate component \"{key}\""));
            return;
        }
        map.insert(key, value);
    }

    /// Decodes a schema-shaped value written either as nested blocks or as a
    /// single object attribute, with `_` keys restored.
    fn schema_block(&mut self, block: &Block) -> Option<Value> {
        self.no_labels(block);
        match body_to_value(&block.body) {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(format!("block \"{}\": {err}", block.identifier));
                None
            }
        }
    }

    fn report(&mut self, message: impl Display) {
        let message = if self.scopes.is_empty() {
            message.to_string()
        } else {
            format!("{}: {message}", self.scopes.join(" > "))
        };
        self.messages.push(message);
    }

    fn within<T>(&mut self, block: &Block, decode: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push(block_scope(block));
        let out = decode(self);
        self.scopes.pop();
        out
    }

    fn set_once<T>(&mut self, slot: &mut Option<T>, value: T, block: &Block) {
        if slot.is_some() {
            self.report(format!("duplicate block \"{}\"", block.identifier));
            return;
        }
        *slot = Some(value);
    }

    fn label(&mut self, block: &Block) -> String {
        if block.labels.len() > 1 {
            self.report(format!(
                "block \"{}\" takes at most one label, got {}",
                block.identifier,
                block.labels.len()
            ));
        }
        block.labels.first().cloned().unwrap_or_default()
    }

    fn required_label(&mut self, block: &Block) -> Option<String> {
        if block.labels.is_empty() {
            self.report(format!("block \"{}\" requires a label", block.identifier));
            return None;
        }
        Some(self.label(block))
    }

    fn no_labels(&mut self, block: &Block) {
        if !block.labels.is_empty() {
            self.report(format!("block \"{}\" does not take labels", block.identifier));
        }
    }

    fn evaluate(&mut self, attribute: &Attribute) -> Option<Value> {
        match expression_to_value(&attribute.expr) {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(format!("attribute \"{}\": {err}", attribute.key));
                None
            }
        }
    }

    fn mismatch(&mut self, attribute: &Attribute, expected: &str, found: &str) {
        self.report(format!(
            "attribute \"{}\": expected {expected}, got {found}",
            attribute.key
        ));
    }

    fn string(&mut self, attribute: &Attribute) -> Option<String> {
        match self.evaluate(attribute)? {
            Value::String(text) => Some(text),
            other => {
                self.mismatch(attribute, "string", value_type(&other));
                None
            }
        }
    }

    fn string_list(&mut self, attribute: &Attribute) -> Option<Vec<String>> {
        let value = self.evaluate(attribute)?;
        let strings = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        });
        if strings.is_none() {
            self.mismatch(attribute, "list of strings", value_type(&value));
        }
        strings
    }

    fn string_map(&mut self, attribute: &Attribute) -> Option<BTreeMap<String, String>> {
        let value = self.evaluate(attribute)?;
        let strings = value.as_object().and_then(|entries| {
            entries
                .iter()
                .map(|(key, item)| item.as_str().map(|text| (key.clone(), text.to_string())))
                .collect::<Option<BTreeMap<_, _>>>()
        });
        if strings.is_none() {
            self.mismatch(attribute, "map of strings", value_type(&value));
        }
        strings
    }

    fn float(&mut self, attribute: &Attribute) -> Option<f64> {
        match &attribute.expr {
            Expression::Number(number) => {
                let value = number.to_f64();
                if value.is_none() {
                    self.report(format!(
                        "attribute \"{}\": {number} is out of range",
                        attribute.key
                    ));
                }
                value
            }
            other => {
                self.mismatch(attribute, "number", other.type_name());
                None
            }
        }
    }

    fn integer(&mut self, attribute: &Attribute) -> Option<i64> {
        match &attribute.expr {
            Expression::Number(number) => match number.to_i64_exact() {
                Ok(value) => Some(value),
                Err(err) => {
                    self.report(format!("attribute \"{}\": {err}", attribute.key));
                    None
                }
            },
            other => {
                self.mismatch(attribute, "number", other.type_name());
                None
            }
        }
    }

    /// Handles attributes a node does not claim: `x-` extensions, the
    /// `extensions` object form, and unknown keys, which are ignored.
    fn other_attribute(&mut self, attribute: &Attribute, extensions: &mut Extensions) {
        if attribute.key == "extensions" {
            self.extension_object(attribute, extensions);
        } else if is_extension_key(&attribute.key) {
            match expression_to_value(&attribute.expr) {
                Ok(value) => self.extension(extensions, attribute.key.clone(), value),
                Err(err) => tracing::warn!(
                    key = %attribute.key,
                    error = %err,
                    "skipping extension value that cannot be evaluated"
                ),
            }
        } else {
            tracing::trace!(attribute = %attribute.key, scope = %self.scopes.join(" > "), "ignoring unknown attribute");
        }
    }

    fn extension_object(&mut self, attribute: &Attribute, extensions: &mut Extensions) {
        let Some(value) = self.evaluate(attribute) else {
            return;
        };
        match value {
            Value::Object(entries) => {
                for (key, value) in entries {
                    self.extension(extensions, key, value);
                }
            }
            other => self.mismatch(attribute, "object", value_type(&other)),
        }
    }

    fn extension(&mut self, extensions: &mut Extensions, key: String, value: Value) {
        if let Err(err) = extensions.insert(key, value) {
            self.report(err);
        }
    }

    fn other_block(&mut self, block: &Block) {
        tracing::trace!(block = %block.identifier, scope = %self.scopes.join(" > "), "ignoring unknown block");
    }
}

fn block_scope(block: &Block) -> String {
    let mut scope = block.identifier.clone();
    for label in &block.labels {
        scope.push_str(&format!(" \"{label}\""));
    }
    scope
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "tuple",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
