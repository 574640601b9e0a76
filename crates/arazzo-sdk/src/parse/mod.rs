mod hcl;
mod json;
mod yaml;

use crate::bridge::BridgeOptions;
use crate::documents::ArazzoDocument;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub use hcl::BlockDecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Auto,
    Json,
    Yaml,
    Hcl,
}

impl DocumentFormat {
    /// Picks a format from a file extension; unknown extensions yield `None`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "hcl" => Some(Self::Hcl),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Hcl => "hcl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub format: DocumentFormat,
    pub bridge: BridgeOptions,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Auto,
            bridge: BridgeOptions::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("json decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml decode failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("block syntax parse failed: {0}")]
    Syntax(#[from] arazzo_hcl::ParseError),
    #[error(transparent)]
    Block(#[from] BlockDecodeError),
}

pub fn decode_document(input: &str, format: DocumentFormat) -> Result<ArazzoDocument, DecodeError> {
    decode_document_with_options(
        input,
        &DecodeOptions {
            format,
            ..DecodeOptions::default()
        },
    )
}

pub fn decode_document_with_options(
    input: &str,
    options: &DecodeOptions,
) -> Result<ArazzoDocument, DecodeError> {
    let format = match options.format {
        DocumentFormat::Auto => detect_format(input),
        other => other,
    };
    tracing::debug!(format = format.as_str(), bytes = input.len(), "decoding arazzo document");

    let decoded = match format {
        DocumentFormat::Hcl => hcl::decode_hcl(input, &options.bridge),
        DocumentFormat::Yaml => yaml::decode_yaml(input),
        DocumentFormat::Json | DocumentFormat::Auto => json::decode_json(input),
    };
    if let Err(err) = &decoded {
        tracing::debug!(format = format.as_str(), error = %err, "decode failed");
    }
    decoded
}

fn detect_format(input: &str) -> DocumentFormat {
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return DocumentFormat::Json;
    }
    let first_statement = trimmed.lines().map(str::trim).find(|line| {
        !line.is_empty() && !line.starts_with('#') && !line.starts_with("//")
    });
    match first_statement {
        Some(line) if block_statement_pattern().is_match(line) => DocumentFormat::Hcl,
        _ => DocumentFormat::Yaml,
    }
}

fn block_statement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^[A-Za-z_][A-Za-z0-9_\-]*\s*(=|\{|"[^"]*"\s*\{)"#).expect("valid regex")
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
