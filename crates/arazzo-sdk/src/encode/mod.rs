mod hcl;

use crate::bridge::BridgeOptions;
use crate::documents::ArazzoDocument;
use crate::parse::DocumentFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// `Auto` encodes JSON.
    pub format: DocumentFormat,
    /// Indented JSON output. Other formats are always multi-line.
    pub pretty: bool,
    pub bridge: BridgeOptions,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Auto,
            pretty: false,
            bridge: BridgeOptions::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml encode failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} is not a finite number")]
    NonFiniteNumber { field: String },
}

pub fn encode_document(document: &ArazzoDocument, format: DocumentFormat) -> Result<String, EncodeError> {
    encode_document_with_options(
        document,
        &EncodeOptions {
            format,
            ..EncodeOptions::default()
        },
    )
}

pub fn encode_document_with_options(
    document: &ArazzoDocument,
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    tracing::debug!(
        format = options.format.as_str(),
        workflows = document.workflows.len(),
        "encoding arazzo document"
    );
    let encoded = match options.format {
        DocumentFormat::Hcl => hcl::encode_hcl(document, &options.bridge)?,
        DocumentFormat::Yaml => serde_yaml::to_string(document)?,
        DocumentFormat::Json | DocumentFormat::Auto if options.pretty => {
            serde_json::to_string_pretty(document)?
        }
        DocumentFormat::Json | DocumentFormat::Auto => serde_json::to_string(document)?,
    };
    tracing::debug!(bytes = encoded.len(), "encoded arazzo document");
    Ok(encoded)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
