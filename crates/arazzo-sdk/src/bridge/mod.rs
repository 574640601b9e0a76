//! Translation between JSON-shaped values and the block syntax.

mod keys;
mod schema_blocks;

pub use keys::{
    from_block_keys, to_block_keys, unrestorable_keys, BLOCK_KEY_PREFIX, SCHEMA_KEY_PREFIX,
};
pub use schema_blocks::{body_to_value, value_fits_blocks, value_to_body, SchemaBlockError};

/// JSON Schema keywords restored from their `_`-prefixed block form when
/// reading the block syntax.
pub const DEFAULT_META_KEYWORDS: [&str; 9] = [
    "$ref",
    "$id",
    "$schema",
    "$defs",
    "$comment",
    "$vocabulary",
    "$anchor",
    "$dynamicRef",
    "$dynamicAnchor",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    pub meta_keywords: Vec<String>,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            meta_keywords: DEFAULT_META_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
        }
    }
}

impl BridgeOptions {
    pub fn with_meta_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.meta_keywords.push(keyword.into());
        self
    }

    pub(crate) fn restores(&self, block_key: &str) -> Option<String> {
        let rest = block_key.strip_prefix(BLOCK_KEY_PREFIX)?;
        let restored = format!("{SCHEMA_KEY_PREFIX}{rest}");
        self.meta_keywords
            .iter()
            .any(|keyword| *keyword == restored)
            .then_some(restored)
    }
}
