//! Share links.
//!
//! A config travels in the URL fragment as `share=<token>`. Current tokens
//! are `v2:` followed by the lz-string compressed [`packed`] form; bare
//! tokens are the compressed JSON document older builds produced and are
//! decoded through migration.

mod link;
mod packed;

pub use link::{
    DEFAULT_BASE_URL, DEFAULT_MAX_URL_LENGTH, SHARE_PARAM, ShareLink, ShareOptions,
    build_share_url, canonical_base_url, clear_share_param, share_param_from_url,
};
pub use packed::SHARE_MARKER;

use serde_json::Value;

use crate::error::ShareError;
use crate::migration::migrate_config;
use crate::models::{ImportResult, RunConfig, SplitNode};
use crate::tracing::{field_names, span_names};
use crate::validate::check_config;

/// Prefix distinguishing packed tokens from legacy ones
pub const V2_PREFIX: &str = "v2:";

/// Share token format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareFormat {
    /// Compressed JSON document, read only
    Legacy,
    /// Compressed positional array behind `v2:`
    Packed,
}

impl ShareFormat {
    /// Detects the format of a token from its prefix
    #[must_use]
    pub fn of(token: &str) -> Self {
        if token.trim().starts_with(V2_PREFIX) {
            Self::Packed
        } else {
            Self::Legacy
        }
    }

    /// Returns a short name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Packed => "v2",
        }
    }
}

/// Encodes a config as a `v2` share token.
///
/// Icons are kept; see [`build_share_url`] for the size fallback.
///
/// # Errors
///
/// Returns `ShareError::Serialization` if the packed form cannot be
/// stringified.
pub fn encode_share_config(config: &RunConfig) -> Result<String, ShareError> {
    let _span = crate::trace_operation_debug!(span_names::SHARE_ENCODE).entered();

    let json = serde_json::to_string(&packed::pack(config))
        .map_err(|e| ShareError::Serialization(e.to_string()))?;
    let token = format!("{V2_PREFIX}{}", lz_str::compress_to_encoded_uri_component(json.as_str()));
    tracing::debug!(
        { field_names::SPLIT_COUNT } = config.splits.len(),
        token_length = token.len(),
        "Encoded share token"
    );
    Ok(token)
}

fn decompress(body: &str) -> Result<Value, ShareError> {
    let wide = lz_str::decompress_from_encoded_uri_component(body)
        .ok_or_else(|| ShareError::InvalidPayload("token does not decompress".to_string()))?;
    let json = String::from_utf16(&wide).map_err(|e| ShareError::InvalidPayload(e.to_string()))?;
    if json.is_empty() {
        return Err(ShareError::InvalidPayload("token is empty".to_string()));
    }
    serde_json::from_str(&json).map_err(|e| ShareError::InvalidPayload(e.to_string()))
}

/// Decodes a share token of either format into a validated config.
///
/// `v2` tokens decode without warnings; legacy tokens go through
/// [`migrate_config`] and carry whatever warnings it produced.
///
/// # Errors
///
/// Returns `ShareError::InvalidPayload` if the token does not decompress to
/// the expected shape, or `ShareError::Migration` if the decoded config is
/// of an unsupported version or fails validation.
pub fn decode_share_config(token: &str) -> Result<ImportResult, ShareError> {
    let token = token.trim();
    let format = ShareFormat::of(token);
    let _span = crate::trace_operation!(span_names::SHARE_DECODE, format = format.as_str()).entered();

    let result = match token.strip_prefix(V2_PREFIX) {
        Some(body) => {
            let config = packed::unpack(&decompress(body)?)?;
            ImportResult::clean(check_config(&config)?)
        }
        None => migrate_config(&decompress(token)?)?,
    };
    tracing::info!(
        { field_names::SPLIT_COUNT } = result.config.splits.len(),
        { field_names::WARNING_COUNT } = result.warnings.len(),
        "Decoded share token"
    );
    Ok(result)
}

/// Returns a copy of the config with every icon removed
#[must_use]
pub fn strip_icons(config: &RunConfig) -> RunConfig {
    fn strip(nodes: &[SplitNode]) -> Vec<SplitNode> {
        nodes
            .iter()
            .map(|node| SplitNode {
                icon_data: String::new(),
                conditions: strip(&node.conditions),
                ..node.clone()
            })
            .collect()
    }

    RunConfig {
        splits: strip(&config.splits),
        ..config.clone()
    }
}
