//! Share URL assembly and parsing.

use url::Url;
use url::form_urlencoded;

use crate::error::ShareError;
use crate::models::RunConfig;
use crate::tracing::field_names;

use super::{encode_share_config, strip_icons};

/// URL parameter carrying the token
pub const SHARE_PARAM: &str = "share";

/// Base URL used when no host page is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/SubnauticaSplitsMaker/";

/// Longest share URL produced before giving up
pub const DEFAULT_MAX_URL_LENGTH: usize = 8000;

/// Where share links point and how long they may get
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    /// Page the link opens; `index.html` is stripped
    pub base_url: String,
    /// Maximum length of the whole URL
    pub max_url_length: usize,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_url_length: DEFAULT_MAX_URL_LENGTH,
        }
    }
}

impl ShareOptions {
    /// Creates options for `base_url` with the default budget
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the URL length budget
    #[must_use]
    pub const fn with_max_url_length(mut self, max_url_length: usize) -> Self {
        self.max_url_length = max_url_length;
        self
    }
}

/// A built share link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Absolute URL with the token in its fragment
    pub url: String,
    /// The token alone
    pub token: String,
    /// True when icons were dropped to fit the budget
    pub icons_stripped: bool,
}

fn parse_url(raw: &str) -> Result<Url, ShareError> {
    Url::parse(raw.trim()).map_err(|e| ShareError::InvalidUrl(format!("{raw}: {e}")))
}

/// Normalizes a page URL into the base share links point at.
///
/// Query and fragment are dropped and a trailing `/index.html` (any case)
/// becomes `/`.
///
/// # Errors
///
/// Returns `ShareError::InvalidUrl` if `raw` is not an absolute URL.
pub fn canonical_base_url(raw: &str) -> Result<Url, ShareError> {
    const INDEX: &str = "index.html";

    let mut url = parse_url(raw)?;
    url.set_query(None);
    url.set_fragment(None);
    let path = url.path().to_string();
    if path.to_ascii_lowercase().ends_with("/index.html") {
        url.set_path(&path[..path.len() - INDEX.len()]);
    }
    Ok(url)
}

fn url_with_token(base: &Url, token: &str) -> String {
    let mut url = base.clone();
    url.set_fragment(Some(&format!("{SHARE_PARAM}={token}")));
    url.into()
}

/// Builds a share URL for `config`.
///
/// The full config is tried first; if the URL exceeds the budget, icons are
/// stripped and encoding retried once.
///
/// # Errors
///
/// Returns `ShareError::TooLarge` when even the icon-free URL is over
/// budget, and `ShareError::InvalidUrl` for a bad base URL.
pub fn build_share_url(config: &RunConfig, options: &ShareOptions) -> Result<ShareLink, ShareError> {
    let base = canonical_base_url(&options.base_url)?;
    let budget = options.max_url_length;

    let token = encode_share_config(config)?;
    let url = url_with_token(&base, &token);
    if url.len() <= budget {
        tracing::debug!({ field_names::URL_LENGTH } = url.len(), "Built share URL");
        return Ok(ShareLink {
            url,
            token,
            icons_stripped: false,
        });
    }

    let full_length = url.len();
    let token = encode_share_config(&strip_icons(config))?;
    let url = url_with_token(&base, &token);
    if url.len() > budget {
        tracing::warn!(
            { field_names::URL_LENGTH } = url.len(),
            budget,
            "Share URL over budget even without icons"
        );
        return Err(ShareError::TooLarge {
            length: url.len(),
            budget,
        });
    }

    tracing::info!(
        { field_names::URL_LENGTH } = url.len(),
        { field_names::ICONS_STRIPPED } = true,
        full_length,
        "Dropped icons to fit share URL budget"
    );
    Ok(ShareLink {
        url,
        token,
        icons_stripped: true,
    })
}

fn fragment_param(fragment: &str) -> Option<String> {
    // Tokens use `+` literally; keep form decoding from turning it into a space
    let escaped = fragment.replace('+', "%2B");
    form_urlencoded::parse(escaped.as_bytes())
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Reads the share token from a URL.
///
/// The fragment is checked first, then the query string older links used.
/// Returns `Ok(None)` when neither carries a non-empty token.
///
/// # Errors
///
/// Returns `ShareError::InvalidUrl` if `raw` is not an absolute URL.
pub fn share_param_from_url(raw: &str) -> Result<Option<String>, ShareError> {
    let url = parse_url(raw)?;
    let token = url
        .fragment()
        .and_then(fragment_param)
        .or_else(|| {
            url.query_pairs()
                .find(|(key, _)| key == SHARE_PARAM)
                .map(|(_, value)| value.into_owned())
        })
        .filter(|token| !token.trim().is_empty());
    Ok(token)
}

/// Removes the share parameter from both fragment and query.
///
/// Other fragment and query parameters are kept.
///
/// # Errors
///
/// Returns `ShareError::InvalidUrl` if `raw` is not an absolute URL.
pub fn clear_share_param(raw: &str) -> Result<String, ShareError> {
    let mut url = parse_url(raw)?;

    let fragment: Option<String> = url.fragment().map(|fragment| {
        fragment
            .split('&')
            .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some(SHARE_PARAM))
            .collect::<Vec<_>>()
            .join("&")
    });
    url.set_fragment(fragment.as_deref().filter(|rest| !rest.is_empty()));

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&kept);
    }

    Ok(url.into())
}
