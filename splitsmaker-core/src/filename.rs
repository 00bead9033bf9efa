//! Default `.lss` filenames.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::RunConfig;

/// Extension of exported splits files, without the dot
pub const LSS_EXTENSION: &str = "lss";

/// Variables that lead the filename, in this order
const PREFERRED_VARIABLES: [&str; 2] = ["Game Mode", "Run Type"];

static ILLEGAL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>:"/\\|?*]"#).expect("ILLEGAL_CHARS is a valid regex pattern")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN is a valid regex pattern"));

static LSS_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.lss$").expect("LSS_SUFFIX is a valid regex pattern"));

/// Replaces characters illegal in filenames with spaces and collapses
/// whitespace
#[must_use]
pub fn sanitize_filename_part(raw: &str) -> String {
    let replaced = ILLEGAL_CHARS.replace_all(raw, " ");
    WHITESPACE_RUN.replace_all(&replaced, " ").trim().to_string()
}

fn strip_lss_suffix(name: &str) -> &str {
    LSS_SUFFIX.find(name).map_or(name, |suffix| &name[..suffix.start()])
}

/// Builds `"{game} - {category} {variables...}.lss"`.
///
/// `Game Mode` and `Run Type` values come first, then the remaining
/// variables in stored order. Blank values are skipped; with nothing left
/// the middle part is `Splits`.
#[must_use]
pub fn build_suggested_filename(config: &RunConfig) -> String {
    let variables = &config.metadata.variables;
    let preferred = PREFERRED_VARIABLES
        .into_iter()
        .filter_map(|key| variables.get(key))
        .filter(|value| !value.is_empty());
    let remaining = variables
        .iter()
        .filter(|(key, _)| !PREFERRED_VARIABLES.contains(&key.as_str()))
        .map(|(_, value)| value);

    let middle = std::iter::once(&config.metadata.category_name)
        .chain(preferred)
        .chain(remaining)
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let middle = if middle.is_empty() { "Splits" } else { middle.as_str() };

    let name = sanitize_filename_part(&format!("{} - {middle}", config.metadata.game_name));
    format!("{name}.{LSS_EXTENSION}")
}

/// Resolves a user-supplied filename against the suggested one.
///
/// Blank input, or input that sanitizes to nothing, yields the fallback.
/// The `.lss` extension is always present exactly once.
#[must_use]
pub fn resolve_lss_filename(custom: Option<&str>, fallback: &str) -> String {
    let fallback_base = strip_lss_suffix(fallback);
    let raw = custom.map(str::trim).unwrap_or_default();
    let candidate = if raw.is_empty() { fallback_base } else { raw };
    let safe = sanitize_filename_part(strip_lss_suffix(candidate));
    let base = if safe.is_empty() { fallback_base } else { safe.as_str() };
    format!("{base}.{LSS_EXTENSION}")
}
