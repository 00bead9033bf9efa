//! Icon payload inspection.
//!
//! Icons are stored as opaque text. Most are plain base64 images, but older
//! exports sometimes embedded a whole serialized document in the icon slot;
//! the PNG inside can be recovered by scanning for its signature.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PNG_TRAILER: &[u8] = b"IEND\xaeB\x60\x82";

/// Base64 prefixes of the image formats LiveSplit accepts
const MIME_PREFIXES: [(&str, &str); 5] = [
    ("iVBOR", "image/png"),
    ("/9j/", "image/jpeg"),
    ("R0lGOD", "image/gif"),
    ("Qk", "image/bmp"),
    ("PHN2Zy", "image/svg+xml"),
];

/// A displayable icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPreview {
    /// MIME type
    pub mime: &'static str,
    /// Whitespace-free base64 image data
    pub base64: String,
}

impl IconPreview {
    /// Returns a `data:` URL for the image
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Detects the image format from the leading base64 characters
#[must_use]
pub fn detect_icon_mime(base64: &str) -> Option<&'static str> {
    MIME_PREFIXES
        .iter()
        .find(|(prefix, _)| base64.starts_with(prefix))
        .map(|&(_, mime)| mime)
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

/// Extracts the first complete PNG embedded in a base64 payload and
/// re-encodes it
#[must_use]
pub fn extract_embedded_png(base64: &str) -> Option<String> {
    let bytes = STANDARD.decode(strip_whitespace(base64)).ok()?;
    let start = find(&bytes, PNG_SIGNATURE, 0)?;
    let trailer = find(&bytes, PNG_TRAILER, start)?;
    let end = trailer + PNG_TRAILER.len();
    Some(STANDARD.encode(&bytes[start..end]))
}

/// Resolves a displayable preview for an icon payload.
///
/// Known base64 image prefixes win; otherwise an embedded PNG is searched
/// for. Returns `None` when neither applies; the payload is still kept.
#[must_use]
pub fn resolve_icon_preview(icon: &str) -> Option<IconPreview> {
    let normalized = strip_whitespace(icon);
    if normalized.is_empty() {
        return None;
    }
    if let Some(mime) = detect_icon_mime(&normalized) {
        return Some(IconPreview {
            mime,
            base64: normalized,
        });
    }
    extract_embedded_png(&normalized).map(|base64| IconPreview {
        mime: "image/png",
        base64,
    })
}

/// Returns the clean PNG hidden in a corrupted icon payload.
///
/// Payloads that already start with a known image prefix, or that hold no
/// embedded PNG, yield `None` and should be stored unchanged.
#[must_use]
pub fn repair_icon_payload(icon: &str) -> Option<String> {
    let normalized = strip_whitespace(icon);
    if normalized.is_empty() || detect_icon_mime(&normalized).is_some() {
        return None;
    }
    extract_embedded_png(&normalized)
}
