//! LiveSplit `.lss` document codec.
//!
//! [`write_document`] produces the splits file LiveSplit and the Subnautica
//! autosplitter read. [`read_document`] reverses it on a best-effort basis,
//! recording anything it had to guess as an [`ImportWarning`].
//!
//! [`ImportWarning`]: crate::models::ImportWarning

mod export;
mod icon;
mod import;

pub use export::{split_name, split_value, write_document};
pub use icon::{
    IconPreview, detect_icon_mime, extract_embedded_png, repair_icon_payload,
    resolve_icon_preview,
};
pub use import::read_document;

/// XML text of a true flag
pub const TRUE_TEXT: &str = "True";

/// XML text of a false flag
pub const FALSE_TEXT: &str = "False";

/// `version` attribute written on the `Run` root
pub const LIVESPLIT_VERSION: &str = "1.7.0";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
