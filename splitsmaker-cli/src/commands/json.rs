//! JSON export command.

use std::path::Path;

use crate::error::CliError;
use crate::util::{Context, log_warnings, read_config, render_json, write_output};

/// Export-json command handler
pub fn cmd_export_json(
    context: &Context,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), CliError> {
    let imported = read_config(input, context)?;
    log_warnings(&imported);
    let json = render_json(&imported.config, compact, context)?;
    write_output(output, &json)
}
