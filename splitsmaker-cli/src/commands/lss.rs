//! LiveSplit export and import commands.

use std::path::{Path, PathBuf};

use splitsmaker_core::io;

use crate::error::CliError;
use crate::util::{Context, log_warnings, read_config, render_json, report, write_output};

/// Export command handler
pub fn cmd_export_lss(
    context: &Context,
    input: &Path,
    output: Option<&Path>,
    name: Option<&str>,
) -> Result<(), CliError> {
    let imported = read_config(input, context)?;
    report(&imported, context);

    let xml = io::export_lss(&imported.config).map_err(|e| CliError::Export(e.to_string()))?;

    let target = output.map_or_else(
        || {
            let suggested = io::build_suggested_filename(&imported.config);
            let file_name = io::resolve_lss_filename(name, &suggested);
            input.parent().unwrap_or_else(|| Path::new("")).join(file_name)
        },
        PathBuf::from,
    );

    std::fs::write(&target, xml)?;
    context.say(&format!("Wrote {}", target.display()));
    Ok(())
}

/// Import command handler
pub fn cmd_import_lss(
    context: &Context,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(input)?;
    let imported = io::import_lss(&raw, &context.catalogs()?)
        .map_err(|e| CliError::Import(format!("{}: {e}", input.display())))?;

    let json = render_json(&imported.config, false, context)?;
    write_output(output, &json)?;
    // stdout carries the JSON when no output file is given
    if output.is_some() {
        report(&imported, context);
    } else {
        log_warnings(&imported);
    }
    Ok(())
}
