//! Filename suggestion command.

use std::path::Path;

use splitsmaker_core::io;

use crate::error::CliError;
use crate::util::{Context, read_config};

/// Filename command handler
pub fn cmd_filename(context: &Context, input: &Path, name: Option<&str>) -> Result<(), CliError> {
    let imported = read_config(input, context)?;
    let suggested = io::build_suggested_filename(&imported.config);
    println!("{}", io::resolve_lss_filename(name, &suggested));
    Ok(())
}
