//! Validate command.

use std::path::Path;

use crate::error::CliError;
use crate::util::{Context, read_config, report};

/// Validate command handler
///
/// Fatal problems fail the command; warnings are logged and counted.
pub fn cmd_validate(context: &Context, input: &Path) -> Result<(), CliError> {
    let imported = read_config(input, context)?;
    report(&imported, context);

    if imported.has_warnings() {
        context.say(&format!("Valid with {} warning(s)", imported.warnings.len()));
    } else {
        context.say("Valid");
    }
    Ok(())
}
