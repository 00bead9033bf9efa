//! Command handler modules for the CLI.

mod filename;
mod json;
mod lss;
mod share;
mod validate;

use crate::cli::Commands;
use crate::error::CliError;
use crate::util::Context;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(context: &Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::ExportLss {
            input,
            output,
            name,
        } => lss::cmd_export_lss(context, &input, output.as_deref(), name.as_deref()),
        Commands::ImportLss { input, output } => {
            lss::cmd_import_lss(context, &input, output.as_deref())
        }
        Commands::ExportJson {
            input,
            output,
            compact,
        } => json::cmd_export_json(context, &input, output.as_deref(), compact),
        Commands::Share(subcmd) => share::cmd_share(context, subcmd),
        Commands::Filename { input, name } => {
            filename::cmd_filename(context, &input, name.as_deref())
        }
        Commands::Validate { input } => validate::cmd_validate(context, &input),
    }
}
