//! Share link commands.

use std::path::Path;

use splitsmaker_core::share::{self, ShareOptions};

use crate::cli::ShareCommands;
use crate::error::CliError;
use crate::util::{Context, log_warnings, read_config, render_json, write_output};

/// Share command handler
pub fn cmd_share(context: &Context, subcmd: ShareCommands) -> Result<(), CliError> {
    match subcmd {
        ShareCommands::Encode {
            input,
            base_url,
            max_length,
            token_only,
        } => cmd_share_encode(context, &input, base_url, max_length, token_only),
        ShareCommands::Decode { token, output } => {
            cmd_share_decode(context, &token, output.as_deref())
        }
    }
}

fn share_options(context: &Context, base_url: Option<String>, max_length: Option<usize>) -> ShareOptions {
    let mut options = context.settings.share.to_options();
    if let Some(base_url) = base_url {
        options.base_url = base_url;
    }
    if let Some(max_length) = max_length {
        options = options.with_max_url_length(max_length);
    }
    options
}

fn cmd_share_encode(
    context: &Context,
    input: &Path,
    base_url: Option<String>,
    max_length: Option<usize>,
    token_only: bool,
) -> Result<(), CliError> {
    let imported = read_config(input, context)?;
    let options = share_options(context, base_url, max_length);
    let link = share::build_share_url(&imported.config, &options)
        .map_err(|e| CliError::Share(e.to_string()))?;

    if link.icons_stripped {
        tracing::warn!("Icons were removed to fit the share link length limit");
    }
    println!("{}", if token_only { &link.token } else { &link.url });
    Ok(())
}

/// Accepts a bare token or any absolute URL carrying one
fn token_from_argument(argument: &str) -> Result<String, CliError> {
    let trimmed = argument.trim();
    if !trimmed.contains("://") {
        return Ok(trimmed.to_string());
    }
    share::share_param_from_url(trimmed)
        .map_err(|e| CliError::Share(e.to_string()))?
        .ok_or_else(|| CliError::Share(format!("No `{}` parameter in {trimmed}", share::SHARE_PARAM)))
}

fn cmd_share_decode(context: &Context, argument: &str, output: Option<&Path>) -> Result<(), CliError> {
    let token = token_from_argument(argument)?;
    let decoded = share::decode_share_config(&token).map_err(|e| CliError::Share(e.to_string()))?;
    log_warnings(&decoded);
    let json = render_json(&decoded.config, false, context)?;
    write_output(output, &json)
}
