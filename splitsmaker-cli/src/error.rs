//! CLI error types and exit codes.

use splitsmaker_core::error::SplitsMakerError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// Any failure: bad input, invalid config, unwritable output
    pub const GENERAL_ERROR: i32 = 1;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings or logging setup error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog tables could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Input could not be imported
    #[error("Import error: {0}")]
    Import(String),

    /// Config could not be exported
    #[error("Export error: {0}")]
    Export(String),

    /// Share token or URL error
    #[error("Share error: {0}")]
    Share(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SplitsMakerError> for CliError {
    fn from(err: SplitsMakerError) -> Self {
        match err {
            SplitsMakerError::Schema(e) => Self::Import(e.to_string()),
            SplitsMakerError::Migration(e) => Self::Import(e.to_string()),
            SplitsMakerError::Import(e) => Self::Import(e.to_string()),
            SplitsMakerError::Export(e) => Self::Export(e.to_string()),
            SplitsMakerError::Share(e) => Self::Share(e.to_string()),
            SplitsMakerError::Catalog(e) => Self::Catalog(e.to_string()),
            SplitsMakerError::Config(e) => Self::Config(e.to_string()),
            SplitsMakerError::Editor(e) => Self::Import(e.to_string()),
            SplitsMakerError::Tracing(e) => Self::Config(e.to_string()),
            SplitsMakerError::Io(e) => Self::Io(e),
        }
    }
}

impl CliError {
    /// Returns the process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::Catalog(_)
            | Self::Import(_)
            | Self::Export(_)
            | Self::Share(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitsmaker_core::error::{SchemaError, ShareError};

    #[test]
    fn every_error_exits_with_one() {
        let errors = [
            CliError::Config("x".to_string()),
            CliError::Share("x".to_string()),
            CliError::Io(std::io::Error::other("x")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), exit_codes::GENERAL_ERROR);
        }
    }

    #[test]
    fn core_errors_map_to_categories() {
        let err: CliError = SplitsMakerError::from(SchemaError::missing("splits")).into();
        assert!(matches!(err, CliError::Import(ref text) if text.contains("splits")));

        let err: CliError = SplitsMakerError::from(ShareError::TooLarge {
            length: 10,
            budget: 5,
        })
        .into();
        assert!(matches!(err, CliError::Share(_)));
    }
}
