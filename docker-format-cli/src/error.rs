//! CLI-specific error types and exit code mapping

use docker_format_core::error::DockerFormatError;
use docker_format_filter::FilterError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Building the enrichment filter failed.
    #[error("filter error: {0}")]
    Filter(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (input read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from docker-format-core.
    #[error("{0}")]
    Core(#[from] DockerFormatError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                  |
    /// |------|--------------------------|
    /// | 0    | Success                  |
    /// | 1    | General / command error  |
    /// | 2    | Configuration error      |
    /// | 10   | IO error                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(DockerFormatError::Config(_)) => 2,
            Self::Io(_) | Self::Core(DockerFormatError::Io(_)) => 10,
            Self::Command(_) | Self::Filter(_) | Self::JsonSerialize(_) | Self::Core(_) => 1,
        }
    }
}

impl From<FilterError> for CliError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e.to_string())
    }
}
