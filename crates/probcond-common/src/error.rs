//! Error types with actionable diagnostics.
//!
//! Every variant tells the user what went wrong and what to do next, so a
//! failed run never needs a stack trace to be understood.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for probcond operations.
pub type Result<T> = std::result::Result<T, ProbcondError>;

/// Errors that can occur in probcond tools.
#[derive(Error, Debug)]
pub enum ProbcondError {
    /// Measurement file does not exist.
    #[error("Dataset not found: {path}\n  → Run the benchmark and export results to CSV first")]
    DatasetNotFound { path: PathBuf },

    /// Measurement file exists but is not a valid measurement table.
    #[error("Dataset could not be parsed: {path}\n  {message}\n  → Run the benchmark and export results to CSV first")]
    DatasetUnparseable { path: PathBuf, message: String },

    /// Theme file not found.
    #[error("Theme file not found: {path}\n  → Check the path given to --theme")]
    ConfigNotFound { path: PathBuf },

    /// Theme file has invalid syntax or values.
    #[error("Invalid theme file {path}:\n  {message}\n  → Check YAML syntax and key names")]
    ConfigParsing { path: PathBuf, message: String },

    /// Figure could not be drawn.
    #[error("Rendering failed: {message}\n  → Make sure a sans-serif system font is installed")]
    Render { message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl ProbcondError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a parse error for a dataset.
    pub fn unparseable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DatasetUnparseable { path: path.into(), message: message.into() }
    }

    /// Create a rendering error from any displayable backend error.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render { message: err.to_string() }
    }

    /// Check if this error is caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound { .. }
                | Self::DatasetUnparseable { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatasetNotFound { .. } => "E001",
            Self::DatasetUnparseable { .. } => "E002",
            Self::ConfigNotFound { .. } => "E010",
            Self::ConfigParsing { .. } => "E011",
            Self::Render { .. } => "E020",
            Self::Io { .. } => "E030",
            Self::Serialization { .. } => "E031",
        }
    }
}
