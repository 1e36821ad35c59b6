//! Shared infrastructure for probcond CLI tools.
//!
//! This crate provides common utilities used by the probcond binaries:
//! - Error handling with actionable diagnostics
//! - Common command-line flags and terminal styling
//! - Table rendering for terminal output

pub mod cli;
pub mod error;
pub mod output;

pub use cli::{Cli, CommonArgs, OutputFormat, Verbosity};
pub use error::{ProbcondError, Result};
pub use output::{Align, Table, TableBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_has_actionable_message() {
        let err = ProbcondError::DatasetNotFound { path: "/tmp/results.csv".into() };
        let msg = err.to_string();
        assert!(msg.contains("results.csv"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_table_builder_creates_valid_table() {
        let table = TableBuilder::new().headers(vec!["Name", "Value"]).row(vec!["test", "123"]).build();

        assert_eq!(table.headers().len(), 2);
        assert_eq!(table.rows().len(), 1);
    }
}
