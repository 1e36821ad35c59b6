//! Shared command-line flags and terminal styling.

use clap::Args;
use std::io::IsTerminal;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text and tables
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// How much progress output a tool prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only results and nothing else
    Quiet,
    /// Progress headers and results
    #[default]
    Normal,
    /// Everything, including skipped steps
    Verbose,
}

/// Flags shared by every probcond binary, flattened into each `Cli`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output and error banners
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl CommonArgs {
    /// Resolve the flags into a runtime configuration.
    pub fn to_cli(&self) -> Cli {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Cli { verbosity, format: self.format }
    }
}

/// Resolved output configuration passed to command handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cli {
    /// Progress verbosity
    pub verbosity: Verbosity,
    /// Report format
    pub format: OutputFormat,
}

impl Cli {
    /// True when progress output is suppressed.
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}

/// ANSI styling for consistent terminal messages.
///
/// Colors are dropped when `NO_COLOR` is set or stdout is not a terminal, so
/// piped output stays plain.
pub mod styles {
    use super::IsTerminal;

    const RESET: &str = "\x1b[0m";
    const BOLD: &str = "\x1b[1m";
    const RED: &str = "\x1b[31m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const CYAN: &str = "\x1b[36m";

    /// Whether styled output should be emitted.
    pub fn enabled() -> bool {
        colors_allowed(std::env::var_os("NO_COLOR").is_some(), std::io::stdout().is_terminal())
    }

    pub(crate) fn colors_allowed(no_color: bool, is_terminal: bool) -> bool {
        !no_color && is_terminal
    }

    fn paint(codes: &str, msg: &str, enabled: bool) -> String {
        if enabled {
            format!("{codes}{msg}{RESET}")
        } else {
            msg.to_string()
        }
    }

    /// Section header.
    pub fn header(msg: &str) -> String {
        let enabled = enabled();
        let rule = "=".repeat(3);
        paint(BOLD, &format!("{rule} {msg} {rule}"), enabled)
    }

    /// Successful completion.
    pub fn success(msg: &str) -> String {
        paint(GREEN, &format!("✓ {msg}"), enabled())
    }

    /// Neutral information.
    pub fn info(msg: &str) -> String {
        paint(CYAN, msg, enabled())
    }

    /// Something was skipped or degraded.
    pub fn warning(msg: &str) -> String {
        paint(YELLOW, &format!("warning: {msg}"), enabled())
    }

    /// Fatal error banner.
    pub fn error(msg: &str) -> String {
        paint(&format!("{BOLD}{RED}"), &format!("Error: {msg}"), enabled())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_common_args_resolve_verbosity() {
        let quiet = CommonArgs { quiet: true, ..Default::default() }.to_cli();
        assert!(quiet.is_quiet());
        assert_eq!(quiet.verbosity, Verbosity::Quiet);

        let verbose = CommonArgs { verbose: true, ..Default::default() }.to_cli();
        assert_eq!(verbose.verbosity, Verbosity::Verbose);
        assert!(!verbose.is_quiet());

        let normal = CommonArgs::default().to_cli();
        assert_eq!(normal.verbosity, Verbosity::Normal);
        assert_eq!(normal.format, OutputFormat::Table);
    }
}
