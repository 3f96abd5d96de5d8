use altsig_solver::BinaryVersion;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the altsig binary.
#[derive(Parser, Debug)]
#[command(
    name = "altsig",
    version,
    about = "Verify alternative signatures against compiled declarations"
)]
pub struct CliArgs {
    /// Path to the module manifest (JSON).
    pub manifest: PathBuf,

    /// Binary format version this reader understands, e.g. `1.4.0`.
    /// Overrides the manifest's `expected_version`.
    #[arg(long = "expected-version", value_name = "VERSION")]
    pub expected_version: Option<BinaryVersion>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Check classes one after another instead of on the thread pool.
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Enable color in text output. Defaults to whether stdout is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Only check these classes (comma separated). Defaults to every class
    /// in the manifest.
    #[arg(long, value_delimiter = ',')]
    pub classes: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod tests;
