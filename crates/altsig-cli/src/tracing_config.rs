//! Tracing setup for the `altsig` binary.
//!
//! Diagnostics go to stdout; everything here writes to stderr. Nothing is
//! installed unless `ALTSIG_LOG` (or `RUST_LOG`) is set, so a plain run
//! pays nothing for logging.
//!
//! What a verifier run emits, by target:
//!
//! - `altsig_checker`: a `check_module` span (`classes`, `parallel`) with
//!   one `check_class` span per class below it. Unknown classes, rejected
//!   binary units and rejected alternatives are logged at `debug`. Cache
//!   misses and the collected override pairs show up at `trace`.
//! - `altsig_solver`: version gate decisions, erasure mismatches and
//!   every unsound position, all at `trace`. Malformed headers are logged
//!   at `debug`.
//! - `altsig_cli`: manifest loading and the final summary at `info`/`debug`.
//!
//! `ALTSIG_LOG_FORMAT` picks the layout:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: `tracing-tree` output, where each `check_class` span nests
//!   its own events. Parallel runs interleave, so pair it with
//!   `--no-parallel`.
//! - `json`: one JSON object per event, for piping into `jq`
//!
//! ```bash
//! ALTSIG_LOG=debug ALTSIG_LOG_FORMAT=tree altsig module.json --no-parallel
//! ALTSIG_LOG="altsig_checker=trace,altsig_solver=debug" altsig module.json
//! ALTSIG_LOG=altsig_solver::nullability=trace altsig module.json --classes test.Sub
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "ALTSIG_LOG";
const FORMAT_VAR: &str = "ALTSIG_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(FORMAT_VAR).unwrap_or_default())
    }
}

/// `ALTSIG_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_VAR) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber for this run. Called once from `main`
/// before the manifest is read so manifest loading is traced too.
pub fn init_tracing() {
    if std::env::var(LOG_VAR).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
