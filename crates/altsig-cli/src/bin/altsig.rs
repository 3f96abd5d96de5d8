use altsig_cli::args::{CliArgs, OutputFormat};
use altsig_cli::reporter::{Reporter, render_json};
use altsig_cli::{driver, tracing_config};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

#[cfg(not(target_arch = "wasm32"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS_REPORTED: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if ALTSIG_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let outcome = driver::run(&args)?;

    match args.format {
        OutputFormat::Text => {
            let pretty = args
                .pretty
                .unwrap_or_else(|| std::io::stdout().is_terminal());
            let reporter = Reporter::new(pretty);
            if !outcome.diagnostics.is_empty() {
                println!("{}\n", reporter.render(&outcome.diagnostics));
            }
            println!("{}", reporter.summary(&outcome.diagnostics));
        }
        OutputFormat::Json => {
            let json =
                render_json(&outcome.diagnostics).context("failed to serialize diagnostics")?;
            println!("{json}");
        }
    }

    std::process::exit(if outcome.has_errors() {
        EXIT_DIAGNOSTICS_REPORTED
    } else {
        EXIT_SUCCESS
    });
}
