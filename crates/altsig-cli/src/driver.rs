use crate::args::CliArgs;
use crate::json_parser::JsonSignatureParser;
use crate::manifest::{LoadedManifest, Manifest};
use altsig_checker::{CheckerOptions, Collaborators, ModuleChecker};
use altsig_solver::{BinaryVersion, Diagnostic};
use anyhow::Result;
use tracing::info;

/// Reader version used when neither the command line nor the manifest
/// names one.
pub const DEFAULT_EXPECTED_VERSION: [u32; 3] = [1, 0, 0];

#[derive(Debug)]
pub struct CheckOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub classes_checked: usize,
    pub expected_version: BinaryVersion,
}

impl CheckOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Load the manifest named by `args` and check the requested classes.
pub fn run(args: &CliArgs) -> Result<CheckOutcome> {
    let manifest = Manifest::from_path(&args.manifest)?;
    check(manifest.load()?, args)
}

pub fn check(manifest: LoadedManifest, args: &CliArgs) -> Result<CheckOutcome> {
    let LoadedManifest {
        host,
        catalog,
        classes,
        expected_version,
    } = manifest;

    let expected_version = args
        .expected_version
        .clone()
        .or(expected_version)
        .unwrap_or_else(|| BinaryVersion::new(DEFAULT_EXPECTED_VERSION));
    let classes = args.classes.clone().unwrap_or(classes);
    let options = CheckerOptions::new(expected_version.clone()).with_parallel(!args.no_parallel);

    let parser = JsonSignatureParser;
    let checker = ModuleChecker::with_catalog(Collaborators::new(&host, &parser), options, catalog);
    let diagnostics = checker.check_module(&classes);
    info!(
        classes = classes.len(),
        diagnostics = diagnostics.len(),
        expected = %expected_version,
        "check finished"
    );

    Ok(CheckOutcome {
        diagnostics,
        classes_checked: classes.len(),
        expected_version,
    })
}
