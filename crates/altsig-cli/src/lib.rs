//! Command line driver for the altsig verifier.
//!
//! The driver loads a JSON manifest describing compiled classes, their
//! declarations, annotation text and override edges, checks the requested
//! classes with [`altsig_checker::ModuleChecker`], and renders the result.

pub mod args;
pub mod driver;
pub mod json_parser;
pub mod manifest;
pub mod reporter;
pub mod tracing_config;
