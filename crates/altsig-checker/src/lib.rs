//! Module checking for the altsig verifier.
//!
//! This crate connects the solver to the outside world. The host supplies
//! classes through the collaborator traits in [`providers`]; the
//! [`ModuleChecker`] gates each class on its binary version, resolves its
//! declarations once through the [`ClassResolutionCache`], and runs the
//! override checks for every requested class, in parallel when enabled.
//! Results are collected by the [`DiagnosticReporter`] and come back in a
//! deterministic order.

pub mod class_cache;
pub mod context;
pub mod memory_host;
pub mod module_checker;
pub mod providers;
pub mod reporter;

pub use class_cache::{ClassResolution, ClassResolutionCache, LoadedClass, ResolvedDeclaration};
pub use context::CheckerOptions;
pub use memory_host::InMemoryHost;
pub use module_checker::ModuleChecker;
pub use providers::{
    AlternativeSignatureSource, ClassDeclarations, Collaborators, HostDeclarationProvider,
    ParseError, SignatureTextParser,
};
pub use reporter::DiagnosticReporter;
