//! Per-class resolution cache.
//!
//! A class is resolved at most once per checker: its binary unit is gated,
//! its declarations are loaded, and each declaration's alternative
//! signature is parsed and validated into an effective signature. The
//! same class is typically needed both as a class to check and as the
//! supertype of other classes, possibly from several worker threads at
//! once.
//!
//! Entries are `Arc<OnceLock<_>>` cells in a `DashMap`. The map's shard lock
//! is held only while fetching the cell; the computation runs under the
//! cell's own once-guard, so concurrent requests for the same class wait
//! for the in-flight computation and requests for other classes proceed.

use altsig_solver::{
    BinaryVersion, Declaration, DeclarationId, Diagnostic, EffectiveSignature, OverrideEdge,
};
use dashmap::DashMap;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// A declaration together with the signature used for checking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDeclaration {
    pub declaration: Declaration,
    pub effective: EffectiveSignature,
}

/// A class whose unit passed the version gate.
#[derive(Clone, Debug)]
pub struct LoadedClass {
    pub name: Arc<str>,
    pub version: BinaryVersion,
    pub declarations: IndexMap<DeclarationId, ResolvedDeclaration>,
    pub edges: Vec<OverrideEdge>,
    /// Parse and structural diagnostics produced while resolving.
    pub resolution_diagnostics: Vec<Diagnostic>,
}

impl LoadedClass {
    pub fn effective(&self, id: &DeclarationId) -> Option<&EffectiveSignature> {
        self.declarations
            .get(id)
            .map(|resolved| &resolved.effective)
    }
}

/// Outcome of resolving one class name.
#[derive(Clone, Debug)]
pub enum ClassResolution {
    Loaded(Arc<LoadedClass>),
    /// The host does not know the class.
    Missing,
    /// The unit was rejected by the version gate and is treated as absent.
    Incompatible { actual: BinaryVersion },
}

impl ClassResolution {
    pub fn loaded(&self) -> Option<&Arc<LoadedClass>> {
        match self {
            Self::Loaded(class) => Some(class),
            Self::Missing | Self::Incompatible { .. } => None,
        }
    }
}

#[derive(Default)]
pub struct ClassResolutionCache {
    entries: DashMap<Arc<str>, Arc<OnceLock<ClassResolution>>>,
    computations: AtomicUsize,
}

impl ClassResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `class`, running `load` only if no other caller has.
    pub fn resolve<F>(&self, class: &str, load: F) -> ClassResolution
    where
        F: FnOnce() -> ClassResolution,
    {
        let cell = self.cell(class);
        cell.get_or_init(|| {
            self.computations.fetch_add(1, Ordering::Relaxed);
            trace!(class, "resolving class");
            load()
        })
        .clone()
    }

    /// The cached resolution, if one has completed.
    pub fn get(&self, class: &str) -> Option<ClassResolution> {
        self.entries
            .get(class)
            .and_then(|cell| cell.value().get().cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times a loader actually ran.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    // The returned Arc is cloned out so no shard guard outlives this call.
    fn cell(&self, class: &str) -> Arc<OnceLock<ClassResolution>> {
        if let Some(cell) = self.entries.get(class) {
            return Arc::clone(cell.value());
        }
        Arc::clone(self.entries.entry(Arc::from(class)).or_default().value())
    }
}

#[cfg(test)]
#[path = "tests/class_cache_tests.rs"]
mod tests;
