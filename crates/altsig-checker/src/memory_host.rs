//! A host that keeps every class in memory.
//!
//! Used by the command line driver, which loads a whole manifest up front,
//! and by tests that build classes declaration by declaration.

use crate::providers::{AlternativeSignatureSource, ClassDeclarations, HostDeclarationProvider};
use altsig_solver::{BinaryVersion, Declaration, DeclarationId, OverrideEdge};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct HostClass {
    unit: Option<Vec<u8>>,
    contents: ClassDeclarations,
}

#[derive(Debug, Default)]
pub struct InMemoryHost {
    classes: FxHashMap<String, HostClass>,
    alternatives: FxHashMap<DeclarationId, String>,
    declaration_requests: AtomicUsize,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class whose unit carries `version` and an empty payload.
    pub fn insert_class(&mut self, class: impl Into<String>, version: &BinaryVersion) {
        self.insert_unit(class, version.to_header());
    }

    /// Register a class with raw unit bytes, header included.
    pub fn insert_unit(&mut self, class: impl Into<String>, unit: Vec<u8>) {
        self.classes.entry(class.into()).or_default().unit = Some(unit);
    }

    /// Add a declaration to its class, with optional alternative text.
    ///
    /// A class that only receives declarations has no unit and stays
    /// invisible until [`Self::insert_class`] is called for it.
    pub fn declare(&mut self, declaration: Declaration, alternative: Option<String>) {
        if let Some(text) = alternative {
            self.alternatives.insert(declaration.id.clone(), text);
        }
        self.classes
            .entry(declaration.id.class.to_string())
            .or_default()
            .contents
            .declarations
            .push(declaration);
    }

    /// Record that `overrider` overrides `overridden`. The edge belongs to
    /// the overrider's class.
    pub fn add_override(&mut self, overrider: DeclarationId, overridden: DeclarationId) {
        self.classes
            .entry(overrider.class.to_string())
            .or_default()
            .contents
            .edges
            .push(OverrideEdge::new(overrider, overridden));
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Number of times [`HostDeclarationProvider::declarations`] was called.
    pub fn declaration_requests(&self) -> usize {
        self.declaration_requests.load(Ordering::Relaxed)
    }
}

impl HostDeclarationProvider for InMemoryHost {
    fn binary_unit(&self, class: &str) -> Option<Vec<u8>> {
        self.classes.get(class)?.unit.clone()
    }

    fn declarations(&self, class: &str) -> Option<ClassDeclarations> {
        self.declaration_requests.fetch_add(1, Ordering::Relaxed);
        let class = self.classes.get(class)?;
        class.unit.as_ref()?;
        Some(class.contents.clone())
    }
}

impl AlternativeSignatureSource for InMemoryHost {
    fn alternative_text(&self, declaration: &Declaration) -> Option<String> {
        self.alternatives.get(&declaration.id).cloned()
    }
}
