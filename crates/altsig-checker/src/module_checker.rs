//! Checking a module: a set of classes requested together.
//!
//! For every requested class the checker
//! 1. resolves the class through the cache (version gate, declarations,
//!    alternative signatures parsed and structurally validated);
//! 2. resolves every class on either side of the class's override edges;
//! 3. walks the edges into override pairs and checks their nullability.
//!
//! Each class is independent of the others once resolved, so classes are
//! fanned out over rayon. The reporter is the only shared mutable state.

use crate::class_cache::{ClassResolution, ClassResolutionCache, LoadedClass, ResolvedDeclaration};
use crate::context::CheckerOptions;
use crate::providers::Collaborators;
use crate::reporter::DiagnosticReporter;
use altsig_solver::{
    BinaryUnit, Declaration, DeclarationId, Diagnostic, EffectiveSignature, EffectiveTypeLookup,
    NullabilityChecker, OverrideHierarchyWalker, TypeCatalog, VersionGate, validate,
};
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct ModuleChecker<'h> {
    collaborators: Collaborators<'h>,
    gate: VersionGate,
    parallel: bool,
    catalog: TypeCatalog,
    cache: ClassResolutionCache,
}

impl<'h> ModuleChecker<'h> {
    /// A checker over the built-in type catalog.
    pub fn new(collaborators: Collaborators<'h>, options: CheckerOptions) -> Self {
        Self::with_catalog(collaborators, options, TypeCatalog::with_builtins())
    }

    pub fn with_catalog(
        collaborators: Collaborators<'h>,
        options: CheckerOptions,
        catalog: TypeCatalog,
    ) -> Self {
        Self {
            collaborators,
            gate: VersionGate::new(options.expected_version),
            parallel: options.parallel,
            catalog,
            cache: ClassResolutionCache::new(),
        }
    }

    pub fn gate(&self) -> &VersionGate {
        &self.gate
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &ClassResolutionCache {
        &self.cache
    }

    /// Check every class in `class_names` and return all diagnostics in
    /// stable order. Repeated names are checked once.
    #[tracing::instrument(level = "debug", skip_all, fields(classes = class_names.len(), parallel = self.parallel))]
    pub fn check_module<S>(&self, class_names: &[S]) -> Vec<Diagnostic>
    where
        S: AsRef<str> + Sync,
    {
        let unique: IndexSet<&str> = class_names.iter().map(AsRef::as_ref).collect();
        let classes: Vec<&str> = unique.into_iter().collect();
        let reporter = DiagnosticReporter::new();

        if self.parallel {
            classes
                .par_iter()
                .for_each(|class| self.check_class(class, &reporter));
        } else {
            for class in &classes {
                self.check_class(class, &reporter);
            }
        }

        let diagnostics = reporter.finish();
        debug!(
            classes = classes.len(),
            diagnostics = diagnostics.len(),
            resolved = self.cache.computations(),
            "module checked"
        );
        diagnostics
    }

    /// Resolve a class through the cache.
    pub fn resolve(&self, class: &str) -> ClassResolution {
        self.cache.resolve(class, || self.load_class(class))
    }

    #[tracing::instrument(level = "trace", skip(self, reporter))]
    fn check_class(&self, class: &str, reporter: &DiagnosticReporter) {
        let loaded = match self.resolve(class) {
            ClassResolution::Loaded(loaded) => loaded,
            ClassResolution::Missing => {
                debug!(class, "class not found, skipping");
                return;
            }
            ClassResolution::Incompatible { actual } => {
                reporter.report(Diagnostic::incompatible_version(
                    class,
                    &actual,
                    self.gate.expected(),
                ));
                return;
            }
        };

        reporter.report_all(loaded.resolution_diagnostics.iter().cloned());
        if loaded.edges.is_empty() {
            return;
        }

        let lookup = self.lookup_for(&loaded);
        let walker = OverrideHierarchyWalker::new(&loaded.edges);
        let pairs = walker.collect_pairs(&lookup);
        trace!(class, pairs = pairs.len(), "override pairs collected");

        let checker = NullabilityChecker::new(&self.catalog);
        reporter.report_all(
            checker
                .check_pairs(&pairs)
                .iter()
                .map(Diagnostic::nullability_violation),
        );
    }

    /// Every loaded class reachable from `loaded`'s override edges.
    fn lookup_for(&self, loaded: &Arc<LoadedClass>) -> ModuleLookup {
        let mut classes = FxHashMap::default();
        classes.insert(Arc::clone(&loaded.name), Arc::clone(loaded));
        for edge in &loaded.edges {
            for id in [&edge.overrider, &edge.overridden] {
                if classes.contains_key(id.class.as_ref()) {
                    continue;
                }
                if let ClassResolution::Loaded(other) = self.resolve(&id.class) {
                    classes.insert(Arc::clone(&id.class), other);
                }
            }
        }
        ModuleLookup { classes }
    }

    fn load_class(&self, class: &str) -> ClassResolution {
        let Some(bytes) = self.collaborators.declarations.binary_unit(class) else {
            return ClassResolution::Missing;
        };
        let unit = match BinaryUnit::open(&bytes, &self.gate) {
            Ok(unit) => unit,
            Err(err) => {
                debug!(class, error = %err, "binary unit rejected");
                return ClassResolution::Incompatible { actual: err.actual };
            }
        };
        let Some(contents) = self.collaborators.declarations.declarations(class) else {
            return ClassResolution::Missing;
        };

        let mut resolution_diagnostics = Vec::new();
        let mut declarations = IndexMap::with_capacity(contents.declarations.len());
        for declaration in contents.declarations {
            let effective = self.effective_signature(&declaration, &mut resolution_diagnostics);
            declarations.insert(
                declaration.id.clone(),
                ResolvedDeclaration {
                    declaration,
                    effective,
                },
            );
        }

        trace!(
            class,
            version = %unit.version(),
            declarations = declarations.len(),
            edges = contents.edges.len(),
            "class loaded"
        );
        ClassResolution::Loaded(Arc::new(LoadedClass {
            name: Arc::from(class),
            version: unit.version().clone(),
            declarations,
            edges: contents.edges,
            resolution_diagnostics,
        }))
    }

    /// The alternative signature when it parses and matches the auto
    /// signature, otherwise the auto signature. Rejections are reported.
    fn effective_signature(
        &self,
        declaration: &Declaration,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> EffectiveSignature {
        let auto = &declaration.signature;
        let Some(text) = self.collaborators.alternatives.alternative_text(declaration) else {
            return EffectiveSignature::from_auto(auto);
        };
        let alternative = match self.collaborators.parser.parse(&text) {
            Ok(alternative) => alternative,
            Err(err) => {
                debug!(declaration = %declaration.id, error = %err, "alternative signature unparsable");
                diagnostics.push(Diagnostic::alternative_parse_error(
                    declaration.id.clone(),
                    &err.message,
                ));
                return EffectiveSignature::fallback(auto);
            }
        };
        match validate(&self.catalog, auto, &alternative) {
            Ok(effective) => effective,
            Err(mismatch) => {
                debug!(declaration = %declaration.id, ?mismatch, "alternative signature rejected");
                diagnostics.push(Diagnostic::structural_mismatch(
                    declaration.id.clone(),
                    &mismatch,
                ));
                EffectiveSignature::fallback(auto)
            }
        }
    }
}

/// Effective signatures of the classes one override check can see.
struct ModuleLookup {
    classes: FxHashMap<Arc<str>, Arc<LoadedClass>>,
}

impl EffectiveTypeLookup for ModuleLookup {
    fn effective(&self, id: &DeclarationId) -> Option<&EffectiveSignature> {
        self.classes.get(id.class.as_ref())?.effective(id)
    }
}

#[cfg(test)]
#[path = "tests/module_checker_tests.rs"]
mod tests;
