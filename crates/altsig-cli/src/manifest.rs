//! JSON module manifests.
//!
//! A manifest stands in for a directory of compiled classes:
//!
//! ```json
//! {
//!   "expected_version": [1, 4, 0],
//!   "types": [{"name": "test.Box", "erasure": "test.Box", "parameters": ["out"]}],
//!   "classes": [{
//!     "name": "test.Sub",
//!     "version": [1, 2, 0],
//!     "declarations": [{
//!       "name": "get",
//!       "descriptor": "()Ljava/lang/String;",
//!       "signature": {"kind": "method", "return_type": {"base": "java.lang.String"}},
//!       "alternative": {"kind": "method", "return_type": {"base": "kotlin.String", "nullability": "nullable"}},
//!       "overrides": [{"class": "test.Super"}]
//!     }]
//!   }]
//! }
//! ```
//!
//! A class records either a `version` component list or, for units that
//! predate it, a single `abi_version` number. `alternative` is annotation
//! text, given either as a string or as an inline JSON tree.

use altsig_checker::InMemoryHost;
use altsig_solver::{
    BinaryVersion, Declaration, DeclarationId, GenericDefinition, Signature, TypeCatalog, Variance,
};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

#[derive(Clone, Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub expected_version: Option<BinaryVersion>,
    /// Generic definitions added to the built-in catalog.
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    /// Defaults to `name`.
    #[serde(default)]
    pub erasure: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Variance>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub version: Option<BinaryVersion>,
    #[serde(default)]
    pub abi_version: Option<u32>,
    #[serde(default)]
    pub declarations: Vec<DeclarationEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeclarationEntry {
    pub name: String,
    #[serde(default)]
    pub descriptor: String,
    pub signature: Signature,
    #[serde(default)]
    pub alternative: Option<Value>,
    #[serde(default)]
    pub overrides: Vec<OverrideTarget>,
}

/// The overridden declaration. Name and descriptor default to the
/// overrider's own.
#[derive(Clone, Debug, Deserialize)]
pub struct OverrideTarget {
    pub class: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub descriptor: Option<String>,
}

/// A manifest turned into checker inputs.
#[derive(Debug)]
pub struct LoadedManifest {
    pub host: InMemoryHost,
    pub catalog: TypeCatalog,
    /// Every class in manifest order.
    pub classes: Vec<String>,
    pub expected_version: Option<BinaryVersion>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid manifest {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(self) -> Result<LoadedManifest> {
        let mut catalog = TypeCatalog::with_builtins();
        for entry in self.types {
            let erasure = entry.erasure.unwrap_or_else(|| entry.name.clone());
            catalog.register(entry.name, GenericDefinition::new(erasure, entry.parameters));
        }

        let mut host = InMemoryHost::new();
        let mut classes = Vec::with_capacity(self.classes.len());
        for class in self.classes {
            let version = class.binary_version()?;
            host.insert_class(class.name.as_str(), &version);
            for entry in class.declarations {
                let id = DeclarationId::new(
                    class.name.as_str(),
                    entry.name.as_str(),
                    entry.descriptor.as_str(),
                );
                for target in &entry.overrides {
                    host.add_override(id.clone(), target.resolve(&id));
                }
                let alternative = entry.alternative.map(alternative_text);
                host.declare(
                    Declaration {
                        id,
                        signature: entry.signature,
                    },
                    alternative,
                );
            }
            classes.push(class.name);
        }
        debug!(classes = classes.len(), "manifest loaded");

        Ok(LoadedManifest {
            host,
            catalog,
            classes,
            expected_version: self.expected_version,
        })
    }
}

impl ClassEntry {
    fn binary_version(&self) -> Result<BinaryVersion> {
        match (&self.version, self.abi_version) {
            (Some(_), Some(_)) => bail!(
                "class '{}' declares both `version` and `abi_version`",
                self.name
            ),
            (Some(version), None) => Ok(version.clone()),
            (None, Some(abi)) => Ok(BinaryVersion::from_legacy_abi(abi)),
            (None, None) => bail!(
                "class '{}' declares neither `version` nor `abi_version`",
                self.name
            ),
        }
    }
}

impl OverrideTarget {
    fn resolve(&self, overrider: &DeclarationId) -> DeclarationId {
        DeclarationId::new(
            self.class.as_str(),
            self.name
                .as_deref()
                .map_or_else(|| overrider.name.clone(), Into::into),
            self.descriptor
                .as_deref()
                .map_or_else(|| overrider.descriptor.clone(), Into::into),
        )
    }
}

fn alternative_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        tree => tree.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/manifest_tests.rs"]
mod tests;
