//! # Drivers
//!
//! A driver is everything needed to normalize one language's native AST: the
//! builder configuration and the annotation rule tree. Built-in drivers are
//! compiled in; others can be loaded from a YAML or JSON manifest.
//!
//! Registry invariant: one [`DriverRegistry`] is built at the entrypoint and
//! shared by reference. Drivers are immutable once registered, so the same
//! driver can serve concurrent requests.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotation::{Annotator, Rule};
use crate::builder::{BuilderConfig, NodeBuilder};
use crate::errors::UastError;
use crate::pipeline;
use crate::uast::Node;
use crate::value::Value;

pub mod python;

/// One language's builder and annotator.
#[derive(Debug, Clone)]
pub struct Driver {
    language: String,
    builder: NodeBuilder,
    annotator: Annotator,
}

impl Driver {
    pub fn new(language: impl Into<String>, config: BuilderConfig, rules: Rule) -> Self {
        Self {
            language: language.into(),
            builder: NodeBuilder::new(config),
            annotator: Annotator::new(rules),
        }
    }

    pub fn from_manifest(manifest: DriverManifest) -> Self {
        Self::new(manifest.language, manifest.builder, manifest.rules)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn builder(&self) -> &NodeBuilder {
        &self.builder
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    /// Build then annotate one native AST.
    pub fn normalize(&self, native: &Value) -> Result<Node, UastError> {
        pipeline::run(native, &self.builder, &self.annotator)
    }
}

// ============================================================================
// MANIFESTS
// ============================================================================

/// A driver described as data.
///
/// ```yaml
/// language: toy
/// builder:
///   internal_type_key: kind
///   promoted_lists:
///     Program: [items]
/// rules:
///   on: any
///   actions:
///     - assign_roles: [File]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverManifest {
    pub language: String,
    #[serde(default)]
    pub builder: BuilderConfig,
    pub rules: Rule,
}

impl DriverManifest {
    pub fn from_yaml_str(text: &str) -> Result<Self, UastError> {
        let de = serde_yaml::Deserializer::from_str(text);
        serde_yaml::with::singleton_map_recursive::deserialize(de).map_err(|e| UastError::Manifest {
            message: e.to_string(),
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, UastError> {
        serde_json::from_str(text).map_err(|e| UastError::Manifest {
            message: e.to_string(),
        })
    }

    /// Loads a manifest file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, UastError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| UastError::io(path.display().to_string(), e))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Drivers by language name.
#[derive(Debug, Clone, Default)]
pub struct DriverRegistry {
    drivers: BTreeMap<String, Arc<Driver>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in driver.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(python::driver());
        registry
    }

    /// Registers `driver`, replacing any driver for the same language.
    pub fn register(&mut self, driver: Driver) -> Option<Arc<Driver>> {
        debug!(language = driver.language(), "registered driver");
        self.drivers
            .insert(driver.language().to_string(), Arc::new(driver))
    }

    pub fn get(&self, language: &str) -> Result<Arc<Driver>, UastError> {
        self.drivers
            .get(language)
            .cloned()
            .ok_or_else(|| UastError::UnknownLanguage {
                language: language.to_string(),
                available: self.languages().join(", "),
            })
    }

    /// Registered languages, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.drivers.keys().map(String::as_str).collect()
    }
}
