//! Evaluation message catalog.
//!
//! Maps symbolic outcome keys to the human-readable templates shown to
//! contestants. The catalog is built once at startup and shared read-only
//! behind an `Arc`; evaluation logic never formats text itself, it only
//! references keys.

use std::collections::HashMap;

use crate::types::{EvalError, Result};

/// Read-only key-to-template map.
///
/// Templates use positional `%s` placeholders; the values substituted for
/// them travel as separate literal elements of [`crate::Outcome::text`]
/// and are resolved by the presentation layer.
#[derive(Clone, Debug, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the standard judging-pipeline messages.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert("success", "Output is correct");
        catalog.insert("partial", "Output is partially correct");
        catalog.insert("wrong", "Output isn't correct");
        catalog.insert("nooutput", "Evaluation didn't produce file %s");
        catalog.insert("timeout", "Execution timed out");
        catalog.insert(
            "walltimeout",
            "Execution timed out (wall clock limit exceeded)",
        );
        catalog.insert(
            "signal",
            "Execution killed with signal %s (could be triggered by violating memory limits)",
        );
        catalog.insert(
            "returncode",
            "Execution failed because the return code was nonzero",
        );
        catalog
    }

    pub fn insert(&mut self, key: &str, template: &str) {
        self.entries.insert(key.to_string(), template.to_string());
    }

    /// Look up the template for a key. A missing key is a configuration
    /// error; steps validate their keys up front with [`require`](Self::require).
    pub fn lookup(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| EvalError::Config(format!("unknown message key: {key}")))
    }

    /// Fail fast when any of the given keys is missing from the catalog.
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.lookup(key)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
