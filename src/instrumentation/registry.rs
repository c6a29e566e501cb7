//! In-memory metric name registry.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::MetricBinding;
use crate::kind::DeclarationKind;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised when a computed name cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A gauge was registered twice, or the name is held by another kind.
    #[error("A metric named {name} already exists ({existing}, requested {requested})")]
    DuplicateMetricName {
        name: String,
        existing: DeclarationKind,
        requested: DeclarationKind,
    },

    /// The computed name is empty, typically an absolute declaration with no name.
    #[error("Empty metric name for {kind} declaration on {method}")]
    EmptyMetricName { kind: DeclarationKind, method: String },
}

/// Registry of metric names and the kind registered under each.
///
/// Timers, meters, counters and exception meters are get-or-create: asking
/// for an existing name of the same kind reuses it. Gauges are register-once.
#[derive(Debug, Default)]
pub struct MetricNameRegistry {
    names: Mutex<HashMap<String, DeclarationKind>>,
}

impl MetricNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `kind`.
    ///
    /// Returns `true` if the name is new, `false` if an existing non-gauge
    /// entry of the same kind was reused.
    pub fn register(&self, name: &str, kind: DeclarationKind) -> Result<bool> {
        let mut names = self.lock();

        match names.get(name) {
            Some(&existing) if existing == kind && !kind.is_gauge() => Ok(false),
            Some(&existing) => Err(RegistryError::DuplicateMetricName {
                name: name.to_string(),
                existing,
                requested: kind,
            }),
            None => {
                names.insert(name.to_string(), kind);
                Ok(true)
            }
        }
    }

    /// Register every binding, or none of them.
    ///
    /// All names are checked against the registry and against each other
    /// under one lock before anything is inserted. Returns the number of new
    /// names.
    pub fn register_all(&self, bindings: &[MetricBinding]) -> Result<usize> {
        let mut names = self.lock();
        let mut staged: HashMap<&str, DeclarationKind> = HashMap::new();

        for binding in bindings {
            let existing = names
                .get(binding.name.as_str())
                .or_else(|| staged.get(binding.name.as_str()))
                .copied();

            match existing {
                Some(existing) if existing == binding.kind && !binding.kind.is_gauge() => {}
                Some(existing) => {
                    return Err(RegistryError::DuplicateMetricName {
                        name: binding.name.clone(),
                        existing,
                        requested: binding.kind,
                    })
                }
                None => {
                    staged.insert(binding.name.as_str(), binding.kind);
                }
            }
        }

        let added = staged.len();
        for (name, kind) in staged {
            names.insert(name.to_string(), kind);
        }
        Ok(added)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Kind registered under `name`.
    pub fn kind_of(&self, name: &str) -> Option<DeclarationKind> {
        self.lock().get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, DeclarationKind>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
