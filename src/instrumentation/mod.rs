//! Wiring: resolve and name every instrumented method of a type.
//!
//! [`MetricsInstrumentation`] combines a resolver and a namer. For a given
//! instantiated type it visits:
//! - the type's own methods, for timers, meters, counters and exception meters;
//! - every method in the type's hierarchy, for gauges.
//!
//! Each match becomes a [`MetricBinding`]. [`MetricsInstrumentation::register`]
//! then records the bindings in a [`MetricNameRegistry`], which enforces name
//! uniqueness.

mod registry;

pub use registry::{MetricNameRegistry, RegistryError, Result};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ConfigError, NamingConfig};
use crate::kind::DeclarationKind;
use crate::metadata::{Callable, TypeInfo};
use crate::namer::{GaugeInstanceClassMetricNamer, MetricNamer};
use crate::resolver::{AnnotationResolver, ListAnnotationResolver};

/// A resolved, named instrumentation point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricBinding {
    /// Kind of instrumentation.
    pub kind: DeclarationKind,
    /// Computed metric name.
    pub name: String,
    /// Simple name of the instrumented method.
    pub method: String,
    /// Namespace of the type declaring the method.
    pub declaring_type: String,
}

/// Resolver and namer pair applied to instantiated types.
#[derive(Clone)]
pub struct MetricsInstrumentation {
    resolver: Arc<dyn AnnotationResolver>,
    namer: Arc<dyn MetricNamer>,
}

impl MetricsInstrumentation {
    pub fn new(
        resolver: impl AnnotationResolver + 'static,
        namer: impl MetricNamer + 'static,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            namer: Arc::new(namer),
        }
    }

    /// Build the resolver and namer described by `config`.
    pub fn from_config(config: &NamingConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            resolver: Arc::new(config.build_resolver()?),
            namer: config.build_namer(),
        })
    }

    pub fn resolver(&self) -> &dyn AnnotationResolver {
        self.resolver.as_ref()
    }

    pub fn namer(&self) -> &dyn MetricNamer {
        self.namer.as_ref()
    }

    /// Every binding for an instance of `instance_type`.
    ///
    /// Bindings are ordered by kind, then by method in hierarchy order.
    pub fn plan(&self, instance_type: &Arc<TypeInfo>) -> Vec<MetricBinding> {
        let declared = Callable::declared_on(instance_type);
        let inherited = Callable::hierarchy_of(instance_type);

        let mut bindings = Vec::new();
        for kind in DeclarationKind::ALL {
            let callables = if kind.is_gauge() { &inherited } else { &declared };

            for callable in callables {
                let Some(declaration) = self.resolver.find_declaration(kind, callable) else {
                    continue;
                };

                let name = self
                    .namer
                    .name_for(kind, instance_type, callable, declaration);
                debug!(
                    %kind,
                    metric = %name,
                    method = callable.name(),
                    instance_type = instance_type.namespace(),
                    "Metric bound"
                );

                bindings.push(MetricBinding {
                    kind,
                    name,
                    method: callable.name().to_string(),
                    declaring_type: callable.declaring_type().namespace().to_string(),
                });
            }
        }

        bindings
    }

    /// Plan `instance_type` and record every binding in `registry`.
    ///
    /// Either every binding is recorded or, on error, none is.
    pub fn register(
        &self,
        registry: &MetricNameRegistry,
        instance_type: &Arc<TypeInfo>,
    ) -> Result<Vec<MetricBinding>> {
        let bindings = self.plan(instance_type);

        if let Some(binding) = bindings.iter().find(|b| b.name.is_empty()) {
            warn!(
                kind = %binding.kind,
                method = %binding.method,
                instance_type = instance_type.namespace(),
                "Absolute declaration without a name"
            );
            return Err(RegistryError::EmptyMetricName {
                kind: binding.kind,
                method: binding.method.clone(),
            });
        }

        if let Err(e) = registry.register_all(&bindings) {
            warn!(
                instance_type = instance_type.namespace(),
                error = %e,
                "Metric registration rejected"
            );
            return Err(e);
        }

        Ok(bindings)
    }
}

impl Default for MetricsInstrumentation {
    /// Method-then-type resolution with per-instance gauge names.
    fn default() -> Self {
        Self::new(ListAnnotationResolver::default(), GaugeInstanceClassMetricNamer)
    }
}

impl std::fmt::Debug for MetricsInstrumentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsInstrumentation").finish_non_exhaustive()
    }
}
