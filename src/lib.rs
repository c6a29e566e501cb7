//! Metrics Naming - declaration resolution and metric naming.
//!
//! Works out which instrumentation declaration (timer, meter, counter, gauge,
//! exception meter) applies to a method, and what the resulting metric is
//! called. Declarations are attached to methods or to whole types, usually
//! through the [`instrumented`] attribute, and resolved through an ordered
//! list of declaration sources.
//!
//! # Example
//!
//! ```
//! use metrics_naming::{
//!     Declaration, DeclarationKind, MetricNameRegistry, MetricsInstrumentation, TypeInfo,
//! };
//!
//! let parent = TypeInfo::builder("pkg.P")
//!     .method("g", |m| m.declare(DeclarationKind::Gauge, Declaration::new()))
//!     .build();
//! let b1 = TypeInfo::builder("pkg.B1").parent(parent.clone()).build();
//! let b2 = TypeInfo::builder("pkg.B2").parent(parent).build();
//!
//! let instrumentation = MetricsInstrumentation::default();
//! let registry = MetricNameRegistry::new();
//! instrumentation.register(&registry, &b1).unwrap();
//! instrumentation.register(&registry, &b2).unwrap();
//!
//! assert_eq!(registry.names(), vec!["pkg.B1.g.gauge", "pkg.B2.g.gauge"]);
//! ```

extern crate self as metrics_naming;

pub mod bootstrap;
pub mod config;
pub mod declaration;
pub mod instrumentation;
pub mod kind;
pub mod metadata;
pub mod namer;
pub mod resolver;

#[cfg(test)]
mod test_utils;

pub use config::{ConfigError, DeclarationSource, GaugeNaming, NamingConfig};
pub use declaration::{Declaration, Declarations};
pub use instrumentation::{MetricBinding, MetricNameRegistry, MetricsInstrumentation, RegistryError};
pub use kind::DeclarationKind;
pub use metadata::{Callable, Instrumented, MethodInfo, Registration, TypeCatalog, TypeInfo};
pub use namer::{DeclaringClassMetricNamer, GaugeInstanceClassMetricNamer, MetricNamer};
pub use resolver::{
    AnnotationResolver, ClassAnnotationResolver, ListAnnotationResolver, MethodAnnotationResolver,
};

pub use metrics_naming_macros::{counted, exception_metered, gauge, instrumented, metered, timed};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
