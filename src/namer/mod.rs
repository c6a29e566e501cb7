//! Metric naming policies.
//!
//! Every policy applies the same rule to a resolved declaration:
//!
//! 1. an absolute declaration's name is the metric name, verbatim;
//! 2. an unnamed declaration yields `namespace.method.suffix`;
//! 3. a named declaration yields `namespace.name`.
//!
//! Policies differ only in which type supplies the namespace. Gauges can be
//! inherited from an ancestor, so [`GaugeInstanceClassMetricNamer`] names them
//! after the instantiated type; every other kind, and every kind under
//! [`DeclaringClassMetricNamer`], uses the declaring type.

mod declaring_class;
mod gauge_instance;

pub use declaring_class::DeclaringClassMetricNamer;
pub use gauge_instance::GaugeInstanceClassMetricNamer;

use crate::declaration::Declaration;
use crate::kind::DeclarationKind;
use crate::metadata::{Callable, TypeInfo};

/// Computes the metric name for a resolved declaration.
///
/// Implementations must be pure: the same inputs always give the same name.
pub trait MetricNamer: Send + Sync {
    /// Name for `declaration` of `kind` found on `callable`, invoked through an
    /// instance of `instance_type`.
    fn name_for(
        &self,
        kind: DeclarationKind,
        instance_type: &TypeInfo,
        callable: &Callable,
        declaration: &Declaration,
    ) -> String {
        match kind {
            DeclarationKind::Gauge => self.name_for_gauge(instance_type, callable, declaration),
            _ => compose(
                callable.declaring_type().namespace(),
                callable,
                kind,
                declaration,
            ),
        }
    }

    /// Gauge naming hook. Defaults to the declaring type's namespace.
    fn name_for_gauge(
        &self,
        _instance_type: &TypeInfo,
        callable: &Callable,
        declaration: &Declaration,
    ) -> String {
        compose(
            callable.declaring_type().namespace(),
            callable,
            DeclarationKind::Gauge,
            declaration,
        )
    }
}

impl<T: MetricNamer + ?Sized> MetricNamer for Box<T> {
    fn name_for(
        &self,
        kind: DeclarationKind,
        instance_type: &TypeInfo,
        callable: &Callable,
        declaration: &Declaration,
    ) -> String {
        (**self).name_for(kind, instance_type, callable, declaration)
    }
}

impl<T: MetricNamer + ?Sized> MetricNamer for std::sync::Arc<T> {
    fn name_for(
        &self,
        kind: DeclarationKind,
        instance_type: &TypeInfo,
        callable: &Callable,
        declaration: &Declaration,
    ) -> String {
        (**self).name_for(kind, instance_type, callable, declaration)
    }
}

/// Join a namespace and name segments with `.`, skipping empty segments.
pub fn name(namespace: &str, parts: &[&str]) -> String {
    let mut joined = String::from(namespace);
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !joined.is_empty() {
            joined.push('.');
        }
        joined.push_str(part);
    }
    joined
}

/// The three-way naming rule under a given namespace.
pub(crate) fn compose(
    namespace: &str,
    callable: &Callable,
    kind: DeclarationKind,
    declaration: &Declaration,
) -> String {
    if declaration.is_absolute() {
        return declaration.name().to_string();
    }

    if declaration.name().is_empty() {
        return name(namespace, &[callable.name(), declaration.suffix(kind)]);
    }

    name(namespace, &[declaration.name()])
}
