//! Namespace gauges under the instantiated type.

use super::{compose, MetricNamer};
use crate::declaration::Declaration;
use crate::kind::DeclarationKind;
use crate::metadata::{Callable, TypeInfo};

/// Names gauges after the instantiated type, whichever ancestor declares the
/// gauge method, so a gauge inherited by several subtypes gets one name per
/// subtype instead of a registry clash.
///
/// Other kinds are only ever found on the instantiated type's own methods,
/// so they keep the declaring-type namespace of [`super::DeclaringClassMetricNamer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GaugeInstanceClassMetricNamer;

impl MetricNamer for GaugeInstanceClassMetricNamer {
    fn name_for_gauge(
        &self,
        instance_type: &TypeInfo,
        callable: &Callable,
        declaration: &Declaration,
    ) -> String {
        compose(
            instance_type.namespace(),
            callable,
            DeclarationKind::Gauge,
            declaration,
        )
    }
}
