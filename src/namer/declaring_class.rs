//! Namespace every metric under the method's declaring type.

use super::MetricNamer;

/// Names every metric, gauges included, after the type that declares the
/// instrumented method.
///
/// An inherited gauge therefore has the same name in every subtype; use
/// [`super::GaugeInstanceClassMetricNamer`] when several subtypes are
/// instantiated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaringClassMetricNamer;

impl MetricNamer for DeclaringClassMetricNamer {}
