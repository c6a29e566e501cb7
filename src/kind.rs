//! Instrumentation declaration kinds and their default name suffixes.

use std::fmt;

use serde::Deserialize;

/// Suffix for timers declared without an explicit name.
pub const TIMED_SUFFIX: &str = "timer";
/// Suffix for meters declared without an explicit name.
pub const METERED_SUFFIX: &str = "meter";
/// Suffix for counters declared without an explicit name.
pub const COUNTER_SUFFIX: &str = "counter";
/// Suffix for monotonic counters declared without an explicit name.
pub const COUNTER_SUFFIX_MONOTONIC: &str = "current";
/// Suffix for gauges declared without an explicit name.
pub const GAUGE_SUFFIX: &str = "gauge";
/// Suffix for exception meters declared without an explicit name.
pub const EXCEPTIONS_SUFFIX: &str = "exceptions";

/// Kind of instrumentation a declaration asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Timed,
    Metered,
    Counted,
    Gauge,
    ExceptionMetered,
}

impl DeclarationKind {
    /// Every kind, in the order the wiring layer visits them.
    pub const ALL: [DeclarationKind; 5] = [
        DeclarationKind::Timed,
        DeclarationKind::Metered,
        DeclarationKind::Counted,
        DeclarationKind::Gauge,
        DeclarationKind::ExceptionMetered,
    ];

    /// Default name suffix for this kind.
    ///
    /// Counters have two suffixes; this returns the non-monotonic one. Use
    /// [`crate::Declaration::suffix`] when the declaration is at hand.
    pub fn suffix(&self) -> &'static str {
        match self {
            DeclarationKind::Timed => TIMED_SUFFIX,
            DeclarationKind::Metered => METERED_SUFFIX,
            DeclarationKind::Counted => COUNTER_SUFFIX,
            DeclarationKind::Gauge => GAUGE_SUFFIX,
            DeclarationKind::ExceptionMetered => EXCEPTIONS_SUFFIX,
        }
    }

    /// Attribute spelling, as written on methods and impl blocks.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Timed => "timed",
            DeclarationKind::Metered => "metered",
            DeclarationKind::Counted => "counted",
            DeclarationKind::Gauge => "gauge",
            DeclarationKind::ExceptionMetered => "exception_metered",
        }
    }

    pub fn is_gauge(&self) -> bool {
        matches!(self, DeclarationKind::Gauge)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
