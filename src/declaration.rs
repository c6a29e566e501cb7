//! Declaration attributes and per-site declaration tables.

use std::collections::BTreeMap;

use crate::kind::{DeclarationKind, COUNTER_SUFFIX_MONOTONIC};

/// Attributes of one instrumentation declaration.
///
/// An empty `name` means the metric name is derived from the method name and
/// the kind suffix. With `absolute` set, `name` is the full metric name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    absolute: bool,
    monotonic: bool,
}

impl Declaration {
    /// Declaration with a derived name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declaration with an explicit name, composed under the type namespace.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declaration whose name is used verbatim.
    pub fn absolute(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            absolute: true,
            monotonic: false,
        }
    }

    pub fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    /// Mark a counter as monotonic. Ignored for other kinds.
    pub fn with_monotonic(mut self, monotonic: bool) -> Self {
        self.monotonic = monotonic;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_monotonic(&self) -> bool {
        self.monotonic
    }

    /// Suffix used when this declaration has no explicit name.
    pub fn suffix(&self, kind: DeclarationKind) -> &'static str {
        match kind {
            DeclarationKind::Counted if self.monotonic => COUNTER_SUFFIX_MONOTONIC,
            other => other.suffix(),
        }
    }
}

/// Declarations attached to a single site (a method or a type), at most one
/// per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    by_kind: BTreeMap<DeclarationKind, Declaration>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a declaration, replacing any earlier one of the same kind.
    pub fn insert(&mut self, kind: DeclarationKind, declaration: Declaration) -> Option<Declaration> {
        self.by_kind.insert(kind, declaration)
    }

    pub fn with(mut self, kind: DeclarationKind, declaration: Declaration) -> Self {
        self.insert(kind, declaration);
        self
    }

    pub fn get(&self, kind: DeclarationKind) -> Option<&Declaration> {
        self.by_kind.get(&kind)
    }

    pub fn contains(&self, kind: DeclarationKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclarationKind, &Declaration)> {
        self.by_kind.iter().map(|(kind, declaration)| (*kind, declaration))
    }
}

impl FromIterator<(DeclarationKind, Declaration)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (DeclarationKind, Declaration)>>(iter: I) -> Self {
        Self {
            by_kind: iter.into_iter().collect(),
        }
    }
}
