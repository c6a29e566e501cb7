//! Declarations attached directly to a method.

use super::AnnotationResolver;
use crate::declaration::Declaration;
use crate::kind::DeclarationKind;
use crate::metadata::Callable;

/// Matches declarations on the callable itself.
///
/// Declarations on overridden ancestor methods are not consulted; an
/// override must repeat the declaration to keep it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodAnnotationResolver;

impl AnnotationResolver for MethodAnnotationResolver {
    fn find_declaration<'a>(
        &self,
        kind: DeclarationKind,
        callable: &'a Callable,
    ) -> Option<&'a Declaration> {
        callable.declarations().get(kind)
    }
}
