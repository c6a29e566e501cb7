//! Blanket declarations attached to a method's declaring type.

use super::AnnotationResolver;
use crate::declaration::Declaration;
use crate::kind::DeclarationKind;
use crate::metadata::Callable;

/// Matches declarations on the callable's declaring type, which apply to
/// every method that type declares.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassAnnotationResolver;

impl AnnotationResolver for ClassAnnotationResolver {
    fn find_declaration<'a>(
        &self,
        kind: DeclarationKind,
        callable: &'a Callable,
    ) -> Option<&'a Declaration> {
        callable.declaring_type().declarations().get(kind)
    }
}
