//! Ordered composition of declaration sources.

use tracing::trace;

use super::{AnnotationResolver, ClassAnnotationResolver, MethodAnnotationResolver};
use crate::declaration::Declaration;
use crate::kind::DeclarationKind;
use crate::metadata::Callable;

/// Asks each resolver in order and returns the first declaration found.
///
/// Later resolvers are not consulted once one matches, so the list order is
/// the precedence order. Put [`MethodAnnotationResolver`] before
/// [`ClassAnnotationResolver`] for the innermost declaration to win.
pub struct ListAnnotationResolver {
    resolvers: Vec<Box<dyn AnnotationResolver>>,
}

impl ListAnnotationResolver {
    pub fn new(resolvers: Vec<Box<dyn AnnotationResolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a resolver with the lowest precedence so far.
    pub fn with(mut self, resolver: impl AnnotationResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ListAnnotationResolver {
    /// Method-level declarations first, then type-level ones.
    fn default() -> Self {
        Self::new(vec![
            Box::new(MethodAnnotationResolver),
            Box::new(ClassAnnotationResolver),
        ])
    }
}

impl std::fmt::Debug for ListAnnotationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListAnnotationResolver")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

impl AnnotationResolver for ListAnnotationResolver {
    fn find_declaration<'a>(
        &self,
        kind: DeclarationKind,
        callable: &'a Callable,
    ) -> Option<&'a Declaration> {
        self.resolvers
            .iter()
            .enumerate()
            .find_map(|(position, resolver)| {
                resolver.find_declaration(kind, callable).map(|found| {
                    trace!(
                        %kind,
                        method = callable.name(),
                        declaring_type = callable.declaring_type().namespace(),
                        position,
                        "Declaration resolved"
                    );
                    found
                })
            })
    }
}
