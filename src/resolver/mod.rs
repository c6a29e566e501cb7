//! Declaration lookup for callables.
//!
//! Each elementary resolver inspects one declaration source. They are
//! combined with [`ListAnnotationResolver`], which asks each source in order
//! and keeps the first match:
//!
//! ```
//! use metrics_naming::{
//!     AnnotationResolver, Callable, ClassAnnotationResolver, Declaration, DeclarationKind,
//!     ListAnnotationResolver, MethodAnnotationResolver, TypeInfo,
//! };
//!
//! let ty = TypeInfo::builder("pkg.Service")
//!     .declare(DeclarationKind::Timed, Declaration::new())
//!     .method("handle", |m| m.declare(DeclarationKind::Timed, Declaration::absolute("handle")))
//!     .build();
//! let handle = Callable::find(&ty, "handle").unwrap();
//!
//! let resolver = ListAnnotationResolver::new(vec![
//!     Box::new(MethodAnnotationResolver),
//!     Box::new(ClassAnnotationResolver),
//! ]);
//! let found = resolver.find_declaration(DeclarationKind::Timed, &handle).unwrap();
//! assert!(found.is_absolute());
//! ```

mod class;
mod list;
mod method;

pub use class::ClassAnnotationResolver;
pub use list::ListAnnotationResolver;
pub use method::MethodAnnotationResolver;

use std::sync::Arc;

use crate::declaration::Declaration;
use crate::kind::DeclarationKind;
use crate::metadata::Callable;

/// Finds the declaration of a given kind that applies to a callable.
///
/// Absence is `None`, never an error.
pub trait AnnotationResolver: Send + Sync {
    fn find_declaration<'a>(
        &self,
        kind: DeclarationKind,
        callable: &'a Callable,
    ) -> Option<&'a Declaration>;
}

impl<T: AnnotationResolver + ?Sized> AnnotationResolver for Box<T> {
    fn find_declaration<'a>(
        &self,
        kind: DeclarationKind,
        callable: &'a Callable,
    ) -> Option<&'a Declaration> {
        (**self).find_declaration(kind, callable)
    }
}

impl<T: AnnotationResolver + ?Sized> AnnotationResolver for Arc<T> {
    fn find_declaration<'a>(
        &self,
        kind: DeclarationKind,
        callable: &'a Callable,
    ) -> Option<&'a Declaration> {
        (**self).find_declaration(kind, callable)
    }
}
