//! Sample type hierarchies for tests.

use std::sync::Arc;

use crate::declaration::Declaration;
use crate::kind::DeclarationKind;
use crate::metadata::TypeInfo;

/// Parent `pkg.P` declaring an unnamed gauge `g`, and two subtypes
/// `pkg.B1` and `pkg.B2` inheriting it.
pub fn gauge_family() -> (Arc<TypeInfo>, Arc<TypeInfo>, Arc<TypeInfo>) {
    let parent = TypeInfo::builder("pkg.P")
        .method("g", |m| m.declare(DeclarationKind::Gauge, Declaration::new()))
        .build();
    let b1 = TypeInfo::builder("pkg.B1").parent(Arc::clone(&parent)).build();
    let b2 = TypeInfo::builder("pkg.B2").parent(Arc::clone(&parent)).build();
    (parent, b1, b2)
}

/// `pkg.MixedAnnotated`: a blanket timer, one metered method and one method
/// with its own absolute timer named `mixed.package_private`.
pub fn mixed_annotated() -> Arc<TypeInfo> {
    TypeInfo::builder("pkg.MixedAnnotated")
        .declare(DeclarationKind::Timed, Declaration::new())
        .method("public_method", |m| m)
        .method("protected_method", |m| {
            m.declare(DeclarationKind::Metered, Declaration::new())
        })
        .method("package_private_method", |m| {
            m.declare(
                DeclarationKind::Timed,
                Declaration::absolute("mixed.package_private"),
            )
        })
        .build()
}
