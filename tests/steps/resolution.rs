//! Declaration resolution step definitions.

use cucumber::{then, when};
use metrics_naming::{AnnotationResolver, Callable};

use super::{parse_kind, HierarchyWorld};

#[when(expr = "I resolve {word} for method {string} of {string}")]
async fn when_resolve(world: &mut HierarchyWorld, kind: String, method: String, namespace: String) {
    let ty = world.build(&namespace);
    let callable = Callable::find(&ty, &method)
        .unwrap_or_else(|| panic!("method {} not declared on {}", method, namespace));

    world.resolved = world
        .instrumentation()
        .resolver()
        .find_declaration(parse_kind(&kind), &callable)
        .cloned();
}

#[then("no declaration is resolved")]
async fn then_nothing_resolved(world: &mut HierarchyWorld) {
    assert!(world.resolved.is_none(), "resolved {:?}", world.resolved);
}

#[then("the resolved declaration is unnamed")]
async fn then_resolved_unnamed(world: &mut HierarchyWorld) {
    let declaration = world.resolved.as_ref().expect("a declaration");
    assert!(declaration.name().is_empty());
}

#[then(expr = "the resolved declaration is named {string}")]
async fn then_resolved_named(world: &mut HierarchyWorld, name: String) {
    let declaration = world.resolved.as_ref().expect("a declaration");
    assert_eq!(declaration.name(), name);
}

#[then("the resolved declaration is absolute")]
async fn then_resolved_absolute(world: &mut HierarchyWorld) {
    let declaration = world.resolved.as_ref().expect("a declaration");
    assert!(declaration.is_absolute());
}
