//! Registration step definitions.

use cucumber::{then, when};
use metrics_naming::RegistryError;

use super::HierarchyWorld;

#[when(expr = "I register {string}")]
async fn when_register(world: &mut HierarchyWorld, namespace: String) {
    let ty = world.build(&namespace);
    world.registration = Some(world.instrumentation().register(&world.registry, &ty));
}

#[then("the registration succeeds")]
async fn then_registration_succeeds(world: &mut HierarchyWorld) {
    match &world.registration {
        Some(Ok(_)) => {}
        other => panic!("expected a successful registration, got {:?}", other),
    }
}

#[then(expr = "the registration fails because {string} already exists")]
async fn then_registration_duplicate(world: &mut HierarchyWorld, expected: String) {
    match &world.registration {
        Some(Err(RegistryError::DuplicateMetricName { name, .. })) => assert_eq!(name, &expected),
        other => panic!("expected a duplicate name error, got {:?}", other),
    }
}

#[then("the registration fails because the name is empty")]
async fn then_registration_empty(world: &mut HierarchyWorld) {
    match &world.registration {
        Some(Err(RegistryError::EmptyMetricName { .. })) => {}
        other => panic!("expected an empty name error, got {:?}", other),
    }
}

#[then(expr = "the registry contains {string}")]
async fn then_registry_contains(world: &mut HierarchyWorld, name: String) {
    assert!(
        world.registry.contains(&name),
        "registry holds {:?}",
        world.registry.names()
    );
}

#[then(expr = "the registry holds {int} metric(s)")]
async fn then_registry_len(world: &mut HierarchyWorld, count: usize) {
    assert_eq!(world.registry.len(), count);
}
