//! Naming step definitions.

use cucumber::gherkin::Step;
use cucumber::{then, when};
use metrics_naming::{AnnotationResolver, Callable, MetricNamer};

use super::{parse_kind, HierarchyWorld};

#[when(expr = "I plan {string}")]
async fn when_plan(world: &mut HierarchyWorld, namespace: String) {
    let ty = world.build(&namespace);
    world.bindings = world.instrumentation().plan(&ty);
}

#[when(expr = "I name the {word} of method {string} for an instance of {string}")]
async fn when_name(world: &mut HierarchyWorld, kind: String, method: String, namespace: String) {
    let kind = parse_kind(&kind);
    let instance = world.build(&namespace);
    let instrumentation = world.instrumentation();

    let callable = Callable::hierarchy_of(&instance)
        .into_iter()
        .find(|c| c.name() == method)
        .unwrap_or_else(|| panic!("method {} not reachable from {}", method, namespace));
    let declaration = instrumentation
        .resolver()
        .find_declaration(kind, &callable)
        .unwrap_or_else(|| panic!("no {} declaration for {}", kind, method));

    world.name = Some(
        instrumentation
            .namer()
            .name_for(kind, &instance, &callable, declaration),
    );
}

#[then("the planned metric names are:")]
async fn then_planned_names(world: &mut HierarchyWorld, step: &Step) {
    let table = step.table.as_ref().expect("expected a table of metric names");
    let expected: Vec<&str> = table.rows.iter().map(|row| row[0].as_str()).collect();
    let actual: Vec<&str> = world.bindings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(actual, expected);
}

#[then("no metrics are planned")]
async fn then_nothing_planned(world: &mut HierarchyWorld) {
    assert!(
        world.bindings.is_empty(),
        "unexpected bindings: {:?}",
        world.bindings
    );
}

#[then(expr = "metric {string} is declared by {string}")]
async fn then_declared_by(world: &mut HierarchyWorld, name: String, namespace: String) {
    let binding = world
        .bindings
        .iter()
        .find(|b| b.name == name)
        .unwrap_or_else(|| panic!("metric {} not planned", name));
    assert_eq!(binding.declaring_type, namespace);
}

#[then(expr = "the metric name is {string}")]
async fn then_metric_name(world: &mut HierarchyWorld, expected: String) {
    assert_eq!(world.name.as_deref(), Some(expected.as_str()));
}

#[then("the metric name is empty")]
async fn then_metric_name_empty(world: &mut HierarchyWorld) {
    assert_eq!(world.name.as_deref(), Some(""));
}
