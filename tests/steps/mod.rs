//! Step definitions for Cucumber feature tests.
//!
//! All features share [`HierarchyWorld`]: scenarios describe a small type
//! hierarchy in `Given` steps, and the world builds it on demand.

pub mod naming;
pub mod registration;
pub mod resolution;

use std::collections::HashMap;
use std::sync::Arc;

use cucumber::{given, World};
use metrics_naming::{
    Declaration, DeclarationKind, DeclarationSource, Declarations, GaugeNaming, MetricBinding,
    MetricNameRegistry, MetricsInstrumentation, NamingConfig, RegistryError, TypeInfo,
};

#[derive(Debug, Default)]
struct TypeSpec {
    parent: Option<String>,
    declarations: Declarations,
    methods: Vec<(String, Declarations)>,
}

/// Test context shared by every metric naming scenario.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct HierarchyWorld {
    types: HashMap<String, TypeSpec>,
    config: NamingConfig,
    registry: MetricNameRegistry,
    bindings: Vec<MetricBinding>,
    registration: Option<Result<Vec<MetricBinding>, RegistryError>>,
    resolved: Option<Declaration>,
    name: Option<String>,
}

impl HierarchyWorld {
    fn new() -> Self {
        Self {
            types: HashMap::new(),
            config: NamingConfig::default(),
            registry: MetricNameRegistry::new(),
            bindings: Vec::new(),
            registration: None,
            resolved: None,
            name: None,
        }
    }

    fn instrumentation(&self) -> MetricsInstrumentation {
        MetricsInstrumentation::from_config(&self.config).expect("valid naming config")
    }

    /// Build `namespace` and its ancestors from the declared specs.
    fn build(&self, namespace: &str) -> Arc<TypeInfo> {
        let spec = self
            .types
            .get(namespace)
            .unwrap_or_else(|| panic!("type {} not declared", namespace));

        let mut builder = TypeInfo::builder(namespace);
        if let Some(parent) = &spec.parent {
            builder = builder.parent(self.build(parent));
        }
        for (kind, declaration) in spec.declarations.iter() {
            builder = builder.declare(kind, declaration.clone());
        }
        for (method, declarations) in &spec.methods {
            let declarations = declarations.clone();
            builder = builder.method(method.as_str(), move |mut m| {
                for (kind, declaration) in declarations.iter() {
                    m = m.declare(kind, declaration.clone());
                }
                m
            });
        }
        builder.build()
    }

    fn spec(&mut self, namespace: &str) -> &mut TypeSpec {
        self.types
            .get_mut(namespace)
            .unwrap_or_else(|| panic!("type {} not declared", namespace))
    }

    fn method(&mut self, namespace: &str, method: &str) -> &mut Declarations {
        let spec = self.spec(namespace);
        let index = match spec.methods.iter().position(|(name, _)| name == method) {
            Some(index) => index,
            None => {
                spec.methods.push((method.to_string(), Declarations::new()));
                spec.methods.len() - 1
            }
        };
        &mut spec.methods[index].1
    }
}

/// Parse a kind from its attribute spelling, e.g. `exception_metered`.
pub fn parse_kind(s: &str) -> DeclarationKind {
    DeclarationKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == s)
        .unwrap_or_else(|| panic!("unknown declaration kind {}", s))
}

// --- Hierarchy ---

#[given(expr = "a type {string}")]
async fn given_type(world: &mut HierarchyWorld, namespace: String) {
    world.types.insert(namespace, TypeSpec::default());
}

#[given(expr = "a type {string} extending {string}")]
async fn given_subtype(world: &mut HierarchyWorld, namespace: String, parent: String) {
    assert!(world.types.contains_key(&parent), "parent {} not declared", parent);
    world.types.insert(
        namespace,
        TypeSpec {
            parent: Some(parent),
            ..TypeSpec::default()
        },
    );
}

#[given(expr = "type {string} declares {word}")]
async fn given_type_declaration(world: &mut HierarchyWorld, namespace: String, kind: String) {
    world
        .spec(&namespace)
        .declarations
        .insert(parse_kind(&kind), Declaration::new());
}

#[given(expr = "type {string} declares {word} named {string}")]
async fn given_named_type_declaration(
    world: &mut HierarchyWorld,
    namespace: String,
    kind: String,
    name: String,
) {
    world
        .spec(&namespace)
        .declarations
        .insert(parse_kind(&kind), Declaration::named(name));
}

// --- Methods ---

#[given(expr = "type {string} has a method {string}")]
async fn given_method(world: &mut HierarchyWorld, namespace: String, method: String) {
    world.method(&namespace, &method);
}

#[given(expr = "type {string} has a method {string} declaring {word}")]
async fn given_method_declaration(
    world: &mut HierarchyWorld,
    namespace: String,
    method: String,
    kind: String,
) {
    world
        .method(&namespace, &method)
        .insert(parse_kind(&kind), Declaration::new());
}

#[given(expr = "type {string} has a method {string} declaring {word} named {string}")]
async fn given_named_method_declaration(
    world: &mut HierarchyWorld,
    namespace: String,
    method: String,
    kind: String,
    name: String,
) {
    world
        .method(&namespace, &method)
        .insert(parse_kind(&kind), Declaration::named(name));
}

#[given(expr = "type {string} has a method {string} declaring an absolute {word} named {string}")]
async fn given_absolute_method_declaration(
    world: &mut HierarchyWorld,
    namespace: String,
    method: String,
    kind: String,
    name: String,
) {
    world
        .method(&namespace, &method)
        .insert(parse_kind(&kind), Declaration::absolute(name));
}

#[given(expr = "type {string} has a method {string} declaring an absolute {word} without a name")]
async fn given_unnamed_absolute_method_declaration(
    world: &mut HierarchyWorld,
    namespace: String,
    method: String,
    kind: String,
) {
    world
        .method(&namespace, &method)
        .insert(parse_kind(&kind), Declaration::new().with_absolute(true));
}

#[given(expr = "type {string} has a method {string} declaring a monotonic counter")]
async fn given_monotonic_counter(world: &mut HierarchyWorld, namespace: String, method: String) {
    world.method(&namespace, &method).insert(
        DeclarationKind::Counted,
        Declaration::new().with_monotonic(true),
    );
}

// --- Configuration ---

#[given(expr = "the {word} gauge naming policy")]
async fn given_gauge_naming(world: &mut HierarchyWorld, policy: String) {
    world.config.gauge_naming = match policy.as_str() {
        "declaring_class" => GaugeNaming::DeclaringClass,
        "instance_class" => GaugeNaming::InstanceClass,
        other => panic!("unknown gauge naming policy {}", other),
    };
}

#[given(expr = "the resolution order {string}")]
async fn given_resolution_order(world: &mut HierarchyWorld, order: String) {
    world.config.resolution_order = order
        .split(',')
        .map(|source| match source.trim() {
            "method" => DeclarationSource::Method,
            "class" => DeclarationSource::Class,
            other => panic!("unknown declaration source {}", other),
        })
        .collect();
}
