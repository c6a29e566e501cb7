//! Static type metadata: types, their declared methods, and callable views.
//!
//! Metadata is built once per type, either by hand through [`TypeInfo::builder`]
//! or by the `#[instrumented]` attribute macro, and is immutable afterwards.
//! [`Callable`] values are cheap views into that metadata, created per wiring
//! pass.
//!
//! # Example
//!
//! ```
//! use metrics_naming::{Callable, Declaration, DeclarationKind, TypeInfo};
//!
//! let parent = TypeInfo::builder("pkg.P")
//!     .method("g", |m| m.declare(DeclarationKind::Gauge, Declaration::new()))
//!     .build();
//! let child = TypeInfo::builder("pkg.B1").parent(parent).build();
//!
//! let inherited = Callable::hierarchy_of(&child);
//! assert_eq!(inherited.len(), 1);
//! assert_eq!(inherited[0].declaring_type().namespace(), "pkg.P");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::declaration::{Declaration, Declarations};
use crate::kind::DeclarationKind;

/// A method declared on a type, with its own declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    name: String,
    declarations: Declarations,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Declarations::new(),
        }
    }

    /// Attach a declaration of the given kind to this method.
    pub fn declare(mut self, kind: DeclarationKind, declaration: Declaration) -> Self {
        self.declarations.insert(kind, declaration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }
}

/// Metadata for one type: its namespace, parent, blanket declarations and
/// declared methods.
#[derive(Debug)]
pub struct TypeInfo {
    namespace: String,
    parent: Option<Arc<TypeInfo>>,
    declarations: Declarations,
    methods: Vec<MethodInfo>,
}

impl TypeInfo {
    /// Start building metadata for the type with the given qualified name.
    pub fn builder(namespace: impl Into<String>) -> TypeInfoBuilder {
        TypeInfoBuilder {
            namespace: namespace.into(),
            parent: None,
            declarations: Declarations::new(),
            methods: Vec::new(),
        }
    }

    /// Qualified name of the type, used as the metric namespace segment.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn parent(&self) -> Option<&Arc<TypeInfo>> {
        self.parent.as_ref()
    }

    /// Declarations attached to the type as a whole.
    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Iterate over this type followed by its ancestors, nearest first.
    pub fn ancestry(&self) -> impl Iterator<Item = &TypeInfo> {
        std::iter::successors(Some(self), |ty| ty.parent.as_deref())
    }

    fn method_index(&self, name: &str) -> Option<usize> {
        self.methods.iter().position(|m| m.name == name)
    }
}

/// Builder for [`TypeInfo`].
#[derive(Debug)]
pub struct TypeInfoBuilder {
    namespace: String,
    parent: Option<Arc<TypeInfo>>,
    declarations: Declarations,
    methods: Vec<MethodInfo>,
}

impl TypeInfoBuilder {
    pub fn parent(mut self, parent: Arc<TypeInfo>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attach a blanket declaration to the type.
    pub fn declare(mut self, kind: DeclarationKind, declaration: Declaration) -> Self {
        self.declarations.insert(kind, declaration);
        self
    }

    /// Declare a method, configuring its declarations in the closure.
    ///
    /// Declaring the same method name twice replaces the earlier entry.
    pub fn method(self, name: impl Into<String>, f: impl FnOnce(MethodInfo) -> MethodInfo) -> Self {
        self.with_method(f(MethodInfo::new(name)))
    }

    pub fn with_method(mut self, method: MethodInfo) -> Self {
        match self.methods.iter_mut().find(|m| m.name == method.name) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
        self
    }

    pub fn build(self) -> Arc<TypeInfo> {
        Arc::new(TypeInfo {
            namespace: self.namespace,
            parent: self.parent,
            declarations: self.declarations,
            methods: self.methods,
        })
    }
}

/// A method as seen from a lookup: its name, the type that declares it, and
/// the ancestor types whose same-named methods it overrides.
#[derive(Debug, Clone)]
pub struct Callable {
    declaring_type: Arc<TypeInfo>,
    index: usize,
    overrides: Vec<Arc<TypeInfo>>,
}

impl Callable {
    /// The method `name` as declared on `ty` itself, if any.
    pub fn find(ty: &Arc<TypeInfo>, name: &str) -> Option<Callable> {
        ty.method_index(name).map(|index| Callable {
            declaring_type: Arc::clone(ty),
            index,
            overrides: overridden_ancestors(ty, name),
        })
    }

    /// Methods declared on `ty` itself, in declaration order.
    pub fn declared_on(ty: &Arc<TypeInfo>) -> Vec<Callable> {
        (0..ty.methods.len())
            .map(|index| Callable {
                declaring_type: Arc::clone(ty),
                index,
                overrides: overridden_ancestors(ty, &ty.methods[index].name),
            })
            .collect()
    }

    /// Flattened view of every method reachable on `ty`, including inherited
    /// ones.
    ///
    /// The most-derived definition of a method name wins; the ancestors it
    /// shadows become its override chain. Methods of `ty` come first, then
    /// those first introduced by each ancestor in turn.
    pub fn hierarchy_of(ty: &Arc<TypeInfo>) -> Vec<Callable> {
        let mut callables: Vec<Callable> = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();

        let mut current = Some(ty);
        while let Some(owner) = current {
            for (index, method) in owner.methods.iter().enumerate() {
                match seen.get(method.name.as_str()) {
                    Some(&slot) => callables[slot].overrides.push(Arc::clone(owner)),
                    None => {
                        seen.insert(method.name.as_str(), callables.len());
                        callables.push(Callable {
                            declaring_type: Arc::clone(owner),
                            index,
                            overrides: Vec::new(),
                        });
                    }
                }
            }
            current = owner.parent.as_ref();
        }

        callables
    }

    /// Simple method name.
    pub fn name(&self) -> &str {
        &self.method().name
    }

    /// The type that declares this method.
    pub fn declaring_type(&self) -> &Arc<TypeInfo> {
        &self.declaring_type
    }

    /// Declarations attached directly to this method.
    pub fn declarations(&self) -> &Declarations {
        &self.method().declarations
    }

    /// Ancestor types declaring a method of the same name, nearest first.
    ///
    /// Informational only, for diagnostics and tooling. Resolvers never read
    /// it: a method's declarations are not inherited through overrides.
    pub fn overrides(&self) -> &[Arc<TypeInfo>] {
        &self.overrides
    }

    fn method(&self) -> &MethodInfo {
        &self.declaring_type.methods[self.index]
    }
}

fn overridden_ancestors(ty: &Arc<TypeInfo>, name: &str) -> Vec<Arc<TypeInfo>> {
    let mut chain = Vec::new();
    let mut current = ty.parent.as_ref();
    while let Some(ancestor) = current {
        if ancestor.method_index(name).is_some() {
            chain.push(Arc::clone(ancestor));
        }
        current = ancestor.parent.as_ref();
    }
    chain
}

/// Types whose metadata is produced by the `#[instrumented]` attribute.
pub trait Instrumented {
    /// Metadata for this type. Built on first use and shared afterwards.
    fn type_info() -> Arc<TypeInfo>;
}

/// Link-time registration of an instrumented type.
///
/// Submitted by the `#[instrumented]` attribute; collected by
/// [`TypeCatalog::discover`].
pub struct Registration {
    type_info: fn() -> Arc<TypeInfo>,
}

impl Registration {
    pub const fn new(type_info: fn() -> Arc<TypeInfo>) -> Self {
        Self { type_info }
    }

    pub fn type_info(&self) -> Arc<TypeInfo> {
        (self.type_info)()
    }
}

inventory::collect!(Registration);

/// Lookup of type metadata by namespace.
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<TypeInfo>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every type registered by `#[instrumented]` in the program.
    pub fn discover() -> Self {
        let mut catalog = Self::new();
        for registration in inventory::iter::<Registration> {
            catalog.insert(registration.type_info());
        }
        catalog
    }

    /// Add a type. Namespaces are expected to be unique; a second type with
    /// the same namespace is ignored.
    pub fn insert(&mut self, ty: Arc<TypeInfo>) -> bool {
        if self.types.contains_key(ty.namespace()) {
            warn!(namespace = ty.namespace(), "Type already catalogued, ignoring duplicate");
            return false;
        }
        self.types.insert(ty.namespace().to_string(), ty);
        true
    }

    pub fn get(&self, namespace: &str) -> Option<&Arc<TypeInfo>> {
        self.types.get(namespace)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeInfo>> {
        self.types.values()
    }
}
