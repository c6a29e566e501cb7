//! Procedural macros producing instrumentation declaration tables.
//!
//! # Example
//!
//! ```rust,ignore
//! use metrics_naming::{instrumented, Instrumented};
//!
//! #[instrumented(namespace = "pkg.QueueWorker", timed)]
//! impl QueueWorker {
//!     fn poll(&self) { /* timed by the blanket declaration */ }
//!
//!     #[counted(monotonic)]
//!     fn ack(&self) { /* ... */ }
//!
//!     #[gauge(name = "depth")]
//!     fn depth(&self) -> usize { /* ... */ }
//! }
//!
//! #[instrumented(namespace = "pkg.PriorityWorker", parent = QueueWorker)]
//! impl PriorityWorker {
//!     #[metered(name = "requests.served", absolute)]
//!     fn serve(&self) { /* ... */ }
//! }
//!
//! let info = PriorityWorker::type_info();
//! assert_eq!(info.parent().unwrap().namespace(), "pkg.QueueWorker");
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Attribute, Ident, ImplItem, ItemImpl, LitBool, LitStr, Meta, Token, Type,
};

/// Attribute names recognised as declarations, in kind order.
const KINDS: [&str; 5] = ["timed", "metered", "counted", "gauge", "exception_metered"];

/// Builds the declaration table for an inherent impl block.
///
/// # Attributes
/// - `namespace = "pkg.Type"` - Metric namespace (default: module path and type name, dot-separated)
/// - `parent = Type` - Parent type, itself `#[instrumented]`
/// - `timed`, `metered(...)`, `counted(...)`, `gauge(...)`, `exception_metered(...)` -
///   blanket declarations for every method of the type
///
/// Methods taking `self` are recorded. Method-level declarations use the
/// same attribute names, bare or path-qualified, each accepting
/// `name = "..."` and `absolute`; `counted` also accepts `monotonic`.
/// Gauge methods take no arguments besides `self`.
#[proc_macro_attribute]
pub fn instrumented(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as InstrumentedArgs);
    let input = parse_macro_input!(item as ItemImpl);

    match expand_instrumented(args, input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

/// Marks a method as timed.
///
/// # Example
/// ```rust,ignore
/// #[timed(name = "latency")]
/// fn handle(&self) { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn timed(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Consumed by #[instrumented]; marker only
    item
}

/// Marks a method as metered.
#[proc_macro_attribute]
pub fn metered(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Marks a method as counted.
///
/// # Example
/// ```rust,ignore
/// #[counted(monotonic)]
/// fn ack(&self) { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn counted(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Marks a method as a gauge. Gauges are also found on inherited methods.
#[proc_macro_attribute]
pub fn gauge(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Marks a method as exception metered.
#[proc_macro_attribute]
pub fn exception_metered(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

struct InstrumentedArgs {
    namespace: Option<String>,
    parent: Option<Type>,
    declarations: Vec<(String, DeclarationArgs)>,
}

impl syn::parse::Parse for InstrumentedArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut namespace = None;
        let mut parent = None;
        let mut declarations: Vec<(String, DeclarationArgs)> = Vec::new();

        while !input.is_empty() {
            let ident: Ident = input.call(Ident::parse_any)?;
            let key = ident.to_string();

            match key.as_str() {
                "namespace" => {
                    input.parse::<Token![=]>()?;
                    let value: LitStr = input.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new(value.span(), "namespace must not be empty"));
                    }
                    namespace = Some(value.value());
                }
                "parent" => {
                    input.parse::<Token![=]>()?;
                    parent = Some(input.parse()?);
                }
                kind if KINDS.contains(&kind) => {
                    let args = if input.peek(syn::token::Paren) {
                        let content;
                        syn::parenthesized!(content in input);
                        content.parse::<DeclarationArgs>()?
                    } else {
                        DeclarationArgs::default()
                    };
                    args.check(&ident)?;
                    if declarations.iter().any(|(k, _)| k == kind) {
                        return Err(syn::Error::new(ident.span(), "duplicate declaration kind"));
                    }
                    declarations.push((key.clone(), args));
                }
                _ => return Err(syn::Error::new(ident.span(), "unknown attribute")),
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(InstrumentedArgs {
            namespace,
            parent,
            declarations,
        })
    }
}

#[derive(Debug, Default, PartialEq)]
struct DeclarationArgs {
    name: Option<String>,
    absolute: bool,
    monotonic: Option<Ident>,
}

impl DeclarationArgs {
    /// Reject arguments that do not apply to the kind.
    fn check(&self, kind: &Ident) -> syn::Result<()> {
        if let Some(monotonic) = &self.monotonic {
            if kind != "counted" {
                return Err(syn::Error::new(
                    monotonic.span(),
                    "monotonic only applies to counted",
                ));
            }
        }
        Ok(())
    }
}

impl syn::parse::Parse for DeclarationArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut args = DeclarationArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "name" => {
                    input.parse::<Token![=]>()?;
                    let value: LitStr = input.parse()?;
                    args.name = Some(value.value());
                }
                "absolute" => {
                    args.absolute = parse_flag(input)?;
                }
                "monotonic" => {
                    if parse_flag(input)? {
                        args.monotonic = Some(ident);
                    }
                }
                _ => return Err(syn::Error::new(ident.span(), "unknown attribute")),
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

/// `flag` or `flag = true|false`.
fn parse_flag(input: syn::parse::ParseStream) -> syn::Result<bool> {
    if input.peek(Token![=]) {
        input.parse::<Token![=]>()?;
        let value: LitBool = input.parse()?;
        Ok(value.value)
    } else {
        Ok(true)
    }
}

fn expand_instrumented(args: InstrumentedArgs, mut input: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[instrumented] must be placed on an inherent impl block",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[instrumented] does not support generic impl blocks",
        ));
    }

    let self_ty = input.self_ty.clone();
    let namespace = match &args.namespace {
        Some(namespace) => quote! { #namespace },
        None => {
            let type_name = type_name(&self_ty)?;
            quote! { format!("{}.{}", module_path!().replace("::", "."), #type_name) }
        }
    };

    let parent = args.parent.as_ref().map(|parent| {
        quote! { .parent(<#parent as ::metrics_naming::Instrumented>::type_info()) }
    });

    let type_declarations: Vec<_> = args
        .declarations
        .iter()
        .map(|(kind, declaration)| {
            let kind = kind_tokens(kind);
            let declaration = declaration_tokens(declaration);
            quote! { .declare(#kind, #declaration) }
        })
        .collect();

    let mut methods = Vec::new();
    for item in &mut input.items {
        if let ImplItem::Fn(method) = item {
            let declarations = take_declarations(&mut method.attrs)?;

            if method.sig.receiver().is_none() {
                if let Some((kind, _)) = declarations.first() {
                    return Err(syn::Error::new_spanned(
                        &method.sig.ident,
                        format!("#[{}] requires a method taking self", kind),
                    ));
                }
                continue;
            }

            let is_gauge = args.declarations.iter().any(|(k, _)| k == "gauge")
                || declarations.iter().any(|(k, _)| k == "gauge");
            if is_gauge && method.sig.inputs.len() > 1 {
                return Err(syn::Error::new_spanned(
                    &method.sig.inputs,
                    "gauge methods must take no arguments besides self",
                ));
            }

            let method_name = method.sig.ident.unraw().to_string();
            let declares: Vec<_> = declarations
                .iter()
                .map(|(kind, declaration)| {
                    let kind = kind_tokens(kind);
                    let declaration = declaration_tokens(declaration);
                    quote! { .declare(#kind, #declaration) }
                })
                .collect();

            methods.push(quote! {
                .method(#method_name, |m| m #(#declares)*)
            });
        }
    }

    Ok(quote! {
        #input

        impl ::metrics_naming::Instrumented for #self_ty {
            fn type_info() -> ::std::sync::Arc<::metrics_naming::TypeInfo> {
                static TYPE_INFO: ::std::sync::OnceLock<::std::sync::Arc<::metrics_naming::TypeInfo>> =
                    ::std::sync::OnceLock::new();

                ::std::sync::Arc::clone(TYPE_INFO.get_or_init(|| {
                    ::metrics_naming::TypeInfo::builder(#namespace)
                        #parent
                        #(#type_declarations)*
                        #(#methods)*
                        .build()
                }))
            }
        }

        ::metrics_naming::__private::inventory::submit! {
            ::metrics_naming::Registration::new(
                <#self_ty as ::metrics_naming::Instrumented>::type_info
            )
        }
    })
}

/// The declaration kind an attribute names, matched on its last path segment
/// so `#[gauge]` and `#[metrics_naming::gauge]` are both recognised.
fn marker_kind(attr: &Attribute) -> Option<(&'static str, &Ident)> {
    let segment = attr.path().segments.last()?;
    KINDS
        .iter()
        .find(|kind| segment.ident == **kind)
        .map(|kind| (*kind, &segment.ident))
}

/// Remove declaration attributes from a method, returning them parsed.
fn take_declarations(attrs: &mut Vec<Attribute>) -> syn::Result<Vec<(String, DeclarationArgs)>> {
    let mut declarations: Vec<(String, DeclarationArgs)> = Vec::new();

    for attr in attrs.iter() {
        let Some((kind, ident)) = marker_kind(attr) else {
            continue;
        };

        let args = match &attr.meta {
            Meta::Path(_) => DeclarationArgs::default(),
            Meta::List(list) => syn::parse2::<DeclarationArgs>(list.tokens.clone())?,
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("expected #[{}] or #[{}(...)]", kind, kind),
                ))
            }
        };
        args.check(ident)?;
        if declarations.iter().any(|(k, _)| k == kind) {
            return Err(syn::Error::new_spanned(attr, "duplicate declaration kind"));
        }
        declarations.push((kind.to_string(), args));
    }

    attrs.retain(|attr| marker_kind(attr).is_none());
    Ok(declarations)
}

fn type_name(ty: &Type) -> syn::Result<String> {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.unraw().to_string())
            .ok_or_else(|| syn::Error::new_spanned(ty, "expected a type name")),
        _ => Err(syn::Error::new_spanned(
            ty,
            "namespace = \"...\" is required for this type",
        )),
    }
}

fn kind_tokens(kind: &str) -> TokenStream2 {
    match kind {
        "timed" => quote! { ::metrics_naming::DeclarationKind::Timed },
        "metered" => quote! { ::metrics_naming::DeclarationKind::Metered },
        "counted" => quote! { ::metrics_naming::DeclarationKind::Counted },
        "gauge" => quote! { ::metrics_naming::DeclarationKind::Gauge },
        _ => quote! { ::metrics_naming::DeclarationKind::ExceptionMetered },
    }
}

fn declaration_tokens(args: &DeclarationArgs) -> TokenStream2 {
    let name = args.name.clone().unwrap_or_default();
    let absolute = args.absolute;
    let monotonic = args.monotonic.is_some();
    quote! {
        ::metrics_naming::Declaration::named(#name)
            .with_absolute(#absolute)
            .with_monotonic(#monotonic)
    }
}
