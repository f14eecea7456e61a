//! Derive macro for fillforge descriptors.

use proc_macro::TokenStream;
use syn::parse::Parser;
use syn::{parse_macro_input, Attribute, DeriveInput, Expr, Lit, Meta};

mod fill;

/// Derives the `Fill` trait, emitting a cached `TypeDescriptor` for the
/// type.
///
/// Supported on structs with named fields and on enums whose variants are
/// all unit-like. Attributes:
///
/// - `#[fill(no_default)]` (struct): do not wire `Default::default` as the
///   zero-argument constructor.
/// - `#[fill(scalar)]` (struct): describe the type as a scalar, fillable
///   only through a registered value source.
/// - `#[fill(constructor = "name(Type, ...)")]` (struct, repeatable):
///   register a parameterized constructor. A bare name resolves to an
///   associated function of the type.
/// - `#[fill(skip)]` (field): exclude the field from the settable
///   properties.
#[proc_macro_derive(Fill, attributes(fill))]
pub fn derive_fill(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fill::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Collects the nested metas of every `#[fill(...)]` attribute.
fn fill_metas(attrs: &[Attribute]) -> Vec<Meta> {
    let mut metas = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("fill") {
            continue;
        }
        if let Meta::List(meta_list) = &attr.meta {
            let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
            if let Ok(nested) = parser.parse2(meta_list.tokens.clone()) {
                metas.extend(nested);
            }
        }
    }
    metas
}

fn has_fill_flag(attrs: &[Attribute], name: &str) -> bool {
    fill_metas(attrs)
        .iter()
        .any(|meta| matches!(meta, Meta::Path(path) if path.is_ident(name)))
}

fn fill_string_values(attrs: &[Attribute], key: &str) -> Vec<String> {
    let mut values = Vec::new();
    for meta in fill_metas(attrs) {
        if let Meta::NameValue(nv) = meta {
            if nv.path.is_ident(key) {
                if let Expr::Lit(expr_lit) = &nv.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        values.push(lit_str.value());
                    }
                }
            }
        }
    }
    values
}
