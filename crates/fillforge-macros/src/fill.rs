//! `#[derive(Fill)]` implementation.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DataEnum, DataStruct, DeriveInput, Error, Fields};

use crate::{fill_string_values, has_fill_flag};

pub fn expand_derive(input: DeriveInput) -> Result<TokenStream, Error> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Fill)] does not support generic types",
        ));
    }
    match &input.data {
        Data::Struct(data) => expand_struct(&input, data),
        Data::Enum(data) => expand_enum(&input, data),
        Data::Union(_) => Err(Error::new_spanned(
            &input,
            "#[derive(Fill)] only works on structs and enums",
        )),
    }
}

fn expand_struct(input: &DeriveInput, data: &DataStruct) -> Result<TokenStream, Error> {
    let name = &input.ident;
    let name_str = name.to_string();
    let no_default = has_fill_flag(&input.attrs, "no_default");
    let constructor_specs = fill_string_values(&input.attrs, "constructor");

    let with_default = if no_default {
        TokenStream::new()
    } else {
        quote! { .with_default(<#name as ::std::default::Default>::default) }
    };

    if has_fill_flag(&input.attrs, "scalar") {
        if !constructor_specs.is_empty() {
            return Err(Error::new_spanned(
                input,
                "#[fill(constructor = ...)] is only valid on composite types",
            ));
        }
        return Ok(wrap_impl(
            name,
            quote! {
                ::fillforge::__internal::TypeDescriptor::scalar::<#name>(#name_str)
                    #with_default
            },
        ));
    }

    let fields = match &data.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(Error::new_spanned(
                input,
                "#[derive(Fill)] requires named fields; tuple structs need #[fill(scalar)]",
            ))
        }
    };

    let properties: Vec<TokenStream> = fields
        .iter()
        .filter(|field| !has_fill_flag(&field.attrs, "skip"))
        .map(|field| {
            let field_ident = field.ident.as_ref().unwrap();
            let field_str = field_ident.to_string();
            let field_ty = &field.ty;
            quote! {
                .with_property(::fillforge::__internal::PropertyDescriptor::of(
                    #field_str,
                    |target: &mut #name, value: #field_ty| { target.#field_ident = value; },
                ))
            }
        })
        .collect();

    let constructors = constructor_specs
        .iter()
        .map(|spec| expand_constructor(input, spec))
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(wrap_impl(
        name,
        quote! {
            ::fillforge::__internal::TypeDescriptor::composite::<#name>(#name_str)
                #(#properties)*
                #(#constructors)*
                #with_default
        },
    ))
}

fn expand_constructor(input: &DeriveInput, spec: &str) -> Result<TokenStream, Error> {
    let (path_str, args_str) = spec
        .split_once('(')
        .ok_or_else(|| constructor_error(input, spec))?;
    let args_str = args_str
        .strip_suffix(')')
        .ok_or_else(|| constructor_error(input, spec))?;

    let path_str = path_str.trim();
    let qualified = if path_str.contains("::") {
        path_str.to_string()
    } else {
        format!("Self::{path_str}")
    };
    let path: syn::Path = syn::parse_str(&qualified).map_err(|_| constructor_error(input, spec))?;

    let param_types: Vec<syn::Type> = split_top_level(args_str)
        .iter()
        .map(|ty| syn::parse_str(ty).map_err(|_| constructor_error(input, spec)))
        .collect::<Result<Vec<_>, Error>>()?;

    if param_types.is_empty() {
        return Err(Error::new_spanned(
            input,
            "a parameterized constructor needs at least one parameter; \
             zero-argument construction comes from Default",
        ));
    }

    let arg_idents: Vec<_> = (0..param_types.len())
        .map(|index| format_ident!("arg{}", index))
        .collect();

    Ok(quote! {
        .with_constructor(::fillforge::__internal::ConstructorDescriptor::new(
            ::std::vec![
                #( ::fillforge::__internal::TypeRef::of::<#param_types>() ),*
            ],
            |mut args: ::fillforge::__internal::ArgList| {
                #( let #arg_idents: #param_types = args.take()?; )*
                ::std::result::Result::Ok(
                    ::std::boxed::Box::new(#path( #( #arg_idents ),* ))
                        as ::fillforge::__internal::Value,
                )
            },
        ))
    })
}

fn constructor_error(input: &DeriveInput, spec: &str) -> Error {
    Error::new_spanned(
        input,
        format!("invalid constructor spec `{spec}`; expected `name(Type, ...)`"),
    )
}

fn expand_enum(input: &DeriveInput, data: &DataEnum) -> Result<TokenStream, Error> {
    let name = &input.ident;
    let name_str = name.to_string();

    if data.variants.is_empty() {
        return Err(Error::new_spanned(
            input,
            "#[derive(Fill)] requires at least one variant",
        ));
    }

    let variants: Vec<TokenStream> = data
        .variants
        .iter()
        .map(|variant| {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(Error::new_spanned(
                    variant,
                    "#[derive(Fill)] enum variants must be unit-like",
                ));
            }
            let variant_ident = &variant.ident;
            let variant_str = variant_ident.to_string();
            Ok(quote! {
                .with_variant(::fillforge::__internal::EnumVariant::new(
                    #variant_str,
                    || #name::#variant_ident,
                ))
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(wrap_impl(
        name,
        quote! {
            ::fillforge::__internal::TypeDescriptor::enumeration::<#name>(#name_str)
                #(#variants)*
        },
    ))
}

fn wrap_impl(name: &syn::Ident, build: TokenStream) -> TokenStream {
    quote! {
        impl ::fillforge::__internal::Fill for #name {
            fn descriptor() -> &'static ::fillforge::__internal::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<
                    ::fillforge::__internal::TypeDescriptor,
                > = ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    #build
                })
            }
        }
    }
}

/// Splits a comma-separated type list at the top nesting level.
fn split_top_level(args: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in args.chars() {
        match ch {
            '<' | '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            '>' | ')' | ']' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
    parts
}
