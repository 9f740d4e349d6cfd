//! Derive macro for floem_databind.
//!
//! This crate provides `#[derive(DataType)]`, which implements
//! `floem_databind::DataType` for a struct with named fields, so a
//! `TypeRegistry` can answer "does field X exist on this type, and can it have
//! children" without any runtime reflection.
//!
//! # Example
//!
//! ```rust,ignore
//! use floem_databind::{DataType, TypeRegistry};
//!
//! #[derive(DataType)]
//! struct State {
//!     count: i32,
//!     #[nested]  // Field type also has #[derive(DataType)]
//!     user: User,
//!     #[nested]  // Also works with Vec<T> where T has #[derive(DataType)]
//!     items: Vec<Item>,
//!     #[nested]  // And with Option<T>; the node exists even while the value is None
//!     selected: Option<Item>,
//!     #[data(rename = "displayName")]
//!     display_name: String,
//!     #[data(skip)]
//!     cache: Vec<u8>,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<State>(); // also registers User, Item and Vec<Item>
//! ```
//!
//! Fields without `#[nested]` become leaves.

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type,
};

/// How a field's node relates to other registered types.
enum NestedKind<'a> {
    /// `user: User`: a branch of `User`.
    Direct(&'a Type),
    /// `items: Vec<Item>`: a branch whose children are elements of type `Item`.
    Vec(&'a Type),
    /// `selected: Option<Item>`: a branch of `Item`, present even while `None`.
    Option(&'a Type),
    /// A leaf.
    None,
}

/// Options parsed from `#[data(...)]`.
#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
}

fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("data")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                options.rename = Some(name.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }
    Ok(options)
}

/// Extract `T` from `Wrapper<T>` when the last path segment is `wrapper`.
fn extract_inner_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == wrapper {
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(GenericArgument::Type(inner_ty)) = args.args.first() {
                    return Some(inner_ty);
                }
            }
        }
    }
    None
}

fn nested_kind(field: &syn::Field) -> NestedKind<'_> {
    if !field.attrs.iter().any(|attr| attr.path().is_ident("nested")) {
        return NestedKind::None;
    }
    if let Some(inner) = extract_inner_type(&field.ty, "Vec") {
        NestedKind::Vec(inner)
    } else if let Some(inner) = extract_inner_type(&field.ty, "Option") {
        NestedKind::Option(inner)
    } else {
        NestedKind::Direct(&field.ty)
    }
}

/// Derive macro that implements `floem_databind::DataType`.
///
/// For a struct `State` with fields `count: i32` and `#[nested] user: User`
/// this generates a `field_info` that reports `count` as a leaf of `i32`,
/// `user` as a branch of `User`, and `None` for any other name, plus a
/// `register_nested` that registers `User`.
///
/// # Attributes
///
/// - `#[nested]`: the field's type (or the element type of a `Vec<T>` /
///   `Option<T>`) also derives `DataType`; the field becomes a branch.
/// - `#[data(rename = "name")]`: resolve the field under a different name.
/// - `#[data(skip)]`: the field is not visible to path resolution.
#[proc_macro_derive(DataType, attributes(nested, data))]
pub fn derive_data_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "DataType can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "DataType can only be derived for structs",
            ));
        }
    };

    let mut names = Vec::new();
    let mut infos = Vec::new();
    let mut registrations = Vec::new();

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        let name = options
            .rename
            .unwrap_or_else(|| ident.unraw().to_string());
        if names.contains(&name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate field name `{name}`"),
            ));
        }

        let field_type = &field.ty;
        let info = match nested_kind(field) {
            NestedKind::Direct(ty) => {
                registrations.push(quote! { registry.register::<#ty>(); });
                quote! { floem_databind::NodeTypeInfo::branch(floem_databind::TypeHandle::of::<#ty>()) }
            }
            NestedKind::Vec(inner) => {
                registrations.push(quote! { registry.register_sequence::<#inner>(); });
                quote! { floem_databind::NodeTypeInfo::branch(floem_databind::TypeHandle::of::<#field_type>()) }
            }
            NestedKind::Option(inner) => {
                registrations.push(quote! { registry.register::<#inner>(); });
                quote! { floem_databind::NodeTypeInfo::branch(floem_databind::TypeHandle::of::<#inner>()) }
            }
            NestedKind::None => {
                quote! { floem_databind::NodeTypeInfo::leaf(floem_databind::TypeHandle::of::<#field_type>()) }
            }
        };

        names.push(name);
        infos.push(info);
    }

    let mut generics = input.generics.clone();
    let type_params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for param in type_params {
        where_clause.predicates.push(syn::parse_quote!(#param: 'static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let registry = if registrations.is_empty() {
        quote! { _registry }
    } else {
        quote! { registry }
    };

    Ok(quote! {
        impl #impl_generics floem_databind::DataType for #struct_name #ty_generics #where_clause {
            fn field_info(name: &str) -> ::core::option::Option<floem_databind::NodeTypeInfo> {
                match name {
                    #( #names => ::core::option::Option::Some(#infos), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_names() -> &'static [&'static str] {
                &[#( #names ),*]
            }

            fn register_nested(#registry: &mut floem_databind::TypeRegistry) {
                #( #registrations )*
            }
        }
    })
}
