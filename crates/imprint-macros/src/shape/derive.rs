//! Implementation of the `#[derive(Shape)]` macro.
//!
//! This macro generates `Shape` and `ToNode` implementations that describe
//! the struct's fields, in declaration order, with their current values.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, GenericParam, Result};

use super::attrs::parse_shape_attrs;

/// Main implementation of the Shape derive macro.
pub fn shape_derive_impl(mut input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Shape can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Shape can only be derived for structs",
            ))
        }
    };

    let mut field_exprs: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_shape_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        let node = quote! { ::imprint::ToNode::to_node(&self.#field_name) };

        if attrs.flatten {
            field_exprs.push(quote! {
                ::imprint::Field::unlabeled(#node)
            });
        } else {
            let label = attrs.rename.unwrap_or_else(|| property_name(field_name));
            field_exprs.push(quote! {
                ::imprint::Field::property(#label, #node)
            });
        }
    }

    // Every type parameter must itself convert to a node.
    let type_params: Vec<_> = input
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            _ => None,
        })
        .collect();
    let where_clause = input.generics.make_where_clause();
    for ident in type_params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::imprint::ToNode));
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::imprint::Shape for #struct_name #ty_generics #where_clause {
            fn describe(&self) -> ::imprint::ShapeDescriptor {
                ::imprint::ShapeDescriptor::new(::std::vec![
                    #(#field_exprs),*
                ])
            }
        }

        impl #impl_generics ::imprint::ToNode for #struct_name #ty_generics #where_clause {
            fn to_node(&self) -> ::imprint::Node {
                ::imprint::Node::Struct(::imprint::Shape::describe(self))
            }
        }
    };

    Ok(expanded)
}

/// The property name for a field: its identifier without a raw `r#` prefix.
fn property_name(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}
