//! Attribute parsing for the Shape derive macro.
//!
//! This module provides the parser for the `#[shape(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[shape(...)]`.
#[derive(Debug, Clone)]
pub struct ShapeAttr {
    /// Property name in the output (default: field name).
    pub rename: Option<String>,
    /// Merge a nested shape's properties into the parent.
    pub flatten: bool,
    /// Leave the field out entirely.
    pub skip: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for ShapeAttr {
    fn default() -> Self {
        ShapeAttr {
            rename: None,
            flatten: false,
            skip: false,
            span: Span::call_site(),
        }
    }
}

impl Parse for ShapeAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ShapeAttr {
            span: input.span(),
            ..ShapeAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // Flags: shape(skip), shape(flatten)
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("flatten") {
                        attr.flatten = true;
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "unknown shape flag. Expected: skip or flatten",
                        ));
                    }
                }

                // rename = "custom_name"
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("rename") {
                        if let syn::Expr::Lit(syn::ExprLit {
                            lit: Lit::Str(s), ..
                        }) = &nv.value
                        {
                            attr.rename = Some(s.value());
                        } else {
                            return Err(Error::new(
                                nv.value.span(),
                                "rename must be a string literal",
                            ));
                        }
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown shape attribute. Expected: skip, flatten, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.flatten && attr.rename.is_some() {
            return Err(Error::new(
                attr.span,
                "flatten and rename cannot be combined: a flattened field has no name",
            ));
        }

        Ok(attr)
    }
}

/// Extract `#[shape(...)]` attributes from a field's attributes.
pub fn parse_shape_attrs(attrs: &[Attribute]) -> Result<ShapeAttr> {
    for attr in attrs {
        if attr.path().is_ident("shape") {
            return attr.parse_args::<ShapeAttr>();
        }
    }
    Ok(ShapeAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_shape(tokens: &str) -> Result<ShapeAttr> {
        syn::parse_str::<ShapeAttr>(tokens)
    }

    #[test]
    fn test_empty() {
        let attr = parse_shape("").unwrap();
        assert!(!attr.skip);
        assert!(!attr.flatten);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_skip() {
        let attr = parse_shape("skip").unwrap();
        assert!(attr.skip);
    }

    #[test]
    fn test_flatten() {
        let attr = parse_shape("flatten").unwrap();
        assert!(attr.flatten);
        assert!(!attr.skip);
    }

    #[test]
    fn test_rename() {
        let attr = parse_shape(r#"rename = "ts""#).unwrap();
        assert_eq!(attr.rename, Some("ts".to_string()));
    }

    #[test]
    fn test_rename_with_skip() {
        let attr = parse_shape(r#"rename = "ts", skip"#).unwrap();
        assert_eq!(attr.rename, Some("ts".to_string()));
        assert!(attr.skip);
    }

    #[test]
    fn test_rename_requires_string() {
        let result = parse_shape("rename = 5");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("rename must be a string literal"));
    }

    #[test]
    fn test_flatten_with_rename_rejected() {
        let result = parse_shape(r#"flatten, rename = "x""#);
        assert!(result.unwrap_err().to_string().contains("cannot be combined"));
    }

    #[test]
    fn test_unknown_flag() {
        let result = parse_shape("inline");
        assert!(result.unwrap_err().to_string().contains("unknown shape flag"));
    }

    #[test]
    fn test_unknown_name_value() {
        let result = parse_shape(r#"label = "x""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_from_field_attrs() {
        let item: syn::ItemStruct = syn::parse_quote! {
            struct Point {
                #[doc = "ignored"]
                #[shape(rename = "host_name")]
                host: String,
                port: u16,
            }
        };
        let fields: Vec<&syn::Field> = item.fields.iter().collect();

        let attr = parse_shape_attrs(&fields[0].attrs).unwrap();
        assert_eq!(attr.rename, Some("host_name".to_string()));
        assert_eq!(parse_shape_attrs(&fields[1].attrs).unwrap().rename, None);
    }
}
