//! Parsing of `#[formbind(...)]` attributes.

use syn::{Attribute, LitStr};

/// Attributes on the type itself.
#[derive(Default)]
pub struct ContainerAttrs {
    pub opaque: bool,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = ContainerAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("formbind")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("opaque") {
                    out.opaque = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown formbind container attribute, expected `opaque`"))
                }
            })?;
        }
        Ok(out)
    }
}

/// Attributes on one field.
#[derive(Default)]
pub struct FieldAttrs {
    pub skip: bool,
    /// `(tag, value)` pairs, in source order.
    pub tags: Vec<(String, String)>,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("formbind")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                    return Ok(());
                }

                let Some(key) = meta.path.get_ident() else {
                    return Err(meta.error("expected `skip` or `<tag> = \"name\"`"));
                };
                let key = key.to_string();
                let value: LitStr = meta.value()?.parse()?;
                if out.tags.iter().any(|(k, _)| *k == key) {
                    return Err(syn::Error::new(
                        value.span(),
                        format!("duplicate `{key}` tag on this field"),
                    ));
                }
                out.tags.push((key, value.value()));
                Ok(())
            })?;
        }
        Ok(out)
    }
}
