//! Parsing of `#[named(...)]` attributes.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::NAMED_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level options.
///
/// - `#[named(tag = "json")]`: the tag key used when an unregistered
///   instance is linked.
/// - `#[named(auto_register)]`: collect the type for
///   `NameRegistry::auto_register`, requires `tag`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub tag: Option<LitStr>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(NAMED_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("tag") {
                    let tag: LitStr = meta.value()?.parse()?;
                    if tag.value().is_empty() {
                        return Err(syn::Error::new(tag.span(), "tag key must not be empty"));
                    }
                    if this.tag.is_some() {
                        return Err(meta.error("duplicate `tag`"));
                    }
                    this.tag = Some(tag);
                    Ok(())
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("expected `tag = \"...\"` or `auto_register`"))
                }
            })?;
        }

        if let (Some(span), None) = (this.auto_register, &this.tag) {
            return Err(syn::Error::new(
                span,
                "`auto_register` requires a default tag key, e.g. `#[named(tag = \"json\")]`",
            ));
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level options.
///
/// - `#[named(json = "name,opts", db = "col")]`: one value per tag key.
/// - `#[named(skip)]`: excluded under every tag key.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub tags: Vec<(String, LitStr)>,
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(NAMED_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                    return Ok(());
                }

                let Some(key) = meta.path.get_ident() else {
                    return Err(meta.error("expected a tag key, e.g. `json = \"...\"`"));
                };
                let key = key.to_string();
                let key = key.strip_prefix("r#").map(str::to_owned).unwrap_or(key);
                let value: LitStr = meta.value()?.parse()?;

                if this.tags.iter().any(|(k, _)| *k == key) {
                    return Err(meta.error(format!("duplicate tag key `{key}`")));
                }
                this.tags.push((key, value));
                Ok(())
            })?;
        }

        Ok(this)
    }
}
