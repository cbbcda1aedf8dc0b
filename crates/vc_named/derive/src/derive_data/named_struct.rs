use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Member, Type, Visibility};

use crate::derive_data::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// NamedField

pub(crate) struct NamedField<'a> {
    /// Declared name, or the index of a tuple struct field.
    pub name: String,
    pub member: Member,
    pub ty: &'a Type,
    pub is_public: bool,
    pub attrs: FieldAttributes,
}

// -----------------------------------------------------------------------------
// NamedStruct

/// A struct accepted by `#[derive(Named)]`.
pub(crate) struct NamedStruct<'a> {
    pub ident: &'a Ident,
    pub generics: Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<NamedField<'a>>,
    pub vc_named_path: syn::Path,
}

impl<'a> NamedStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let fields = match &input.data {
            Data::Struct(data) => &data.fields,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`Named` can only be derived for structs",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`Named` can only be derived for structs",
                ));
            }
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Named` types must be `'static`, lifetime parameters are not supported",
            ));
        }

        if let Some(attr) = input.attrs.iter().find(|attr| is_repr_packed(attr)) {
            return Err(syn::Error::new(
                attr.span(),
                "`Named` cannot be derived for `#[repr(packed)]` structs",
            ));
        }

        let attrs = TypeAttributes::parse(&input.attrs)?;

        let mut generics = input.generics.clone();
        for param in generics.type_params_mut() {
            param.bounds.push(syn::parse_quote!('static));
        }

        if let (Some(span), false) = (attrs.auto_register, generics.params.is_empty()) {
            return Err(syn::Error::new(
                span,
                "`auto_register` is not supported for generic types",
            ));
        }

        let fields = match fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unnamed(unnamed) => unnamed.unnamed.iter().collect(),
            Fields::Unit => Vec::new(),
        }
        .into_iter()
        .enumerate()
        .map(|(index, field)| {
            let (name, member) = match &field.ident {
                Some(ident) => {
                    let name = ident.to_string();
                    let name = name.strip_prefix("r#").map(str::to_owned).unwrap_or(name);
                    (name, Member::Named(ident.clone()))
                }
                None => (index.to_string(), Member::Unnamed(index.into())),
            };

            Ok(NamedField {
                name,
                member,
                ty: &field.ty,
                is_public: matches!(field.vis, Visibility::Public(_)),
                attrs: FieldAttributes::parse(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self {
            ident: &input.ident,
            generics,
            attrs,
            fields,
            vc_named_path: crate::path::vc_named(),
        })
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}

fn is_repr_packed(attr: &syn::Attribute) -> bool {
    if !attr.path().is_ident("repr") {
        return false;
    }
    let mut packed = false;
    // Malformed `repr` attributes are reported by the compiler.
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("packed") {
            packed = true;
        }
        if meta.input.peek(syn::token::Paren) {
            let _content;
            syn::parenthesized!(_content in meta.input);
        }
        Ok(())
    });
    packed
}
