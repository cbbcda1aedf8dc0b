//! See [`Named`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static NAMED_ATTRIBUTE_NAME: &str = "named";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Named Derivation
///
/// `#[derive(Named)]` implements `vc_named::info::Typed` for a struct. The
/// generated metadata lists every field with its declared name, visibility,
/// tag table, byte offset and type information, which is all the schema
/// builder needs.
///
/// Only fields of type `vc_named::Field<T>` are named. When `T` itself
/// derives `Named`, its fields are named too, with paths starting at the
/// outer field. Only `pub` fields take part.
///
/// ## Field Tags
///
/// Each `key = "value"` pair is a tag. The part of the value before the first
/// comma is the field's name under that key; an empty name keeps the declared
/// name, and `-` excludes the field together with its nested fields.
///
/// ```rust, ignore
/// #[derive(Named)]
/// struct User {
///     #[named(json = "user_id,omitempty", db = "uid")]
///     pub id: Field<u64>,
///     #[named(json = "-")]
///     pub password: Field<String>,
///     #[named(skip)]
///     pub cache: Field<Vec<u8>>,
/// }
/// ```
///
/// `skip` excludes the field under every key.
///
/// ## Type Options
///
/// ```rust, ignore
/// #[derive(Named)]
/// #[named(tag = "json", auto_register)]
/// struct User { /* ... */ }
/// ```
///
/// - `tag`: the key used when an instance of an unregistered type is linked.
/// - `auto_register`: collect the type for `NameRegistry::auto_register`.
///   Requires `tag` and the `auto_register` feature, not available for
///   generic types.
///
/// ## Limitations
///
/// - Only structs are supported, without lifetime parameters and without
///   `#[repr(packed)]`.
/// - Type parameters receive a `'static` bound. In a generic struct, a field
///   of type `Field<T>` with `T` a type parameter is named, but `T` is not
///   scanned for nested fields.
/// - The generated `unsafe impl` is incompatible with `#![forbid(unsafe_code)]`.
#[proc_macro_derive(Named, attributes(named))]
pub fn derive_named(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let meta = match derive_data::NamedStruct::from_input(&ast) {
        Ok(meta) => meta,
        Err(err) => return err.into_compile_error().into(),
    };

    let typed_impl = impls::impl_trait_typed(&meta);
    let auto_register_impl = impls::get_auto_register_impl(&meta);

    TokenStream::from(quote! {
        #typed_impl

        #auto_register_impl
    })
}
