use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{NamedField, NamedStruct};
use crate::path;

/// Generate the `Typed` implementation.
///
/// Field offsets come from `offset_of!`, field type infos from the autoref
/// probe, so a `Field<T>` is recognized whatever `T` is.
pub(crate) fn impl_trait_typed(meta: &NamedStruct) -> TokenStream {
    let vc_named_path = &meta.vc_named_path;
    let typed_ = path::typed_(vc_named_path);
    let type_info_ = path::type_info_(vc_named_path);
    let struct_info_ = path::struct_info_(vc_named_path);
    let probe_ = path::probe_(vc_named_path);

    let fields = meta
        .fields
        .iter()
        .map(|field| field_info_expr(vc_named_path, field));

    let default_tag = meta.attrs.tag.as_ref().map(|tag| {
        quote! { .with_default_tag(#tag) }
    });

    let init = quote! {
        || #type_info_::Struct(
            #struct_info_::new::<Self>(&[ #(#fields),* ]) #default_tag
        )
    };

    let cell = if meta.is_generic() {
        let cell_ = path::generic_type_info_cell_(vc_named_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(#init)
        }
    } else {
        let cell_ = path::non_generic_type_info_cell_(vc_named_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(#init)
        }
    };

    let ident = meta.ident;
    let (impl_generics, ty_generics, where_clause) = meta.generics.split_for_impl();

    quote! {
        #[allow(unsafe_code)]
        unsafe impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                use #probe_::{ProbeField as _, ProbeOpaque as _, ProbeTyped as _};
                #cell
            }
        }
    }
}

fn field_info_expr(vc_named_path: &syn::Path, field: &NamedField) -> TokenStream {
    let field_info_ = path::field_info_(vc_named_path);
    let struct_tag_ = path::struct_tag_(vc_named_path);
    let probe_ = path::probe_(vc_named_path);

    let name = &field.name;
    let member = &field.member;
    let ty = field.ty;
    let is_public = field.is_public;

    let entries = field.attrs.tags.iter().map(|(key, value)| {
        quote! { (#key, #value) }
    });
    let skip_all = field.attrs.skip.then(|| quote! { .with_skip_all() });

    quote! {
        #field_info_::new(
            #name,
            ::core::mem::offset_of!(Self, #member),
            (&&&#probe_::Probe::<#ty>::new()).type_info_fn(),
        )
        .with_public(#is_public)
        .with_tags(#struct_tag_::new(&[ #(#entries),* ]) #skip_all)
    }
}
