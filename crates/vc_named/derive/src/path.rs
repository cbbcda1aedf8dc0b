//! This independent module is used to provide the required path.
//! So as to minimize changes when the `vc_named` structure is modified.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_named` crate.
///
/// 1. For crates that depend on `vc_named`, `::vc_named` is returned here.
/// 2. For crates that depend on `vc_naming`, `::vc_naming::named` is returned here.
/// 3. For other situations, `::vc_named` is returned here, but this may be incorrect.
///
/// The cost of this function is relatively high (accessing files, obtaining read-write lock permissions, querying content...),
/// so the crate path is obtained once per derive and passed around.
pub(crate) fn vc_named() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_named"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn typed_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn struct_info_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn field_info_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::info::FieldInfo
    }
}

#[inline(always)]
pub(crate) fn struct_tag_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::tag::StructTag
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::info::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::info::GenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn probe_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::__macro_exports::probe
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_named_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_named_path::__macro_exports::auto_register
    }
}
