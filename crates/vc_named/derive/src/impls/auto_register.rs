use crate::derive_data::NamedStruct;

/// Generate the `auto_register` submission.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &NamedStruct) -> proc_macro2::TokenStream {
    let (Some(span), Some(tag)) = (meta.attrs.auto_register, &meta.attrs.tag) else {
        return proc_macro2::TokenStream::new();
    };

    let auto_register_ = crate::path::auto_register_(&meta.vc_named_path);
    let ident = meta.ident;

    quote::quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::AutoRegistration::new::<#ident>(#tag)
        }
    }
}

/// Generate the `auto_register` submission.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &NamedStruct) -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
