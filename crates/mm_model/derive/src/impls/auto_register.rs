use crate::derive_data::ModelMeta;

/// Generate the `auto_register` submission.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ModelMeta) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    if let Some(span) = meta.attrs().auto_register {
        // Invalid for generic types.
        if meta.impl_with_generic() {
            return crate::utils::empty();
        }

        let exports_ = crate::path::exports_(meta.mm_model_path());
        let ident = meta.ident();

        quote_spanned! { span =>
            #exports_::inventory::submit!{
                #exports_::__AutoRegisterClass(
                    <#ident as #exports_::Model>::class
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate the `auto_register` submission.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ModelMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
