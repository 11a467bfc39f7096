//! Paths into `mm_model` used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `mm_model` crate from the invoking crate.
///
/// See [`mm_macro_utils::Manifest`] for the resolution rules. Reading the
/// manifest is not cheap, so the path is resolved once per derive and passed
/// around.
pub(crate) fn mm_model() -> syn::Path {
    mm_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("mm_model"))
}

#[inline(always)]
pub(crate) fn exports_(mm_model_path: &syn::Path) -> TokenStream {
    quote! {
        #mm_model_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! {
        ::core::option::Option
    }
}
