use proc_macro2::TokenStream;
use quote::quote_spanned;

use crate::derive_data::ModelDerive;

/// Generate `PartialEq`, `Eq` and `Hash` for `#[model(eq)]`.
pub(crate) fn impl_trait_eq(derive: &ModelDerive) -> TokenStream {
    let meta = derive.meta();
    let Some(span) = meta.attrs().eq else {
        return crate::utils::empty();
    };

    let bounds = super::field_bounds(derive);
    let exports_ = crate::path::exports_(meta.mm_model_path());
    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&bounds);

    quote_spanned! { span =>
        impl #impl_generics ::core::cmp::PartialEq for #ident #ty_generics #where_clause {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                #exports_::model_eq(self, other)
            }
        }

        impl #impl_generics ::core::cmp::Eq for #ident #ty_generics #where_clause {}

        impl #impl_generics ::core::hash::Hash for #ident #ty_generics #where_clause {
            #[inline]
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(#exports_::model_hash(self));
            }
        }
    }
}
