use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate the `AttrValue` implementation, so that models nest.
pub(crate) fn impl_trait_attr_value(derive: &ModelDerive) -> TokenStream {
    let bounds = super::field_bounds(derive);
    let meta = derive.meta();
    let exports_ = crate::path::exports_(meta.mm_model_path());
    let option_ = crate::path::option_();
    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&bounds);

    quote! {
        impl #impl_generics #exports_::AttrValue for #ident #ty_generics #where_clause {
            #[inline]
            fn attr_kind() -> #exports_::AttrKind {
                #exports_::AttrKind::Model(<Self as #exports_::Model>::class())
            }

            #[inline]
            fn from_node(node: &#exports_::Value, cx: &mut #exports_::DecodeContext) -> #option_<Self> {
                #exports_::decode_nested::<Self>(node, cx)
            }

            #[inline]
            fn to_node(&self) -> #option_<#exports_::Value> {
                #exports_::encode_nested(self)
            }

            #[inline]
            fn attr_eq(&self, other: &Self) -> bool {
                #exports_::model_eq(self, other)
            }

            #[inline]
            fn attr_hash(&self, state: &mut #exports_::FixedHasher) {
                #exports_::hash_model_into(self, state);
            }

            #[inline]
            fn attr_copy(&self) -> Self {
                <Self as #exports_::Model>::model_copy(self)
            }
        }
    }
}
