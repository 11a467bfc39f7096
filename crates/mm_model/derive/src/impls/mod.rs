//! Code generators for `#[derive(Model)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_attr_value;
mod trait_eq;
mod trait_hooks;
mod trait_model;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

use auto_register::get_auto_register_impl;
use trait_attr_value::impl_trait_attr_value;
use trait_eq::impl_trait_eq;
use trait_hooks::impl_trait_hooks;
use trait_model::impl_trait_model;

pub(crate) fn impl_model(derive: &ModelDerive) -> TokenStream {
    let meta = derive.meta();

    let model_tokens = impl_trait_model(derive);
    let attr_value_tokens = impl_trait_attr_value(derive);
    let hooks_tokens = if meta.attrs().impl_hooks {
        impl_trait_hooks(derive)
    } else {
        crate::utils::empty()
    };
    let eq_tokens = impl_trait_eq(derive);
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #model_tokens

        #attr_value_tokens

        #hooks_tokens

        #eq_tokens

        #auto_register_tokens
    }
}

/// The `(type, bound)` pairs of a derive, see
/// [`ModelMeta::split_generics`](crate::derive_data::ModelMeta::split_generics).
fn field_bounds<'a>(derive: &'a ModelDerive) -> Vec<(&'a syn::Type, TokenStream)> {
    let exports_ = crate::path::exports_(derive.meta().mm_model_path());
    match derive {
        ModelDerive::Struct(data) => data
            .fields
            .iter()
            .map(|field| {
                let bound = if field.index.is_some() {
                    quote! { #exports_::AttrValue + ::core::default::Default }
                } else {
                    quote! { ::core::default::Default + ::core::clone::Clone + ::core::marker::Send + ::core::marker::Sync + 'static }
                };
                (field.ty, bound)
            })
            .collect(),
        ModelDerive::Enum(data) => data
            .variants
            .iter()
            .map(|variant| (variant.ty, quote! { #exports_::Model }))
            .collect(),
    }
}
