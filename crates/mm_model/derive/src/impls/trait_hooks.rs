use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate the `ModelHooks` implementation.
///
/// Structs get the trait defaults, plus `select_class` when
/// `#[model(select = path)]` is set. Enums forward to the base model and the
/// held variant.
pub(crate) fn impl_trait_hooks(derive: &ModelDerive) -> TokenStream {
    let meta = derive.meta();
    let exports_ = crate::path::exports_(meta.mm_model_path());
    let option_ = crate::path::option_();
    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&[]);

    let select_class = meta.attrs().select.as_ref().map(|path| {
        quote! {
            #[inline]
            fn select_class(object: &#exports_::JsonObject) -> #option_<#exports_::ModelClass> {
                #path(object)
            }
        }
    });

    let body = match derive {
        ModelDerive::Struct(_) => quote! { #select_class },
        ModelDerive::Enum(data) => {
            let base_ty = data.base().ty;
            let variant_idents: Vec<_> = data.variants.iter().map(|variant| variant.ident).collect();

            let select_class = select_class.unwrap_or_else(|| {
                quote! {
                    #[inline]
                    fn select_class(object: &#exports_::JsonObject) -> #option_<#exports_::ModelClass> {
                        <#base_ty as #exports_::ModelHooks>::select_class(object)
                    }
                }
            });

            quote! {
                #select_class

                #[inline]
                fn will_decode(
                    object: &#exports_::JsonObject,
                ) -> #option_<#exports_::Cow<'_, #exports_::JsonObject>> {
                    <#base_ty as #exports_::ModelHooks>::will_decode(object)
                }

                fn did_decode(&mut self, object: &#exports_::JsonObject) -> bool {
                    match self {
                        #( Self::#variant_idents(inner) => #exports_::ModelHooks::did_decode(inner, object), )*
                    }
                }

                fn did_encode(&self, object: &mut #exports_::JsonObject) -> bool {
                    match self {
                        #( Self::#variant_idents(inner) => #exports_::ModelHooks::did_encode(inner, object), )*
                    }
                }
            }
        }
    };

    quote! {
        impl #impl_generics #exports_::ModelHooks for #ident #ty_generics #where_clause {
            #body
        }
    }
}
