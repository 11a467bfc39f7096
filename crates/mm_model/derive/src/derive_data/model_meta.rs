use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, Path, Type, WhereClause};

use super::TypeAttributes;

/// Type-level data shared by struct and enum derives.
pub(crate) struct ModelMeta<'a> {
    mm_model_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl core::fmt::Debug for ModelMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelMeta")
            .field("mm_model_path", &self.mm_model_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ModelMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`Model` types must be `'static`, lifetime parameters are not supported",
            ));
        }

        Ok(Self {
            mm_model_path: crate::path::mm_model(),
            attrs,
            ident,
            generics,
        })
    }

    #[inline]
    pub fn mm_model_path(&self) -> &Path {
        &self.mm_model_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// Returns `true` if the type has type or const parameters.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// The `type_name` body.
    ///
    /// Non-generic types use their identifier. Generic types use
    /// `core::any::type_name`, which includes the arguments.
    pub fn type_name_expression(&self) -> TokenStream {
        if self.impl_with_generic() {
            quote! { ::core::any::type_name::<Self>() }
        } else {
            let name = self.ident.to_string();
            quote! { #name }
        }
    }

    /// Split generics for an impl block.
    ///
    /// `bounded` are the field types of the model; for generic models each
    /// one gets `extra` as a bound, and every type parameter gets
    /// `Send + Sync + 'static`.
    pub fn split_generics(
        &self,
        bounded: &[(&Type, TokenStream)],
    ) -> (TokenStream, TokenStream, Option<WhereClause>) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let impl_generics = impl_generics.to_token_stream();
        let ty_generics = ty_generics.to_token_stream();

        if !self.impl_with_generic() {
            return (impl_generics, ty_generics, where_clause.cloned());
        }

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });
        for param in self.generics.type_params() {
            let ident = &param.ident;
            where_clause
                .predicates
                .push(syn::parse_quote! { #ident: ::core::marker::Send + ::core::marker::Sync + 'static });
        }
        for (ty, bound) in bounded {
            where_clause.predicates.push(syn::parse_quote! { #ty: #bound });
        }

        (impl_generics, ty_generics, Some(where_clause))
    }
}
