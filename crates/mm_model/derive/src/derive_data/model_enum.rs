use syn::{DataEnum, Fields, Ident, Type};

use super::{ModelMeta, VariantAttributes};

/// A variant wrapping one model.
pub(crate) struct ModelVariant<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
}

/// A polymorphic base: an enum whose variants each wrap one model.
pub(crate) struct ModelEnum<'a> {
    pub meta: ModelMeta<'a>,
    pub variants: Vec<ModelVariant<'a>>,
    /// Index of the base variant in `variants`.
    pub base: usize,
}

impl<'a> ModelEnum<'a> {
    pub fn new(meta: ModelMeta<'a>, data: &'a DataEnum) -> syn::Result<Self> {
        if data.variants.is_empty() {
            return Err(syn::Error::new(
                meta.ident().span(),
                "a `Model` enum needs at least one variant",
            ));
        }

        let mut variants = Vec::with_capacity(data.variants.len());
        let mut base = None;
        for (index, variant) in data.variants.iter().enumerate() {
            let attrs = VariantAttributes::parse(&variant.attrs)?;
            if let Some(span) = attrs.base {
                if base.is_some() {
                    return Err(syn::Error::new(span, "only one variant can be the `base`"));
                }
                base = Some(index);
            }

            let ty = match &variant.fields {
                Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
                _ => {
                    return Err(syn::Error::new_spanned(
                        variant,
                        "each `Model` enum variant must wrap exactly one model, e.g. `Circle(Circle)`",
                    ));
                }
            };
            variants.push(ModelVariant {
                ident: &variant.ident,
                ty,
            });
        }

        Ok(Self {
            meta,
            variants,
            base: base.unwrap_or(0),
        })
    }

    #[inline]
    pub fn base(&self) -> &ModelVariant<'a> {
        &self.variants[self.base]
    }
}
