use syn::{DataStruct, Fields, Ident, LitStr, Type};

use super::{FieldAttributes, ModelMeta};

/// A named field of a model struct.
pub(crate) struct ModelField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    /// The accessor slot, `None` for skipped fields.
    pub index: Option<usize>,
}

impl ModelField<'_> {
    /// The attribute name, with any raw identifier prefix removed.
    pub fn name(&self) -> String {
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_owned(),
            None => name,
        }
    }

    #[inline]
    pub fn keys(&self) -> &[LitStr] {
        &self.attrs.keys
    }
}

pub(crate) struct ModelStruct<'a> {
    pub meta: ModelMeta<'a>,
    pub fields: Vec<ModelField<'a>>,
}

impl<'a> ModelStruct<'a> {
    pub fn new(meta: ModelMeta<'a>, data: &'a DataStruct) -> syn::Result<Self> {
        let Fields::Named(named) = &data.fields else {
            return Err(syn::Error::new(
                meta.ident().span(),
                "`Model` can only be derived for structs with named fields",
            ));
        };

        let mut fields = Vec::with_capacity(named.named.len());
        let mut next_index = 0_usize;
        for field in &named.named {
            let attrs = FieldAttributes::parse(&field.attrs)?;
            let index = if attrs.skip.is_some() {
                None
            } else {
                next_index += 1;
                Some(next_index - 1)
            };
            fields.push(ModelField {
                // Named fields always have an identifier.
                ident: field.ident.as_ref().ok_or_else(|| syn::Error::new_spanned(field, "unnamed field"))?,
                ty: &field.ty,
                attrs,
                index,
            });
        }

        Ok(Self { meta, fields })
    }

    /// Fields that are attributes, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = (usize, &ModelField<'a>)> {
        self.fields
            .iter()
            .filter_map(|field| field.index.map(|index| (index, field)))
    }
}
