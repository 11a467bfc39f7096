//! Parse the derive input into the data the generators need.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod model_enum;
mod model_meta;
mod model_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes, VariantAttributes};
pub(crate) use model_enum::ModelEnum;
pub(crate) use model_meta::ModelMeta;
pub(crate) use model_struct::ModelStruct;

use syn::{Data, DeriveInput};

pub(crate) enum ModelDerive<'a> {
    Struct(ModelStruct<'a>),
    Enum(ModelEnum<'a>),
}

impl<'a> ModelDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse(&input.attrs)?;
        let meta = ModelMeta::new(attrs, &input.ident, &input.generics)?;

        match &input.data {
            Data::Struct(data) => Ok(Self::Struct(ModelStruct::new(meta, data)?)),
            Data::Enum(data) => Ok(Self::Enum(ModelEnum::new(meta, data)?)),
            Data::Union(_) => Err(syn::Error::new(
                input.ident.span(),
                "`Model` cannot be derived for unions",
            )),
        }
    }

    #[inline]
    pub fn meta(&self) -> &ModelMeta<'a> {
        match self {
            Self::Struct(data) => &data.meta,
            Self::Enum(data) => &data.meta,
        }
    }
}
