//! Parse `#[model(..)]` attributes.

use proc_macro2::Span;
use syn::parse::Parse;
use syn::spanned::Spanned;
use syn::{Attribute, LitBool, LitStr, Path, Token};

use crate::MODEL_ATTRIBUTE_NAME;

fn model_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(MODEL_ATTRIBUTE_NAME))
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the type itself.
#[derive(Debug)]
pub(crate) struct TypeAttributes {
    /// Default is `true`, use `#[model(Hooks = false)]` to disable it.
    /// Then users must impl `ModelHooks` by hand.
    pub impl_hooks: bool,
    /// `#[model(eq)]`: impl `PartialEq`, `Eq` and `Hash`.
    pub eq: Option<Span>,
    /// `#[model(auto_register)]`
    pub auto_register: Option<Span>,
    /// `#[model(select = path)]`
    pub select: Option<Path>,
}

impl Default for TypeAttributes {
    #[inline]
    fn default() -> Self {
        Self {
            impl_hooks: true,
            eq: None,
            auto_register: None,
            select: None,
        }
    }
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in model_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("Hooks") {
                    let value: LitBool = meta.value()?.parse()?;
                    this.impl_hooks = value.value;
                } else if meta.path.is_ident("eq") {
                    this.eq = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("select") {
                    this.select = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unsupported model attribute, expected `Hooks`, `eq`, `auto_register` or `select`",
                    ));
                }
                Ok(())
            })?;
        }

        if let (false, Some(select)) = (this.impl_hooks, &this.select) {
            return Err(syn::Error::new_spanned(
                select,
                "`select` needs the generated `ModelHooks`, remove `Hooks = false` or implement `select_class` by hand",
            ));
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes on a struct field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    /// `#[model(key = "a")]` or `#[model(key = ["a", "b"])]`
    pub keys: Vec<LitStr>,
    /// `#[model(skip)]`
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in model_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    let value = meta.value()?;
                    if value.peek(syn::token::Bracket) {
                        let content;
                        syn::bracketed!(content in value);
                        let keys = content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
                        this.keys.extend(keys);
                    } else {
                        this.keys.push(value.parse()?);
                    }
                } else if meta.path.is_ident("skip") {
                    this.skip = Some(meta.path.span());
                } else {
                    return Err(meta.error("unsupported model field attribute, expected `key` or `skip`"));
                }
                Ok(())
            })?;
        }

        if let (Some(span), false) = (this.skip, this.keys.is_empty()) {
            return Err(syn::Error::new(span, "a skipped field has no keys"));
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// Attributes on an enum variant.
#[derive(Debug, Default)]
pub(crate) struct VariantAttributes {
    /// `#[model(base)]`
    pub base: Option<Span>,
}

impl VariantAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in model_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    this.base = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("unsupported model variant attribute, expected `base`"))
                }
            })?;
        }
        Ok(this)
    }
}
