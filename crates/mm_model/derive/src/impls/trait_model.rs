use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ModelDerive, ModelEnum, ModelStruct};

/// Generate the `Model` implementation, and `Default` as the zeroed value.
pub(crate) fn impl_trait_model(derive: &ModelDerive) -> TokenStream {
    let bounds = super::field_bounds(derive);
    let meta = derive.meta();
    let exports_ = crate::path::exports_(meta.mm_model_path());
    let ident = meta.ident();
    let type_name = meta.type_name_expression();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&bounds);

    let body = match derive {
        ModelDerive::Struct(data) => struct_body(data),
        ModelDerive::Enum(data) => enum_body(data),
    };

    quote! {
        impl #impl_generics #exports_::Model for #ident #ty_generics #where_clause {
            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #body
        }

        impl #impl_generics ::core::default::Default for #ident #ty_generics #where_clause {
            #[inline]
            fn default() -> Self {
                <Self as #exports_::Model>::zeroed()
            }
        }
    }
}

/// Similar to following:
///
/// ```ignore
/// fn schema() -> &'static TypeSchema {
///     static CELL: SchemaCell = SchemaCell::new();
///     CELL.get_or_init(|| TypeSchema::build::<Self>(&[
///         AttributeDecl::new::<String>("name", 0usize),
///         AttributeDecl::new::<String>("desc", 1usize).with_keys(&["ext.desc"]),
///     ]))
/// }
///
/// fn attr(&self, index: usize) -> Option<&dyn DynAttr> {
///     match index {
///         0usize => Some(&self.name as &dyn DynAttr),
///         1usize => Some(&self.desc as &dyn DynAttr),
///         _ => None,
///     }
/// }
/// ```
fn struct_body(data: &ModelStruct) -> TokenStream {
    let meta = &data.meta;
    let exports_ = crate::path::exports_(meta.mm_model_path());
    let option_ = crate::path::option_();

    let decls = data.active_fields().map(|(index, field)| {
        let ty = field.ty;
        let name = field.name();
        let with_keys = if field.keys().is_empty() {
            crate::utils::empty()
        } else {
            let keys = field.keys();
            quote! { .with_keys(&[ #(#keys),* ]) }
        };
        quote! {
            #exports_::AttributeDecl::new::<#ty>(#name, #index) #with_keys
        }
    });

    let schema_body = if meta.impl_with_generic() {
        quote! {
            static CELL: #exports_::GenericSchemaCell = #exports_::GenericSchemaCell::new();
            CELL.get_or_insert::<Self>(|| #exports_::TypeSchema::build::<Self>(&[ #(#decls),* ]))
        }
    } else {
        quote! {
            static CELL: #exports_::SchemaCell = #exports_::SchemaCell::new();
            CELL.get_or_init(|| #exports_::TypeSchema::build::<Self>(&[ #(#decls),* ]))
        }
    };

    let all_members: Vec<_> = data.fields.iter().map(|field| field.ident).collect();

    let attr_arms = data.active_fields().map(|(index, field)| {
        let member = field.ident;
        quote! { #index => #option_::Some(&self.#member as &dyn #exports_::DynAttr), }
    });
    let attr_mut_arms = data.active_fields().map(|(index, field)| {
        let member = field.ident;
        quote! { #index => #option_::Some(&mut self.#member as &mut dyn #exports_::DynAttr), }
    });

    let copies = data.fields.iter().map(|field| {
        let member = field.ident;
        let ty = field.ty;
        if field.index.is_some() {
            quote! { #member: <#ty as #exports_::AttrValue>::attr_copy(&self.#member), }
        } else {
            quote! { #member: ::core::clone::Clone::clone(&self.#member), }
        }
    });

    quote! {
        fn schema() -> &'static #exports_::TypeSchema {
            #schema_body
        }

        #[inline]
        fn zeroed() -> Self {
            Self {
                #( #all_members: ::core::default::Default::default(), )*
            }
        }

        fn attr(&self, index: usize) -> #option_<&dyn #exports_::DynAttr> {
            match index {
                #(#attr_arms)*
                _ => #option_::None,
            }
        }

        fn attr_mut(&mut self, index: usize) -> #option_<&mut dyn #exports_::DynAttr> {
            match index {
                #(#attr_mut_arms)*
                _ => #option_::None,
            }
        }

        fn model_copy(&self) -> Self {
            Self {
                #(#copies)*
            }
        }
    }
}

/// Every method but `schema`, `zeroed` and `new_for_class` delegates to the
/// held variant.
fn enum_body(data: &ModelEnum) -> TokenStream {
    let exports_ = crate::path::exports_(data.meta.mm_model_path());
    let option_ = crate::path::option_();

    let base = data.base();
    let base_ident = base.ident;
    let base_ty = base.ty;

    let variant_idents: Vec<_> = data.variants.iter().map(|variant| variant.ident).collect();

    let new_for_class_arms = data.variants.iter().map(|variant| {
        let variant_ident = variant.ident;
        let ty = variant.ty;
        quote! {
            if let #option_::Some(inner) = <#ty as #exports_::Model>::new_for_class(class) {
                return #option_::Some(Self::#variant_ident(inner));
            }
        }
    });

    quote! {
        #[inline]
        fn schema() -> &'static #exports_::TypeSchema {
            <#base_ty as #exports_::Model>::schema()
        }

        fn model_schema(&self) -> &'static #exports_::TypeSchema {
            match self {
                #( Self::#variant_idents(inner) => #exports_::Model::model_schema(inner), )*
            }
        }

        #[inline]
        fn zeroed() -> Self {
            Self::#base_ident(<#base_ty as #exports_::Model>::zeroed())
        }

        fn new_for_class(class: &#exports_::ModelClass) -> #option_<Self> {
            if class.is::<Self>() {
                return #option_::Some(<Self as #exports_::Model>::zeroed());
            }
            #(#new_for_class_arms)*
            #option_::None
        }

        fn attr(&self, index: usize) -> #option_<&dyn #exports_::DynAttr> {
            match self {
                #( Self::#variant_idents(inner) => #exports_::Model::attr(inner, index), )*
            }
        }

        fn attr_mut(&mut self, index: usize) -> #option_<&mut dyn #exports_::DynAttr> {
            match self {
                #( Self::#variant_idents(inner) => #exports_::Model::attr_mut(inner, index), )*
            }
        }

        fn model_copy(&self) -> Self {
            match self {
                #( Self::#variant_idents(inner) => Self::#variant_idents(#exports_::Model::model_copy(inner)), )*
            }
        }
    }
}
