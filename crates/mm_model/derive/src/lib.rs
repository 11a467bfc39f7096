//! Provide `#[derive(Model)]` for `mm_model`.
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MODEL_ATTRIBUTE_NAME: &str = "model";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Model Derivation
///
/// `#[derive(Model)]` implements the following traits:
///
/// - `Model`: schema, attribute accessors, zeroed values and deep copies.
/// - `AttrValue`: so the type can be nested in other models and containers.
/// - `ModelHooks`: an empty impl, see below.
/// - `Default`: the zeroed value, so models nest in other models.
///
/// Every field type must implement `AttrValue` and `Default`; a `Url` field
/// is declared as `Option<Url>`.
///
/// ## Structs
///
/// Each named field is an attribute, read from and written to the JSON key
/// of the same name.
///
/// ```rust, ignore
/// #[derive(Model)]
/// struct Book {
///     name: String,
///     pages: u32,
/// }
/// ```
///
/// ### Field keys
///
/// `key` sets the JSON key. A dotted key addresses a nested object, and a
/// list gives candidates in priority order; the first one is used for
/// encoding.
///
/// ```rust, ignore
/// #[derive(Model)]
/// struct Book {
///     #[model(key = "ext.desc")]
///     desc: String,
///     #[model(key = ["id", "ID", "book_id"])]
///     id: u64,
/// }
/// ```
///
/// Keys returned by `ModelHooks::key_mapper` take precedence over `key`.
///
/// ### Skipped fields
///
/// `skip` removes a field from the schema. It is `Default` in new values and
/// cloned in copies, so it must implement `Default` and `Clone` but not
/// `AttrValue`.
///
/// ```rust, ignore
/// #[derive(Model)]
/// struct Book {
///     name: String,
///     #[model(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Enums
///
/// An enum whose variants each wrap one model is a polymorphic base. The base
/// variant (the first, or the one marked `#[model(base)]`) gives the enum its
/// class and schema; `ModelHooks::select_class` picks the variant to decode.
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(select = pick_shape)]
/// enum AnyShape {
///     #[model(base)]
///     Shape(Shape),
///     Circle(Circle),
/// }
///
/// fn pick_shape(object: &Map<String, Value>) -> Option<ModelClass> {
///     object.contains_key("radius").then(ModelClass::of::<Circle>)
/// }
/// ```
///
/// The generated `ModelHooks` of an enum forwards `will_decode` and (without
/// `select`) `select_class` to the base model, and `did_decode`/`did_encode`
/// to the held variant.
///
/// ## Type attributes
///
/// - `Hooks = false`: skip the `ModelHooks` impl to write it by hand.
/// - `select = path`: implement `ModelHooks::select_class` with the function
///   at `path`.
/// - `eq`: implement `PartialEq`, `Eq` and `Hash` through the schema-driven
///   `model_eq` and `model_hash`.
/// - `auto_register`: add the class to `ModelRegistry::global()`. Ignored for
///   generic types.
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(Hooks = false, eq, auto_register)]
/// struct User {
///     id: u64,
///     password: String,
/// }
///
/// impl ModelHooks for User {
///     fn blacklist() -> Option<&'static [&'static str]> {
///         Some(&["password"])
///     }
/// }
/// ```
///
/// ## Generics
///
/// Type parameters get an `AttrValue` bound. Lifetime parameters are not
/// supported.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ModelDerive::from_input(&ast) {
        Ok(derive) => impls::impl_model(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
