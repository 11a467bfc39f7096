//! Map JSON value trees onto strongly typed models and back.
//!
//! A model is a struct deriving [`Model`]. Its attributes are described once
//! by a cached [`TypeSchema`](info::TypeSchema), which every operation walks:
//!
//! - [`decode_from_value`] / [`decode_from_text`]: build a model from JSON.
//! - [`populate_from_value`]: fill an existing model.
//! - [`encode_to_value`] / [`encode_to_text`]: write a model back to JSON.
//! - [`model_eq`], [`model_hash`], [`model_copy`]: schema-driven equality,
//!   hashing and deep copies.
//!
//! Per-type behavior (key aliases, attribute filters, class selection and
//! validation) is configured through [`ModelHooks`].
//!
//! The derive generates an empty [`ModelHooks`] impl unless the type opts out
//! with `#[model(Hooks = false)]` and writes its own.
//!
//! # Example
//!
//! ```
//! use mm_model::{Model, decode_from_text, encode_to_value};
//!
//! #[derive(Model, Debug)]
//! struct Book {
//!     name: String,
//!     #[model(key = "ext.desc")]
//!     desc: String,
//!     pages: u32,
//! }
//!
//! let book: Book = decode_from_text(r#"{"name":"Rust","ext":{"desc":"types"},"pages":"512"}"#).unwrap();
//! assert_eq!(book.desc, "types");
//! assert_eq!(book.pages, 512);
//!
//! let node = encode_to_value(&book).unwrap();
//! assert_eq!(node["ext"]["desc"], "types");
//! ```

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate as `mm_model`, which must also resolve
// inside the crate and its unit tests.
extern crate self as mm_model;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod error;
mod hooks;
mod model;

pub mod access;
pub mod coerce;
pub mod container;
pub mod info;
pub mod registry;
pub mod walker;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use convert::{
    decode_array, decode_array_from_text, decode_from_text, decode_from_value, decode_map,
    decode_map_from_text, describe, encode_slice, encode_to_text, encode_to_value, model_copy,
    populate_from_text, populate_from_value, try_decode_array, try_decode_from_text,
    try_decode_from_value, try_decode_map, try_encode_to_text, try_encode_to_value,
    try_populate_from_value,
};
pub use error::{HookStage, MapError};
pub use hooks::{KeyMapper, ModelHooks};
pub use model::Model;
pub use walker::{model_eq, model_hash};

pub use coerce::{AttrValue, DynAttr, Opaque, ValueStruct};
pub use mm_model_derive as derive;
pub use mm_model_derive::Model;
pub use serde_json::{Map, Value};
