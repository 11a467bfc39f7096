//! Bidirectional mapping between JSON value trees and strongly typed models.
//!
//! - [`model`]: schema reflection, coercion and the model walker.
//! - [`utils`]: hashing helpers and type-keyed containers.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use mm_model as model;
pub use mm_utils as utils;
