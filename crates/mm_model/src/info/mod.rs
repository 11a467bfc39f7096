//! Static attribute layouts of model types.
//!
//! - [`TypeSchema`]: the resolved attributes of one model type.
//! - [`AttributeDescriptor`]: one attribute's name, kind, keys and filter state.
//! - [`AttrKind`]: the classified kind that decides coercion.
//! - [`ModelClass`]: a runtime handle to a model type.
//! - [`SchemaCell`] / [`GenericSchemaCell`]: the per-type schema caches.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod class;
mod descriptor;
mod kind;
mod schema;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericSchemaCell, SchemaCell};
pub use class::ModelClass;
pub use descriptor::{AttributeDecl, AttributeDescriptor};
pub use kind::{AttrKind, ContainerShape, NumericKind, ScalarKind};
pub use schema::{AttributeFilter, TypeSchema};
