//! Static storage for [`TypeSchema`]s.
//!
//! Generated [`Model::schema`](crate::Model::schema) impls keep their schema in
//! a `static CELL` inside the function body:
//!
//! - [`SchemaCell`] for non-generic models, a plain [`OnceLock`].
//! - [`GenericSchemaCell`] for generic models, whose `static CELL` is shared by
//!   every instantiation and therefore maps [`TypeId`]s to leaked schemas.
//!
//! Both build a schema at most once per type, even under concurrent first use.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use mm_utils::TypeIdMap;

use crate::info::TypeSchema;

/// Schema storage for a non-generic model.
///
/// ```ignore
/// impl Model for Book {
///     fn schema() -> &'static TypeSchema {
///         static CELL: SchemaCell = SchemaCell::new();
///         CELL.get_or_init(|| TypeSchema::build::<Book>(&[
///             AttributeDecl::new::<String>("name", 0),
///         ]))
///     }
///     // ...
/// }
/// ```
pub struct SchemaCell(OnceLock<TypeSchema>);

impl SchemaCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored schema, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeSchema) -> &TypeSchema {
        self.0.get_or_init(f)
    }
}

/// Schema storage for a generic model.
///
/// ```ignore
/// impl<T: AttrValue> Model for Page<T> {
///     fn schema() -> &'static TypeSchema {
///         static CELL: GenericSchemaCell = GenericSchemaCell::new();
///         CELL.get_or_insert::<Self>(|| TypeSchema::build::<Self>(&[
///             AttributeDecl::new::<Vec<T>>("items", 0),
///         ]))
///     }
///     // ...
/// }
/// ```
///
/// The schema is built while the write lock is held, so `f` must not request
/// the schema of another instantiation of the same generic model.
pub struct GenericSchemaCell(RwLock<TypeIdMap<&'static TypeSchema>>);

impl GenericSchemaCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the schema stored for `G`, building it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeSchema) -> &TypeSchema {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> TypeSchema) -> &TypeSchema {
        if let Some(schema) = self.get_by_type_id(type_id) {
            return schema;
        }

        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have built it between the two locks.
        *map.get_or_insert(type_id, || -> &'static TypeSchema { Box::leak(Box::new(f())) })
    }

    #[inline]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeSchema> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }
}
