use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Model;
use crate::info::TypeSchema;

/// A runtime handle to a model type.
///
/// Returned by [`ModelHooks::select_class`] to pick the concrete class of a
/// polymorphic attribute, and stored in [`AttrKind::Model`] for nested models.
/// Two classes are equal when they name the same Rust type.
///
/// [`ModelHooks::select_class`]: crate::ModelHooks::select_class
/// [`AttrKind::Model`]: crate::info::AttrKind::Model
#[derive(Clone, Copy)]
pub struct ModelClass {
    type_id: TypeId,
    type_name: fn() -> &'static str,
    schema: fn() -> &'static TypeSchema,
}

impl ModelClass {
    /// The class of model `T`.
    #[inline]
    pub fn of<T: Model>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: T::type_name,
            schema: T::schema,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The short name of the model, as used by registries and diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// The cached schema of the model, built on first access.
    #[inline]
    pub fn schema(&self) -> &'static TypeSchema {
        (self.schema)()
    }

    /// Returns `true` if this class is type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for ModelClass {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ModelClass {}

impl Hash for ModelClass {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelClass").field(&self.type_name()).finish()
    }
}
