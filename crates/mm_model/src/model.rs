use crate::ModelHooks;
use crate::coerce::DynAttr;
use crate::info::{ModelClass, TypeSchema};

/// A type mapped to and from JSON objects.
///
/// Implemented by `#[derive(Model)]`. The accessors expose attributes by the
/// slot index recorded in each [`AttributeDescriptor`]; everything else is
/// driven by the [`TypeSchema`].
///
/// Enums deriving `Model` are polymorphic bases: each variant wraps one model,
/// [`new_for_class`](Self::new_for_class) picks the variant for a selected
/// class, and the other methods delegate to the held variant.
///
/// [`AttributeDescriptor`]: crate::info::AttributeDescriptor
pub trait Model: ModelHooks + Sized + Send + Sync + 'static {
    /// The type name. `#[derive(Model)]` overrides this with the short name,
    /// e.g. `"Book"`; the default is the full [`core::any::type_name`].
    fn type_name() -> &'static str {
        core::any::type_name::<Self>()
    }

    fn class() -> ModelClass {
        ModelClass::of::<Self>()
    }

    /// The schema of the declared type.
    fn schema() -> &'static TypeSchema;

    /// The schema of this value, which differs from [`schema`](Self::schema)
    /// for a polymorphic base holding a subclass.
    fn model_schema(&self) -> &'static TypeSchema {
        Self::schema()
    }

    /// A value with every attribute at its default.
    fn zeroed() -> Self;

    /// A zeroed value of `class`, if this type can hold it.
    fn new_for_class(class: &ModelClass) -> Option<Self> {
        class.is::<Self>().then(Self::zeroed)
    }

    fn attr(&self, index: usize) -> Option<&dyn DynAttr>;

    fn attr_mut(&mut self, index: usize) -> Option<&mut dyn DynAttr>;

    /// A deep copy.
    ///
    /// Included and excluded attributes are copied; `#[model(skip)]` fields
    /// are cloned.
    fn model_copy(&self) -> Self;
}
