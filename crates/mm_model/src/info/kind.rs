use alloc::boxed::Box;

use crate::info::ModelClass;

// -----------------------------------------------------------------------------
// Scalars

/// The numeric primitive behind a [`ScalarKind::Numeric`] attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl NumericKind {
    /// Returns `true` for `F32` and `F64`.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns `true` for signed integers and floats.
    #[inline]
    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize
        )
    }
}

/// The primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Numeric(NumericKind),
    Bool,
    String,
}

// -----------------------------------------------------------------------------
// Containers

/// The collection shape behind an [`AttrKind::Container`] attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerShape {
    /// Ordered, decoded from a JSON array.
    Sequence,
    /// Unordered, decoded from a JSON array.
    Set,
    /// String-keyed, decoded from a JSON object.
    Map,
}

// -----------------------------------------------------------------------------
// AttrKind

/// The classified kind of an attribute, which decides how it is coerced.
///
/// Kinds are computed once per attribute when a [`TypeSchema`] is built.
///
/// [`TypeSchema`]: crate::info::TypeSchema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrKind {
    Scalar(ScalarKind),
    /// A point in time, see `chrono` support in [`coerce`](crate::coerce).
    Date,
    Url,
    /// A plain value struct, identified by its tag.
    ValueStruct(&'static str),
    /// A nested model.
    Model(ModelClass),
    /// A collection of elements of the inner kind.
    Container(ContainerShape, Box<AttrKind>),
    /// A raw JSON node, passed through unchanged.
    Untyped,
    /// A value the mapper never reads or writes.
    Opaque,
}

impl AttrKind {
    /// The element kind of a container.
    #[inline]
    pub fn element(&self) -> Option<&AttrKind> {
        match self {
            Self::Container(_, element) => Some(element),
            _ => None,
        }
    }

    /// The class of a nested model attribute.
    #[inline]
    pub fn model_class(&self) -> Option<ModelClass> {
        match self {
            Self::Model(class) => Some(*class),
            _ => None,
        }
    }

    /// The model class of a container's elements, if they are models.
    #[inline]
    pub fn element_class(&self) -> Option<ModelClass> {
        self.element().and_then(Self::model_class)
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(..))
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_flags() {
        assert!(NumericKind::F32.is_float());
        assert!(!NumericKind::I64.is_float());
        assert!(NumericKind::I8.is_signed());
        assert!(!NumericKind::Usize.is_signed());
    }

    #[test]
    fn element_access() {
        let kind = AttrKind::Container(
            ContainerShape::Sequence,
            Box::new(AttrKind::Scalar(ScalarKind::String)),
        );
        assert!(kind.is_container());
        assert_eq!(kind.element(), Some(&AttrKind::Scalar(ScalarKind::String)));
        assert_eq!(kind.element_class(), None);
        assert_eq!(AttrKind::Untyped.element(), None);
    }
}
