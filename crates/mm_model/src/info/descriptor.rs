use alloc::boxed::Box;

use crate::AttrValue;
use crate::access::KeyPath;
use crate::info::AttrKind;

// -----------------------------------------------------------------------------
// AttributeDecl

/// The static declaration of one attribute, emitted by `#[derive(Model)]`.
///
/// `index` is the accessor slot passed to [`Model::attr`](crate::Model::attr).
/// `keys` are the `#[model(key = ..)]` candidates; when empty, the attribute
/// name is its only key.
#[derive(Clone, Copy)]
pub struct AttributeDecl {
    name: &'static str,
    index: usize,
    kind: fn() -> AttrKind,
    nullable: bool,
    keys: &'static [&'static str],
}

impl AttributeDecl {
    /// Declare an attribute whose value type is `T`.
    #[inline]
    pub const fn new<T: AttrValue>(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            kind: T::attr_kind,
            nullable: T::NULLABLE,
            keys: &[],
        }
    }

    /// Set the candidate JSON keys, in priority order.
    #[inline]
    pub const fn with_keys(mut self, keys: &'static [&'static str]) -> Self {
        self.keys = keys;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    #[inline]
    pub(crate) fn kind(&self) -> AttrKind {
        (self.kind)()
    }

    #[inline]
    pub(crate) const fn nullable(&self) -> bool {
        self.nullable
    }
}

// -----------------------------------------------------------------------------
// AttributeDescriptor

/// A resolved attribute of a [`TypeSchema`](crate::info::TypeSchema).
#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    name: &'static str,
    index: usize,
    kind: AttrKind,
    nullable: bool,
    included: bool,
    keys: Box<[KeyPath]>,
}

impl AttributeDescriptor {
    pub(crate) fn new(decl: &AttributeDecl, included: bool, keys: Box<[KeyPath]>) -> Self {
        debug_assert!(!keys.is_empty());
        Self {
            name: decl.name(),
            index: decl.index(),
            kind: decl.kind(),
            nullable: decl.nullable(),
            included,
            keys,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The accessor slot of this attribute.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn kind(&self) -> &AttrKind {
        &self.kind
    }

    /// Returns `true` if a JSON `null` is a valid value (an `Option` attribute).
    #[inline]
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Returns `true` if the attribute takes part in decode, encode,
    /// equality and hashing, after white/blacklist filtering.
    #[inline]
    pub fn included(&self) -> bool {
        self.included
    }

    /// Candidate key paths, in priority order. Never empty.
    #[inline]
    pub fn keys(&self) -> &[KeyPath] {
        &self.keys
    }

    /// The key path used when encoding.
    #[inline]
    pub fn primary_key(&self) -> &KeyPath {
        &self.keys[0]
    }
}
