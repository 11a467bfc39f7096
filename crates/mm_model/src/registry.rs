//! Lookup of model classes by name.
//!
//! [`ModelRegistry`] maps type names to [`ModelClass`]es, which is what a
//! [`select_class`](crate::ModelHooks::select_class) hook needs when the JSON
//! names its own class.
//!
//! With the `auto_register` feature, non-generic models marked
//! `#[model(auto_register)]` are collected at link time through [`inventory`]
//! and appear in [`ModelRegistry::new`] and [`ModelRegistry::global`].
//!
//! [`inventory`]: https://docs.rs/inventory

use core::any::TypeId;
use std::sync::LazyLock;

use mm_utils::TypeIdMap;
use mm_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::Model;
use crate::info::ModelClass;

// -----------------------------------------------------------------------------
// Auto register

#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub struct __AutoRegisterClass(pub fn() -> ModelClass);

#[cfg(feature = "auto_register")]
inventory::collect!(__AutoRegisterClass);

// -----------------------------------------------------------------------------
// ModelRegistry

/// A registry of model classes.
///
/// Names are the short [`Model::type_name`]s. When two registered classes
/// share a name, the name becomes ambiguous and resolves to neither.
///
/// # Example
///
/// ```
/// use mm_model::Model;
/// use mm_model::registry::ModelRegistry;
///
/// #[derive(Model)]
/// struct Circle {
///     radius: f64,
/// }
///
/// let mut registry = ModelRegistry::empty();
/// assert!(registry.register::<Circle>());
/// assert!(!registry.register::<Circle>());
///
/// let class = registry.get_with_type_name("Circle").unwrap();
/// assert!(class.is::<Circle>());
/// ```
pub struct ModelRegistry {
    classes: TypeIdMap<ModelClass>,
    name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for ModelRegistry {
    /// See [`ModelRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    /// Create an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            classes: TypeIdMap::new(),
            name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Create a registry holding every auto-registered class.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    /// The process-wide registry, filled by [`new`](Self::new) on first use.
    pub fn global() -> &'static ModelRegistry {
        static GLOBAL: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::new);
        &GLOBAL
    }

    /// Register model `T`. Returns `false` if it was already registered.
    #[inline]
    pub fn register<T: Model>(&mut self) -> bool {
        self.register_class(T::class())
    }

    /// Register `class`. Returns `false` if it was already registered.
    pub fn register_class(&mut self, class: ModelClass) -> bool {
        let name_to_id = &mut self.name_to_id;
        let ambiguous_names = &mut self.ambiguous_names;
        self.classes.try_insert(class.type_id(), || {
            let name = class.type_name();
            if !ambiguous_names.contains(name) {
                if name_to_id.remove(name).is_some() {
                    ambiguous_names.insert(name);
                } else {
                    name_to_id.insert(name, class.type_id());
                }
            }
            class
        })
    }

    /// Register every class marked `#[model(auto_register)]`.
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            for entry in inventory::iter::<__AutoRegisterClass> {
                self.register_class((entry.0)());
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<ModelClass> {
        self.classes.get(&type_id).copied()
    }

    /// The class registered under `name`, unless the name is ambiguous.
    #[inline]
    pub fn get_with_type_name(&self, name: &str) -> Option<ModelClass> {
        self.name_to_id.get(name).and_then(|id| self.get(*id))
    }

    #[inline]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous_names.contains(name)
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.classes.contains(&type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate the registered classes in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = ModelClass> + '_ {
        self.classes.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::ModelRegistry;
    use crate::Model;

    mod a {
        #[derive(crate::Model)]
        pub struct Shape {
            pub sides: u32,
        }
    }

    mod b {
        #[derive(crate::Model)]
        pub struct Shape {
            pub name: String,
        }
    }

    #[derive(Model)]
    struct Square {
        side: f64,
    }

    #[derive(Model)]
    #[model(auto_register)]
    struct Triangle {
        base: f64,
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = ModelRegistry::empty();
        assert!(registry.register::<a::Shape>());
        assert!(registry.register::<b::Shape>());
        assert!(registry.register::<Square>());

        assert_eq!(registry.len(), 3);
        assert!(registry.is_ambiguous("Shape"));
        assert!(registry.get_with_type_name("Shape").is_none());
        assert!(registry.get_with_type_name("Square").unwrap().is::<Square>());
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_registered() {
        let registry = ModelRegistry::global();
        assert!(registry.contains(core::any::TypeId::of::<Triangle>()));
        assert!(!registry.contains(core::any::TypeId::of::<Square>()));
        assert!(registry.get_with_type_name("Triangle").is_some());
    }
}
