use alloc::boxed::Box;
use alloc::vec::Vec;

use log::warn;
use mm_utils::hash::HashMap;

use crate::Model;
use crate::access::KeyPath;
use crate::info::{AttributeDecl, AttributeDescriptor, ModelClass};

// -----------------------------------------------------------------------------
// AttributeFilter

/// The effective attribute filter of a schema.
///
/// A whitelist takes precedence; when present the blacklist is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFilter {
    None,
    Blacklist(&'static [&'static str]),
    Whitelist(&'static [&'static str]),
}

impl AttributeFilter {
    fn new(whitelist: Option<&'static [&'static str]>, blacklist: Option<&'static [&'static str]>) -> Self {
        match (whitelist, blacklist) {
            (Some(names), _) => Self::Whitelist(names),
            (None, Some(names)) => Self::Blacklist(names),
            (None, None) => Self::None,
        }
    }

    /// Returns `true` if an attribute named `name` passes the filter.
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Self::None => true,
            Self::Blacklist(names) => !names.contains(&name),
            Self::Whitelist(names) => names.contains(&name),
        }
    }

    fn names(&self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Blacklist(names) | Self::Whitelist(names) => names,
        }
    }
}

// -----------------------------------------------------------------------------
// TypeSchema

/// The cached attribute layout of a model type.
///
/// Built once per type from the derive's [`AttributeDecl`]s and the type's
/// [`ModelHooks`](crate::ModelHooks), then shared for the rest of the process.
/// Every walker operation iterates the [included](Self::included) attributes
/// in declaration order.
///
/// Hook configuration that names unknown attributes, and keys that do not
/// parse, are skipped with a warning.
#[derive(Debug)]
pub struct TypeSchema {
    class: ModelClass,
    attributes: Box<[AttributeDescriptor]>,
    by_name: HashMap<&'static str, usize>,
    element_types: HashMap<&'static str, ModelClass>,
    filter: AttributeFilter,
}

impl TypeSchema {
    /// Build the schema of `T` from its attribute declarations.
    ///
    /// Key candidates come from [`key_mapper`](crate::ModelHooks::key_mapper)
    /// first, then from the declaration, then from the attribute name.
    pub fn build<T: Model>(decls: &[AttributeDecl]) -> Self {
        let class = ModelClass::of::<T>();
        let filter = AttributeFilter::new(T::whitelist(), T::blacklist());
        let mapper = T::key_mapper();

        let known = |name: &str| decls.iter().any(|decl| decl.name() == name);
        for (name, _) in mapper.iter().filter(|(name, _)| !known(name)) {
            warn!("`{}`: key mapper names unknown attribute `{name}`", T::type_name());
        }
        for name in filter.names().iter().filter(|name| !known(name)) {
            warn!("`{}`: attribute filter names unknown attribute `{name}`", T::type_name());
        }

        let attributes: Box<[AttributeDescriptor]> = decls
            .iter()
            .map(|decl| {
                let mapped = mapper
                    .iter()
                    .find(|(name, _)| *name == decl.name())
                    .map(|(_, keys)| *keys)
                    .filter(|keys| !keys.is_empty());
                let keys = parse_keys(T::type_name(), decl, mapped.unwrap_or(decl.keys()));
                AttributeDescriptor::new(decl, filter.includes(decl.name()), keys)
            })
            .collect();

        let mut by_name = HashMap::default();
        let mut element_types = HashMap::default();
        for (position, attr) in attributes.iter().enumerate() {
            by_name.insert(attr.name(), position);
            if let Some(element) = attr.kind().element_class() {
                element_types.insert(attr.name(), element);
            }
        }

        Self {
            class,
            attributes,
            by_name,
            element_types,
            filter,
        }
    }

    #[inline]
    pub fn class(&self) -> ModelClass {
        self.class
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.class.type_name()
    }

    /// All attributes, in declaration order.
    #[inline]
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// The attributes that pass the white/blacklist filter.
    #[inline]
    pub fn included(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter().filter(|attr| attr.included())
    }

    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.by_name.get(name).map(|&position| &self.attributes[position])
    }

    /// The element model of a container attribute.
    #[inline]
    pub fn element_type(&self, name: &str) -> Option<ModelClass> {
        self.element_types.get(name).copied()
    }

    #[inline]
    pub fn filter(&self) -> AttributeFilter {
        self.filter
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}

fn parse_keys(type_name: &str, decl: &AttributeDecl, raw: &[&str]) -> Box<[KeyPath]> {
    let mut keys: Vec<KeyPath> = raw
        .iter()
        .filter_map(|raw| match KeyPath::parse(raw) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("`{type_name}.{}`: skipping key: {err}", decl.name());
                None
            }
        })
        .collect();
    if keys.is_empty() {
        keys.push(KeyPath::single(decl.name()));
    }
    keys.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::AttributeFilter;

    #[test]
    fn whitelist_wins() {
        let filter = AttributeFilter::new(Some(&["name"]), Some(&["name", "pages"]));
        assert_eq!(filter, AttributeFilter::Whitelist(&["name"]));
        assert!(filter.includes("name"));
        assert!(!filter.includes("pages"));
    }

    #[test]
    fn blacklist_excludes() {
        let filter = AttributeFilter::new(None, Some(&["secret"]));
        assert!(!filter.includes("secret"));
        assert!(filter.includes("name"));
        assert!(AttributeFilter::None.includes("secret"));
    }
}
