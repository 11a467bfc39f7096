use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The umbrella package re-exporting every `mm_*` crate.
const UMBRELLA_NAME: &str = "modelmap";
const CRATE_PREFIX: &str = "mm_";

/// The caller's `Cargo.toml`, used to find how a workspace crate is reachable.
///
/// Generated code must name `mm_model` from the invoking crate, which may depend
/// on it directly or only through the `modelmap` umbrella package.
///
/// # Example
///
/// ```rust, ignore
/// # use mm_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("mm_model"));
/// ```
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. An `mm_*` crate, when the caller depends on `modelmap`, resolves to
///    `::modelmap::short_name` (e.g. `mm_model` -> `::modelmap::model`).
/// 3. Steps 1-2 are repeated for `dev-dependencies`.
/// 4. Otherwise the absolute path `::crate_name` is used.
///
/// A crate naming itself should add `extern crate self as crate_name;`
/// at its root so rule 4 also holds inside the crate.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn load(path: &Path, modified_time: SystemTime) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        let manifest = Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));
        Self {
            manifest,
            modified_time,
        }
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let joined = segments.join("::");
        syn::parse_str(&format!("::{joined}")).expect("crate names are valid paths")
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(UMBRELLA_NAME)
            .then(|| Self::absolute(&[UMBRELLA_NAME, module]))
    }

    fn table<'a>(&'a self, key: &str) -> Option<&'a Table> {
        match self.manifest.get(key) {
            Some(Item::Table(table)) => Some(table),
            _ => None,
        }
    }

    /// Return the [`syn::Path`] under which `name` is reachable from the caller.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|key| self.table(key))
            .find_map(|deps| Self::lookup(deps, name))
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Run `func` with the caller's [`Manifest`].
    ///
    /// Parsed manifests are cached per path and refreshed when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .expect("The Cargo.toml should have a modified time.");

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path) {
                if manifest.modified_time == modified_time {
                    return func(manifest);
                }
            }
        }

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
