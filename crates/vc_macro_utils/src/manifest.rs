use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to locate a workspace crate as seen from
/// the crate invoking a derive.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_named"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `vc_` and the caller depends on
///    the facade crate `vc_naming`, return `::vc_naming::short_name`
///    (e.g. `vc_named` -> `::vc_naming::named`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// ## Note
///
/// A crate deriving its own traits sees neither rule 1 nor 2 and gets
/// `::crate_name`; an `extern crate self as crate_name;` in its root makes
/// that path valid for library code and doctests alike.
#[derive(Debug)]
pub struct Manifest {
    manifest: Document<Box<str>>,
    modified_time: SystemTime,
}

const FACADE_NAME: &str = "vc_naming";
const CRATE_PREFIX: &str = "vc_";

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
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(parse_path(&format!("::{name}")));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return Some(parse_path(&format!("::{FACADE_NAME}::{module}")));
        }
        None
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from
    /// the caller's Cargo.toml. See the type documentation for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| parse_path(&format!("::{name}")))
    }

    /// Runs `func` with the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    /// Parsing and locking are not cheap for a proc-macro, so call this
    /// once per macro invocation and keep the resulting [`syn::Path`].
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::manifest_path();
        let modified_time = std::fs::metadata(&manifest_path)
            .and_then(|metadata| metadata.modified())
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[inline]
fn parse_path(path: &str) -> syn::Path {
    syn::parse_str(path).unwrap_or_else(|_| panic!("`{path}` is not a valid path"))
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.into()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn resolve(text: &str) -> String {
        let path = manifest(text).get_crate_path("vc_named");
        quote::quote!(#path).to_string().replace(' ', "")
    }

    #[test]
    fn direct_dependency() {
        assert_eq!(resolve("[dependencies]\nvc_named = \"0.0.1\"\n"), "::vc_named");
    }

    #[test]
    fn through_facade() {
        assert_eq!(
            resolve("[dev-dependencies]\nvc_naming = \"0.0.1\"\n"),
            "::vc_naming::named"
        );
    }

    #[test]
    fn fallback() {
        assert_eq!(resolve("[package]\nname = \"x\"\n"), "::vc_named");
    }
}
