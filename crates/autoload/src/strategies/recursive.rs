//! Recursive-search strategy: find a file by name anywhere under
//! registered roots.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::ident;
use crate::strategy::{AutoloadStrategy, Conventions};

/// Resolves classes by walking registered directory trees.
///
/// The namespace is discarded entirely; only the final segment matters, so
/// `Any\Namespace\Foo` searches every root depth-first for a file named
/// `Foo.php`. Roots are visited in registration order; sibling order
/// within a tree is whatever the filesystem yields. Missing or empty roots
/// are skipped without error.
///
/// Because the namespace is ignored, two classes sharing a final segment
/// are indistinguishable here: whichever file the walk meets first wins.
/// The walk has no depth bound; symlinks are not followed.
#[derive(Debug, Default)]
pub struct RecursiveStrategy {
    conventions: Conventions,
    paths: Vec<PathBuf>,
}

impl RecursiveStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            paths: Vec::new(),
        }
    }

    /// Register a root directory to search. Roots accumulate in order.
    pub fn register_path(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    fn find_in_root(root: &Path, target: &OsString) -> Option<PathBuf> {
        if !root.is_dir() {
            return None;
        }

        let walk = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::debug!(root = %root.display(), %error, "skipping unreadable entry");
                    continue;
                }
            };
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && entry.file_name() == target.as_os_str() {
                return Some(entry.into_path());
            }
        }

        None
    }
}

impl AutoloadStrategy for RecursiveStrategy {
    fn find_class_file(&self, class: &str) -> Option<PathBuf> {
        let (_, class_name) = ident::split(class, self.conventions.namespace_separator);
        if class_name.is_empty() {
            return None;
        }

        let target: OsString = self.conventions.with_extension(class_name).into();

        self.paths
            .iter()
            .find_map(|root| Self::find_in_root(root, &target))
    }
}
