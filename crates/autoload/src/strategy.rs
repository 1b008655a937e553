//! The strategy contract and machinery shared by the built-in strategies.
//!
//! Every resolution algorithm implements [`AutoloadStrategy`]: one
//! operation that takes a fully qualified class name and produces either an
//! existing file path or nothing. The host ([`crate::Autoloader`]) never
//! cares which algorithm is behind the trait object.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, io};

use serde::{Deserialize, Serialize};

/// A resolution algorithm: class name in, existing source file out.
///
/// Implementations keep their registered mappings in instance state but
/// must keep all per-call scratch (the name being resolved, the partially
/// built path) in locals, so that a `find_class_file` call that ends up
/// triggering another lookup through the same instance stays correct.
pub trait AutoloadStrategy: Send + Sync {
    /// Resolve `class` to a source file that exists on disk.
    ///
    /// Returns `None` when no registered mapping matches or the matched
    /// file is absent. Absence is an expected outcome, not an error.
    fn find_class_file(&self, class: &str) -> Option<PathBuf>;
}

/// A shareable strategy handle, as installed into a runtime's loader chain.
pub type SharedStrategy = Arc<dyn AutoloadStrategy>;

/// The configurable constants of the naming convention being autoloaded.
///
/// Defaults describe PHP: `\` between namespace levels, `_` as the legacy
/// secondary separator, `.php` appended to every candidate path. The path
/// separator defaults to the host OS one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Source file extension appended to candidate paths, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Primary hierarchical separator between namespace levels.
    #[serde(default = "default_namespace_separator")]
    pub namespace_separator: char,

    /// Secondary separator that some conventions also treat as structural.
    #[serde(default = "default_legacy_separator")]
    pub legacy_separator: char,

    /// Separator used when building candidate file paths.
    #[serde(default = "default_path_separator")]
    pub path_separator: char,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            namespace_separator: default_namespace_separator(),
            legacy_separator: default_legacy_separator(),
            path_separator: default_path_separator(),
        }
    }
}

fn default_extension() -> String {
    "php".to_string()
}

fn default_namespace_separator() -> char {
    '\\'
}

fn default_legacy_separator() -> char {
    '_'
}

fn default_path_separator() -> char {
    std::path::MAIN_SEPARATOR
}

impl Conventions {
    /// Replace namespace separators with the path separator.
    pub(crate) fn namespace_to_path(&self, part: &str) -> String {
        part.replace(self.namespace_separator, &self.path_separator.to_string())
    }

    /// Replace legacy separators with the path separator.
    pub(crate) fn legacy_to_path(&self, part: &str) -> String {
        part.replace(self.legacy_separator, &self.path_separator.to_string())
    }

    /// Replace both separators with the path separator.
    pub(crate) fn all_to_path(&self, part: &str) -> String {
        self.legacy_to_path(&self.namespace_to_path(part))
    }

    /// Append the configured source extension to a relative path stem.
    pub(crate) fn with_extension(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension)
    }
}

/// An ordered prefix table with one-to-many base directories.
///
/// Registration order is significant twice over: prefixes are tried in the
/// order they were first registered (not by specificity), and the
/// directories under one prefix are tried in the order they were appended.
/// Entries are never removed for the lifetime of a strategy.
#[derive(Debug, Clone, Default)]
pub struct PrefixMap {
    entries: Vec<(String, Vec<PathBuf>)>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the directory list for `prefix`.
    pub fn append(&mut self, prefix: &str, path: impl Into<PathBuf>) {
        let path = path.into();
        match self.entries.iter_mut().find(|(p, _)| p == prefix) {
            Some((_, paths)) => paths.push(path),
            None => self.entries.push((prefix.to_string(), vec![path])),
        }
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(prefix, paths)| (prefix.as_str(), paths.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Check whether a candidate path is an existing regular file.
///
/// Filesystem errors other than "not found" (permissions, I/O) count as
/// absent so the caller can fall through to the next candidate, but are
/// logged so they are not invisible.
pub(crate) fn probe(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file(),
        Err(error) if error.kind() == io::ErrorKind::NotFound => false,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "skipping unreadable candidate");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_conventions_describe_php() {
        let conventions = Conventions::default();
        assert_eq!(conventions.extension, "php");
        assert_eq!(conventions.namespace_separator, '\\');
        assert_eq!(conventions.legacy_separator, '_');
    }

    #[test]
    fn conversion_helpers_use_the_path_separator() {
        let conventions = Conventions {
            path_separator: '/',
            ..Conventions::default()
        };
        assert_eq!(conventions.namespace_to_path("A\\B_C"), "A/B_C");
        assert_eq!(conventions.legacy_to_path("A\\B_C"), "A\\B/C");
        assert_eq!(conventions.all_to_path("A\\B_C"), "A/B/C");
        assert_eq!(conventions.with_extension("A/B"), "A/B.php");
    }

    #[test]
    fn prefix_map_preserves_registration_order() {
        let mut map = PrefixMap::new();
        map.append("Vendor", "first");
        map.append("Other", "third");
        map.append("Vendor", "second");

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "Vendor");
        assert_eq!(
            entries[0].1,
            &[PathBuf::from("first"), PathBuf::from("second")]
        );
        assert_eq!(entries[1].0, "Other");
    }

    #[test]
    fn probe_accepts_only_regular_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Thing.php");
        std::fs::write(&file, "<?php\n").unwrap();

        assert!(probe(&file));
        assert!(!probe(temp.path()));
        assert!(!probe(&temp.path().join("missing.php")));
    }
}
