//! PSR-4 strategy: a namespace prefix maps to a directory root, the rest of
//! the class name maps to a relative file path.

use std::path::PathBuf;

use crate::ident;
use crate::strategy::{probe, AutoloadStrategy, Conventions, PrefixMap};

/// Resolves classes laid out per the PSR-4 standard.
///
/// Each registered prefix is matched as a literal string prefix of the full
/// (rootless) class name. The remainder past the prefix converts namespace
/// separators into directory separators and is joined under each base
/// directory in turn. Unlike PSR-0, underscores are never structural:
/// `Vendor\Sub_Class` under base `R` for prefix `Vendor` probes
/// `R/Sub_Class.php`.
#[derive(Debug, Default)]
pub struct Psr4Strategy {
    conventions: Conventions,
    namespace_paths: PrefixMap,
}

impl Psr4Strategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            namespace_paths: PrefixMap::new(),
        }
    }

    /// Register a base directory for a namespace prefix. The same prefix
    /// may be registered repeatedly; directories accumulate in order.
    pub fn register_namespace_path(&mut self, namespace: &str, path: impl Into<PathBuf>) {
        self.namespace_paths.append(namespace, path);
    }
}

impl AutoloadStrategy for Psr4Strategy {
    fn find_class_file(&self, class: &str) -> Option<PathBuf> {
        let conventions = &self.conventions;
        let separator = conventions.namespace_separator;
        let class = ident::strip_root(class, separator);

        let (_, class_name) = ident::split(class, separator);
        if class_name.is_empty() {
            return None;
        }

        for (prefix, roots) in self.namespace_paths.iter() {
            if !class.starts_with(prefix) {
                continue;
            }

            // Cut exactly the prefix, then drop the separator between the
            // prefix and the remainder. A prefix covering the whole class
            // name leaves nothing to resolve.
            let remainder = class[prefix.len()..].trim_start_matches(separator);
            if remainder.is_empty() {
                continue;
            }

            let relative = conventions.with_extension(&conventions.namespace_to_path(remainder));
            for root in roots {
                let candidate = root.join(&relative);
                if probe(&candidate) {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn fixture(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<?php\n").unwrap();
        path
    }

    #[test]
    fn resolves_remainder_under_the_base_directory() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let file = fixture(&src, "Dummy/Thing.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor\\Pkg", &src);

        assert_eq!(
            strategy.find_class_file("Vendor\\Pkg\\Dummy\\Thing"),
            Some(file)
        );
    }

    #[test]
    fn leading_separator_in_lookup_is_ignored() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let file = fixture(&src, "Dummy/Thing.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor\\Pkg", &src);

        assert_eq!(
            strategy.find_class_file("\\Vendor\\Pkg\\Dummy\\Thing"),
            Some(file)
        );
    }

    #[test]
    fn underscores_are_preserved_literally() {
        let temp = TempDir::new().unwrap();
        let file = fixture(temp.path(), "Sub_Class.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor", temp.path());

        assert_eq!(strategy.find_class_file("Vendor\\Sub_Class"), Some(file));
    }

    #[test]
    fn prefix_with_trailing_separator_resolves_the_same_layout() {
        let temp = TempDir::new().unwrap();
        let file = fixture(temp.path(), "Dummy/Thing.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor\\Pkg\\", temp.path());

        assert_eq!(
            strategy.find_class_file("Vendor\\Pkg\\Dummy\\Thing"),
            Some(file)
        );
    }

    #[test]
    fn directories_for_one_prefix_are_tried_in_registration_order() {
        let temp = TempDir::new().unwrap();
        let first_root = temp.path().join("first");
        let second_root = temp.path().join("second");
        let in_first = fixture(&first_root, "Thing.php");
        fixture(&second_root, "Thing.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor", &first_root);
        strategy.register_namespace_path("Vendor", &second_root);

        assert_eq!(strategy.find_class_file("Vendor\\Thing"), Some(in_first));
    }

    #[test]
    fn falls_through_to_the_next_directory_when_the_first_misses() {
        let temp = TempDir::new().unwrap();
        let first_root = temp.path().join("first");
        let second_root = temp.path().join("second");
        fs::create_dir_all(&first_root).unwrap();
        let in_second = fixture(&second_root, "Thing.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor", &first_root);
        strategy.register_namespace_path("Vendor", &second_root);

        assert_eq!(strategy.find_class_file("Vendor\\Thing"), Some(in_second));
    }

    #[test]
    fn prefix_equal_to_the_whole_class_name_is_not_found() {
        let temp = TempDir::new().unwrap();
        fixture(temp.path(), "Pkg.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor\\Pkg", temp.path());

        assert_eq!(strategy.find_class_file("Vendor\\Pkg"), None);
    }

    #[test]
    fn lexical_prefix_match_crosses_segment_boundaries() {
        let temp = TempDir::new().unwrap();
        // Prefix "Vendor\Pkg" lexically matches "Vendor\PkgExtra\Thing",
        // leaving remainder "Extra\Thing".
        let file = fixture(temp.path(), "Extra/Thing.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor\\Pkg", temp.path());

        assert_eq!(
            strategy.find_class_file("Vendor\\PkgExtra\\Thing"),
            Some(file)
        );
    }

    #[test]
    fn trailing_separator_in_lookup_is_not_found() {
        let temp = TempDir::new().unwrap();
        fixture(temp.path(), "Thing.php");

        let mut strategy = Psr4Strategy::new();
        strategy.register_namespace_path("Vendor", temp.path());

        assert_eq!(strategy.find_class_file("Vendor\\Thing\\"), None);
    }

    #[test]
    fn empty_strategy_is_silent() {
        let strategy = Psr4Strategy::new();
        assert_eq!(strategy.find_class_file("Vendor\\Thing"), None);
    }
}
