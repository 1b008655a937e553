//! PSR-0 strategy: namespaces map to directories, underscores in the class
//! name map to directories too.

use std::path::PathBuf;

use crate::ident;
use crate::strategy::{probe, AutoloadStrategy, Conventions, PrefixMap};

/// Resolves classes laid out per the PSR-0 standard.
///
/// The namespace part converts separator-for-separator into a directory
/// path; underscores inside it stay literal. The final segment converts its
/// underscores into directory separators. The whole converted name lives
/// under each registered base directory, so `Vendor\Sub_Class` under base
/// `R` for prefix `Vendor` probes `R/Vendor/Sub/Class.php`.
///
/// Prefixes are matched lexically against the namespace part and tried in
/// registration order, not by specificity: an earlier, less specific prefix
/// wins when both lead to an existing file.
#[derive(Debug, Default)]
pub struct Psr0Strategy {
    conventions: Conventions,
    namespace_paths: PrefixMap,
}

impl Psr0Strategy {
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

impl AutoloadStrategy for Psr0Strategy {
    fn find_class_file(&self, class: &str) -> Option<PathBuf> {
        let conventions = &self.conventions;
        let (namespace, class_name) = ident::split(class, conventions.namespace_separator);
        if class_name.is_empty() {
            return None;
        }

        let namespace_path = conventions.namespace_to_path(namespace);
        let class_path = conventions.legacy_to_path(class_name);
        let stem = if namespace_path.is_empty() {
            class_path
        } else {
            format!(
                "{namespace_path}{}{class_path}",
                conventions.path_separator
            )
        };
        let relative = conventions.with_extension(&stem);

        for (prefix, roots) in self.namespace_paths.iter() {
            if !namespace.starts_with(prefix) {
                continue;
            }
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
    fn resolves_nested_class_under_registered_namespace() {
        let temp = TempDir::new().unwrap();
        let file = fixture(temp.path(), "Vendor/Package/Dummy/Core/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor\\Package", temp.path());

        assert_eq!(
            strategy.find_class_file("Vendor\\Package\\Dummy\\Core\\Component"),
            Some(file)
        );
    }

    #[test]
    fn leading_separator_in_lookup_is_ignored() {
        let temp = TempDir::new().unwrap();
        let file = fixture(temp.path(), "Vendor/Package/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor\\Package", temp.path());

        assert_eq!(
            strategy.find_class_file("\\Vendor\\Package\\Component"),
            Some(file)
        );
    }

    #[test]
    fn underscores_in_class_name_become_directories() {
        let temp = TempDir::new().unwrap();
        let file = fixture(temp.path(), "Vendor/Sub/Class.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor", temp.path());

        assert_eq!(
            strategy.find_class_file("Vendor\\Sub_Class"),
            Some(file)
        );
    }

    #[test]
    fn underscores_in_namespace_stay_literal() {
        let temp = TempDir::new().unwrap();
        let file = fixture(temp.path(), "Vendor/Underscored_Section/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor", temp.path());

        assert_eq!(
            strategy.find_class_file("Vendor\\Underscored_Section\\Component"),
            Some(file)
        );
    }

    #[test]
    fn directories_for_one_prefix_are_tried_in_registration_order() {
        let temp = TempDir::new().unwrap();
        let first_root = temp.path().join("first");
        let second_root = temp.path().join("second");
        let in_first = fixture(&first_root, "Vendor/Component.php");
        fixture(&second_root, "Vendor/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor", &first_root);
        strategy.register_namespace_path("Vendor", &second_root);

        assert_eq!(strategy.find_class_file("Vendor\\Component"), Some(in_first));
    }

    #[test]
    fn swapped_registration_order_finds_the_other_file() {
        let temp = TempDir::new().unwrap();
        let first_root = temp.path().join("first");
        let second_root = temp.path().join("second");
        fixture(&first_root, "Vendor/Component.php");
        let in_second = fixture(&second_root, "Vendor/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor", &second_root);
        strategy.register_namespace_path("Vendor", &first_root);

        assert_eq!(
            strategy.find_class_file("Vendor\\Component"),
            Some(in_second)
        );
    }

    #[test]
    fn prefix_registered_with_trailing_separator_still_matches_nested_classes() {
        let temp = TempDir::new().unwrap();
        let nested = fixture(temp.path(), "Vendor/Package/Sub/Component.php");
        fixture(temp.path(), "Vendor/Package/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor\\Package\\", temp.path());

        // "Vendor\Package\" is a lexical prefix of the namespace
        // "Vendor\Package\Sub", but not of the exact namespace
        // "Vendor\Package".
        assert_eq!(
            strategy.find_class_file("Vendor\\Package\\Sub\\Component"),
            Some(nested)
        );
        assert_eq!(strategy.find_class_file("Vendor\\Package\\Component"), None);
    }

    #[test]
    fn prefix_registered_with_leading_separator_never_matches() {
        let temp = TempDir::new().unwrap();
        fixture(temp.path(), "Vendor/Package/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("\\Vendor\\Package", temp.path());

        assert_eq!(strategy.find_class_file("\\Vendor\\Package\\Component"), None);
    }

    #[test]
    fn unregistered_namespace_is_not_found() {
        let temp = TempDir::new().unwrap();
        fixture(temp.path(), "Vendor/Package/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Unrelated", temp.path());

        assert_eq!(strategy.find_class_file("Vendor\\Package\\Component"), None);
    }

    #[test]
    fn trailing_separator_in_lookup_is_not_found() {
        let temp = TempDir::new().unwrap();
        fixture(temp.path(), "Vendor/Component.php");

        let mut strategy = Psr0Strategy::new();
        strategy.register_namespace_path("Vendor", temp.path());

        assert_eq!(strategy.find_class_file("Vendor\\Component\\"), None);
    }

    #[test]
    fn empty_strategy_is_silent() {
        let strategy = Psr0Strategy::new();
        assert_eq!(strategy.find_class_file("Vendor\\Component"), None);
    }
}
