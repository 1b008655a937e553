//! PEAR-style strategy: flat, underscore-delimited class names under
//! prefix-registered directories.

use std::path::PathBuf;

use crate::ident;
use crate::strategy::{probe, AutoloadStrategy, Conventions, PrefixMap};

/// Resolves classes named in the flat PEAR convention.
///
/// The whole class name converts into a relative path: both the namespace
/// separator and the legacy underscore become directory separators, so
/// `Dummy_Core_Widget` under base `R` probes `R/Dummy/Core/Widget.php`.
///
/// Prefix matching is a plain byte-prefix test against the unconverted
/// class name, with no awareness of segment boundaries: a registered
/// prefix `Dum` matches `Dummy_Thing`. That is the legacy contract, not an
/// oversight.
#[derive(Debug, Default)]
pub struct PearStrategy {
    conventions: Conventions,
    prefix_paths: PrefixMap,
}

impl PearStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            prefix_paths: PrefixMap::new(),
        }
    }

    /// Register a base directory for a class-name prefix. The same prefix
    /// may be registered repeatedly; directories accumulate in order.
    pub fn register_prefix_path(&mut self, prefix: &str, path: impl Into<PathBuf>) {
        self.prefix_paths.append(prefix, path);
    }
}

impl AutoloadStrategy for PearStrategy {
    fn find_class_file(&self, class: &str) -> Option<PathBuf> {
        let conventions = &self.conventions;
        let class = ident::strip_root(class, conventions.namespace_separator);
        if class.is_empty()
            || class.ends_with(conventions.namespace_separator)
            || class.ends_with(conventions.legacy_separator)
        {
            return None;
        }

        let relative = conventions.with_extension(&conventions.all_to_path(class));

        for (prefix, roots) in self.prefix_paths.iter() {
            if !class.starts_with(prefix) {
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
