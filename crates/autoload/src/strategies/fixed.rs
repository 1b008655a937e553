//! Fixed-map strategy: exact class name to exact file path.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ident;
use crate::strategy::{probe, AutoloadStrategy, Conventions};

/// Resolves classes through an exact-match table registered one entry at a
/// time. No hierarchical or partial matching is performed.
///
/// Lookups strip leading namespace separators before consulting the table,
/// while registration stores the name verbatim. An entry registered with a
/// leading or trailing separator is therefore unreachable by a normalized
/// lookup; that asymmetry is deliberate and covered by tests.
#[derive(Debug, Default)]
pub struct FixedStrategy {
    conventions: Conventions,
    class_paths: HashMap<String, PathBuf>,
}

impl FixedStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            class_paths: HashMap::new(),
        }
    }

    /// Map `class` to `path`. Re-registering the same class overwrites the
    /// previous entry.
    pub fn register_class_path(&mut self, class: &str, path: impl Into<PathBuf>) {
        self.class_paths.insert(class.to_string(), path.into());
    }
}

impl AutoloadStrategy for FixedStrategy {
    fn find_class_file(&self, class: &str) -> Option<PathBuf> {
        let class = ident::strip_root(class, self.conventions.namespace_separator);
        if class.is_empty() {
            return None;
        }

        let path = self.class_paths.get(class)?;
        probe(path).then(|| path.clone())
    }
}
