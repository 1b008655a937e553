//! Configuration for the autoloader.
//!
//! Loads settings from `.autoload.toml` in a project root, with `AUTOLOAD_*`
//! environment variables layered on top. Uses figment for layered
//! configuration with provenance tracking. The file declares which strategy
//! to build and the mappings to register, so a front end can assemble an
//! autoloader without code:
//!
//! ```toml
//! strategy = "psr4"
//!
//! [conventions]
//! extension = "php"
//!
//! [psr4]
//! "Vendor\\Package" = ["src", "src-legacy"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::strategies::{
    FixedStrategy, PearStrategy, Psr0Strategy, Psr4Strategy, RecursiveStrategy,
};
use crate::strategy::{Conventions, SharedStrategy};
use crate::{AutoloadError, Result};

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = ".autoload.toml";

/// Autoloader configuration.
///
/// Mapping tables are TOML tables, so prefixes register in sorted key
/// order; the directory lists under each prefix keep their written order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Which strategy [`Config::build_strategy`] constructs.
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Naming-convention constants shared by every strategy.
    #[serde(default)]
    pub conventions: Conventions,

    /// Exact class-to-file entries for the fixed strategy.
    #[serde(default)]
    pub fixed: BTreeMap<String, PathBuf>,

    /// PSR-0 namespace prefixes with their base directories.
    #[serde(default)]
    pub psr0: BTreeMap<String, Vec<PathBuf>>,

    /// PSR-4 namespace prefixes with their base directories.
    #[serde(default)]
    pub psr4: BTreeMap<String, Vec<PathBuf>>,

    /// PEAR class-name prefixes with their base directories.
    #[serde(default)]
    pub pear: BTreeMap<String, Vec<PathBuf>>,

    /// Root directories for the recursive strategy.
    #[serde(default)]
    pub recursive: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            conventions: Conventions::default(),
            fixed: BTreeMap::new(),
            psr0: BTreeMap::new(),
            psr4: BTreeMap::new(),
            pear: BTreeMap::new(),
            recursive: Vec::new(),
        }
    }
}

fn default_strategy() -> String {
    "psr4".to_string()
}

impl Config {
    /// Load configuration from `.autoload.toml` in the given root.
    ///
    /// Returns defaults if the file doesn't exist; degrades to defaults
    /// with a warning when the file cannot be parsed. `AUTOLOAD_*`
    /// environment variables override file values.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        // Build layered config: defaults <- toml file <- environment
        let figment = Figment::from(Serialized::defaults(Config::default()));

        let figment = if config_path.exists() {
            figment.merge(Toml::file(&config_path))
        } else {
            figment
        };
        let figment = figment.merge(Env::prefixed("AUTOLOAD_"));

        match figment.extract() {
            Ok(config) => {
                if config_path.exists() {
                    tracing::info!("Loaded config from {:?}", config_path);
                }
                config
            }
            Err(e) => {
                // Figment provides detailed error messages with provenance
                tracing::warn!("Config error: {}", e);
                Self::default()
            }
        }
    }

    /// Build the selected strategy with every configured mapping
    /// registered. Relative directories are anchored at `root`.
    pub fn build_strategy(&self, root: &Path) -> Result<SharedStrategy> {
        let conventions = self.conventions.clone();

        match self.strategy.as_str() {
            "fixed" => {
                let mut strategy = FixedStrategy::with_conventions(conventions);
                for (class, path) in &self.fixed {
                    strategy.register_class_path(class, anchor(root, path));
                }
                Ok(Arc::new(strategy))
            }
            "psr0" => {
                let mut strategy = Psr0Strategy::with_conventions(conventions);
                for (namespace, paths) in &self.psr0 {
                    for path in paths {
                        strategy.register_namespace_path(namespace, anchor(root, path));
                    }
                }
                Ok(Arc::new(strategy))
            }
            "psr4" => {
                let mut strategy = Psr4Strategy::with_conventions(conventions);
                for (namespace, paths) in &self.psr4 {
                    for path in paths {
                        strategy.register_namespace_path(namespace, anchor(root, path));
                    }
                }
                Ok(Arc::new(strategy))
            }
            "pear" => {
                let mut strategy = PearStrategy::with_conventions(conventions);
                for (prefix, paths) in &self.pear {
                    for path in paths {
                        strategy.register_prefix_path(prefix, anchor(root, path));
                    }
                }
                Ok(Arc::new(strategy))
            }
            "recursive" => {
                let mut strategy = RecursiveStrategy::with_conventions(conventions);
                for path in &self.recursive {
                    strategy.register_path(anchor(root, path));
                }
                Ok(Arc::new(strategy))
            }
            other => Err(AutoloadError::Config(format!(
                "unknown strategy `{other}` (expected fixed, psr0, psr4, pear, or recursive)"
            ))),
        }
    }
}

fn anchor(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
