//! autoload: pluggable class-file autoloading.
//!
//! This crate resolves fully qualified class names to source files on disk
//! using one of several interchangeable naming-convention strategies:
//! - Fixed maps (exact class name to exact file)
//! - PSR-0 and PSR-4 hierarchical namespace-to-directory layouts
//! - PEAR-style underscore-delimited prefixes
//! - Recursive search under registered root directories
//!
//! A [`Autoloader`] host holds exactly one active strategy and installs it
//! into a [`Runtime`]'s fallback resolver chain, so a program can load class
//! files on demand the first time a class is referenced instead of including
//! every file up front.
//!
//! # Examples
//!
//! Resolve a class through a PSR-4 layout:
//!
//! ```no_run
//! use autoload::{AutoloadStrategy, Psr4Strategy};
//!
//! let mut strategy = Psr4Strategy::new();
//! strategy.register_namespace_path("Vendor\\Package", "/project/src");
//!
//! // Probes /project/src/Dummy/Thing.php
//! let path = strategy.find_class_file("Vendor\\Package\\Dummy\\Thing");
//! ```

pub mod config;
pub mod ident;
pub mod loader;
pub mod strategies;
pub mod strategy;

// Re-export main types
pub use config::Config;
pub use loader::{Autoloader, LoaderChain, Runtime};
pub use strategies::{FixedStrategy, PearStrategy, Psr0Strategy, Psr4Strategy, RecursiveStrategy};
pub use strategy::{AutoloadStrategy, Conventions, PrefixMap, SharedStrategy};

/// Errors that can occur while configuring or hosting an autoloader.
///
/// Resolution misses are not errors: a class that no strategy can locate is
/// reported as `false`/`None` by the lookup APIs, never as an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum AutoloadError {
    #[error("no autoloading strategy has been set")]
    NoStrategy,

    #[error("invalid autoload configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AutoloadError>;
