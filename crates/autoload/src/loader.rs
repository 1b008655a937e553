//! The autoloader host and the runtime it hooks into.
//!
//! [`Autoloader`] holds exactly one active strategy and installs it into a
//! [`Runtime`]'s fallback resolver chain. The runtime is an injected
//! collaborator rather than a global, so tests can substitute their own;
//! [`LoaderChain`] is the concrete runtime used by the CLI and the test
//! suite.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::strategy::SharedStrategy;
use crate::{AutoloadError, Result};

/// The host program's class-loading facility.
///
/// Mirrors the two things a language runtime offers an autoloader: a
/// fallback-resolver registry and a way to bring a located source file
/// into the running program.
pub trait Runtime {
    /// Install a resolver at the end of the fallback chain. Double
    /// installation is the runtime's concern, not checked here.
    fn install(&mut self, resolver: SharedStrategy);

    /// Remove a previously installed resolver. Removing one that was never
    /// installed is a no-op.
    fn uninstall(&mut self, resolver: &SharedStrategy);

    /// Load a located source file into the running program.
    fn load(&mut self, path: &Path) -> io::Result<()>;
}

impl<T: Runtime + ?Sized> Runtime for &mut T {
    fn install(&mut self, resolver: SharedStrategy) {
        (**self).install(resolver);
    }

    fn uninstall(&mut self, resolver: &SharedStrategy) {
        (**self).uninstall(resolver);
    }

    fn load(&mut self, path: &Path) -> io::Result<()> {
        (**self).load(path)
    }
}

/// A minimal stand-in for a host runtime's autoload chain.
///
/// Keeps installed resolvers in order and records every file it loads.
/// `load` reads the file's bytes, which both verifies readability and
/// models the inclusion step.
#[derive(Default)]
pub struct LoaderChain {
    resolvers: Vec<SharedStrategy>,
    loaded: Vec<PathBuf>,
}

impl LoaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an unresolved class through the fallback chain, loading the
    /// first file any resolver locates. Returns whether a file was loaded.
    pub fn resolve(&mut self, class: &str) -> bool {
        for index in 0..self.resolvers.len() {
            let Some(path) = self.resolvers[index].find_class_file(class) else {
                continue;
            };
            match self.load(&path) {
                Ok(()) => return true,
                Err(error) => {
                    tracing::warn!(class, path = %path.display(), %error, "located class file failed to load");
                }
            }
        }
        false
    }

    /// Files loaded so far, in load order.
    pub fn loaded(&self) -> &[PathBuf] {
        &self.loaded
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.loaded.iter().any(|loaded| loaded == path)
    }

    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }
}

impl Runtime for LoaderChain {
    fn install(&mut self, resolver: SharedStrategy) {
        self.resolvers.push(resolver);
    }

    fn uninstall(&mut self, resolver: &SharedStrategy) {
        self.resolvers
            .retain(|installed| !Arc::ptr_eq(installed, resolver));
    }

    fn load(&mut self, path: &Path) -> io::Result<()> {
        std::fs::read(path)?;
        self.loaded.push(path.to_path_buf());
        Ok(())
    }
}

/// The strategy host: one active strategy, wired into one runtime.
pub struct Autoloader<R: Runtime> {
    runtime: R,
    strategy: Option<SharedStrategy>,
}

impl<R: Runtime> Autoloader<R> {
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            strategy: None,
        }
    }

    /// Replace the active strategy. The previous one stays installed in
    /// the runtime if it was registered; unregister first to swap cleanly.
    pub fn set_strategy(&mut self, strategy: SharedStrategy) {
        self.strategy = Some(strategy);
    }

    /// Install the active strategy into the runtime's fallback chain.
    pub fn register(&mut self) -> Result<()> {
        let strategy = self.strategy.clone().ok_or(AutoloadError::NoStrategy)?;
        self.runtime.install(strategy);
        Ok(())
    }

    /// Remove the active strategy from the runtime's fallback chain.
    pub fn unregister(&mut self) -> Result<()> {
        let strategy = self.strategy.clone().ok_or(AutoloadError::NoStrategy)?;
        self.runtime.uninstall(&strategy);
        Ok(())
    }

    /// Resolve `class` and load its file. Returns `false` without side
    /// effects when no strategy is set, nothing matches, or the located
    /// file cannot be read; absence never raises an error.
    pub fn load_class(&mut self, class: &str) -> bool {
        let Some(strategy) = &self.strategy else {
            return false;
        };
        let Some(path) = strategy.find_class_file(class) else {
            return false;
        };

        match self.runtime.load(&path) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(class, path = %path.display(), %error, "located class file failed to load");
                false
            }
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }
}
