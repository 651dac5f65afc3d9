// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Discover and instantiate the installed backend adapters.
//!
//! [`Discovery`] scans a directory for files matching a glob pattern, resolves each file into a
//! [`Module`] through a [`ModuleLoader`], and instantiates every factory type the module exports.
//! The result is cached per `(directory, pattern)` and is never empty: when nothing could be
//! instantiated, it holds a single [`NopLoggerFactory`].

use std::collections::HashMap;
use std::env::consts::DLL_PREFIX;
use std::env::consts::DLL_SUFFIX;
use std::fs;
use std::io;
use std::ops::Deref;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::PoisonError;

use crate::Error;
use crate::LoggerFactory;
use crate::NopLoggerFactory;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

mod catalog;
mod module;

pub use self::catalog::Catalog;
pub use self::catalog::module_name;
pub use self::module::FactoryEntry;
pub use self::module::Module;
pub use self::module::ModuleLoader;

/// The file name prefix shared by every adapter module.
pub const MODULE_PREFIX: &str = "slf_backend_";

/// The default glob pattern matching adapter module files on this platform.
///
/// `libslf_backend_*.so` on Linux, `libslf_backend_*.dylib` on macOS, `slf_backend_*.dll` on
/// Windows.
pub fn default_pattern() -> String {
    format!("{DLL_PREFIX}{MODULE_PREFIX}*{DLL_SUFFIX}")
}

/// The default directory to scan: the directory of the running executable.
///
/// Falls back to the current directory if the executable path cannot be determined.
pub fn default_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The ordered, never-empty list of discovered backend factories.
///
/// Cloning is cheap and clones share the same factory instances.
#[derive(Debug, Clone)]
pub struct Factories {
    factories: Arc<[Arc<dyn LoggerFactory>]>,
    nop: bool,
}

impl Factories {
    fn new(factories: Vec<Arc<dyn LoggerFactory>>) -> Self {
        Factories {
            factories: Arc::from(factories),
            nop: false,
        }
    }

    fn nop() -> Self {
        let nop: Arc<dyn LoggerFactory> = Arc::new(NopLoggerFactory::default());
        Factories {
            factories: Arc::from([nop]),
            nop: true,
        }
    }

    /// Find the first factory whose [`name`](LoggerFactory::name) is `name`.
    pub fn find(&self, name: &str) -> Option<&Arc<dyn LoggerFactory>> {
        self.factories.iter().find(|f| f.name() == name)
    }

    /// Whether this is the no-op fallback list, substituted because nothing was instantiated.
    pub fn is_nop(&self) -> bool {
        self.nop
    }

    /// Whether `self` and `other` are the same cached list.
    pub fn ptr_eq(&self, other: &Factories) -> bool {
        Arc::ptr_eq(&self.factories, &other.factories)
    }
}

impl Deref for Factories {
    type Target = [Arc<dyn LoggerFactory>];

    fn deref(&self) -> &Self::Target {
        &self.factories
    }
}

impl<'a> IntoIterator for &'a Factories {
    type Item = &'a Arc<dyn LoggerFactory>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn LoggerFactory>>;

    fn into_iter(self) -> Self::IntoIter {
        self.factories.iter()
    }
}

/// Locates and instantiates backend adapters, caching the result.
///
/// # Examples
///
/// ```
/// use slf_core::Discovery;
/// use slf_core::discovery::Catalog;
///
/// let dir = std::env::temp_dir();
/// let discovery = Discovery::new(Catalog::default());
/// let factories = discovery.load(&dir, "*.none");
///
/// assert!(factories.is_nop());
/// assert!(factories.ptr_eq(&discovery.load(&dir, "*.none")));
/// ```
#[derive(Debug)]
pub struct Discovery {
    loader: Box<dyn ModuleLoader>,
    trap: Box<dyn Trap>,
    cache: Mutex<HashMap<(PathBuf, String), Arc<OnceLock<Factories>>>>,
}

impl Discovery {
    /// Create a discovery resolving module files with `loader`.
    pub fn new(loader: impl Into<Box<dyn ModuleLoader>>) -> Self {
        Discovery {
            loader: loader.into(),
            trap: Box::new(DefaultTrap::default()),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Set the trap receiving per-module failures.
    ///
    /// Default to [`DefaultTrap`].
    pub fn with_trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Discover the factories installed next to the running executable.
    ///
    /// Equivalent to `load(default_directory(), &default_pattern())`.
    pub fn load_default(&self) -> Factories {
        self.load(default_directory(), &default_pattern())
    }

    /// Discover the factories in the module files under `directory` matching `pattern`.
    ///
    /// The first call for a given `(directory, pattern)` scans the directory; later calls return
    /// the cached list with the same factory instances. Failures are reported to the trap and the
    /// offending module is skipped.
    ///
    /// Scans for different keys run concurrently, and a factory constructor may itself load
    /// another key. A constructor must not load the key that is instantiating it: that call blocks
    /// forever.
    pub fn load(&self, directory: impl AsRef<Path>, pattern: &str) -> Factories {
        let directory = directory.as_ref();
        let cell = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache
                .entry((directory.to_path_buf(), pattern.to_string()))
                .or_default()
                .clone()
        };

        // the cache lock is released here; only callers of the same key wait for the scan
        cell.get_or_init(|| self.scan(directory, pattern)).clone()
    }

    fn scan(&self, directory: &Path, pattern: &str) -> Factories {
        let mut factories: Vec<Arc<dyn LoggerFactory>> = vec![];

        match module_files(directory, pattern, self.trap.as_ref()) {
            Ok(files) => {
                for file in files {
                    let loaded = catch_unwind(AssertUnwindSafe(|| self.loader.load(&file)))
                        .unwrap_or_else(|payload| {
                            Err(Error::from_panic("module loader panicked", payload.as_ref()))
                        });
                    match loaded {
                        Ok(module) => self.instantiate(&file, &module, &mut factories),
                        Err(err) => self.trap.trap(
                            &Error::new("failed to load module")
                                .with_context("path", file.display())
                                .with_source(err),
                        ),
                    }
                }
            }
            Err(err) => self.trap.trap(&err),
        }

        if factories.is_empty() {
            log::debug!(
                "no logger factory found in {} matching {pattern:?}; falling back to {}",
                directory.display(),
                NopLoggerFactory::NAME,
            );
            return Factories::nop();
        }

        log::debug!(
            "discovered {} logger factories in {}",
            factories.len(),
            directory.display()
        );
        Factories::new(factories)
    }

    fn instantiate(
        &self,
        file: &Path,
        module: &Module,
        factories: &mut Vec<Arc<dyn LoggerFactory>>,
    ) {
        for entry in module.entries() {
            if entry.is::<NopLoggerFactory>() {
                continue;
            }

            let result = catch_unwind(AssertUnwindSafe(|| entry.construct()))
                .unwrap_or_else(|payload| {
                    Err(Error::from_panic(
                        "logger factory constructor panicked",
                        payload.as_ref(),
                    ))
                });

            match result {
                Ok(factory) => {
                    log::trace!(
                        "instantiated logger factory {} ({}) from module {}",
                        factory.name(),
                        entry.type_name(),
                        module.name()
                    );
                    factories.push(factory);
                }
                Err(err) => self.trap.trap(
                    &Error::new("failed to instantiate logger factory")
                        .with_context("path", file.display())
                        .with_context("type", entry.type_name())
                        .with_source(err),
                ),
            }
        }
    }
}

// Regular files directly under `directory` whose name matches `pattern`, sorted by name.
fn module_files(directory: &Path, pattern: &str, trap: &dyn Trap) -> Result<Vec<PathBuf>, Error> {
    let matcher = glob::Pattern::new(pattern).map_err(|err| {
        Error::new("invalid module pattern")
            .with_context("pattern", pattern)
            .with_source(err)
    })?;

    let entries = fs::read_dir(directory).map_err(|err| {
        Error::from_io_error(err).with_context("directory", directory.display())
    })?;

    let entries = entries.map(|entry| entry.map(|e| e.path()));
    Ok(select_files(directory, entries, &matcher, trap))
}

// An unreadable entry is trapped and skipped; the rest of the listing is kept.
fn select_files(
    directory: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
    matcher: &glob::Pattern,
    trap: &dyn Trap,
) -> Vec<PathBuf> {
    let mut files = vec![];
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                trap.trap(
                    &Error::from_io_error(err).with_context("directory", directory.display()),
                );
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let matched = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matcher.matches(name));
        if matched {
            files.push(path);
        }
    }
    files.sort();
    files
}
