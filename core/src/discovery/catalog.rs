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

use std::env::consts::DLL_PREFIX;
use std::env::consts::DLL_SUFFIX;
use std::path::Path;

use crate::Error;
use crate::discovery::Module;
use crate::discovery::ModuleLoader;

/// A [`ModuleLoader`] backed by modules compiled into the binary.
///
/// A file is resolved to the module whose name equals the file name with the platform's dynamic
/// library prefix and suffix stripped, so `libslf_backend_log.so` on Linux and
/// `slf_backend_log.dll` on Windows both resolve to `slf_backend_log`. The file's presence in the
/// scanned directory is what marks the module as installed.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use slf_core::NopLoggerFactory;
/// use slf_core::discovery::Catalog;
/// use slf_core::discovery::FactoryEntry;
/// use slf_core::discovery::Module;
/// use slf_core::discovery::ModuleLoader;
///
/// let catalog = Catalog::default()
///     .module(Module::new("slf_backend_example").export(FactoryEntry::of::<NopLoggerFactory>()));
///
/// let file = format!(
///     "{}slf_backend_example{}",
///     std::env::consts::DLL_PREFIX,
///     std::env::consts::DLL_SUFFIX
/// );
/// let module = catalog.load(Path::new(&file)).unwrap();
/// assert_eq!(module.name(), "slf_backend_example");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    /// Add a compiled-in module.
    ///
    /// A later module with the same name replaces an earlier one.
    pub fn module(mut self, module: Module) -> Self {
        self.modules.retain(|m| m.name() != module.name());
        self.modules.push(module);
        self
    }

    /// The compiled-in modules.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Find a compiled-in module by name.
    pub fn find(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name() == name)
    }
}

impl ModuleLoader for Catalog {
    fn load(&self, path: &Path) -> Result<Module, Error> {
        let name = module_name(path).ok_or_else(|| {
            Error::new("module file name is not valid unicode")
                .with_context("path", path.display())
        })?;

        self.find(name).cloned().ok_or_else(|| {
            Error::new("no compiled-in module matches file")
                .with_context("path", path.display())
                .with_context("module", name)
        })
    }
}

/// Strip the platform's dynamic library prefix and suffix from the file name of `path`.
///
/// Files not carrying the platform suffix have their last extension stripped instead.
pub fn module_name(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    let name = file_name.strip_prefix(DLL_PREFIX).unwrap_or(file_name);
    let name = match name.strip_suffix(DLL_SUFFIX) {
        Some(stem) => stem,
        None => name.rsplit_once('.').map_or(name, |(stem, _)| stem),
    };
    Some(name)
}
