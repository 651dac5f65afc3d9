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

use std::any::TypeId;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::Error;
use crate::LoggerFactory;

type Construct = fn() -> Result<Arc<dyn LoggerFactory>, Error>;

/// One factory type exported by a [`Module`].
#[derive(Clone, Copy)]
pub struct FactoryEntry {
    type_id: TypeId,
    type_name: &'static str,
    construct: Construct,
}

impl FactoryEntry {
    /// Export `F`, constructed through its [`Default`] implementation.
    pub fn of<F>() -> Self
    where
        F: LoggerFactory + Default,
    {
        FactoryEntry {
            type_id: TypeId::of::<F>(),
            type_name: std::any::type_name::<F>(),
            construct: || {
                let factory: Arc<dyn LoggerFactory> = Arc::new(F::default());
                Ok(factory)
            },
        }
    }

    /// Export `F`, constructed through a fallible constructor.
    pub fn with<F>(construct: fn() -> Result<Arc<dyn LoggerFactory>, Error>) -> Self
    where
        F: LoggerFactory,
    {
        FactoryEntry {
            type_id: TypeId::of::<F>(),
            type_name: std::any::type_name::<F>(),
            construct,
        }
    }

    /// The [`TypeId`] of the exported factory type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the exported factory type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the exported type is `F`.
    pub fn is<F: 'static>(&self) -> bool {
        self.type_id() == TypeId::of::<F>()
    }

    pub(crate) fn construct(&self) -> Result<Arc<dyn LoggerFactory>, Error> {
        (self.construct)()
    }
}

impl fmt::Debug for FactoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryEntry")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A unit of discovery: the factory types one adapter module exports.
///
/// # Examples
///
/// ```
/// use slf_core::discovery::FactoryEntry;
/// use slf_core::discovery::Module;
/// use slf_core::NopLoggerFactory;
///
/// let module = Module::new("slf_backend_example").export(FactoryEntry::of::<NopLoggerFactory>());
/// assert_eq!(module.name(), "slf_backend_example");
/// assert_eq!(module.entries().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Module {
    name: &'static str,
    entries: Vec<FactoryEntry>,
}

impl Module {
    /// Create an empty module named `name`.
    pub fn new(name: &'static str) -> Self {
        Module {
            name,
            entries: vec![],
        }
    }

    /// Add an exported factory type.
    pub fn export(mut self, entry: FactoryEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// The module name, e.g. `slf_backend_log`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The exported factory types, in export order.
    pub fn entries(&self) -> &[FactoryEntry] {
        &self.entries
    }
}

/// Resolve a module file found by [`Discovery`](crate::Discovery) into a [`Module`].
///
/// This is the one boundary where adapter modules are loaded; each call is isolated, and an error
/// only causes that file to be skipped.
pub trait ModuleLoader: fmt::Debug + Send + Sync + 'static {
    /// Load the module stored at `path`.
    fn load(&self, path: &Path) -> Result<Module, Error>;
}

impl<T: ModuleLoader> From<T> for Box<dyn ModuleLoader> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
