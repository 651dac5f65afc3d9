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

//! SLF is a simple logging facade: application code logs against the [`Logger`] and
//! [`LoggerFactory`] traits, and the backend adapters installed next to the executable are
//! discovered at runtime.
//!
//! # Overview
//!
//! An adapter is installed by placing a module file matching the discovery pattern
//! (`libslf_backend_*.so` on Linux, `slf_backend_*.dll` on Windows) in the executable's
//! directory. The file name selects one of the adapters compiled into this crate:
//!
//! | File (Linux)              | Adapter                    | Feature         |
//! |---------------------------|----------------------------|-----------------|
//! | `libslf_backend_log.so`   | [`backend::log`]           | `backend-log`   |
//! | `libslf_backend_stdio.so` | [`backend::stdio`]         | `backend-stdio` |
//!
//! When nothing is installed, discovery falls back to a single [`NopLoggerFactory`] so logging
//! calls are always safe.
//!
//! Every factory carries a listener set: a [`Listener`] registered on it observes every record its
//! loggers emit.
//!
//! # Examples
//!
//! ```
//! use slf::Listener;
//! use slf::LoggerFactory;
//!
//! let factories = slf::load_factories();
//! let factory = &factories[0];
//!
//! factory.register_listener(Listener::new(|event| {
//!     println!("observed: {}", event.rendered_message());
//! }));
//!
//! let logger = factory.logger("svc");
//! slf::info!(logger, "Hello {0}", "World!");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

use std::path::Path;
use std::sync::OnceLock;

pub use slf_core::Error;
pub use slf_core::Level;
pub use slf_core::LevelMapper;
pub use slf_core::Listener;
pub use slf_core::ListenerRegistry;
pub use slf_core::LogEvent;
pub use slf_core::LogEventOwned;
pub use slf_core::Logger;
pub use slf_core::LoggerFactory;
pub use slf_core::LoggerRegistry;
pub use slf_core::NopLogger;
pub use slf_core::NopLoggerFactory;
// macros
pub use slf_core::debug;
pub use slf_core::error;
pub use slf_core::fatal;
pub use slf_core::info;
pub use slf_core::log;
pub use slf_core::trace;
pub use slf_core::warn;

use self::discovery::Catalog;
use self::discovery::Discovery;
use self::discovery::Factories;

/// Bundled backend adapters.
pub mod backend {
    /// Forward records to the [`log`](https://docs.rs/log/) crate.
    #[cfg(feature = "backend-log")]
    pub mod log {
        pub use slf_backend_log::*;
    }

    /// Write records as text to stdout or stderr.
    #[cfg(feature = "backend-stdio")]
    pub mod stdio {
        pub use slf_backend_stdio::*;
    }
}

/// Runtime discovery of installed backend adapters.
pub mod discovery {
    pub use slf_core::discovery::*;
}

/// Events observed by listeners.
pub mod event {
    pub use slf_core::event::*;
}

/// Traps for errors the facade swallows.
pub mod trap {
    pub use slf_core::trap::*;
}

/// The catalog of adapter modules compiled into this crate.
pub fn catalog() -> Catalog {
    let catalog = Catalog::default();
    #[cfg(feature = "backend-log")]
    let catalog = catalog.module(slf_backend_log::module());
    #[cfg(feature = "backend-stdio")]
    let catalog = catalog.module(slf_backend_stdio::module());
    catalog
}

/// The process-wide discovery, built from [`catalog`] on first use.
pub fn discovery() -> &'static Discovery {
    static DISCOVERY: OnceLock<Discovery> = OnceLock::new();
    DISCOVERY.get_or_init(|| Discovery::new(catalog()))
}

/// Discover the adapters installed next to the running executable.
///
/// The result is computed once and cached; later calls return the same factory instances.
pub fn load_factories() -> Factories {
    discovery().load_default()
}

/// Discover the adapters installed in `directory` whose file names match the glob `pattern`.
///
/// The result is cached per `(directory, pattern)`.
pub fn load_factories_from(directory: impl AsRef<Path>, pattern: &str) -> Factories {
    discovery().load(directory, pattern)
}
