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

//! A backend adapter that forwards SLF records to the `log` crate's global logger.
//!
//! Whatever implementation of [`log::Log`] the application installed receives the records, with
//! the SLF logger name as the record target and any accompanying error attached as the `error`
//! key-value.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;

use log::LevelFilter;
use log::kv::Value;
use slf_core::Level;
use slf_core::LevelMapper;
use slf_core::Listener;
use slf_core::ListenerRegistry;
use slf_core::LogEvent;
use slf_core::Logger;
use slf_core::LoggerFactory;
use slf_core::LoggerRegistry;
use slf_core::discovery::FactoryEntry;
use slf_core::discovery::Module;

/// The name discovery resolves this adapter's module files to.
pub const MODULE_NAME: &str = "slf_backend_log";

/// The module exported by this adapter.
pub fn module() -> Module {
    Module::new(MODULE_NAME).export(FactoryEntry::of::<LogLoggerFactory>())
}

/// Map an SLF level to the `log` crate level it is emitted at.
///
/// `log` has no fatal level; [`Level::Fatal`] is emitted as [`log::Level::Error`]. Returns `None`
/// for levels that are never emitted.
pub fn to_level(level: Level) -> Option<log::Level> {
    LEVELS.to_native(level).to_level()
}

static LEVELS: LazyLock<LevelMapper<LevelFilter>> = LazyLock::new(levels);

fn levels() -> LevelMapper<LevelFilter> {
    LevelMapper::new(
        [
            (Level::Trace, LevelFilter::Trace),
            (Level::Debug, LevelFilter::Debug),
            (Level::Info, LevelFilter::Info),
            (Level::Warning, LevelFilter::Warn),
            (Level::Error, LevelFilter::Error),
        ],
        LevelFilter::Off,
    )
    .with_alias(Level::Fatal, LevelFilter::Error)
}

#[derive(Debug)]
struct Emitter {
    mapper: &'static LevelMapper<LevelFilter>,
    listeners: ListenerRegistry,
}

/// A [`LoggerFactory`] whose loggers emit through [`log::logger`].
///
/// # Examples
///
/// ```
/// use slf_backend_log::LogLoggerFactory;
/// use slf_core::LoggerFactory;
///
/// let factory = LogLoggerFactory::default();
/// let logger = factory.logger("svc");
/// slf_core::info!(logger, "Hello {0}", "World!");
/// ```
#[derive(Debug)]
pub struct LogLoggerFactory {
    emitter: Arc<Emitter>,
    loggers: LoggerRegistry<LogLogger>,
}

impl Default for LogLoggerFactory {
    fn default() -> Self {
        LogLoggerFactory {
            emitter: Arc::new(Emitter {
                mapper: &LEVELS,
                listeners: ListenerRegistry::default(),
            }),
            loggers: LoggerRegistry::default(),
        }
    }
}

impl LogLoggerFactory {
    /// The factory name.
    pub const NAME: &'static str = "log";
}

impl LoggerFactory for LogLoggerFactory {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn logger(&self, name: &str) -> Arc<dyn Logger> {
        self.loggers.get_or_create(name, |name| {
            Arc::new(LogLogger {
                name: name.to_string(),
                emitter: self.emitter.clone(),
            })
        })
    }

    fn register_listener(&self, listener: Listener) -> bool {
        self.emitter.listeners.register(listener)
    }

    fn unregister_listener(&self, listener: &Listener) -> bool {
        self.emitter.listeners.unregister(listener)
    }

    fn raise_event(&self, event: &LogEvent<'_>) -> bool {
        self.emitter.listeners.broadcast(event)
    }
}

/// A named logger created by [`LogLoggerFactory`].
#[derive(Debug)]
pub struct LogLogger {
    name: String,
    emitter: Arc<Emitter>,
}

impl LogLogger {
    fn native_level(&self, level: Level) -> Option<log::Level> {
        let native = self.emitter.mapper.to_native(level).to_level()?;
        if native > log::max_level() {
            return None;
        }

        let metadata = log::Metadata::builder()
            .level(native)
            .target(&self.name)
            .build();
        log::logger().enabled(&metadata).then_some(native)
    }
}

impl Logger for LogLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.native_level(level).is_some()
    }

    fn log(
        &self,
        level: Level,
        error: Option<&(dyn StdError + 'static)>,
        args: fmt::Arguments<'_>,
    ) {
        let Some(native) = self.native_level(level) else {
            return;
        };

        let message = args.to_string();
        let kvs = error.map(|err| ("error", Value::from_dyn_error(err)));
        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{message}"))
                .level(native)
                .target(&self.name)
                .key_values(&kvs)
                .build(),
        );

        let event = LogEvent::builder()
            .level(level)
            .logger(&self.name)
            .message(&message)
            .error(error)
            .build();
        self.emitter.listeners.broadcast(&event);
    }
}
