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

//! A backend adapter that writes SLF records as optionally colored text to stdout or stderr.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub extern crate colored;
pub extern crate jiff;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use slf_core::Error;
use slf_core::Level;
use slf_core::LevelMapper;
use slf_core::Listener;
use slf_core::ListenerRegistry;
use slf_core::LogEvent;
use slf_core::Logger;
use slf_core::LoggerFactory;
use slf_core::LoggerRegistry;
use slf_core::Trap;
use slf_core::discovery::FactoryEntry;
use slf_core::discovery::Module;

mod config;
mod layout;

pub use self::config::DEFAULT_FILTER;
pub use self::config::DEFAULT_FILTER_ENV;
pub use self::config::Output;
pub use self::config::StdioConfig;
pub use self::layout::TextLayout;

/// The name discovery resolves this adapter's module files to.
pub const MODULE_NAME: &str = "slf_backend_stdio";

/// The module exported by this adapter.
pub fn module() -> Module {
    Module::new(MODULE_NAME).export(FactoryEntry::of::<StdioLoggerFactory>())
}

/// The native severity of the stdio adapter, from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StdioLevel {
    /// Nothing is written.
    Off,
    /// The "fatal" level.
    Fatal,
    /// The "error" level.
    Error,
    /// The "warn" level.
    Warn,
    /// The "info" level.
    Info,
    /// The "debug" level.
    Debug,
    /// The "trace" level.
    Trace,
}

impl StdioLevel {
    /// The `log` level used to match filter directives. Fatal matches as error.
    fn filter_level(self) -> Option<log::Level> {
        match self {
            StdioLevel::Off => None,
            StdioLevel::Fatal | StdioLevel::Error => Some(log::Level::Error),
            StdioLevel::Warn => Some(log::Level::Warn),
            StdioLevel::Info => Some(log::Level::Info),
            StdioLevel::Debug => Some(log::Level::Debug),
            StdioLevel::Trace => Some(log::Level::Trace),
        }
    }
}

fn mapper() -> LevelMapper<StdioLevel> {
    LevelMapper::new(
        [
            (Level::Trace, StdioLevel::Trace),
            (Level::Debug, StdioLevel::Debug),
            (Level::Info, StdioLevel::Info),
            (Level::Warning, StdioLevel::Warn),
            (Level::Error, StdioLevel::Error),
            (Level::Fatal, StdioLevel::Fatal),
        ],
        StdioLevel::Off,
    )
}

#[derive(Debug)]
struct Emitter {
    mapper: LevelMapper<StdioLevel>,
    filter: env_filter::Filter,
    output: Output,
    layout: TextLayout,
    trap: Box<dyn Trap>,
    listeners: ListenerRegistry,
}

impl Emitter {
    fn enabled(&self, logger: &str, level: Level) -> bool {
        let Some(level) = self.mapper.to_native(level).filter_level() else {
            return false;
        };

        let metadata = log::Metadata::builder().level(level).target(logger).build();
        self.filter.enabled(&metadata)
    }

    fn emit(&self, event: &LogEvent<'_>) {
        let line = self.layout.format(event);
        if let Err(err) = self.output.write_line(line) {
            let err = Error::from_io_error(err)
                .with_context("output", format!("{:?}", self.output))
                .with_context("logger", event.logger());
            self.trap.trap(&err);
        }
        self.listeners.broadcast(event);
    }
}

/// A [`LoggerFactory`] whose loggers write lines to stdout or stderr.
///
/// The default factory writes to stderr and reads its filter directives from the
/// `SLF_STDIO_LOG` environment variable, falling back to `info`.
///
/// # Examples
///
/// ```
/// use slf_backend_stdio::StdioConfig;
/// use slf_backend_stdio::StdioLoggerFactory;
/// use slf_core::LoggerFactory;
///
/// let factory = StdioLoggerFactory::new(StdioConfig::default().filter("debug"));
/// let logger = factory.logger("svc");
/// slf_core::debug!(logger, "Hello {0}", "World!");
/// ```
#[derive(Debug)]
pub struct StdioLoggerFactory {
    emitter: Arc<Emitter>,
    loggers: LoggerRegistry<StdioLogger>,
}

impl Default for StdioLoggerFactory {
    fn default() -> Self {
        StdioLoggerFactory::new(StdioConfig::default())
    }
}

impl StdioLoggerFactory {
    /// The factory name.
    pub const NAME: &'static str = "stdio";

    /// Create a factory from the given configuration.
    pub fn new(config: StdioConfig) -> Self {
        let filter = config.build_filter();
        StdioLoggerFactory {
            emitter: Arc::new(Emitter {
                mapper: mapper(),
                filter,
                output: config.output,
                layout: config.layout,
                trap: config.trap,
                listeners: ListenerRegistry::default(),
            }),
            loggers: LoggerRegistry::default(),
        }
    }
}

impl LoggerFactory for StdioLoggerFactory {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn logger(&self, name: &str) -> Arc<dyn Logger> {
        self.loggers.get_or_create(name, |name| {
            Arc::new(StdioLogger {
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

/// A named logger created by [`StdioLoggerFactory`].
#[derive(Debug)]
pub struct StdioLogger {
    name: String,
    emitter: Arc<Emitter>,
}

impl Logger for StdioLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.emitter.enabled(&self.name, level)
    }

    fn log(
        &self,
        level: Level,
        error: Option<&(dyn StdError + 'static)>,
        args: fmt::Arguments<'_>,
    ) {
        if !self.is_enabled(level) {
            return;
        }

        let message = args.to_string();
        let event = LogEvent::builder()
            .level(level)
            .logger(&self.name)
            .message(&message)
            .error(error)
            .build();
        self.emitter.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_bijective() {
        let mapper = mapper();
        for level in Level::ALL.into_iter().filter(|l| *l != Level::Other) {
            assert_eq!(mapper.to_abstract(mapper.to_native(level)), level);
        }
        assert_eq!(mapper.to_native(Level::Other), StdioLevel::Off);
        assert_eq!(mapper.to_abstract(StdioLevel::Off), Level::Other);
    }

    #[test]
    fn filter_directives_gate_levels() {
        let factory = StdioLoggerFactory::new(StdioConfig::default().filter("warn,payments=trace"));

        let orders = factory.logger("orders");
        assert!(orders.is_enabled(Level::Fatal));
        assert!(orders.is_enabled(Level::Warning));
        assert!(!orders.is_enabled(Level::Info));

        let payments = factory.logger("payments");
        assert!(payments.is_enabled(Level::Trace));
        assert!(!payments.is_enabled(Level::Other));
    }

    #[test]
    fn module_exports_the_factory() {
        let module = module();
        assert_eq!(module.name(), MODULE_NAME);
        assert!(module.entries()[0].is::<StdioLoggerFactory>());
    }
}
