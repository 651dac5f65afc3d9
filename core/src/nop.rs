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

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::Level;
use crate::Listener;
use crate::LogEvent;
use crate::Logger;
use crate::LoggerFactory;

/// The no-op backend factory.
///
/// Used when discovery finds no real backend. It hands out one shared [`NopLogger`] and ignores
/// listeners.
#[derive(Debug)]
pub struct NopLoggerFactory {
    logger: Arc<NopLogger>,
}

impl NopLoggerFactory {
    /// The name of the no-op backend.
    pub const NAME: &'static str = "NOP";
}

impl Default for NopLoggerFactory {
    fn default() -> Self {
        Self {
            logger: Arc::new(NopLogger(())),
        }
    }
}

impl LoggerFactory for NopLoggerFactory {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn logger(&self, _: &str) -> Arc<dyn Logger> {
        self.logger.clone()
    }

    fn register_listener(&self, _: Listener) -> bool {
        false
    }

    fn unregister_listener(&self, _: &Listener) -> bool {
        false
    }

    fn raise_event(&self, _: &LogEvent<'_>) -> bool {
        false
    }
}

/// A logger that discards everything.
#[derive(Debug)]
pub struct NopLogger(());

impl Logger for NopLogger {
    fn name(&self) -> &str {
        NopLoggerFactory::NAME
    }

    fn is_enabled(&self, _: Level) -> bool {
        false
    }

    fn log(&self, _: Level, _: Option<&(dyn StdError + 'static)>, _: fmt::Arguments<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nop_factory_does_nothing() {
        let factory = NopLoggerFactory::default();
        let listener = Listener::new(|_| panic!("the no-op backend never broadcasts"));

        assert_eq!(factory.name(), "NOP");
        assert!(!factory.register_listener(listener.clone()));
        assert!(!factory.unregister_listener(&listener));
        assert!(!factory.raise_event(&LogEvent::builder().build()));

        let logger = factory.logger("svc");
        assert!(!logger.is_enabled(Level::Fatal));
        logger.fatal(format_args!("dropped"));
        assert!(Arc::ptr_eq(&logger, &factory.logger("other")));
    }
}
