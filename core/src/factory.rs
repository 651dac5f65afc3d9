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

//! The capabilities every backend adapter implements.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::Level;
use crate::Listener;
use crate::LogEvent;

/// A named logger handed out by a [`LoggerFactory`].
///
/// Implementations resolve the native level through their [`LevelMapper`](crate::LevelMapper),
/// consult the backend's own enabled state, render and emit the message natively, and then
/// broadcast a [`LogEvent`] carrying the caller's [`Level`] to the factory's listeners.
pub trait Logger: fmt::Debug + Send + Sync + 'static {
    /// The name this logger was created with.
    fn name(&self) -> &str;

    /// Whether a record at `level` would currently be emitted.
    fn is_enabled(&self, level: Level) -> bool;

    /// Emit a record at `level`, optionally accompanied by an error.
    fn log(
        &self,
        level: Level,
        error: Option<&(dyn StdError + 'static)>,
        args: fmt::Arguments<'_>,
    );

    /// Emit a record at [`Level::Trace`].
    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, None, args)
    }

    /// Emit a record at [`Level::Debug`].
    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, None, args)
    }

    /// Emit a record at [`Level::Info`].
    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, None, args)
    }

    /// Emit a record at [`Level::Warning`].
    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, None, args)
    }

    /// Emit a record at [`Level::Error`].
    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, None, args)
    }

    /// Emit a record at [`Level::Fatal`].
    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, None, args)
    }

    /// Emit a record at [`Level::Trace`] accompanied by `error`.
    fn trace_error(&self, error: &(dyn StdError + 'static), args: fmt::Arguments<'_>) {
        self.log(Level::Trace, Some(error), args)
    }

    /// Emit a record at [`Level::Debug`] accompanied by `error`.
    fn debug_error(&self, error: &(dyn StdError + 'static), args: fmt::Arguments<'_>) {
        self.log(Level::Debug, Some(error), args)
    }

    /// Emit a record at [`Level::Info`] accompanied by `error`.
    fn info_error(&self, error: &(dyn StdError + 'static), args: fmt::Arguments<'_>) {
        self.log(Level::Info, Some(error), args)
    }

    /// Emit a record at [`Level::Warning`] accompanied by `error`.
    fn warn_error(&self, error: &(dyn StdError + 'static), args: fmt::Arguments<'_>) {
        self.log(Level::Warning, Some(error), args)
    }

    /// Emit a record at [`Level::Error`] accompanied by `error`.
    fn error_error(&self, error: &(dyn StdError + 'static), args: fmt::Arguments<'_>) {
        self.log(Level::Error, Some(error), args)
    }

    /// Emit a record at [`Level::Fatal`] accompanied by `error`.
    fn fatal_error(&self, error: &(dyn StdError + 'static), args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, Some(error), args)
    }
}

/// A backend adapter.
///
/// A factory is a long-lived singleton: it owns one [`ListenerRegistry`](crate::ListenerRegistry)
/// and one [`LoggerRegistry`](crate::LoggerRegistry), so every logger it hands out shares the same
/// listeners.
pub trait LoggerFactory: fmt::Debug + Send + Sync + 'static {
    /// The name of the backend, e.g. `"log"`.
    fn name(&self) -> &str;

    /// Return the logger named `name`, creating it on first access.
    ///
    /// The same name always yields the same instance.
    fn logger(&self, name: &str) -> Arc<dyn Logger>;

    /// Subscribe `listener` to every record emitted through this factory.
    ///
    /// Returns `false` if the listener was already subscribed.
    fn register_listener(&self, listener: Listener) -> bool;

    /// Unsubscribe `listener`.
    ///
    /// Returns `false` if the listener was not subscribed.
    fn unregister_listener(&self, listener: &Listener) -> bool;

    /// Broadcast `event` to this factory's listeners.
    ///
    /// Returns `true` if at least one listener was invoked.
    fn raise_event(&self, event: &LogEvent<'_>) -> bool;
}

impl dyn LoggerFactory {
    /// Return the logger named after the type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slf_core::LoggerFactory;
    /// use slf_core::NopLoggerFactory;
    ///
    /// struct Service;
    ///
    /// let factory: &dyn LoggerFactory = &NopLoggerFactory::default();
    /// let logger = factory.logger_for::<Service>();
    /// logger.info(format_args!("ready"));
    /// ```
    pub fn logger_for<T: ?Sized>(&self) -> Arc<dyn Logger> {
        self.logger(std::any::type_name::<T>())
    }
}
