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

//! Backend-agnostic log events handed to listeners.

use std::error::Error as StdError;
use std::fmt;

use jiff::Timestamp;

use crate::Level;

/// A rendered log record, as observed by listeners.
///
/// An event is produced by a backend adapter once a message passes the backend's enabled check,
/// and is shared read-only by every listener during one broadcast.
#[derive(Clone, Copy, Debug)]
pub struct LogEvent<'a> {
    level: Level,
    logger: &'a str,
    message: &'a str,
    timestamp: Timestamp,
    error: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> LogEvent<'a> {
    /// The severity of the record.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The name of the logger that emitted the record.
    pub fn logger(&self) -> &'a str {
        self.logger
    }

    /// The formatted message, with all arguments substituted.
    pub fn rendered_message(&self) -> &'a str {
        self.message
    }

    /// When the record was emitted.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The error accompanying the record, if any.
    pub fn error(&self) -> Option<&'a (dyn StdError + 'static)> {
        self.error
    }

    /// Convert to an owned event.
    pub fn to_owned(&self) -> LogEventOwned {
        LogEventOwned {
            level: self.level,
            logger: self.logger.to_string(),
            message: self.message.to_string(),
            timestamp: self.timestamp,
            error: self.error.map(render_error_chain),
        }
    }

    /// Returns a new builder.
    pub fn builder() -> LogEventBuilder<'a> {
        LogEventBuilder::default()
    }
}

/// Builder for [`LogEvent`].
#[derive(Debug)]
pub struct LogEventBuilder<'a> {
    event: LogEvent<'a>,
}

impl Default for LogEventBuilder<'_> {
    fn default() -> Self {
        LogEventBuilder {
            event: LogEvent {
                level: Level::Info,
                logger: "",
                message: "",
                timestamp: Timestamp::now(),
                error: None,
            },
        }
    }
}

impl<'a> LogEventBuilder<'a> {
    /// Set [`level`](LogEvent::level).
    pub fn level(mut self, level: Level) -> Self {
        self.event.level = level;
        self
    }

    /// Set [`logger`](LogEvent::logger).
    pub fn logger(mut self, logger: &'a str) -> Self {
        self.event.logger = logger;
        self
    }

    /// Set [`rendered_message`](LogEvent::rendered_message).
    pub fn message(mut self, message: &'a str) -> Self {
        self.event.message = message;
        self
    }

    /// Set [`timestamp`](LogEvent::timestamp).
    ///
    /// Default to the time the builder was created.
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.event.timestamp = timestamp;
        self
    }

    /// Set [`error`](LogEvent::error).
    pub fn error(mut self, error: Option<&'a (dyn StdError + 'static)>) -> Self {
        self.event.error = error;
        self
    }

    /// Invoke the builder and return a `LogEvent`.
    pub fn build(self) -> LogEvent<'a> {
        self.event
    }
}

/// Owned version of a [`LogEvent`].
///
/// The accompanying error is kept as its rendered source chain since errors are not cloneable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEventOwned {
    level: Level,
    logger: String,
    message: String,
    timestamp: Timestamp,
    error: Option<String>,
}

impl LogEventOwned {
    /// The severity of the record.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The name of the logger that emitted the record.
    pub fn logger(&self) -> &str {
        &self.logger
    }

    /// The formatted message.
    pub fn rendered_message(&self) -> &str {
        &self.message
    }

    /// When the record was emitted.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The rendered error chain, if an error accompanied the record.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl fmt::Display for LogEventOwned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.level, self.logger, self.message)?;
        if let Some(error) = &self.error {
            write!(f, " ({error})")?;
        }
        Ok(())
    }
}

// "outer: inner: root"
pub(crate) fn render_error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
