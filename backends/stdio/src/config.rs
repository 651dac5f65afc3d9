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

use std::borrow::Cow;
use std::io;
use std::io::Write;

use slf_core::DefaultTrap;
use slf_core::Trap;

use crate::TextLayout;

/// The environment variable holding the default filter directives.
pub const DEFAULT_FILTER_ENV: &str = "SLF_STDIO_LOG";

/// The filter directives used when [`DEFAULT_FILTER_ENV`] is not set.
pub const DEFAULT_FILTER: &str = "info";

/// The stream log lines are written to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// The standard error stream.
    #[default]
    Stderr,
    /// The standard output stream.
    Stdout,
}

impl Output {
    pub(crate) fn write_line(self, mut line: String) -> io::Result<()> {
        line.push('\n');
        match self {
            Output::Stderr => io::stderr().write_all(line.as_bytes()),
            Output::Stdout => io::stdout().write_all(line.as_bytes()),
        }
    }
}

/// Configuration of a [`StdioLoggerFactory`](crate::StdioLoggerFactory).
///
/// Filter directives follow the [`env_logger`](https://docs.rs/env_logger/#enabling-logging)
/// syntax and match on logger names, e.g. `warn,payments=debug`.
///
/// # Examples
///
/// ```
/// use slf_backend_stdio::StdioConfig;
/// use slf_backend_stdio::StdioLoggerFactory;
/// use slf_backend_stdio::TextLayout;
///
/// let config = StdioConfig::default()
///     .stdout()
///     .filter("warn,payments=debug")
///     .layout(TextLayout::default().no_color());
/// let factory = StdioLoggerFactory::new(config);
/// ```
#[derive(Debug)]
pub struct StdioConfig {
    pub(crate) output: Output,
    pub(crate) directives: String,
    pub(crate) layout: TextLayout,
    pub(crate) trap: Box<dyn Trap>,
}

impl Default for StdioConfig {
    /// Write to stderr, with filter directives read from [`DEFAULT_FILTER_ENV`] or
    /// [`DEFAULT_FILTER`] if the variable is not set.
    fn default() -> Self {
        StdioConfig::from_env_or(DEFAULT_FILTER_ENV, DEFAULT_FILTER)
    }
}

impl StdioConfig {
    /// Read filter directives from the environment variable `name`, or use `default` if the
    /// variable is not set.
    pub fn from_env_or<'a, 'b, E, V>(name: E, default: V) -> Self
    where
        E: Into<Cow<'a, str>>,
        V: Into<Cow<'b, str>>,
    {
        let name = name.into();
        let directives = match std::env::var(&*name) {
            Ok(directives) => directives,
            Err(_) => default.into().into_owned(),
        };

        StdioConfig {
            output: Output::default(),
            directives,
            layout: TextLayout::default(),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Write to stdout.
    pub fn stdout(self) -> Self {
        self.output(Output::Stdout)
    }

    /// Write to stderr.
    pub fn stderr(self) -> Self {
        self.output(Output::Stderr)
    }

    /// Set the output stream.
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Replace the filter directives.
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = directives.into();
        self
    }

    /// Set the layout of each line.
    pub fn layout(mut self, layout: TextLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the trap receiving write failures.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    pub(crate) fn build_filter(&self) -> env_filter::Filter {
        let mut builder = env_filter::Builder::new();
        builder.parse(&self.directives);
        builder.build()
    }
}
