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

use std::fmt::Write;

use colored::Color;
use colored::ColoredString;
use colored::Colorize;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use slf_core::Level;
use slf_core::LogEvent;

/// A layout that formats log events as optionally colored text.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 ERROR payments: charge declined error=card expired
/// 2024-08-11T22:44:57.172219+08:00  WARN payments: retrying in 5s
/// 2024-08-11T22:44:57.172276+08:00  INFO payments: Hello World!
/// ```
///
/// By default, log levels are colored. Call [`no_color`](TextLayout::no_color) to disable
/// coloring, or customize the color of each level with [`error_color`](TextLayout::error_color)
/// and so on.
///
/// Timestamps use the system timezone unless [`timezone`](TextLayout::timezone) is set.
///
/// # Examples
///
/// ```
/// use slf_backend_stdio::TextLayout;
///
/// let layout = TextLayout::default().no_color();
/// ```
#[derive(Debug, Clone)]
pub struct TextLayout {
    colors: LevelColor,
    no_color: bool,
    timezone: TimeZone,
    timestamp_format: Option<fn(Timestamp, &TimeZone) -> String>,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            colors: LevelColor::default(),
            no_color: false,
            timezone: TimeZone::system(),
            timestamp_format: None,
        }
    }
}

impl TextLayout {
    /// Customize the color of the fatal log level. Default to bright red.
    ///
    /// No effect if `no_color` is set.
    pub fn fatal_color(mut self, color: Color) -> Self {
        self.colors.fatal = color;
        self
    }

    /// Customize the color of the error log level. Default to red.
    ///
    /// No effect if `no_color` is set.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the color of the warn log level. Default to yellow.
    ///
    /// No effect if `no_color` is set.
    pub fn warn_color(mut self, color: Color) -> Self {
        self.colors.warn = color;
        self
    }

    /// Customize the color of the info log level. Default to green.
    ///
    /// No effect if `no_color` is set.
    pub fn info_color(mut self, color: Color) -> Self {
        self.colors.info = color;
        self
    }

    /// Customize the color of the debug log level. Default to blue.
    ///
    /// No effect if `no_color` is set.
    pub fn debug_color(mut self, color: Color) -> Self {
        self.colors.debug = color;
        self
    }

    /// Customize the color of the trace log level. Default to magenta.
    ///
    /// No effect if `no_color` is set.
    pub fn trace_color(mut self, color: Color) -> Self {
        self.colors.trace = color;
        self
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use slf_backend_stdio::TextLayout;
    ///
    /// let layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Set a user-defined timestamp format function.
    ///
    /// Default to formatting the timestamp with offset as ISO 8601 with microsecond precision.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::Timestamp;
    /// use jiff::tz::TimeZone;
    /// use slf_backend_stdio::TextLayout;
    ///
    /// // This is equivalent to the default timestamp format.
    /// let layout = TextLayout::default()
    ///     .timestamp_format(|ts, tz| format!("{:.6}", ts.display_with_offset(tz.to_offset(ts))));
    /// ```
    pub fn timestamp_format(mut self, format: fn(Timestamp, &TimeZone) -> String) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Format an event as a single line, without the trailing newline.
    pub fn format(&self, event: &LogEvent<'_>) -> String {
        let ts = event.timestamp();
        let mut text = match self.timestamp_format {
            Some(format) => format(ts, &self.timezone),
            None => default_timestamp_format(ts, &self.timezone),
        };

        let level = self.colors.colorize(self.no_color, event.level());
        let logger = event.logger();
        let message = event.rendered_message();

        // writing to a string never fails
        let _ = write!(&mut text, " {level} {logger}: {message}");
        if let Some(err) = event.error() {
            let _ = write!(&mut text, " error={err}");
        }
        text
    }
}

fn default_timestamp_format(ts: Timestamp, tz: &TimeZone) -> String {
    let offset = tz.to_offset(ts);
    format!("{:.6}", ts.display_with_offset(offset))
}

#[derive(Debug, Clone)]
struct LevelColor {
    fatal: Color,
    error: Color,
    warn: Color,
    info: Color,
    debug: Color,
    trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            fatal: Color::BrightRed,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::Blue,
            trace: Color::Magenta,
        }
    }
}

impl LevelColor {
    /// Right-align the level name to five columns, then color it.
    ///
    /// Padding goes first so escape codes don't count towards the width.
    fn colorize(&self, no_color: bool, level: Level) -> ColoredString {
        let text = format!("{:>5}", level.as_str());
        if no_color {
            return ColoredString::from(text);
        }

        let color = match level {
            Level::Fatal => self.fatal,
            Level::Error => self.error,
            Level::Warning => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
            Level::Other => return ColoredString::from(text),
        };
        text.color(color)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn fixed_timestamp(ts: Timestamp, _: &TimeZone) -> String {
        ts.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    fn layout() -> TextLayout {
        TextLayout::default()
            .no_color()
            .timezone(TimeZone::UTC)
            .timestamp_format(fixed_timestamp)
    }

    fn timestamp() -> Timestamp {
        "2024-08-11T14:44:57Z".parse().unwrap()
    }

    #[test]
    fn formats_plain_event() {
        let event = LogEvent::builder()
            .level(Level::Info)
            .logger("payments")
            .message("Hello World!")
            .timestamp(timestamp())
            .build();

        insta::assert_snapshot!(layout().format(&event), @"2024-08-11T14:44:57Z  INFO payments: Hello World!");
    }

    #[test]
    fn formats_accompanying_error() {
        let err = io::Error::other("card expired");
        let event = LogEvent::builder()
            .level(Level::Error)
            .logger("payments")
            .message("charge declined")
            .timestamp(timestamp())
            .error(Some(&err))
            .build();

        insta::assert_snapshot!(layout().format(&event), @"2024-08-11T14:44:57Z ERROR payments: charge declined error=card expired");
    }

    #[test]
    fn level_names_are_aligned() {
        let lines: Vec<String> = [Level::Fatal, Level::Warning, Level::Trace]
            .into_iter()
            .map(|level| {
                let event = LogEvent::builder()
                    .level(level)
                    .logger("svc")
                    .message("m")
                    .timestamp(timestamp())
                    .build();
                layout().format(&event)
            })
            .collect();

        insta::assert_snapshot!(lines.join("\n"), @r"
        2024-08-11T14:44:57Z FATAL svc: m
        2024-08-11T14:44:57Z  WARN svc: m
        2024-08-11T14:44:57Z TRACE svc: m
        ");
    }

    #[test]
    fn default_timestamp_has_offset_and_micros() {
        let text = default_timestamp_format(timestamp(), &TimeZone::UTC);
        assert_eq!(text, "2024-08-11T14:44:57.000000+00:00");
    }

    #[test]
    fn colored_level_keeps_the_text() {
        let colored = LevelColor::default().colorize(false, Level::Warning);
        assert_eq!(colored.input, " WARN");
    }
}
