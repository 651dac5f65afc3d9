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

/// Emit a record through a [`Logger`](crate::Logger) at the given level.
///
/// An accompanying error is passed as `error = expr` before the format string.
///
/// # Examples
///
/// ```
/// use slf_core::Level;
/// use slf_core::LoggerFactory;
/// use slf_core::NopLoggerFactory;
///
/// let logger = NopLoggerFactory::default().logger("svc");
/// let err = std::io::Error::other("connection reset");
///
/// slf_core::log!(logger, Level::Info, "Hello {0}", "World!");
/// slf_core::log!(logger, Level::Error, error = &err, "request {} failed", 42);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, error = $err:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.log(
            $level,
            ::std::option::Option::Some($err as &(dyn ::std::error::Error + 'static)),
            ::std::format_args!($($arg)+),
        )
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.log(
            $level,
            ::std::option::Option::None,
            ::std::format_args!($($arg)+),
        )
    }};
}

/// Emit a record at [`Level::Trace`](crate::Level::Trace).
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Emit a record at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Emit a record at [`Level::Info`](crate::Level::Info).
///
/// # Examples
///
/// ```
/// use slf_core::LoggerFactory;
/// use slf_core::NopLoggerFactory;
///
/// let logger = NopLoggerFactory::default().logger("svc");
/// slf_core::info!(logger, "Hello {0}", "World!");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Emit a record at [`Level::Warning`](crate::Level::Warning).
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Emit a record at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Emit a record at [`Level::Fatal`](crate::Level::Fatal).
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}
