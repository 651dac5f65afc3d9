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

//! Core structs and traits for SLF, a simple logging facade.
//!
//! Application code logs through the [`Logger`] and [`LoggerFactory`] traits; backend adapters
//! implement them by composing a [`LevelMapper`], a [`ListenerRegistry`] and a
//! [`LoggerRegistry`]. [`Discovery`] finds the installed adapters at runtime.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod discovery;
pub mod event;
pub mod trap;

mod error;
mod factory;
mod level;
mod listener;
mod macros;
mod mapper;
mod nop;
mod registry;

pub use self::discovery::Discovery;
pub use self::discovery::Factories;
pub use self::error::Error;
pub use self::event::LogEvent;
pub use self::event::LogEventOwned;
pub use self::factory::Logger;
pub use self::factory::LoggerFactory;
pub use self::level::Level;
pub use self::listener::Listener;
pub use self::listener::ListenerRegistry;
pub use self::mapper::LevelMapper;
pub use self::nop::NopLogger;
pub use self::nop::NopLoggerFactory;
pub use self::registry::LoggerRegistry;
pub use self::trap::DefaultTrap;
pub use self::trap::Trap;
