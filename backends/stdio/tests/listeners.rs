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

use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use slf_backend_stdio::StdioConfig;
use slf_backend_stdio::StdioLoggerFactory;
use slf_backend_stdio::TextLayout;
use slf_core::Level;
use slf_core::Listener;
use slf_core::LogEventOwned;
use slf_core::LoggerFactory;

fn factory(directives: &str) -> StdioLoggerFactory {
    StdioLoggerFactory::new(
        StdioConfig::default()
            .filter(directives)
            .layout(TextLayout::default().no_color()),
    )
}

fn listen(factory: &StdioLoggerFactory) -> (Listener, Arc<Mutex<Vec<LogEventOwned>>>) {
    let events = Arc::new(Mutex::new(vec![]));
    let sink = events.clone();
    let listener = Listener::new(move |event| sink.lock().unwrap().push(event.to_owned()));
    assert!(factory.register_listener(listener.clone()));
    (listener, events)
}

#[test]
fn every_level_is_broadcast_with_and_without_error() {
    let factory = factory("trace");
    let (_, events) = listen(&factory);
    let logger = factory.logger("stdio::levels");
    let err = io::Error::other("connection refused");

    let levels = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];
    for level in levels {
        slf_core::log!(logger, level, "Hello {0}", "World!");
        slf_core::log!(logger, level, error = &err, "Hello {0}", "World!");
    }

    let events = events.lock().unwrap();
    assert_eq!(events.len(), levels.len() * 2);
    for (pair, level) in events.chunks(2).zip(levels) {
        assert_eq!(pair[0].level(), level);
        assert_eq!(pair[0].logger(), "stdio::levels");
        assert!(pair[0].rendered_message().contains("Hello World!"));
        assert!(pair[0].error().is_none());

        assert_eq!(pair[1].level(), level);
        assert!(pair[1].rendered_message().contains("Hello World!"));
        assert_eq!(pair[1].error(), Some("connection refused"));
    }
}

#[test]
fn filtered_records_are_not_broadcast() {
    let factory = factory("error");
    let (_, events) = listen(&factory);
    let logger = factory.logger("stdio::filtered");

    slf_core::info!(logger, "quiet");
    slf_core::fatal!(logger, "loud");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level(), Level::Fatal);
    assert_eq!(events[0].rendered_message(), "loud");
}

#[test]
fn unregistered_listener_stops_receiving() {
    let factory = factory("info");
    let (listener, events) = listen(&factory);
    let logger = factory.logger("stdio::unregister");

    slf_core::info!(logger, "first");
    assert!(factory.unregister_listener(&listener));
    slf_core::info!(logger, "second");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].rendered_message(), "first");
}

#[test]
fn loggers_are_cached_per_name() {
    let factory = factory("info");
    let a = factory.logger("stdio::cache");
    assert!(Arc::ptr_eq(&a, &factory.logger("stdio::cache")));
    assert_eq!(factory.name(), "stdio");
}
