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

//! An adapter built from the core pieces only, emitting into a shared buffer.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use slf_core::Level;
use slf_core::LevelMapper;
use slf_core::Listener;
use slf_core::ListenerRegistry;
use slf_core::LogEvent;
use slf_core::LogEventOwned;
use slf_core::Logger;
use slf_core::LoggerFactory;
use slf_core::LoggerRegistry;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Native {
    Off,
    Fine,
    Normal,
    Severe,
}

#[derive(Debug)]
struct Emitter {
    mapper: LevelMapper<Native>,
    threshold: Native,
    listeners: ListenerRegistry,
    lines: Mutex<Vec<String>>,
}

#[derive(Debug)]
struct TestFactory {
    emitter: Arc<Emitter>,
    loggers: LoggerRegistry<TestLogger>,
}

impl TestFactory {
    fn new(threshold: Native) -> Self {
        let mapper = LevelMapper::new(
            [
                (Level::Debug, Native::Fine),
                (Level::Info, Native::Normal),
                (Level::Error, Native::Severe),
            ],
            Native::Off,
        );
        TestFactory {
            emitter: Arc::new(Emitter {
                mapper,
                threshold,
                listeners: ListenerRegistry::default(),
                lines: Mutex::new(vec![]),
            }),
            loggers: LoggerRegistry::default(),
        }
    }
}

impl LoggerFactory for TestFactory {
    fn name(&self) -> &str {
        "TestFactory"
    }

    fn logger(&self, name: &str) -> Arc<dyn Logger> {
        self.loggers.get_or_create(name, |name| {
            Arc::new(TestLogger {
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

#[derive(Debug)]
struct TestLogger {
    name: String,
    emitter: Arc<Emitter>,
}

impl Logger for TestLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        let native = self.emitter.mapper.to_native(level);
        native != Native::Off && native as u8 >= self.emitter.threshold as u8
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
        self.emitter
            .lines
            .lock()
            .unwrap()
            .push(format!("{level} {}: {message}", self.name));

        let event = LogEvent::builder()
            .level(level)
            .logger(&self.name)
            .message(&message)
            .error(error)
            .build();
        self.emitter.listeners.broadcast(&event);
    }
}

fn collect(factory: &dyn LoggerFactory) -> (Listener, Arc<Mutex<Vec<LogEventOwned>>>) {
    let events = Arc::new(Mutex::new(vec![]));
    let sink = events.clone();
    let listener = Listener::new(move |event| sink.lock().unwrap().push(event.to_owned()));
    assert!(factory.register_listener(listener.clone()));
    (listener, events)
}

#[test]
fn listener_observes_info_record() {
    let factory = TestFactory::new(Native::Fine);
    let (_, events) = collect(&factory);

    factory.logger("svc").info(format_args!("Hello {0}", "World!"));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level(), Level::Info);
    assert_eq!(events[0].logger(), "svc");
    assert!(events[0].rendered_message().contains("Hello World!"));
    assert!(events[0].error().is_none());
}

#[test]
fn listener_observes_accompanying_error() {
    let factory = TestFactory::new(Native::Fine);
    let (_, events) = collect(&factory);
    let err = io::Error::other("disk full");

    factory
        .logger("svc")
        .info_error(&err, format_args!("Hello {0}", "World!"));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level(), Level::Info);
    assert_eq!(events[0].error(), Some("disk full"));
}

#[test]
fn macros_route_through_the_logger() {
    let factory = TestFactory::new(Native::Fine);
    let (_, events) = collect(&factory);
    let logger = factory.logger("svc");
    let err = io::Error::other("timeout");

    slf_core::debug!(logger, "step {}", 1);
    slf_core::info!(logger, "Hello {0}", "World!");
    slf_core::error!(logger, error = &err, "request {id} failed", id = 7);
    // unmapped levels resolve to the off sentinel and are dropped
    slf_core::trace!(logger, "dropped");
    slf_core::warn!(logger, "dropped");

    let events = events.lock().unwrap();
    let seen: Vec<(Level, &str)> = events
        .iter()
        .map(|e| (e.level(), e.rendered_message()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Level::Debug, "step 1"),
            (Level::Info, "Hello World!"),
            (Level::Error, "request 7 failed"),
        ]
    );
    assert_eq!(events[2].error(), Some("timeout"));
    assert_eq!(
        *factory.emitter.lines.lock().unwrap(),
        vec![
            "DEBUG svc: step 1".to_string(),
            "INFO svc: Hello World!".to_string(),
            "ERROR svc: request 7 failed".to_string(),
        ]
    );
}

#[test]
fn disabled_levels_are_not_broadcast() {
    let factory = TestFactory::new(Native::Severe);
    let (_, events) = collect(&factory);
    let logger = factory.logger("svc");

    assert!(!logger.is_enabled(Level::Info));
    logger.info(format_args!("quiet"));
    logger.error(format_args!("loud"));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].rendered_message(), "loud");
}

#[test]
fn loggers_are_cached_per_name() {
    let factory = TestFactory::new(Native::Fine);
    let a = factory.logger("a");

    assert!(Arc::ptr_eq(&a, &factory.logger("a")));
    assert!(!Arc::ptr_eq(&a, &factory.logger("b")));

    struct Service;
    let factory: &dyn LoggerFactory = &factory;
    let typed = factory.logger_for::<Service>();
    assert!(typed.name().ends_with("Service"));
    assert!(Arc::ptr_eq(&typed, &factory.logger_for::<Service>()));
}

#[test]
fn register_and_unregister_through_factory() {
    let factory = TestFactory::new(Native::Fine);
    let listener = Listener::new(|_| {});

    assert!(!factory.unregister_listener(&listener));
    assert!(factory.register_listener(listener.clone()));
    assert!(!factory.register_listener(listener.clone()));
    assert!(factory.unregister_listener(&listener));
    assert!(!factory.unregister_listener(&listener));
}

#[test]
fn raise_event_reports_whether_anyone_listened() {
    let factory = TestFactory::new(Native::Fine);
    let event = LogEvent::builder().message("external").build();
    assert!(!factory.raise_event(&event));

    let (listener, events) = collect(&factory);
    assert!(factory.raise_event(&event));
    assert_eq!(events.lock().unwrap()[0].rendered_message(), "external");

    factory.unregister_listener(&listener);
    assert!(!factory.raise_event(&event));
}
