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

//! Listener subscriptions and the broadcast primitive shared by every backend.

use std::cell::Cell;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::Error;
use crate::LogEvent;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

type Callback = dyn Fn(&LogEvent<'_>) + Send + Sync + 'static;

/// A subscription callback invoked for every record a backend emits.
///
/// Listeners are compared by identity: clones of one `Listener` are equal to each other, while
/// two listeners built from separate closures are distinct even if the closures are identical.
/// Keep a clone around to unregister later.
///
/// # Examples
///
/// ```
/// use slf_core::Listener;
///
/// let listener = Listener::new(|event| println!("{}", event.rendered_message()));
/// assert_eq!(listener, listener.clone());
/// assert_ne!(listener, Listener::new(|_| {}));
/// ```
#[derive(Clone)]
pub struct Listener(Arc<Callback>);

impl Listener {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&LogEvent<'_>) + Send + Sync + 'static,
    {
        Listener(Arc::new(callback))
    }

    /// Invoke the callback directly.
    pub fn call(&self, event: &LogEvent<'_>) {
        (self.0)(event)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.addr()).finish()
    }
}

thread_local! {
    static IN_LISTENER: Cell<bool> = const { Cell::new(false) };
}

// Marks the current thread as running listener callbacks until dropped.
struct ListenerScope {
    outer: bool,
}

impl ListenerScope {
    fn enter() -> Self {
        ListenerScope {
            outer: IN_LISTENER.with(|flag| flag.replace(true)),
        }
    }

    fn is_active() -> bool {
        IN_LISTENER.with(Cell::get)
    }
}

impl Drop for ListenerScope {
    fn drop(&mut self) {
        IN_LISTENER.with(|flag| flag.set(self.outer));
    }
}

/// The set of listeners subscribed to one backend factory.
///
/// Registration and unregistration are exclusive with each other and with the start of a
/// broadcast. Each broadcast iterates over an immutable snapshot of the set, so concurrent
/// broadcasts run in parallel, and a listener may register or unregister listeners from inside its
/// callback. Changes made during a broadcast take effect from the next broadcast on.
///
/// A listener that panics is isolated: the panic is reported to the registry's [`Trap`] and the
/// broadcast continues with the next listener.
///
/// # Examples
///
/// ```
/// use slf_core::ListenerRegistry;
/// use slf_core::Listener;
/// use slf_core::LogEvent;
///
/// let registry = ListenerRegistry::default();
/// let listener = Listener::new(|event| assert_eq!(event.rendered_message(), "hello"));
///
/// assert!(registry.register(listener.clone()));
/// assert!(!registry.register(listener.clone()));
///
/// let event = LogEvent::builder().message("hello").build();
/// assert!(registry.broadcast(&event));
///
/// assert!(registry.unregister(&listener));
/// assert!(!registry.broadcast(&event));
/// ```
#[derive(Debug)]
pub struct ListenerRegistry {
    listeners: RwLock<Arc<[Listener]>>,
    trap: Box<dyn Trap>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self {
            listeners: RwLock::new(Arc::from([])),
            trap: Box::new(DefaultTrap::default()),
        }
    }
}

impl ListenerRegistry {
    /// Set the trap receiving listener panics.
    ///
    /// Default to [`DefaultTrap`].
    pub fn with_trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Add `listener` unless it is already registered.
    ///
    /// Returns `true` if the listener was added, `false` if it was already subscribed.
    pub fn register(&self, listener: Listener) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if listeners.contains(&listener) {
            return false;
        }

        let mut next = Vec::with_capacity(listeners.len() + 1);
        next.extend(listeners.iter().cloned());
        next.push(listener);
        *listeners = Arc::from(next);
        true
    }

    /// Remove `listener` if it is registered.
    ///
    /// Returns `true` if the listener was removed, `false` if it was not found.
    pub fn unregister(&self, listener: &Listener) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if !listeners.contains(listener) {
            return false;
        }

        let next: Vec<Listener> = listeners
            .iter()
            .filter(|l| *l != listener)
            .cloned()
            .collect();
        *listeners = Arc::from(next);
        true
    }

    /// Invoke every registered listener with `event`, in registration order.
    ///
    /// Returns `true` if at least one listener was invoked. A broadcast issued from inside a
    /// listener callback on the same thread is dropped and returns `false`.
    pub fn broadcast(&self, event: &LogEvent<'_>) -> bool {
        if ListenerScope::is_active() {
            return false;
        }

        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return false;
        }

        let _scope = ListenerScope::enter();
        for listener in snapshot.iter() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener.call(event))) {
                let err = Error::from_panic("listener panicked during broadcast", payload.as_ref())
                    .with_context("logger", event.logger())
                    .with_context("level", event.level());
                self.trap.trap(&err);
            }
        }
        true
    }

    /// The number of registered listeners.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Arc<[Listener]> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
