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

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

/// A per-factory cache holding at most one logger per name.
///
/// Loggers are created lazily and exactly once: concurrent first-time callers for the same name
/// all observe the same instance, and the constructor runs a single time. The constructor runs
/// while the cache is locked, so it must not call back into the same registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use slf_core::LoggerRegistry;
///
/// let registry = LoggerRegistry::<String>::default();
/// let a = registry.get_or_create("svc", |name| Arc::new(name.to_uppercase()));
/// let b = registry.get_or_create("svc", |_| unreachable!());
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(*a, "SVC");
/// ```
pub struct LoggerRegistry<L: ?Sized> {
    loggers: RwLock<HashMap<String, Arc<L>>>,
}

impl<L: ?Sized> Default for LoggerRegistry<L> {
    fn default() -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
        }
    }
}

impl<L: ?Sized> fmt::Debug for LoggerRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl<L: ?Sized> LoggerRegistry<L> {
    /// Return the logger cached for `name`, creating it with `create` on first access.
    pub fn get_or_create<F>(&self, name: &str, create: F) -> Arc<L>
    where
        F: FnOnce(&str) -> Arc<L>,
    {
        if let Some(logger) = self.get(name) {
            return logger;
        }

        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        // another caller may have won the race between the two locks
        if let Some(logger) = loggers.get(name) {
            return logger.clone();
        }

        let logger = create(name);
        loggers.insert(name.to_string(), logger.clone());
        logger
    }

    /// Return the logger cached for `name`, if any.
    pub fn get(&self, name: &str) -> Option<Arc<L>> {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// The number of cached loggers.
    pub fn len(&self) -> usize {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no logger has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The names of all cached loggers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn distinct_names_get_distinct_loggers() {
        let registry = LoggerRegistry::<str>::default();
        let a = registry.get_or_create("a", |name| Arc::from(name));
        let b = registry.get_or_create("b", |name| Arc::from(name));

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn concurrent_first_access_constructs_once() {
        const THREADS: usize = 16;

        let registry = Arc::new(LoggerRegistry::<String>::default());
        let constructed = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = registry.clone();
                let constructed = constructed.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    registry.get_or_create("x", |name| {
                        constructed.fetch_add(1, Ordering::SeqCst);
                        Arc::new(name.to_string())
                    })
                })
            })
            .collect();

        let loggers: Vec<Arc<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(constructed.load(Ordering::SeqCst), 1);
        assert!(loggers.iter().all(|l| Arc::ptr_eq(l, &loggers[0])));
        assert_eq!(registry.len(), 1);
    }
}
