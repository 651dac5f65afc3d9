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
use std::hash::Hash;

use crate::Level;

/// Bidirectional mapping between [`Level`] and a backend's native level type.
///
/// The mapping is built from one canonical table of pairs; the reverse direction is derived from
/// it. Lookups never fail: an unmapped [`Level`] resolves to the backend's off sentinel and an
/// unmapped native level resolves to [`Level::Other`].
///
/// # Examples
///
/// ```
/// use slf_core::Level;
/// use slf_core::LevelMapper;
///
/// let mapper = LevelMapper::new(
///     [
///         (Level::Info, log::LevelFilter::Info),
///         (Level::Error, log::LevelFilter::Error),
///     ],
///     log::LevelFilter::Off,
/// );
///
/// assert_eq!(mapper.to_native(Level::Info), log::LevelFilter::Info);
/// assert_eq!(mapper.to_native(Level::Trace), log::LevelFilter::Off);
/// assert_eq!(mapper.to_abstract(log::LevelFilter::Error), Level::Error);
/// assert_eq!(mapper.to_abstract(log::LevelFilter::Debug), Level::Other);
/// ```
#[derive(Debug, Clone)]
pub struct LevelMapper<N> {
    canonical: Vec<(Level, N)>,
    forward: HashMap<Level, N>,
    reverse: HashMap<N, Level>,
    off: N,
}

impl<N> LevelMapper<N>
where
    N: Copy + Eq + Hash,
{
    /// Build a mapper from the canonical `(Level, native)` table and the off sentinel.
    ///
    /// If two pairs share a native level, the first one wins in the reverse direction. If two
    /// pairs share a [`Level`], the last one wins in the forward direction.
    pub fn new(pairs: impl IntoIterator<Item = (Level, N)>, off: N) -> Self {
        let canonical: Vec<(Level, N)> = pairs.into_iter().collect();

        let mut forward = HashMap::with_capacity(canonical.len());
        let mut reverse = HashMap::with_capacity(canonical.len());
        for &(level, native) in &canonical {
            forward.insert(level, native);
            reverse.entry(native).or_insert(level);
        }

        Self {
            canonical,
            forward,
            reverse,
            off,
        }
    }

    /// Map `level` onto `native` in the forward direction only.
    ///
    /// Use this for levels the backend has no distinct native value for. Aliases never take part
    /// in [`to_abstract`](Self::to_abstract).
    pub fn with_alias(mut self, level: Level, native: N) -> Self {
        self.forward.insert(level, native);
        self
    }

    /// Resolve the native level, or the off sentinel if `level` is unmapped.
    pub fn to_native(&self, level: Level) -> N {
        self.forward.get(&level).copied().unwrap_or(self.off)
    }

    /// Resolve the abstract level, or [`Level::Other`] if `native` is unmapped.
    pub fn to_abstract(&self, native: N) -> Level {
        self.reverse.get(&native).copied().unwrap_or(Level::Other)
    }

    /// The off sentinel returned for unmapped levels.
    pub fn off(&self) -> N {
        self.off
    }

    /// The canonical pairs, in the order the mapper was built with.
    pub fn pairs(&self) -> impl Iterator<Item = (Level, N)> + '_ {
        self.canonical.iter().copied()
    }
}
