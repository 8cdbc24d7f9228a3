//! Most-recently-used list of committed chords, persisted through a
//! [`KeyValueStore`] as a single JSON record.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Key-value store backends.
mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, Result};

/// Store key under which the history record is persisted.
pub const STORAGE_KEY: &str = "shortcut-input-history";

/// Maximum number of chords kept in the history (most-recent-first).
pub const HISTORY_CAPACITY: usize = 5;

/// What: Provide the non-zero capacity used by the history LRU cache.
///
/// Output:
/// - Non-zero capacity for the history cache.
///
/// Details:
/// - Uses a const unchecked constructor because the capacity constant is guaranteed
///   to be greater than zero.
#[must_use]
pub const fn history_capacity() -> NonZeroUsize {
    // SAFETY: `HISTORY_CAPACITY` is a non-zero constant.
    unsafe { NonZeroUsize::new_unchecked(HISTORY_CAPACITY) }
}

/// Serialized form of the history: `{"shortcuts": [...], "maxSize": 5}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Chord strings, most recent first.
    pub shortcuts: Vec<String>,
    /// Declared capacity at the time of writing.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

/// Capacity assumed for records written without `maxSize`.
const fn default_max_size() -> usize {
    HISTORY_CAPACITY
}

/// Bounded, duplicate-free list of recently committed chords.
#[derive(Debug)]
pub struct ShortcutHistory {
    /// Chord strings keyed by themselves; iteration order is most-recent-first.
    entries: LruCache<String, ()>,
}

impl Default for ShortcutHistory {
    fn default() -> Self {
        Self {
            entries: LruCache::new(history_capacity()),
        }
    }
}

impl ShortcutHistory {
    /// What: Build a history from a most-recent-first list.
    ///
    /// Inputs:
    /// - `list`: Chord strings, most recent first; may contain duplicates or exceed capacity.
    ///
    /// Output:
    /// - History keeping the first occurrence of each chord, clamped to capacity.
    pub fn from_entries<I>(list: I) -> Self
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut history = Self::default();
        // Oldest first so that the head of `list` ends up most recent.
        for chord in list.into_iter().rev() {
            if !chord.is_empty() {
                let _ = history.entries.put(chord, ());
            }
        }
        history
    }

    /// What: Load the history from `store`.
    ///
    /// Inputs:
    /// - `store`: Backend holding the record under [`STORAGE_KEY`].
    ///
    /// Output:
    /// - The stored history, or an empty one when nothing is stored.
    ///
    /// Details:
    /// - Read failures and malformed records are logged and yield an empty history;
    ///   they are never propagated.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = STORAGE_KEY, "[History] No stored shortcut history");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(
                    key = STORAGE_KEY,
                    error = %e,
                    "[History] Failed to read shortcut history"
                );
                return Self::default();
            }
        };
        match serde_json::from_str::<HistoryRecord>(&raw) {
            Ok(record) => {
                let history = Self::from_entries(record.shortcuts);
                tracing::info!(
                    key = STORAGE_KEY,
                    count = history.len(),
                    "[History] Loaded shortcut history"
                );
                history
            }
            Err(e) => {
                tracing::warn!(
                    key = STORAGE_KEY,
                    error = %e,
                    "[History] Failed to parse shortcut history"
                );
                Self::default()
            }
        }
    }

    /// The most recently recorded chord, if any.
    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.entries.iter().next().map(|(k, _)| k.as_str())
    }

    /// Chords in most-recent-first order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Chord at `index` in most-recent-first order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.iter().nth(index).map(|(k, _)| k.as_str())
    }

    /// Number of stored chords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no chord has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the history in its persisted shape.
    #[must_use]
    pub fn to_record(&self) -> HistoryRecord {
        HistoryRecord {
            shortcuts: self.entries(),
            max_size: HISTORY_CAPACITY,
        }
    }

    /// What: Record a newly committed chord and persist the history.
    ///
    /// Inputs:
    /// - `store`: Backend receiving the updated record.
    /// - `chord`: Chord string to promote to the front.
    ///
    /// Output:
    /// - `true` when the history changed; `false` when `chord` already was the most recent entry.
    ///
    /// Details:
    /// - An existing occurrence elsewhere is moved to the front; the oldest entry is
    ///   evicted once capacity is exceeded.
    /// - A failed write is logged; the in-memory history keeps the update.
    pub fn record(&mut self, store: &mut dyn KeyValueStore, chord: &str) -> bool {
        if self.most_recent() == Some(chord) {
            tracing::trace!(chord, "[History] Already most recent; skipping");
            return false;
        }
        let _ = self.entries.put(chord.to_string(), ());
        self.persist(store);
        true
    }

    /// What: Forget every entry and remove the persisted record.
    ///
    /// Details:
    /// - A failed removal is logged; the in-memory history is cleared regardless.
    pub fn clear(&mut self, store: &mut dyn KeyValueStore) {
        self.entries.clear();
        match store.remove(STORAGE_KEY) {
            Ok(()) => tracing::info!(key = STORAGE_KEY, "[History] Cleared shortcut history"),
            Err(e) => tracing::warn!(
                key = STORAGE_KEY,
                error = %e,
                "[History] Failed to remove shortcut history"
            ),
        }
    }

    /// Write the current list and capacity as one record.
    fn persist(&self, store: &mut dyn KeyValueStore) {
        let record = self.to_record();
        match serde_json::to_string(&record) {
            Ok(s) => {
                if let Err(e) = store.set(STORAGE_KEY, &s) {
                    tracing::warn!(
                        key = STORAGE_KEY,
                        error = %e,
                        "[History] Failed to write shortcut history"
                    );
                } else {
                    tracing::debug!(
                        key = STORAGE_KEY,
                        count = record.shortcuts.len(),
                        bytes = s.len(),
                        "[History] Shortcut history persisted"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "[History] Failed to serialize shortcut history");
            }
        }
    }
}
