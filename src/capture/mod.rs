//! Chord capture state machine.
//!
//! [`ChordCapture`] receives focus, blur, key press and key release events,
//! tracks the keys currently held, and commits a chord to the change callback
//! and the shortcut history the moment the held keys form a valid combination.

use crate::history::{KeyValueStore, ShortcutHistory};
use crate::keys::{ModifierSet, RawKeyEvent, format_chord, is_valid_chord, normalize, split_chord};

/// Status and display types.
mod display;

pub use display::{
    CaptureStatus, Display, KeyCap, PLACEHOLDER_FOCUSED, PLACEHOLDER_UNFOCUSED,
};

/// Callback receiving every newly committed or selected chord.
pub type ChangeCallback = Box<dyn FnMut(&str) + Send>;

/// Keyboard chord capture input.
pub struct ChordCapture {
    /// Modifier policy consulted on every mutation.
    modifiers: ModifierSet,
    /// Whether the input has focus.
    focused: bool,
    /// Keys held right now, unique, in press order.
    held: Vec<String>,
    /// Last accepted chord; empty when none.
    committed: String,
    /// Whether the history dropdown is open.
    history_open: bool,
    /// Recently committed chords.
    history: ShortcutHistory,
    /// Backend for the history record.
    store: Box<dyn KeyValueStore + Send>,
    /// Host notification.
    on_change: ChangeCallback,
}

impl std::fmt::Debug for ChordCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChordCapture")
            .field("modifiers", &self.modifiers)
            .field("focused", &self.focused)
            .field("held", &self.held)
            .field("committed", &self.committed)
            .field("history_open", &self.history_open)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl ChordCapture {
    /// What: Create a capture input and load its history.
    ///
    /// Inputs:
    /// - `value`: Initial committed chord from the host (may be empty).
    /// - `modifiers`: Modifier policy.
    /// - `store`: Backend holding the shortcut history.
    /// - `on_change`: Invoked with the chord on every commit and history selection.
    ///
    /// Output:
    /// - Unfocused input showing `value`.
    ///
    /// Details:
    /// - The initial value is taken as-is; later host updates go through [`Self::set_value`].
    /// - History load failures are logged and leave the history empty.
    pub fn new<F>(
        value: impl Into<String>,
        modifiers: ModifierSet,
        store: Box<dyn KeyValueStore + Send>,
        on_change: F,
    ) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        let history = ShortcutHistory::load(store.as_ref());
        Self {
            modifiers,
            focused: false,
            held: Vec::new(),
            committed: value.into(),
            history_open: false,
            history,
            store,
            on_change: Box::new(on_change),
        }
    }

    /// Give the input focus.
    pub fn focus(&mut self) {
        self.focused = true;
        tracing::trace!(committed = %self.committed, "[Capture] Focused");
    }

    /// Remove focus and drop any held keys.
    pub fn blur(&mut self) {
        self.focused = false;
        self.held.clear();
        tracing::trace!(committed = %self.committed, "[Capture] Blurred");
    }

    /// What: Handle a key press.
    ///
    /// Inputs:
    /// - `event`: Raw key event.
    ///
    /// Output:
    /// - `true` when the input consumed the event (it is focused), so the host should
    ///   suppress its own handling; `false` when unfocused.
    ///
    /// Details:
    /// - A key already held is ignored, so auto-repeat never commits twice.
    /// - When the held keys form a valid chord it is committed: stored as the committed
    ///   value, passed to the change callback, and recorded in the history.
    pub fn key_down(&mut self, event: &RawKeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        let key = normalize(event);
        if self.held.contains(&key) {
            return true;
        }
        tracing::trace!(key = %key, held = ?self.held, "[Capture] Key down");
        self.held.push(key);
        if self.held_is_valid() {
            let chord = format_chord(&self.held);
            self.commit(chord);
        }
        true
    }

    /// What: Handle a key release.
    ///
    /// Inputs:
    /// - `event`: Raw key event.
    ///
    /// Output:
    /// - `true` when the input consumed the event (it is focused).
    ///
    /// Details:
    /// - Releasing never commits.
    /// - When the remaining keys no longer form a valid chord and a committed value
    ///   exists, the held keys are dropped so the committed chord shows again.
    pub fn key_up(&mut self, event: &RawKeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        let key = normalize(event);
        self.held.retain(|k| k != &key);
        if self.held.is_empty() {
            return true;
        }
        if !self.held_is_valid() && !self.committed.is_empty() {
            tracing::trace!(
                committed = %self.committed,
                "[Capture] Chord broken; reverting to committed value"
            );
            self.held.clear();
        }
        true
    }

    /// What: Adopt a chord chosen from the history dropdown.
    ///
    /// Inputs:
    /// - `chord`: Chord string taken from the history.
    ///
    /// Details:
    /// - Not re-validated and not pushed back into the history; closes the dropdown.
    pub fn select_from_history(&mut self, chord: &str) {
        self.committed = chord.to_string();
        tracing::info!(chord, "[Capture] Selected shortcut from history");
        (self.on_change)(chord);
        self.history_open = false;
    }

    /// What: Adopt the history entry at `index`.
    ///
    /// Output:
    /// - The selected chord, or `None` (and no change) when `index` is out of range.
    pub fn select_history_index(&mut self, index: usize) -> Option<String> {
        let chord = self.history.get(index)?.to_string();
        self.select_from_history(&chord);
        Some(chord)
    }

    /// What: Accept an updated value from the host.
    ///
    /// Output:
    /// - `true` when adopted; only non-empty chords valid under the current policy are.
    pub fn set_value(&mut self, value: &str) -> bool {
        if value.is_empty() || !is_valid_chord(&split_chord(value), &self.modifiers) {
            tracing::debug!(value, "[Capture] Ignoring invalid host value");
            return false;
        }
        self.committed = value.to_string();
        true
    }

    /// Forget the committed value and any held keys.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.held.clear();
    }

    /// Empty the history, remove its record from the store, and close the dropdown.
    pub fn clear_history(&mut self) {
        self.history.clear(self.store.as_mut());
        self.history_open = false;
    }

    /// What: Open or close the history dropdown.
    ///
    /// Output:
    /// - New open state; the dropdown never opens while the history is empty.
    pub fn toggle_history(&mut self) -> bool {
        self.history_open = !self.history_open && !self.history.is_empty();
        self.history_open
    }

    /// Close the history dropdown.
    pub const fn close_history(&mut self) {
        self.history_open = false;
    }

    /// Whether the input has focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Keys currently held, in press order.
    #[must_use]
    pub fn held_keys(&self) -> &[String] {
        &self.held
    }

    /// The committed chord; empty when none.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The shortcut history.
    #[must_use]
    pub const fn history(&self) -> &ShortcutHistory {
        &self.history
    }

    /// Whether the history dropdown is open.
    #[must_use]
    pub const fn is_history_open(&self) -> bool {
        self.history_open
    }

    /// The modifier policy.
    #[must_use]
    pub const fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    /// What: Derive the current state from scratch.
    ///
    /// Output:
    /// - One of the [`CaptureStatus`] variants; never cached.
    #[must_use]
    pub fn status(&self) -> CaptureStatus {
        if !self.focused || self.held.is_empty() {
            return match (self.committed.is_empty(), self.focused) {
                (false, _) => CaptureStatus::DisplayingCommitted,
                (true, false) => CaptureStatus::Empty,
                (true, true) => CaptureStatus::FocusedIdle,
            };
        }
        if self.held_is_valid() {
            CaptureStatus::ValidActive
        } else {
            CaptureStatus::InProgress
        }
    }

    /// What: Describe what the input shows.
    ///
    /// Output:
    /// - Held keys while focused and holding keys; otherwise the committed chord;
    ///   otherwise a placeholder that depends on focus.
    #[must_use]
    pub fn display(&self) -> Display {
        if self.focused && !self.held.is_empty() {
            return Display::Keys(self.caps(self.held.iter().map(String::as_str), true));
        }
        if !self.committed.is_empty() {
            return Display::Keys(self.caps(split_chord(&self.committed), false));
        }
        if self.focused {
            Display::Placeholder(PLACEHOLDER_FOCUSED)
        } else {
            Display::Placeholder(PLACEHOLDER_UNFOCUSED)
        }
    }

    /// Build key caps for `names`.
    fn caps<'a>(&self, names: impl IntoIterator<Item = &'a str>, pressed: bool) -> Vec<KeyCap> {
        names
            .into_iter()
            .map(|name| KeyCap {
                name: name.to_string(),
                modifier: self.modifiers.contains(name),
                pressed,
            })
            .collect()
    }

    /// Whether the held keys form a valid chord right now.
    fn held_is_valid(&self) -> bool {
        is_valid_chord(&self.held, &self.modifiers)
    }

    /// Store `chord` as committed, notify the host and record it.
    fn commit(&mut self, chord: String) {
        tracing::info!(chord = %chord, "[Capture] Committed shortcut");
        (self.on_change)(&chord);
        self.history.record(self.store.as_mut(), &chord);
        self.committed = chord;
    }
}
