//! Host screen state: the capture input plus everything the screen around it
//! needs (current binding, dropdown cursor, hit-test rectangles).

use ratatui::widgets::ListState;

use crate::capture::ChordCapture;

/// Screen rectangle recorded during rendering for mouse hit-testing: `(x, y, width, height)`.
pub type HitRect = (u16, u16, u16, u16);

/// What: Test whether a terminal cell lies inside a recorded rectangle.
///
/// Inputs:
/// - `rect`: Optional rectangle.
/// - `x`, `y`: Cell coordinates.
///
/// Output:
/// - `true` when the cell is inside; `false` for `None` or outside.
#[must_use]
pub fn point_in(rect: Option<HitRect>, x: u16, y: u16) -> bool {
    rect.is_some_and(|(rx, ry, rw, rh)| {
        x >= rx && x < rx.saturating_add(rw) && y >= ry && y < ry.saturating_add(rh)
    })
}

/// Application state for the keybind editor screen.
#[derive(Debug)]
pub struct AppState {
    /// The chord capture input.
    pub capture: ChordCapture,
    /// Binding owned by the host; updated from the capture's change notifications.
    pub binding: String,
    /// Highlighted row in the history dropdown.
    pub history_state: ListState,
    /// Whether the terminal reports key releases and bare modifier presses.
    pub keyboard_enhanced: bool,
    /// Show the key hints footer.
    pub show_keybinds_footer: bool,
    /// Transient message shown above the footer.
    pub status_message: Option<String>,
    /// Inner rectangle of the capture input.
    pub input_rect: Option<HitRect>,
    /// Rectangle of the history marker inside the input.
    pub history_button_rect: Option<HitRect>,
    /// Inner rectangle of the history dropdown rows.
    pub dropdown_rect: Option<HitRect>,
    /// Rectangle of the reset button.
    pub reset_rect: Option<HitRect>,
}

impl AppState {
    /// What: Build the screen state around a capture input.
    ///
    /// Inputs:
    /// - `capture`: Capture input (already holding its initial value and history).
    ///
    /// Output:
    /// - State whose host binding mirrors the capture's committed value.
    #[must_use]
    pub fn new(capture: ChordCapture) -> Self {
        let binding = capture.committed().to_string();
        Self {
            capture,
            binding,
            history_state: ListState::default(),
            keyboard_enhanced: false,
            show_keybinds_footer: true,
            status_message: None,
            input_rect: None,
            history_button_rect: None,
            dropdown_rect: None,
            reset_rect: None,
        }
    }

    /// What: Apply a change notification from the capture input.
    ///
    /// Inputs:
    /// - `chord`: Newly committed or selected chord.
    pub fn apply_binding_change(&mut self, chord: String) {
        tracing::debug!(chord = %chord, "[State] Binding changed");
        self.status_message = Some(format!("Bound {chord}"));
        self.binding = chord;
    }

    /// What: Toggle the history dropdown and place the cursor on the newest entry.
    pub fn toggle_history(&mut self) {
        if self.capture.toggle_history() {
            self.history_state.select(Some(0));
        } else {
            self.history_state.select(None);
        }
    }

    /// Close the dropdown and clear its cursor.
    pub fn close_history(&mut self) {
        self.capture.close_history();
        self.history_state.select(None);
    }

    /// What: Move the dropdown cursor by `delta` rows, clamped to the list.
    pub fn move_history_cursor(&mut self, delta: isize) {
        let len = self.capture.history().len();
        if len == 0 {
            self.history_state.select(None);
            return;
        }
        let current = self.history_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.history_state.select(Some(next));
    }

    /// What: Select the history entry at `index`, closing the dropdown.
    ///
    /// Output:
    /// - The selected chord, or `None` when `index` is out of range.
    pub fn select_history(&mut self, index: usize) -> Option<String> {
        let chord = self.capture.select_history_index(index)?;
        self.history_state.select(None);
        Some(chord)
    }

    /// What: Reset the screen: forget the binding, the committed chord and the history.
    pub fn reset(&mut self) {
        self.binding.clear();
        self.capture.clear();
        self.capture.clear_history();
        self.history_state.select(None);
        self.status_message = Some("Keybinds reset".to_string());
        tracing::info!("[State] Reset keybinds and shortcut history");
    }
}
