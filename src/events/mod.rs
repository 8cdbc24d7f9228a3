//! Event dispatch for the keybind editor screen.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::AppState;

/// Mouse hit-testing.
mod mouse;
/// Crossterm key events to raw press/release transitions.
mod translate;

pub use mouse::handle_mouse_event;
pub use translate::{KeyTransition, raw_key_event, translate_key};

/// What: Whether a key event is a plain `Esc` press without modifiers.
fn is_bare_escape(ke: &KeyEvent) -> bool {
    ke.code == KeyCode::Esc
        && ke.kind == KeyEventKind::Press
        && (ke.modifiers - KeyModifiers::SHIFT).is_empty()
}

/// What: Route a key event to the focused capture input.
///
/// Details:
/// - A bare `Esc` with nothing held blurs the input instead of being captured, so the
///   keyboard can always leave it; `Esc` combined with held modifiers is captured normally.
fn handle_capture_key(ke: &KeyEvent, app: &mut AppState) {
    if is_bare_escape(ke) && app.capture.held_keys().is_empty() {
        app.capture.blur();
        return;
    }
    for transition in translate_key(ke, app.keyboard_enhanced) {
        match transition {
            KeyTransition::Press(raw) => {
                app.capture.key_down(&raw);
            }
            KeyTransition::Release(raw) => {
                app.capture.key_up(&raw);
            }
        }
    }
}

/// What: Handle navigation keys while the history dropdown is open.
///
/// Output:
/// - `true` when the key was consumed by the dropdown.
fn handle_dropdown_key(ke: &KeyEvent, app: &mut AppState) -> bool {
    match ke.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_history_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_history_cursor(1),
        KeyCode::Enter => {
            let index = app.history_state.selected().unwrap_or(0);
            app.select_history(index);
        }
        KeyCode::Esc | KeyCode::Char('h') => app.close_history(),
        _ => return false,
    }
    true
}

/// Dispatch a single input event, mutating [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
///
/// Behavior overview:
///
/// - While the capture input is focused every key event (press, repeat and
///   release) goes to it, except a bare `Esc` with nothing held, which blurs.
/// - While unfocused only presses are handled:
///   - Dropdown open: `j`/`k`/arrows move, `Enter` selects, `Esc`/`h` close.
///   - `Enter`/`Space`/`i` focus the input, `h` toggles the history dropdown,
///     `r` resets, `q`/`Esc`/`Ctrl+C` quit.
/// - Mouse events go through [`handle_mouse_event`]; terminal focus loss blurs
///   the input and closes the dropdown.
pub fn handle_event(ev: CEvent, app: &mut AppState) -> bool {
    match ev {
        CEvent::Key(ke) => handle_key(&ke, app),
        CEvent::Mouse(me) => {
            handle_mouse_event(me, app);
            false
        }
        CEvent::FocusLost => {
            app.capture.blur();
            app.close_history();
            false
        }
        _ => false,
    }
}

/// Key handling for [`handle_event`].
fn handle_key(ke: &KeyEvent, app: &mut AppState) -> bool {
    if app.capture.is_focused() {
        handle_capture_key(ke, app);
        return false;
    }
    if ke.kind != KeyEventKind::Press {
        return false;
    }
    if app.capture.is_history_open() && handle_dropdown_key(ke, app) {
        return false;
    }
    match ke.code {
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Enter | KeyCode::Char(' ' | 'i') => {
            app.status_message = None;
            app.capture.focus();
            false
        }
        KeyCode::Char('h') => {
            app.toggle_history();
            false
        }
        KeyCode::Char('r') => {
            app.reset();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ChordCapture;
    use crate::history::MemoryStore;
    use crate::keys::ModifierSet;
    use crossterm::event::ModifierKeyCode;
    use std::sync::mpsc;

    fn app(enhanced: bool) -> (AppState, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        let capture = ChordCapture::new(
            "",
            ModifierSet::default(),
            Box::new(MemoryStore::new()),
            move |chord: &str| {
                let _ = tx.send(chord.to_string());
            },
        );
        let mut app = AppState::new(capture);
        app.keyboard_enhanced = enhanced;
        (app, rx)
    }

    fn key(code: KeyCode, mods: KeyModifiers, kind: KeyEventKind) -> CEvent {
        CEvent::Key(KeyEvent::new_with_kind(code, mods, kind))
    }

    #[test]
    /// What: With release reporting, Control then A commits once and releases revert the display.
    fn enhanced_terminal_press_release_sequence() {
        let (mut app, rx) = app(true);
        let ctrl = KeyCode::Modifier(ModifierKeyCode::LeftControl);
        assert!(!handle_event(
            key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press),
            &mut app
        ));
        assert!(app.capture.is_focused());
        handle_event(key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release), &mut app);
        handle_event(key(ctrl, KeyModifiers::CONTROL, KeyEventKind::Press), &mut app);
        handle_event(key(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyEventKind::Press), &mut app);
        handle_event(key(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyEventKind::Repeat), &mut app);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["Control+A"]);
        handle_event(key(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyEventKind::Release), &mut app);
        handle_event(key(ctrl, KeyModifiers::NONE, KeyEventKind::Release), &mut app);
        assert!(app.capture.held_keys().is_empty());
        assert_eq!(app.capture.display().text(), "Control+A");
    }

    #[test]
    /// What: Legacy terminals commit from a single flagged key press.
    fn legacy_terminal_commits_from_flags() {
        let (mut app, rx) = app(false);
        handle_event(key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Press), &mut app);
        handle_event(
            key(KeyCode::Char('k'), KeyModifiers::CONTROL | KeyModifiers::ALT, KeyEventKind::Press),
            &mut app,
        );
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["Control+Alt+K"]);
        assert!(app.capture.held_keys().is_empty());
        assert_eq!(app.capture.history().entries(), vec!["Control+Alt+K"]);
    }

    #[test]
    /// What: Bare Esc blurs while focused; Esc with a held modifier is captured.
    fn escape_blurs_only_when_nothing_held() {
        let (mut app, rx) = app(true);
        app.capture.focus();
        let ctrl = KeyCode::Modifier(ModifierKeyCode::LeftControl);
        handle_event(key(ctrl, KeyModifiers::CONTROL, KeyEventKind::Press), &mut app);
        handle_event(key(KeyCode::Esc, KeyModifiers::CONTROL, KeyEventKind::Press), &mut app);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["Control+Escape"]);
        handle_event(key(KeyCode::Esc, KeyModifiers::CONTROL, KeyEventKind::Release), &mut app);
        handle_event(key(ctrl, KeyModifiers::NONE, KeyEventKind::Release), &mut app);
        assert!(app.capture.is_focused());

        // Esc pressed on its own leaves the input; a second Esc quits
        assert!(!handle_event(key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press), &mut app));
        assert!(!app.capture.is_focused());
        handle_event(key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release), &mut app);
        assert!(handle_event(key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press), &mut app));
    }

    #[test]
    /// What: Unfocused keys drive the dropdown, reset and quit.
    ///
    /// Inputs:
    /// - History with two entries; `h`, `j`, `Enter`, `r`, `Ctrl+C`.
    ///
    /// Output:
    /// - The second entry is selected and reported; reset clears; `Ctrl+C` quits.
    fn unfocused_keys_drive_dropdown_reset_and_quit() {
        let (mut app, rx) = app(false);
        app.capture.focus();
        for c in ['a', 'b'] {
            handle_event(
                key(KeyCode::Char(c), KeyModifiers::CONTROL, KeyEventKind::Press),
                &mut app,
            );
        }
        app.capture.blur();
        let _ = rx.try_iter().count();

        let press = |code| key(code, KeyModifiers::NONE, KeyEventKind::Press);
        handle_event(press(KeyCode::Char('h')), &mut app);
        assert!(app.capture.is_history_open());
        handle_event(press(KeyCode::Char('j')), &mut app);
        handle_event(press(KeyCode::Enter), &mut app);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["Control+A"]);
        assert!(!app.capture.is_focused());

        handle_event(press(KeyCode::Char('r')), &mut app);
        assert!(app.capture.history().is_empty());
        assert!(handle_event(
            key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
            &mut app
        ));
    }
}
