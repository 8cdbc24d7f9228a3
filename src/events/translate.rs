use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::keys::RawKeyEvent;

/// A key press or release expressed as a raw key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyTransition {
    /// Key went down (or auto-repeated).
    Press(RawKeyEvent),
    /// Key went up.
    Release(RawKeyEvent),
}

/// What: Physical code for a printable character on a US layout.
///
/// Inputs:
/// - `c`: Character that is neither an ASCII letter, digit, nor space.
///
/// Output:
/// - DOM-style code (`Slash`, `Digit1`, ...) or `Unidentified`.
fn punctuation_code(c: char) -> &'static str {
    match c {
        '-' | '_' => "Minus",
        '=' | '+' => "Equal",
        '[' | '{' => "BracketLeft",
        ']' | '}' => "BracketRight",
        '\\' | '|' => "Backslash",
        ';' | ':' => "Semicolon",
        '\'' | '"' => "Quote",
        ',' | '<' => "Comma",
        '.' | '>' => "Period",
        '/' | '?' => "Slash",
        '`' | '~' => "Backquote",
        '!' => "Digit1",
        '@' => "Digit2",
        '#' => "Digit3",
        '$' => "Digit4",
        '%' => "Digit5",
        '^' => "Digit6",
        '&' => "Digit7",
        '*' => "Digit8",
        '(' => "Digit9",
        ')' => "Digit0",
        _ => "Unidentified",
    }
}

/// Raw event for a bare modifier key reported by an enhanced terminal.
fn modifier_raw(m: ModifierKeyCode) -> RawKeyEvent {
    let (code, key) = match m {
        ModifierKeyCode::LeftShift => ("ShiftLeft", "Shift"),
        ModifierKeyCode::RightShift => ("ShiftRight", "Shift"),
        ModifierKeyCode::LeftControl => ("ControlLeft", "Control"),
        ModifierKeyCode::RightControl => ("ControlRight", "Control"),
        ModifierKeyCode::LeftAlt => ("AltLeft", "Alt"),
        ModifierKeyCode::RightAlt => ("AltRight", "Alt"),
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => ("MetaLeft", "Meta"),
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => ("MetaRight", "Meta"),
        ModifierKeyCode::LeftHyper => ("HyperLeft", "Hyper"),
        ModifierKeyCode::RightHyper => ("HyperRight", "Hyper"),
        ModifierKeyCode::IsoLevel3Shift => ("AltRight", "AltGraph"),
        ModifierKeyCode::IsoLevel5Shift => ("IsoLevel5Shift", "Level5Shift"),
    };
    RawKeyEvent::new(code, key)
}

/// What: Convert a crossterm key code into a raw key event with DOM-style names.
///
/// Inputs:
/// - `code`: Key code reported by crossterm.
///
/// Output:
/// - Raw event; keys without a physical equivalent become `Unidentified`.
#[must_use]
pub fn raw_key_event(code: KeyCode) -> RawKeyEvent {
    match code {
        KeyCode::Char(' ') => RawKeyEvent::new("Space", " "),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            RawKeyEvent::new(format!("Key{}", c.to_ascii_uppercase()), c.to_string())
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            RawKeyEvent::new(format!("Digit{c}"), c.to_string())
        }
        KeyCode::Char(c) => RawKeyEvent::new(punctuation_code(c), c.to_string()),
        KeyCode::Enter => RawKeyEvent::new("Enter", "Enter"),
        KeyCode::Tab | KeyCode::BackTab => RawKeyEvent::new("Tab", "Tab"),
        KeyCode::Backspace => RawKeyEvent::new("Backspace", "Backspace"),
        KeyCode::Esc => RawKeyEvent::new("Escape", "Escape"),
        KeyCode::Up => RawKeyEvent::new("ArrowUp", "ArrowUp"),
        KeyCode::Down => RawKeyEvent::new("ArrowDown", "ArrowDown"),
        KeyCode::Left => RawKeyEvent::new("ArrowLeft", "ArrowLeft"),
        KeyCode::Right => RawKeyEvent::new("ArrowRight", "ArrowRight"),
        KeyCode::Home => RawKeyEvent::new("Home", "Home"),
        KeyCode::End => RawKeyEvent::new("End", "End"),
        KeyCode::PageUp => RawKeyEvent::new("PageUp", "PageUp"),
        KeyCode::PageDown => RawKeyEvent::new("PageDown", "PageDown"),
        KeyCode::Delete => RawKeyEvent::new("Delete", "Delete"),
        KeyCode::Insert => RawKeyEvent::new("Insert", "Insert"),
        KeyCode::F(n) => {
            let name = format!("F{n}");
            RawKeyEvent::new(name.clone(), name)
        }
        KeyCode::CapsLock => RawKeyEvent::new("CapsLock", "CapsLock"),
        KeyCode::ScrollLock => RawKeyEvent::new("ScrollLock", "ScrollLock"),
        KeyCode::NumLock => RawKeyEvent::new("NumLock", "NumLock"),
        KeyCode::PrintScreen => RawKeyEvent::new("PrintScreen", "PrintScreen"),
        KeyCode::Pause => RawKeyEvent::new("Pause", "Pause"),
        KeyCode::Menu => RawKeyEvent::new("ContextMenu", "ContextMenu"),
        KeyCode::KeypadBegin => RawKeyEvent::new("Numpad5", "Clear"),
        KeyCode::Modifier(m) => modifier_raw(m),
        _ => RawKeyEvent::new("Unidentified", "Unidentified"),
    }
}

/// What: Raw events for the modifiers flagged on a legacy key event.
///
/// Details:
/// - `BackTab` always implies Shift.
fn flagged_modifiers(ke: &KeyEvent) -> Vec<RawKeyEvent> {
    let mut mods = Vec::new();
    if ke.modifiers.contains(KeyModifiers::CONTROL) {
        mods.push(RawKeyEvent::new("ControlLeft", "Control"));
    }
    if ke.modifiers.contains(KeyModifiers::ALT) {
        mods.push(RawKeyEvent::new("AltLeft", "Alt"));
    }
    if ke.modifiers.contains(KeyModifiers::SHIFT) || ke.code == KeyCode::BackTab {
        mods.push(RawKeyEvent::new("ShiftLeft", "Shift"));
    }
    if ke
        .modifiers
        .intersects(KeyModifiers::SUPER | KeyModifiers::META)
    {
        mods.push(RawKeyEvent::new("MetaLeft", "Meta"));
    }
    mods
}

/// What: Translate a crossterm key event into press/release transitions.
///
/// Inputs:
/// - `ke`: Key event from crossterm.
/// - `reports_releases`: Whether the terminal delivers release events (keyboard enhancement active).
///
/// Output:
/// - Transitions to feed to the capture input, in order.
///
/// Details:
/// - With release reporting, presses and repeats map to `Press` and releases to `Release`.
/// - Without it, a press is expanded into presses of its flagged modifiers, the key press,
///   then releases in reverse order, so a whole chord arrives in one event. Repeat and
///   release events are ignored in that mode.
/// - A bare modifier event in legacy mode is not expanded again by its own flag.
#[must_use]
pub fn translate_key(ke: &KeyEvent, reports_releases: bool) -> Vec<KeyTransition> {
    let raw = raw_key_event(ke.code);
    if reports_releases {
        return match ke.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => vec![KeyTransition::Press(raw)],
            KeyEventKind::Release => vec![KeyTransition::Release(raw)],
        };
    }
    if ke.kind != KeyEventKind::Press {
        return Vec::new();
    }
    let mods: Vec<RawKeyEvent> = flagged_modifiers(ke)
        .into_iter()
        .filter(|m| m.key != raw.key)
        .collect();
    let mut out = Vec::with_capacity(mods.len() * 2 + 2);
    out.extend(mods.iter().cloned().map(KeyTransition::Press));
    out.push(KeyTransition::Press(raw.clone()));
    out.push(KeyTransition::Release(raw));
    out.extend(mods.into_iter().rev().map(KeyTransition::Release));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::normalize;

    fn names(ts: &[KeyTransition]) -> Vec<String> {
        ts.iter()
            .map(|t| match t {
                KeyTransition::Press(r) => format!("+{}", normalize(r)),
                KeyTransition::Release(r) => format!("-{}", normalize(r)),
            })
            .collect()
    }

    #[test]
    /// What: Crossterm key codes normalize to the canonical vocabulary.
    fn raw_key_event_maps_to_vocabulary() {
        let cases = [
            (KeyCode::Char('a'), "A"),
            (KeyCode::Char('Z'), "Z"),
            (KeyCode::Char('7'), "7"),
            (KeyCode::Char('!'), "1"),
            (KeyCode::Char(' '), "Space"),
            (KeyCode::Char('/'), "/"),
            (KeyCode::Char('é'), "É"),
            (KeyCode::Up, "Up"),
            (KeyCode::Esc, "Escape"),
            (KeyCode::BackTab, "Tab"),
            (KeyCode::F(5), "F5"),
            (KeyCode::CapsLock, "CapsLock"),
            (KeyCode::Modifier(ModifierKeyCode::LeftControl), "Control"),
            (KeyCode::Modifier(ModifierKeyCode::RightControl), "Control"),
            (KeyCode::Modifier(ModifierKeyCode::RightSuper), "Meta"),
            (KeyCode::Null, "Unidentified"),
        ];
        for (code, expected) in cases {
            assert_eq!(normalize(&raw_key_event(code)), expected, "{code:?}");
        }
    }

    #[test]
    /// What: Enhanced terminals map press/repeat/release one-to-one.
    fn translate_with_release_reporting() {
        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(names(&translate_key(&press, true)), vec!["+A"]);
        let release = KeyEvent::new_with_kind(
            KeyCode::Modifier(ModifierKeyCode::LeftControl),
            KeyModifiers::CONTROL,
            KeyEventKind::Release,
        );
        assert_eq!(names(&translate_key(&release, true)), vec!["-Control"]);
    }

    #[test]
    /// What: Legacy terminals get a synthesized press/release sequence from modifier flags.
    ///
    /// Inputs:
    /// - `Ctrl+Shift+a` press, a `BackTab` press, a release event, and a bare Shift modifier.
    ///
    /// Output:
    /// - Modifiers pressed first and released last; release events ignored; no doubled Shift.
    fn translate_legacy_synthesizes_chord() {
        let ke = KeyEvent::new(
            KeyCode::Char('A'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert_eq!(
            names(&translate_key(&ke, false)),
            vec!["+Control", "+Shift", "+A", "-A", "-Shift", "-Control"]
        );
        let backtab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(
            names(&translate_key(&backtab, false)),
            vec!["+Shift", "+Tab", "-Tab", "-Shift"]
        );
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert!(translate_key(&release, false).is_empty());
        let bare_shift = KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::LeftShift),
            KeyModifiers::SHIFT,
        );
        assert_eq!(
            names(&translate_key(&bare_shift, false)),
            vec!["+Shift", "-Shift"]
        );
    }
}
