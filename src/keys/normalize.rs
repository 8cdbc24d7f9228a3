/// A raw key event as delivered by the input layer.
///
/// `code` names the physical key (`KeyA`, `Digit1`, `ArrowUp`, `ControlLeft`, ...)
/// and `key` names the logical value it produced (`a`, `!`, `Control`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct RawKeyEvent {
    /// Physical key code.
    pub code: String,
    /// Logical key value.
    pub key: String,
}

impl RawKeyEvent {
    /// Build a raw event from a physical code and a logical key value.
    pub fn new(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            key: key.into(),
        }
    }
}

/// What: Map a fixed physical code onto its canonical name.
///
/// Inputs:
/// - `code`: Physical key code.
///
/// Output:
/// - `Some(name)` for the named keys table; `None` otherwise.
fn named_key(code: &str) -> Option<&'static str> {
    match code {
        "Space" => Some("Space"),
        "Backspace" => Some("Backspace"),
        "Tab" => Some("Tab"),
        "Enter" => Some("Enter"),
        "Escape" => Some("Escape"),
        "ArrowUp" => Some("Up"),
        "ArrowDown" => Some("Down"),
        "ArrowLeft" => Some("Left"),
        "ArrowRight" => Some("Right"),
        "Home" => Some("Home"),
        "End" => Some("End"),
        "PageUp" => Some("PageUp"),
        "PageDown" => Some("PageDown"),
        "Delete" => Some("Delete"),
        "Insert" => Some("Insert"),
        _ => None,
    }
}

/// What: Map a logical modifier key value onto its canonical modifier name.
///
/// Inputs:
/// - `key`: Logical key value.
///
/// Output:
/// - `Some(name)` for Control/Ctrl, Alt, Shift, Meta/Command and `CapsLock`; `None` otherwise.
fn modifier_key(key: &str) -> Option<&'static str> {
    match key {
        "Control" | "Ctrl" => Some("Control"),
        "Alt" => Some("Alt"),
        "Shift" => Some("Shift"),
        "Meta" | "Command" => Some("Meta"),
        "CapsLock" => Some("CapsLock"),
        _ => None,
    }
}

/// Function keys pass through as their code (`F1`, `F12`, `F13`, ...).
fn is_function_code(code: &str) -> bool {
    code.strip_prefix('F')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// What: Normalize a raw key event into a canonical key name.
///
/// Inputs:
/// - `event`: Raw key event carrying a physical code and a logical key.
///
/// Output:
/// - Canonical key name; never fails.
///
/// Details:
/// - Rules are applied in order: `Key*` codes, `Digit*` codes, the named keys table,
///   logical modifiers (regardless of left/right code), function key codes, any other
///   single-character logical key uppercased, and finally the raw code unchanged.
#[must_use]
pub fn normalize(event: &RawKeyEvent) -> String {
    if let Some(letter) = event.code.strip_prefix("Key") {
        return letter.to_string();
    }
    if let Some(digit) = event.code.strip_prefix("Digit") {
        return digit.to_string();
    }
    if let Some(name) = named_key(&event.code) {
        return name.to_string();
    }
    if let Some(name) = modifier_key(&event.key) {
        return name.to_string();
    }
    if is_function_code(&event.code) {
        return event.code.clone();
    }
    let mut chars = event.key.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return ch.to_uppercase().collect();
    }
    event.code.clone()
}
