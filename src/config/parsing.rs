/// What: Strip trailing `//` or `#` comments from a configuration value.
///
/// Inputs:
/// - `s`: Raw value text.
///
/// Output:
/// - Trimmed value without the comment.
///
/// Details:
/// - A leading `#` is kept so that a value may start with one.
pub(crate) fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    if let Some(i_rel) = if let Some(stripped) = s.strip_prefix('#') {
        stripped.find('#').map(|j| j + 1)
    } else {
        s.find('#')
    } {
        s = &s[..i_rel];
    }
    s.trim()
}

/// What: Interpret a boolean configuration value.
///
/// Output:
/// - `Some(true)` for true/1/yes/on, `Some(false)` for false/0/no/off, `None` otherwise.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Map a modifier token onto its canonical key name.
///
/// Inputs:
/// - `token`: Modifier as written by the user (`ctrl`, `Cmd`, `caps`, ...).
///
/// Output:
/// - Canonical name for known aliases; the trimmed token otherwise, so any key
///   name can be declared a modifier.
pub(crate) fn canonical_modifier(token: &str) -> String {
    let t = token.trim();
    match t.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => "Control".to_string(),
        "alt" | "option" | "opt" => "Alt".to_string(),
        "shift" => "Shift".to_string(),
        "meta" | "super" | "win" | "cmd" | "command" => "Meta".to_string(),
        "capslock" | "caps" | "caps_lock" => "CapsLock".to_string(),
        _ => t.to_string(),
    }
}

/// What: Parse a comma or whitespace separated modifier list.
///
/// Output:
/// - Canonical modifier names in the given order, blanks skipped.
pub(crate) fn parse_modifier_list(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.trim().is_empty())
        .map(canonical_modifier)
        .collect()
}
