/// Separator between key names in a chord string.
pub const CHORD_SEPARATOR: char = '+';

/// What: Serialize key names into the chord wire format.
///
/// Inputs:
/// - `keys`: Canonical key names in press order.
///
/// Output:
/// - Names joined with `+`, e.g. `Control+Shift+A`.
#[must_use]
pub fn format_chord<S: AsRef<str>>(keys: &[S]) -> String {
    let mut out = String::new();
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push(CHORD_SEPARATOR);
        }
        out.push_str(key.as_ref());
    }
    out
}

/// What: Split a chord string back into its key names.
///
/// Inputs:
/// - `chord`: Chord string in wire format.
///
/// Output:
/// - Key names in their stored order; empty for an empty string.
///
/// Details:
/// - Splits on every `+`, so a chord using the `+` character as its key does not
///   survive the trip. The vocabulary never produces that key on its own.
#[must_use]
pub fn split_chord(chord: &str) -> Vec<&str> {
    if chord.is_empty() {
        return Vec::new();
    }
    chord.split(CHORD_SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Chord strings keep press order byte-for-byte.
    fn chord_format_and_split() {
        assert_eq!(format_chord(&["Control", "Shift", "A"]), "Control+Shift+A");
        assert_eq!(format_chord(&["A", "Control"]), "A+Control");
        assert_eq!(format_chord::<&str>(&[]), "");
        assert_eq!(split_chord("Control+Shift+a"), vec!["Control", "Shift", "a"]);
        assert!(split_chord("").is_empty());
    }
}
