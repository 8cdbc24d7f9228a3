/// Canonical modifier names used when no policy is configured.
pub const DEFAULT_MODIFIERS: [&str; 5] = ["Control", "Alt", "Shift", "CapsLock", "Meta"];

/// The set of canonical key names treated as modifiers.
///
/// Supplied by the caller as policy; order is irrelevant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifierSet {
    names: Vec<String>,
}

impl ModifierSet {
    /// What: Build a modifier set from canonical key names.
    ///
    /// Inputs:
    /// - `names`: Modifier names; blanks are skipped and duplicates collapsed.
    ///
    /// Output:
    /// - A new `ModifierSet` (possibly empty).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let n = name.as_ref().trim();
            if !n.is_empty() && !out.iter().any(|m| m == n) {
                out.push(n.to_string());
            }
        }
        Self { names: out }
    }

    /// Whether `key` is one of the modifiers.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.names.iter().any(|m| m == key)
    }

    /// Modifier names in the order they were supplied.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// True when no modifiers are configured; every chord is then invalid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ModifierSet {
    fn default() -> Self {
        Self::new(DEFAULT_MODIFIERS)
    }
}

/// What: Decide whether a sequence of canonical key names forms a bindable chord.
///
/// Inputs:
/// - `keys`: Canonical key names (press order does not matter).
/// - `modifiers`: Modifier policy.
///
/// Output:
/// - `true` when there are at least two keys, at least one modifier, and exactly
///   one non-modifier key; `false` otherwise.
#[must_use]
pub fn is_valid_chord<S: AsRef<str>>(keys: &[S], modifiers: &ModifierSet) -> bool {
    if keys.len() < 2 {
        return false;
    }
    let has_modifier = keys.iter().any(|k| modifiers.contains(k.as_ref()));
    if !has_modifier {
        return false;
    }
    keys.iter()
        .filter(|k| !modifiers.contains(k.as_ref()))
        .count()
        == 1
}
