/// Text shown while nothing is committed and the input is not focused.
pub const PLACEHOLDER_UNFOCUSED: &str = "Click to set shortcut";
/// Text shown while focused with nothing held and nothing committed.
pub const PLACEHOLDER_FOCUSED: &str = "Press keys...";

/// Derived state of the capture input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStatus {
    /// Unfocused, nothing committed.
    Empty,
    /// Focused, no keys held, nothing committed.
    FocusedIdle,
    /// Showing the committed chord (focused with nothing held, or unfocused).
    DisplayingCommitted,
    /// Focused with keys held that do not form a valid chord yet.
    InProgress,
    /// Focused with keys held that currently form a valid chord.
    ValidActive,
}

impl CaptureStatus {
    /// What: Short style label for the status.
    ///
    /// Output:
    /// - `"empty"`, `"focus"`, `"in-progress"` or `"valid"`; a committed chord and a
    ///   valid held chord share the `"valid"` look.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::FocusedIdle => "focus",
            Self::InProgress => "in-progress",
            Self::DisplayingCommitted | Self::ValidActive => "valid",
        }
    }
}

/// One key as rendered inside the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCap {
    /// Canonical key name.
    pub name: String,
    /// Whether the name belongs to the modifier policy.
    pub modifier: bool,
    /// Whether the key is currently held (as opposed to part of the committed chord).
    pub pressed: bool,
}

/// What the capture input currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Display {
    /// Placeholder text.
    Placeholder(&'static str),
    /// Key caps, in order, separated by `+` when rendered.
    Keys(Vec<KeyCap>),
}

impl Display {
    /// Plain-text form: the placeholder, or key names joined with `+`.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Placeholder(s) => (*s).to_string(),
            Self::Keys(caps) => caps
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join("+"),
        }
    }

    /// True when any shown key is held right now.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Keys(caps) if caps.iter().any(|c| c.pressed))
    }
}
