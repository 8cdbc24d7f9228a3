//! Key vocabulary: raw event normalization, chord serialization and the
//! modifier/non-modifier validation policy.

/// Chord string formatting and splitting.
mod chord;
/// Raw key event to canonical name mapping.
mod normalize;
/// Modifier policy and chord validation.
mod validate;

pub use chord::{CHORD_SEPARATOR, format_chord, split_chord};
pub use normalize::{RawKeyEvent, normalize};
pub use validate::{DEFAULT_MODIFIERS, ModifierSet, is_valid_chord};
