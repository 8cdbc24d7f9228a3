use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::parsing::{parse_bool, parse_modifier_list, strip_inline_comment};
use super::paths::{config_dir, resolve_settings_config_path};
use crate::keys::{DEFAULT_MODIFIERS, ModifierSet};

/// Default `settings.conf` written on first run.
pub const SETTINGS_SKELETON_CONTENT: &str = "\
# keybind-master settings
#
# Keys that count as modifiers (comma separated). A valid keybind is one or more
# of these plus exactly one other key.
modifiers = Control, Alt, Shift, CapsLock, Meta

# Keybind shown when the editor starts (e.g. Control+Shift+A). Empty for none.
initial_binding =

# Ask the terminal to report key releases and bare modifier presses.
# Terminals without the kitty keyboard protocol ignore this.
keyboard_enhancement = true

# Show the key hints line at the bottom of the screen.
show_keybinds_footer = true

# Directory holding the shortcut history. Empty for ~/.config/keybind-master/lists
history_dir =
";

/// User-configurable settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Canonical key names treated as modifiers.
    pub modifiers: Vec<String>,
    /// Chord committed when the editor starts.
    pub initial_binding: String,
    /// Request key release reporting from the terminal.
    pub keyboard_enhancement: bool,
    /// Show the key hints footer.
    pub show_keybinds_footer: bool,
    /// Override for the history store directory.
    pub history_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            modifiers: DEFAULT_MODIFIERS.iter().map(ToString::to_string).collect(),
            initial_binding: String::new(),
            keyboard_enhancement: true,
            show_keybinds_footer: true,
            history_dir: None,
        }
    }
}

impl Settings {
    /// Modifier policy built from [`Settings::modifiers`].
    #[must_use]
    pub fn modifier_set(&self) -> ModifierSet {
        ModifierSet::new(&self.modifiers)
    }
}

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: File content.
/// - `settings`: Settings to update in place.
///
/// Details:
/// - Lines are `key = value`; `#` and `//` start comments; keys are lowercased with
///   `.`, `-` and spaces mapped to `_`.
/// - Unknown keys and unparsable values are skipped with a debug log.
/// - An empty modifier list keeps the previous (default) set.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, val_raw)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(val_raw.trim());
        match key.as_str() {
            "modifiers" | "modifier_keys" => {
                let list = parse_modifier_list(val);
                if list.is_empty() {
                    debug!("[Config] Empty modifier list; keeping defaults");
                } else {
                    settings.modifiers = list;
                }
            }
            "initial_binding" | "binding" | "value" => {
                settings.initial_binding = val.to_string();
            }
            "keyboard_enhancement" | "enhanced_keyboard" => match parse_bool(val) {
                Some(b) => settings.keyboard_enhancement = b,
                None => debug!(key = %key, value = val, "[Config] Invalid boolean"),
            },
            "show_keybinds_footer" | "keybinds_visible" => match parse_bool(val) {
                Some(b) => settings.show_keybinds_footer = b,
                None => debug!(key = %key, value = val, "[Config] Invalid boolean"),
            },
            "history_dir" => {
                settings.history_dir = if val.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(val))
                };
            }
            _ => debug!(key = %key, "[Config] Unknown settings key"),
        }
    }
}

/// What: Write the settings skeleton to `path` when no file exists yet.
///
/// Output:
/// - `true` when the skeleton was written.
fn ensure_settings_file(path: &Path) -> bool {
    if path.exists() {
        return false;
    }
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match fs::write(path, SETTINGS_SKELETON_CONTENT) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "[Config] Wrote default settings skeleton");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "[Config] Failed to write settings skeleton");
            false
        }
    }
}

/// What: Load settings from disk.
///
/// Output:
/// - Parsed settings; defaults when the file is missing or unreadable.
///
/// Details:
/// - On first run the commented skeleton is written to the config directory.
#[must_use]
pub fn settings() -> Settings {
    let mut out = Settings::default();
    let path = resolve_settings_config_path().unwrap_or_else(|| {
        let p = config_dir().join("settings.conf");
        ensure_settings_file(&p);
        p
    });
    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "[Config] Loaded settings.conf");
            parse_settings(&content, &mut out);
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "[Config] Failed to read settings.conf; using defaults");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Known keys are parsed, aliases accepted, junk ignored.
    ///
    /// Inputs:
    /// - Content with comments, aliased keys, an invalid boolean and an unknown key.
    ///
    /// Output:
    /// - Parsed fields reflect valid lines only.
    fn settings_parse_known_keys() {
        let content = "\
# comment
modifiers = ctrl, alt   # only two
Initial-Binding = Control+K
keyboard_enhancement = off
show_keybinds_footer = perhaps
history_dir = /tmp/kbm-history
no_equals_line
unknown_key = 1
";
        let mut s = Settings::default();
        parse_settings(content, &mut s);
        assert_eq!(s.modifiers, vec!["Control", "Alt"]);
        assert_eq!(s.initial_binding, "Control+K");
        assert!(!s.keyboard_enhancement);
        assert!(s.show_keybinds_footer);
        assert_eq!(s.history_dir, Some(PathBuf::from("/tmp/kbm-history")));
        assert!(s.modifier_set().contains("Alt"));
        assert!(!s.modifier_set().contains("Shift"));
    }

    #[test]
    /// What: The skeleton parses back to the defaults.
    fn settings_skeleton_matches_defaults() {
        let mut s = Settings::default();
        parse_settings(SETTINGS_SKELETON_CONTENT, &mut s);
        assert_eq!(s, Settings::default());
    }

    #[test]
    /// What: An empty modifier list keeps the default set.
    fn settings_empty_modifier_list_keeps_defaults() {
        let mut s = Settings::default();
        parse_settings("modifiers = ", &mut s);
        assert_eq!(s.modifier_set(), ModifierSet::default());
    }

    #[test]
    /// What: First load under a fresh HOME writes the skeleton and returns defaults.
    fn settings_first_run_writes_skeleton() {
        let _guard = crate::config::test_mutex()
            .lock()
            .expect("test mutex poisoned");
        let orig_home = std::env::var_os("HOME");
        let orig_xdg = std::env::var_os("XDG_CONFIG_HOME");
        let base = tempfile::tempdir().expect("tempdir");
        unsafe {
            std::env::set_var("HOME", base.path());
            std::env::remove_var("XDG_CONFIG_HOME");
        }
        let loaded = settings();
        let written = base
            .path()
            .join(".config")
            .join("keybind-master")
            .join("settings.conf");
        assert!(written.is_file());
        assert_eq!(loaded, Settings::default());
        unsafe {
            match orig_home {
                Some(v) => std::env::set_var("HOME", v),
                None => std::env::remove_var("HOME"),
            }
            if let Some(v) = orig_xdg {
                std::env::set_var("XDG_CONFIG_HOME", v);
            }
        }
    }
}
