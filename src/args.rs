//! Command-line argument definition and settings overrides.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Settings, parse_modifier_list};

/// keybind-master - capture and remember keyboard shortcuts in the terminal
#[derive(Parser, Debug, Default)]
#[command(name = "keybind-master")]
#[command(version)]
#[command(about = "Capture keyboard shortcuts in the terminal and keep a history of recent ones", long_about = None)]
pub struct Args {
    /// Initial keybind (e.g. Control+Shift+A); overrides `initial_binding` in settings.conf
    #[arg(long)]
    pub value: Option<String>,

    /// Keys treated as modifiers (comma separated, e.g. "Control,Alt,Shift")
    #[arg(long)]
    pub modifiers: Option<String>,

    /// Directory holding the shortcut history (default: ~/.config/keybind-master/lists)
    #[arg(long)]
    pub history_dir: Option<PathBuf>,

    /// Remove the stored shortcut history and exit
    #[arg(long)]
    pub reset_history: bool,

    /// Do not ask the terminal for key release reporting
    #[arg(long)]
    pub no_keyboard_enhancement: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// What: Log filter directive requested on the command line.
    ///
    /// Output:
    /// - `"debug"` with `--verbose`, otherwise the `--log-level` value.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// What: Apply command-line overrides on top of file settings.
    ///
    /// Inputs:
    /// - `settings`: Settings loaded from `settings.conf`, updated in place.
    ///
    /// Details:
    /// - A `--modifiers` list that yields no names is ignored.
    /// - `--no-keyboard-enhancement` only ever turns enhancement off.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(value) = &self.value {
            settings.initial_binding = value.trim().to_string();
        }
        if let Some(list) = &self.modifiers {
            let parsed = parse_modifier_list(list);
            if parsed.is_empty() {
                tracing::debug!(modifiers = %list, "[Args] Ignoring empty modifier list");
            } else {
                settings.modifiers = parsed;
            }
        }
        if let Some(dir) = &self.history_dir {
            settings.history_dir = Some(dir.clone());
        }
        if self.no_keyboard_enhancement {
            settings.keyboard_enhancement = false;
        }
    }
}
