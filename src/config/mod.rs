//! Configuration: settings file, config paths and the color palette.

/// Value parsing helpers for `settings.conf`.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings loading.
mod settings;
/// Color palette.
mod theme;

pub(crate) use parsing::parse_modifier_list;
pub use paths::{config_dir, lists_dir, logs_dir};
pub use settings::{SETTINGS_SKELETON_CONTENT, Settings, parse_settings, settings};
pub use theme::{Theme, theme};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize tests that mutate `HOME`.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
