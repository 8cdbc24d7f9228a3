use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crossterm::event::Event as CEvent;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{select, sync::mpsc};

use crate::args::Args;
use crate::capture::ChordCapture;
use crate::config::{Settings, lists_dir, settings};
use crate::events::handle_event;
use crate::history::{FileStore, KeyValueStore, Result, STORAGE_KEY};
use crate::state::AppState;
use crate::ui::ui;

use super::terminal::{restore_terminal, setup_terminal};

/// Environment variable that switches the runtime to headless mode (tests).
pub const HEADLESS_ENV: &str = "KEYBIND_MASTER_TEST_HEADLESS";

/// What: Resolve effective settings: defaults, then `settings.conf`, then CLI flags.
#[must_use]
pub fn resolve_settings(args: &Args) -> Settings {
    let mut prefs = settings();
    args.apply_to(&mut prefs);
    prefs
}

/// What: History store for the given settings.
///
/// Output:
/// - A [`FileStore`] rooted at `history_dir`, or at the default lists directory.
#[must_use]
pub fn history_store(prefs: &Settings) -> FileStore {
    FileStore::new(prefs.history_dir.clone().unwrap_or_else(lists_dir))
}

/// What: Remove the persisted shortcut history.
///
/// Output:
/// - `Ok(())` when the record is gone (or never existed).
///
/// # Errors
/// - The history file exists but cannot be removed.
pub fn reset_history(prefs: &Settings) -> Result<()> {
    let mut store = history_store(prefs);
    store.remove(STORAGE_KEY)?;
    tracing::info!(dir = %store.dir().display(), "[Runtime] Shortcut history removed");
    Ok(())
}

/// What: Spawn the thread that forwards terminal events to the runtime.
///
/// Inputs:
/// - `event_tx`: Channel sender for terminal events
/// - `cancelled`: Flag set by the runtime on exit
///
/// Details:
/// - Polls with a 50ms timeout so the cancellation flag is checked regularly.
/// - Exits when the receiver is dropped; read errors are skipped.
fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        while !cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => {
                    if let Ok(ev) = crossterm::event::read()
                        && event_tx.send(ev).is_err()
                    {
                        break;
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
    });
}

/// What: Undo terminal setup when a later startup step fails.
///
/// Inputs:
/// - `result`: Outcome of the step that ran after `setup_terminal`.
/// - `enhanced`: Whether keyboard enhancement flags were pushed.
/// - `restore`: Restore routine, called only on error.
///
/// Output:
/// - The step's value, or its error once the terminal has been restored.
///
/// Details:
/// - A failing restore is logged; the original error is the one returned.
fn restore_on_error<T, E>(
    result: std::result::Result<T, E>,
    enhanced: bool,
    restore: impl FnOnce(bool) -> Result<()>,
) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(error = %e, "[Runtime] Terminal startup failed");
            if let Err(restore_err) = restore(enhanced) {
                tracing::warn!(error = %restore_err, "[Runtime] Terminal restore failed");
            }
            Err(e.into())
        }
    }
}

/// What: Run the keybind editor end-to-end.
///
/// Inputs:
/// - `args`: Parsed command line.
///
/// Output:
/// - `Ok(())` when the user quits; `Err` on terminal setup or I/O failures.
///
/// Details:
/// - Builds the capture input around a [`FileStore`]; commits and history selections
///   are delivered back to the loop over a channel and applied to the host binding.
/// - With `KEYBIND_MASTER_TEST_HEADLESS=1` no terminal is touched and nothing is drawn;
///   the loop then idles until cancelled.
///
/// # Errors
/// - Terminal setup, terminal creation or restore fails.
pub async fn run(args: &Args) -> Result<()> {
    let headless = std::env::var(HEADLESS_ENV).ok().as_deref() == Some("1");
    let prefs = resolve_settings(args);
    tracing::info!(
        modifiers = ?prefs.modifiers,
        initial = %prefs.initial_binding,
        headless,
        "[Runtime] Starting"
    );

    let (change_tx, mut change_rx) = mpsc::unbounded_channel::<String>();
    let capture = ChordCapture::new(
        prefs.initial_binding.clone(),
        prefs.modifier_set(),
        Box::new(history_store(&prefs)),
        move |chord: &str| {
            let _ = change_tx.send(chord.to_string());
        },
    );
    let mut app = AppState::new(capture);
    app.show_keybinds_footer = prefs.show_keybinds_footer;

    let enhanced = if headless {
        false
    } else {
        setup_terminal(prefs.keyboard_enhancement)?
    };
    app.keyboard_enhanced = enhanced;
    let mut terminal = if headless {
        None
    } else {
        Some(restore_on_error(
            Terminal::new(CrosstermBackend::new(std::io::stdout())),
            enhanced,
            restore_terminal,
        )?)
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CEvent>();
    let cancelled = Arc::new(AtomicBool::new(false));
    if !headless {
        spawn_event_thread(event_tx.clone(), cancelled.clone());
    }

    loop {
        if let Some(t) = terminal.as_mut() {
            let _ = t.draw(|f| ui(f, &mut app));
        }
        select! {
            Some(ev) = event_rx.recv() => {
                if handle_event(ev, &mut app) {
                    break;
                }
            }
            Some(chord) = change_rx.recv() => {
                app.apply_binding_change(chord);
            }
        }
    }

    tracing::debug!("[Runtime] Main loop exited");
    cancelled.store(true, Ordering::Relaxed);
    drop(event_tx);
    if !headless {
        restore_terminal(enhanced)?;
    }
    tracing::info!(binding = %app.binding, "[Runtime] Final binding");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    /// What: A failed startup step restores the terminal and keeps its error.
    ///
    /// Inputs:
    /// - An `io::Error` result with enhancement pushed, then an `Ok` result.
    ///
    /// Output:
    /// - Restore runs once with `enhanced = true` on the error; never on success.
    fn restore_on_error_undoes_setup_only_on_failure() {
        let calls = Cell::new(Vec::new());
        let failed: Result<u8> = restore_on_error(
            Err::<u8, _>(std::io::Error::other("no tty")),
            true,
            |enhanced| {
                let mut seen = calls.take();
                seen.push(enhanced);
                calls.set(seen);
                Ok(())
            },
        );
        let err = failed.expect_err("error is propagated");
        assert_eq!(err.to_string(), "no tty");
        assert_eq!(calls.take(), vec![true]);

        let ok = restore_on_error(Ok::<u8, std::io::Error>(7), false, |_| {
            panic!("restore must not run on success")
        });
        assert_eq!(ok.expect("value"), 7);
    }

    #[test]
    /// What: A restore failure does not hide the startup error.
    fn restore_on_error_keeps_original_error() {
        let failed: Result<()> = restore_on_error(
            Err::<(), _>(std::io::Error::other("size query failed")),
            false,
            |_| Err("still raw".into()),
        );
        assert_eq!(
            failed.expect_err("error").to_string(),
            "size query failed"
        );
    }
}
