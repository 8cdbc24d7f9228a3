//! keybind-master binary entrypoint kept minimal. The runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;
use keybind_master::{app, args::Args, config::logs_dir};

/// Log timestamp formatter: local time as `YYYY-MM-DDTHH:MM:SS`.
struct KeybindTimer;

impl tracing_subscriber::fmt::time::FormatTime for KeybindTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the log filter: `RUST_LOG` when set, otherwise the command-line level.
fn env_filter(args: &Args) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(args.log_filter()))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// What: Initialize tracing to `~/.config/keybind-master/logs/keybind-master.log`.
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(args: &Args) {
    let log_path = logs_dir().join("keybind-master.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(args))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(KeybindTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "[Main] Logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(args))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(KeybindTimer)
                .init();
            tracing::warn!(error = %e, "[Main] Failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args);

    if args.reset_history {
        let prefs = app::resolve_settings(&args);
        match app::reset_history(&prefs) {
            Ok(()) => println!("Shortcut history cleared."),
            Err(err) => {
                tracing::error!(error = %err, "[Main] Failed to clear shortcut history");
                eprintln!("Failed to clear shortcut history: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "[Main] keybind-master starting");
    if let Err(err) = app::run(&args).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("keybind-master: {err}");
    }
    tracing::info!("[Main] keybind-master exited");
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer starts with a four digit year and contains the `T` separator
    #[test]
    fn keybind_timer_formats_time() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let _ = super::KeybindTimer.format_time(&mut writer);
        assert!(buf.len() >= 19);
        assert!(buf[..4].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&buf[10..11], "T");
    }
}
