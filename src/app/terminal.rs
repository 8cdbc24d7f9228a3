use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};

use crate::history::Result;

/// What: Put the terminal into TUI mode.
///
/// Inputs:
/// - `enhance`: Request key release and bare modifier reporting when the terminal supports it.
///
/// Output:
/// - `Ok(true)` when keyboard enhancement flags were pushed, `Ok(false)` otherwise.
///
/// Details:
/// - Enables raw mode, the alternate screen, mouse capture and focus change events.
/// - Support is probed with `supports_keyboard_enhancement`; a failed probe counts as unsupported.
///
/// # Errors
/// - Raw mode or one of the terminal commands cannot be applied.
pub fn setup_terminal(enhance: bool) -> Result<bool> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    if !enhance {
        return Ok(false);
    }
    if !supports_keyboard_enhancement().unwrap_or(false) {
        tracing::info!("[Terminal] Keyboard enhancement unsupported; synthesizing releases");
        return Ok(false);
    }
    execute!(
        stdout,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        )
    )?;
    tracing::info!("[Terminal] Keyboard enhancement enabled");
    Ok(true)
}

/// What: Undo [`setup_terminal`].
///
/// Inputs:
/// - `enhanced`: Whether enhancement flags were pushed and must be popped.
///
/// # Errors
/// - Raw mode or one of the terminal commands cannot be reverted.
pub fn restore_terminal(enhanced: bool) -> Result<()> {
    let mut stdout = std::io::stdout();
    if enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        stdout,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    Ok(())
}
