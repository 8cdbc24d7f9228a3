//! Rendering for the keybind editor screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::config::theme;
use crate::state::AppState;

/// History dropdown overlay.
mod dropdown;
/// Chord capture input.
mod input;

pub use dropdown::render_dropdown;
pub use input::{HISTORY_MARKER, render_input};

/// Text of the reset button.
pub const RESET_LABEL: &str = "[ Reset Keybinds ]";

/// Widest the editor column gets; wider terminals center it.
const COLUMN_WIDTH: u16 = 72;

/// How-to lines shown under the reset button.
const INSTRUCTIONS: [&str; 5] = [
    "• Select the input field (click, Enter or Space) to activate it",
    "• Press at least one modifier key plus one regular key",
    "• Previous valid keybinds are kept in the history (↻, or h)",
    "• Valid example: Control+Shift+A",
    "• Invalid example: Control+Shift or just A",
];

/// What: Horizontally center a column of at most `width` cells inside `area`.
fn centered_column(area: Rect, width: u16) -> Rect {
    let w = area.width.min(width);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y,
        width: w,
        height: area.height,
    }
}

/// What: Footer hint line for the current focus.
fn footer_line(app: &AppState) -> &'static str {
    if app.capture.is_focused() {
        "Capturing keys  ·  Esc: leave input"
    } else if app.capture.is_history_open() {
        "j/k: move  ·  Enter: select  ·  Esc/h: close"
    } else {
        "Enter/Space: edit  ·  h: history  ·  r: reset  ·  q: quit"
    }
}

/// What: Render the whole editor screen.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Mutable application state; hit-test rectangles are refreshed
///
/// Output:
/// - Draws title, current binding, capture input, reset button, instructions,
///   status and footer, then the history dropdown on top.
///
/// Details:
/// - Rectangles for hidden elements are cleared so stale clicks do not match.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let column = centered_column(area, COLUMN_WIDTH);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // subtitle
            Constraint::Length(1),
            Constraint::Length(1), // heading
            Constraint::Length(1), // current binding
            Constraint::Length(1),
            Constraint::Length(1), // label
            Constraint::Length(3), // input
            Constraint::Length(1),
            Constraint::Length(1), // reset
            Constraint::Length(1),
            Constraint::Length(6), // instructions
            Constraint::Min(0),
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(column);

    f.render_widget(
        Paragraph::new(Span::styled(
            "KEYBIND MASTER",
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Configure your game controls with style",
            Style::default().fg(th.subtext0),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Configure Game Controls",
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
        chunks[3],
    );

    let binding_line = if app.binding.is_empty() {
        Line::from(Span::styled(
            "No keybinding set",
            Style::default().fg(th.overlay1),
        ))
    } else {
        Line::from(vec![
            Span::styled("Current Binding: ", Style::default().fg(th.subtext0)),
            Span::styled(
                app.binding.clone(),
                Style::default().fg(th.green).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    f.render_widget(Paragraph::new(binding_line), chunks[4]);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Set Action Keybind:",
            Style::default().fg(th.subtext0),
        )),
        chunks[6],
    );
    render_input(f, app, chunks[7]);

    let reset_area = chunks[9];
    let reset_w = u16::try_from(RESET_LABEL.chars().count())
        .unwrap_or(u16::MAX)
        .min(reset_area.width);
    f.render_widget(
        Paragraph::new(Span::styled(
            RESET_LABEL,
            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
        )),
        reset_area,
    );
    app.reset_rect = (reset_area.height > 0 && reset_w > 0)
        .then_some((reset_area.x, reset_area.y, reset_w, 1));

    let mut lines = vec![Line::from(Span::styled(
        "How to Configure:",
        Style::default().fg(th.text).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        INSTRUCTIONS
            .iter()
            .map(|s| Line::from(Span::styled(*s, Style::default().fg(th.subtext0)))),
    );
    f.render_widget(Paragraph::new(lines), chunks[11]);

    if let Some(msg) = &app.status_message {
        f.render_widget(
            Paragraph::new(Span::styled(msg.clone(), Style::default().fg(th.sapphire))),
            chunks[13],
        );
    }
    if app.show_keybinds_footer {
        f.render_widget(
            Paragraph::new(Span::styled(
                footer_line(app),
                Style::default().fg(th.overlay1),
            ))
            .alignment(Alignment::Center),
            chunks[14],
        );
    }

    render_dropdown(f, app, chunks[7]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ChordCapture;
    use crate::history::{MemoryStore, STORAGE_KEY};
    use crate::keys::ModifierSet;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(term: &Terminal<TestBackend>) -> String {
        let buf = term.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    /// What: The full screen renders the host texts and records every rect.
    ///
    /// Inputs:
    /// - 80x30 terminal, committed binding `Control+A`, one history entry.
    ///
    /// Output:
    /// - Title, binding line, reset label present; input, marker and reset rects set;
    ///   the dropdown rect appears once the dropdown is opened.
    #[test]
    fn ui_renders_screen_and_records_rects() {
        let store = MemoryStore::with_entry(
            STORAGE_KEY,
            r#"{"shortcuts":["Control+A"],"maxSize":5}"#,
        );
        let capture = ChordCapture::new(
            "Control+A",
            ModifierSet::default(),
            Box::new(store),
            |_: &str| {},
        );
        let mut app = AppState::new(capture);
        let mut term = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        term.draw(|f| ui(f, &mut app)).expect("draw");

        let text = screen_text(&term);
        assert!(text.contains("KEYBIND MASTER"));
        assert!(text.contains("Current Binding: Control+A"));
        assert!(text.contains(RESET_LABEL));
        assert!(text.contains("How to Configure:"));
        assert!(app.input_rect.is_some());
        assert!(app.history_button_rect.is_some());
        assert!(app.dropdown_rect.is_none());
        assert_eq!(app.reset_rect, Some((4, 11, 18, 1)));

        app.toggle_history();
        term.draw(|f| ui(f, &mut app)).expect("draw");
        assert_eq!(app.dropdown_rect, Some((5, 11, 70, 1)));
    }

    /// What: Without a binding the placeholder line shows and no dropdown rect exists.
    #[test]
    fn ui_without_binding_shows_placeholder() {
        let capture = ChordCapture::new(
            "",
            ModifierSet::default(),
            Box::new(MemoryStore::new()),
            |_: &str| {},
        );
        let mut app = AppState::new(capture);
        let mut term = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        term.draw(|f| ui(f, &mut app)).expect("draw");
        let text = screen_text(&term);
        assert!(text.contains("No keybinding set"));
        assert!(text.contains("Click to set shortcut"));
        assert!(app.history_button_rect.is_none());
        assert!(app.dropdown_rect.is_none());
    }
}
