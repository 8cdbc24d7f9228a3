use ratatui::{
    Frame,
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
};

use crate::config::theme;
use crate::keys::split_chord;
use crate::state::AppState;

/// What: Render the history dropdown below the capture input.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state (history, dropdown open flag, cursor)
/// - `anchor`: Outer rectangle of the capture input
///
/// Output:
/// - Draws the overlay and records the inner row rectangle in `app.dropdown_rect`.
///
/// Details:
/// - Nothing is drawn (and the rect is cleared) when the dropdown is closed or empty.
/// - Rows are listed most recent first; row `i` of the rect maps to
///   history index `i + app.history_state.offset()`, since a clipped list scrolls
///   to keep the cursor visible.
/// - The overlay is clipped to the frame; hidden rows are not hit-testable.
pub fn render_dropdown(f: &mut Frame, app: &mut AppState, anchor: Rect) {
    let entries = app.capture.history().entries();
    if !app.capture.is_history_open() || entries.is_empty() {
        app.dropdown_rect = None;
        return;
    }
    let th = theme();
    let frame = f.area();
    let y = anchor.y.saturating_add(anchor.height);
    let wanted = u16::try_from(entries.len()).unwrap_or(u16::MAX).saturating_add(2);
    let height = wanted.min(frame.height.saturating_sub(y));
    if height < 3 {
        app.dropdown_rect = None;
        return;
    }
    let rect = Rect {
        x: anchor.x,
        y,
        width: anchor.width,
        height,
    };

    let items: Vec<ListItem> = entries
        .iter()
        .map(|chord| {
            let mut spans = Vec::new();
            for (i, key) in split_chord(chord).into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("+", Style::default().fg(th.overlay1)));
                }
                let color = if app.capture.modifiers().contains(key) {
                    th.lavender
                } else {
                    th.sapphire
                };
                spans.push(Span::styled(key.to_string(), Style::default().fg(color)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(th.text).bg(th.crust))
        .block(
            Block::default()
                .title(Span::styled("History", Style::default().fg(th.overlay1)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.mauve)),
        )
        .highlight_style(
            Style::default()
                .bg(th.surface2)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    f.render_widget(Clear, rect);
    f.render_stateful_widget(list, rect, &mut app.history_state);
    app.dropdown_rect = Some((
        rect.x + 1,
        rect.y + 1,
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ChordCapture;
    use crate::history::{MemoryStore, STORAGE_KEY};
    use crate::keys::ModifierSet;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> AppState {
        let store = MemoryStore::with_entry(
            STORAGE_KEY,
            r#"{"shortcuts":["Control+A","Alt+Shift+F2"],"maxSize":5}"#,
        );
        let capture = ChordCapture::new("", ModifierSet::default(), Box::new(store), |_: &str| {});
        AppState::new(capture)
    }

    /// What: An open dropdown lists entries newest first and records its row rect.
    ///
    /// Inputs:
    /// - Two stored entries; dropdown toggled open; anchor at the top of a 40x12 frame.
    ///
    /// Output:
    /// - Rows hold the entries in order; `dropdown_rect` covers exactly two rows.
    #[test]
    fn dropdown_lists_entries_and_records_rect() {
        let mut term = Terminal::new(TestBackend::new(40, 12)).expect("terminal");
        let mut app = app();
        app.toggle_history();
        let anchor = Rect::new(0, 0, 40, 3);
        term.draw(|f| render_dropdown(f, &mut app, anchor))
            .expect("draw");
        assert_eq!(app.dropdown_rect, Some((1, 4, 38, 2)));
        let buf = term.backend().buffer();
        let row = |y: u16| -> String { (0..40).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(row(4).contains("Control+A"));
        assert!(row(5).contains("Alt+Shift+F2"));
    }

    /// What: A closed dropdown clears its rect.
    #[test]
    fn dropdown_closed_clears_rect() {
        let mut term = Terminal::new(TestBackend::new(40, 12)).expect("terminal");
        let mut app = app();
        app.dropdown_rect = Some((1, 1, 1, 1));
        term.draw(|f| render_dropdown(f, &mut app, Rect::new(0, 0, 40, 3)))
            .expect("draw");
        assert!(app.dropdown_rect.is_none());
    }
}
