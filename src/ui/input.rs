use ratatui::{
    Frame,
    prelude::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::capture::{CaptureStatus, Display, KeyCap};
use crate::config::{Theme, theme};
use crate::state::AppState;

/// Marker shown at the right edge of the input when history is available.
pub const HISTORY_MARKER: &str = " ↻";

/// Border color for each capture status.
const fn border_color(th: &Theme, status: CaptureStatus) -> Color {
    match status {
        CaptureStatus::Empty => th.surface1,
        CaptureStatus::FocusedIdle => th.mauve,
        CaptureStatus::InProgress => th.yellow,
        CaptureStatus::DisplayingCommitted | CaptureStatus::ValidActive => th.green,
    }
}

/// What: Spans for a row of key caps.
///
/// Details:
/// - Modifiers use lavender, other keys sapphire; keys held right now are bold and
///   highlighted; caps are separated by a muted `+`.
fn cap_spans(th: &Theme, caps: &[KeyCap]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(caps.len() * 2);
    for (i, cap) in caps.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" + ", Style::default().fg(th.overlay1)));
        }
        let mut style = Style::default().fg(if cap.modifier {
            th.lavender
        } else {
            th.sapphire
        });
        if cap.pressed {
            style = style.bg(th.surface1).add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", cap.name), style));
    }
    spans
}

/// What: Render the chord capture input and record its hit-test rectangles.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state (capture input, rect fields)
/// - `area`: Target rectangle (three rows: border, content, border)
///
/// Output:
/// - Draws the input and updates `app.input_rect` and `app.history_button_rect`.
///
/// Details:
/// - The border color follows the capture status (empty, focus, in-progress, valid).
/// - The history marker is right-aligned on the content row and only present when the
///   history has entries; otherwise `app.history_button_rect` is cleared.
pub fn render_input(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    if area.width < 3 || area.height < 3 {
        app.input_rect = None;
        app.history_button_rect = None;
        return;
    }
    let status = app.capture.status();
    let mut spans = match app.capture.display() {
        Display::Placeholder(text) => vec![Span::styled(
            format!(" {text}"),
            Style::default().fg(th.overlay1),
        )],
        Display::Keys(caps) => cap_spans(&th, &caps),
    };

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    let marker_w = u16::try_from(HISTORY_MARKER.width()).unwrap_or(2);
    if app.capture.history().is_empty() || inner.width <= marker_w {
        app.history_button_rect = None;
    } else {
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let free = usize::from(inner.width - marker_w).saturating_sub(used);
        spans.push(Span::raw(" ".repeat(free)));
        let marker_color = if app.capture.is_history_open() {
            th.mauve
        } else {
            th.overlay1
        };
        spans.push(Span::styled(
            HISTORY_MARKER,
            Style::default().fg(marker_color).add_modifier(Modifier::BOLD),
        ));
        app.history_button_rect = Some((
            inner.x + inner.width - marker_w,
            inner.y,
            marker_w,
            1,
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color(&th, status)))
        .title(Span::styled(
            status.label(),
            Style::default().fg(border_color(&th, status)),
        ));
    let input = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(th.text).bg(th.base))
        .block(block);
    f.render_widget(input, area);
    app.input_rect = Some((inner.x, inner.y, inner.width, inner.height));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ChordCapture;
    use crate::history::{MemoryStore, STORAGE_KEY};
    use crate::keys::{ModifierSet, RawKeyEvent};
    use ratatui::{Terminal, backend::TestBackend};

    fn row_text(term: &Terminal<TestBackend>, y: u16) -> String {
        let buf = term.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn app(store: MemoryStore) -> AppState {
        let capture = ChordCapture::new("", ModifierSet::default(), Box::new(store), |_: &str| {});
        AppState::new(capture)
    }

    /// What: An empty input shows the placeholder and no history marker.
    ///
    /// Inputs:
    /// - Fresh state, empty store.
    ///
    /// Output:
    /// - Placeholder text on the content row; `history_button_rect` is `None`.
    #[test]
    fn input_placeholder_without_history() {
        let mut term = Terminal::new(TestBackend::new(40, 3)).expect("terminal");
        let mut app = app(MemoryStore::new());
        term.draw(|f| render_input(f, &mut app, f.area()))
            .expect("draw");
        assert!(row_text(&term, 1).contains("Click to set shortcut"));
        assert_eq!(app.input_rect, Some((1, 1, 38, 1)));
        assert!(app.history_button_rect.is_none());
    }

    /// What: Held keys render as caps and the history marker sits at the right edge.
    ///
    /// Inputs:
    /// - Stored history with one entry; focused input holding Control.
    ///
    /// Output:
    /// - "Control" and the marker on the content row; marker rect at the inner right edge.
    #[test]
    fn input_renders_caps_and_marker() {
        let store = MemoryStore::with_entry(STORAGE_KEY, r#"{"shortcuts":["Alt+X"],"maxSize":5}"#);
        let mut term = Terminal::new(TestBackend::new(40, 3)).expect("terminal");
        let mut app = app(store);
        app.capture.focus();
        app.capture
            .key_down(&RawKeyEvent::new("ControlLeft", "Control"));
        term.draw(|f| render_input(f, &mut app, f.area()))
            .expect("draw");
        let row = row_text(&term, 1);
        assert!(row.contains("Control"));
        assert!(row.contains('↻'));
        assert!(row_text(&term, 0).contains("in-progress"));
        assert_eq!(app.history_button_rect, Some((37, 1, 2, 1)));
    }
}
