use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::state::{AppState, point_in};

/// What: Handle a mouse event using the rectangles recorded by the last render.
///
/// Inputs:
/// - `me`: Mouse event.
/// - `app`: Mutable application state.
///
/// Details:
/// - Only left-button presses are handled.
/// - Priority: dropdown row (select), history marker (toggle), input (focus),
///   reset button (blur, close dropdown, reset); anything else blurs the input
///   and closes the dropdown.
/// - Dropdown rows are offset by the list's scroll position from the last render.
pub fn handle_mouse_event(me: MouseEvent, app: &mut AppState) {
    if !matches!(me.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    let (x, y) = (me.column, me.row);

    if app.capture.is_history_open() && point_in(app.dropdown_rect, x, y) {
        if let Some((_, ry, _, _)) = app.dropdown_rect {
            let index = usize::from(y - ry) + app.history_state.offset();
            if let Some(chord) = app.select_history(index) {
                tracing::debug!(chord = %chord, index, "[Mouse] Selected history entry");
            }
        }
        return;
    }
    if point_in(app.history_button_rect, x, y) {
        app.toggle_history();
        return;
    }
    if point_in(app.input_rect, x, y) {
        app.capture.focus();
        return;
    }
    app.capture.blur();
    app.close_history();
    if point_in(app.reset_rect, x, y) {
        app.reset();
    }
}
