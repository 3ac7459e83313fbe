use crate::component::InputEdit;
use crate::ui::app::{App, ControlKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || key.code == KeyCode::Esc {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 'r') {
        app.refresh_all();
        return;
    }
    if is_ctrl_char(key, 'u') {
        app.edit(InputEdit::Clear);
        return;
    }

    match key.code {
        KeyCode::F(2) => app.toggle_state(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Enter => {
            app.activate();
        }
        KeyCode::Left => {
            app.step_tab(-1);
        }
        KeyCode::Right => {
            app.step_tab(1);
        }
        KeyCode::Backspace => {
            app.edit(InputEdit::Backspace);
        }
        KeyCode::Char(ch) if !has_command_modifier(key) => on_char(app, ch),
        _ => {}
    }
}

fn on_char(app: &mut App, ch: char) {
    match app.focused_kind() {
        Some(ControlKind::TextInput) => {
            app.edit(InputEdit::Insert(ch));
        }
        Some(ControlKind::Button) if ch == ' ' => {
            app.press();
        }
        Some(ControlKind::Tabs) => {
            // Digits pick a tab, 1-based.
            if let Some(index) = ch.to_digit(10).and_then(|d| d.checked_sub(1)) {
                app.select_tab(index as usize);
            }
        }
        _ => {}
    }
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
