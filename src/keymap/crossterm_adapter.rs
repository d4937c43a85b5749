//! Adapter to convert crossterm events to our InputEvent type

use crossterm::event::{
    Event as CtEvent, KeyCode as CtKeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CtMouseButton, MouseEvent as CtMouseEvent, MouseEventKind,
};

use super::types::{
    InputEvent, KeyCode, Keystroke, Modifiers, MouseButton, MouseEvent, MouseKind,
};

/// Convert crossterm modifier flags
pub fn modifiers_from_crossterm(mods: KeyModifiers) -> Modifiers {
    Modifiers::new(
        mods.contains(KeyModifiers::CONTROL),
        mods.contains(KeyModifiers::ALT),
        mods.contains(KeyModifiers::SHIFT),
    )
}

/// Convert a crossterm key event to our Keystroke type
///
/// Returns None for key releases and keys we do not map (media keys, etc).
pub fn keystroke_from_crossterm(event: &KeyEvent) -> Option<Keystroke> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let mut mods = modifiers_from_crossterm(event.modifiers);

    let key = match event.code {
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Esc => KeyCode::Escape,
        CtKeyCode::Tab => KeyCode::Tab,
        CtKeyCode::BackTab => {
            mods = mods | Modifiers::SHIFT;
            KeyCode::Tab
        }
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Insert => KeyCode::Insert,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,
        CtKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };

    Some(Keystroke::new(key, mods))
}

fn button_from_crossterm(button: CtMouseButton) -> MouseButton {
    match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Right => MouseButton::Right,
        CtMouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert a crossterm mouse event
pub fn mouse_from_crossterm(event: &CtMouseEvent) -> Option<MouseEvent> {
    let kind = match event.kind {
        MouseEventKind::Down(b) => MouseKind::Press(button_from_crossterm(b)),
        MouseEventKind::Up(b) => MouseKind::Release(button_from_crossterm(b)),
        MouseEventKind::Drag(b) => MouseKind::Drag(button_from_crossterm(b)),
        MouseEventKind::Moved => MouseKind::Moved,
        MouseEventKind::ScrollUp => MouseKind::ScrollUp,
        MouseEventKind::ScrollDown => MouseKind::ScrollDown,
        _ => return None,
    };

    Some(MouseEvent {
        kind,
        column: event.column,
        row: event.row,
        mods: modifiers_from_crossterm(event.modifiers),
    })
}

/// Convert any crossterm event into an InputEvent the router understands
pub fn input_from_crossterm(event: &CtEvent) -> Option<InputEvent> {
    match event {
        CtEvent::Key(key) => keystroke_from_crossterm(key).map(InputEvent::Key),
        CtEvent::Mouse(mouse) => mouse_from_crossterm(mouse).map(InputEvent::Mouse),
        CtEvent::Paste(text) => Some(InputEvent::Paste(text.clone())),
        CtEvent::Resize(cols, rows) => Some(InputEvent::Resize(*cols, *rows)),
        _ => None,
    }
}
