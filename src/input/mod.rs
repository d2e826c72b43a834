use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Wizard-level meaning of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Back,
    StepClick(usize),
    FocusNext,
    FocusPrev,
    /// Move the focused dropdown by this many options
    Cycle(isize),
    Browse,
    Quit,
    Input(char),
    DeleteChar,
}

pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('o') => Some(Command::Browse),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Enter => Command::Next,
        KeyCode::Esc => Command::Back,
        KeyCode::F(n @ 1..=4) => Command::StepClick(n as usize - 1),
        KeyCode::Tab | KeyCode::Down => Command::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Command::FocusPrev,
        KeyCode::Left => Command::Cycle(-1),
        KeyCode::Right => Command::Cycle(1),
        KeyCode::Backspace => Command::DeleteChar,
        KeyCode::Char(c) => Command::Input(c),
        _ => return None,
    };
    Some(command)
}
