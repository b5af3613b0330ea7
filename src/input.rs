use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Confirm,
    TogglePause,
    Restart,
    Quit,
    /// Any key without a binding
    Other,
}

pub fn command_for(ev: &KeyEvent) -> Command {
    if is_ctrl_c(ev) {
        return Command::Quit;
    }

    match ev.code {
        KeyCode::Up => Command::Turn(Direction::Up),
        KeyCode::Down => Command::Turn(Direction::Down),
        KeyCode::Left => Command::Turn(Direction::Left),
        KeyCode::Right => Command::Turn(Direction::Right),
        KeyCode::Enter => Command::Confirm,
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Turn(Direction::Up),
            'a' => Command::Turn(Direction::Left),
            's' => Command::Turn(Direction::Down),
            'd' => Command::Turn(Direction::Right),
            'p' => Command::TogglePause,
            'r' => Command::Restart,
            'q' | 'x' => Command::Quit,
            ' ' => Command::Confirm,
            _ => Command::Other,
        },
        _ => Command::Other,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn wasd_and_arrows_turn() {
        assert_eq!(command_for(&key(KeyCode::Char('w'))), Command::Turn(Direction::Up));
        assert_eq!(command_for(&key(KeyCode::Char('A'))), Command::Turn(Direction::Left));
        assert_eq!(command_for(&key(KeyCode::Down)), Command::Turn(Direction::Down));
        assert_eq!(command_for(&key(KeyCode::Right)), Command::Turn(Direction::Right));
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('p'))), Command::TogglePause);
        assert_eq!(command_for(&key(KeyCode::Char('R'))), Command::Restart);
        assert_eq!(command_for(&key(KeyCode::Char('x'))), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Esc)), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Enter)), Command::Confirm);
        assert_eq!(command_for(&key(KeyCode::Char(' '))), Command::Confirm);
        assert_eq!(command_for(&key(KeyCode::Char('z'))), Command::Other);
        assert_eq!(command_for(&key(KeyCode::Tab)), Command::Other);
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(command_for(&ev), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Char('c'))), Command::Other);
    }
}
