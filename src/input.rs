use crossterm::event::{KeyCode, KeyEvent};

/// The closed command set every game consumes. The normalizer maps raw key
/// events onto it and nothing else; whether a command is legal in the current
/// game state is the receiving game's call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Rotate,
    Pause,
    /// Start from the menu, or restart after game over.
    Start,
    /// Back to the menu screen, abandoning the current round.
    Reset,
}

/// Per-game key layout. The games share the directional and lifecycle keys;
/// Space and Up differ because Tetris spends them on rotation.
#[derive(Clone, Copy)]
pub struct Keymap {
    space: Command,
    up: Command,
}

impl Keymap {
    /// Snake and Pong: Space pauses, Up steers.
    pub fn dpad() -> Self {
        Self {
            space: Command::Pause,
            up: Command::Up,
        }
    }

    /// Tetris: Space and Up both rotate.
    pub fn tetris() -> Self {
        Self {
            space: Command::Rotate,
            up: Command::Rotate,
        }
    }

    pub fn command(&self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(self.up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::Right),
            KeyCode::Char(' ') => Some(self.space),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
            KeyCode::Enter => Some(Command::Start),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_are_equivalent() {
        let map = Keymap::dpad();
        assert_eq!(map.command(key(KeyCode::Up)), Some(Command::Up));
        assert_eq!(map.command(key(KeyCode::Char('w'))), Some(Command::Up));
        assert_eq!(map.command(key(KeyCode::Left)), Some(Command::Left));
        assert_eq!(map.command(key(KeyCode::Char('a'))), Some(Command::Left));
        assert_eq!(map.command(key(KeyCode::Char('D'))), Some(Command::Right));
    }

    #[test]
    fn space_depends_on_game() {
        assert_eq!(
            Keymap::dpad().command(key(KeyCode::Char(' '))),
            Some(Command::Pause)
        );
        assert_eq!(
            Keymap::tetris().command(key(KeyCode::Char(' '))),
            Some(Command::Rotate)
        );
        assert_eq!(
            Keymap::tetris().command(key(KeyCode::Up)),
            Some(Command::Rotate)
        );
    }

    #[test]
    fn unmapped_keys_produce_no_command() {
        assert_eq!(Keymap::dpad().command(key(KeyCode::Char('x'))), None);
        assert_eq!(Keymap::tetris().command(key(KeyCode::Tab)), None);
    }
}
