use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

/// Canonical movement directions for the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the unit grid delta `(dx, dy)` for this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true when the two directions are additive inverses.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        dx == -ox && dy == -oy
    }
}

/// High-level input events consumed by the terminal driver.
///
/// The simulation core never sees these; the driver translates
/// `Direction` intents into `Game::step` arguments.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Restart,
    Back,
    ToggleScores,
    Quit,
}

/// Polls for one input event, waiting at most `timeout`.
///
/// Returns `Ok(None)` when no relevant key was pressed within the
/// timeout. Key releases and repeats are ignored so held keys do not
/// flood the direction intent.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    let Event::Key(key) = event::read()? else {
        return Ok(None);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Char('r') => GameInput::Restart,
        KeyCode::Char('h') => GameInput::ToggleScores,
        KeyCode::Esc => GameInput::Back,
        KeyCode::Char('q') => GameInput::Quit,
        _ => return Ok(None),
    };

    Ok(Some(input))
}
