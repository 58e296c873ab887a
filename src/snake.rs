use std::collections::VecDeque;

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns this position shifted one cell along `direction`.
    #[must_use]
    pub fn translate(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Ordered snake body (head-first) plus the current heading.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
}

impl Snake {
    /// Creates a two-segment snake: the head at `head`, the tail one
    /// cell behind it along the opposite of `heading`.
    #[must_use]
    pub fn new(head: Position, heading: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        body.push_back(head.translate(heading.opposite()));

        Self { body, heading }
    }

    /// Advances the snake one cell.
    ///
    /// A provided direction becomes the new heading unless it is the
    /// exact opposite of the current one; a reversal intent is silently
    /// ignored rather than rejected. With `grow` the previous tail is
    /// kept, so the body gains one segment.
    pub fn advance(&mut self, direction: Option<Direction>, grow: bool) {
        if let Some(requested) = direction {
            if !requested.is_opposite(self.heading) {
                self.heading = requested;
            }
        }

        let new_head = self.head().translate(self.heading);
        self.body.push_front(new_head);

        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current heading.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns true when any segment except the head occupies `position`.
    #[must_use]
    pub fn collides_with(&self, position: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments. Never the case for a
    /// snake built through `new`, but keeps the len/is_empty pair whole.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn new_snake_has_two_segments_with_tail_behind_head() {
        let snake = Snake::new(Position { x: 4, y: 2 }, Direction::Right);

        let body: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![Position { x: 4, y: 2 }, Position { x: 3, y: 2 }]
        );
    }

    #[test]
    fn advance_moves_one_cell_and_keeps_length() {
        let mut snake = Snake::new(Position { x: 4, y: 2 }, Direction::Right);

        snake.advance(None, false);

        assert_eq!(snake.head(), Position { x: 5, y: 2 });
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn advance_with_grow_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 4, y: 2 }, Direction::Right);

        snake.advance(None, true);

        assert_eq!(snake.len(), 3);
        assert!(snake.collides_with(Position { x: 3, y: 2 }));
    }

    #[test]
    fn reversal_intent_is_silently_ignored() {
        let mut snake = Snake::new(Position { x: 4, y: 2 }, Direction::Right);

        snake.advance(Some(Direction::Left), false);

        assert_eq!(snake.heading(), Direction::Right);
        assert_eq!(snake.head(), Position { x: 5, y: 2 });
    }

    #[test]
    fn perpendicular_intent_changes_heading() {
        let mut snake = Snake::new(Position { x: 4, y: 2 }, Direction::Right);

        snake.advance(Some(Direction::Up), false);

        assert_eq!(snake.heading(), Direction::Up);
        assert_eq!(snake.head(), Position { x: 4, y: 1 });
    }

    #[test]
    fn length_equals_initial_plus_grow_moves() {
        let mut snake = Snake::new(Position { x: 10, y: 10 }, Direction::Right);

        let moves = [
            (None, true),
            (Some(Direction::Up), false),
            (None, true),
            (Some(Direction::Left), false),
            (None, true),
        ];
        for (direction, grow) in moves {
            snake.advance(direction, grow);
        }

        assert_eq!(snake.len(), 2 + 3);
    }

    #[test]
    fn collides_with_excludes_the_head() {
        let snake = Snake::new(Position { x: 4, y: 2 }, Direction::Right);

        assert!(!snake.collides_with(Position { x: 4, y: 2 }));
        assert!(snake.collides_with(Position { x: 3, y: 2 }));
    }
}
