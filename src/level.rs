use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;
use crate::snake::{Position, Snake};
use crate::tile::Tile;

/// Identifies one level as a (difficulty, number) pair.
///
/// The difficulty is normalized to uppercase on construction so that
/// catalog headers and score entries compare equal regardless of case.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct LevelId {
    difficulty: String,
    number: u32,
}

impl LevelId {
    #[must_use]
    pub fn new(difficulty: &str, number: u32) -> Self {
        Self {
            difficulty: difficulty.to_uppercase(),
            number,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.difficulty, self.number)
    }
}

/// Errors while constructing a level from its textual rows.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {0} has no terrain rows")]
    NoRows(LevelId),
    #[error("level {0} has no '@' snake start marker")]
    MissingSnakeMarker(LevelId),
}

/// One playable level: terrain grid, snake, score and speed.
///
/// The grid and the snake are kept mutually consistent by re-stamping
/// the snake's occupancy into the grid after every successful move.
#[derive(Debug, Clone)]
pub struct Level {
    id: LevelId,
    rows: usize,
    cols: usize,
    grid: Vec<Tile>,
    snake: Snake,
    score: u32,
    speed: u32,
    rng: StdRng,
}

impl Level {
    /// Parses a rectangular character grid into a level.
    ///
    /// The `@` glyph marks the snake's starting head (facing Right) and
    /// leaves Empty terrain underneath; rows shorter than the widest
    /// row are right-padded with Empty.
    pub fn from_rows(rows: &[&str], id: LevelId, speed: u32) -> Result<Self, LevelError> {
        Self::build(rows, id, speed, StdRng::from_entropy())
    }

    /// Same as `from_rows` with a seeded RNG, for reproducible food
    /// placement in tests and simulations.
    pub fn from_rows_seeded(
        rows: &[&str],
        id: LevelId,
        speed: u32,
        seed: u64,
    ) -> Result<Self, LevelError> {
        Self::build(rows, id, speed, StdRng::seed_from_u64(seed))
    }

    fn build(rows_text: &[&str], id: LevelId, speed: u32, rng: StdRng) -> Result<Self, LevelError> {
        if rows_text.is_empty() {
            return Err(LevelError::NoRows(id));
        }

        let rows = rows_text.len();
        let cols = rows_text
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);

        let mut grid = vec![Tile::Empty; rows * cols];
        let mut start = None;

        for (y, row) in rows_text.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                grid[y * cols + x] = if glyph == '@' {
                    start = Some(Position {
                        x: x as i32,
                        y: y as i32,
                    });
                    Tile::Empty
                } else {
                    Tile::from_glyph(glyph)
                };
            }
        }

        let Some(head) = start else {
            return Err(LevelError::MissingSnakeMarker(id));
        };

        let mut level = Self {
            id,
            rows,
            cols,
            grid,
            snake: Snake::new(head, Direction::Right),
            score: 0,
            speed,
            rng,
        };
        level.stamp_snake();
        Ok(level)
    }

    /// Returns a pristine working copy of this level.
    ///
    /// Intended for catalog templates: terrain is cloned, the snake is
    /// rebuilt at the template's start, and the score resets to zero.
    #[must_use]
    pub fn fresh_start(&self) -> Self {
        let mut copy = Self {
            id: self.id.clone(),
            rows: self.rows,
            cols: self.cols,
            grid: self.grid.clone(),
            snake: Snake::new(self.snake.head(), self.snake.heading()),
            score: 0,
            speed: self.speed,
            rng: StdRng::from_entropy(),
        };
        copy.stamp_snake();
        copy
    }

    /// Returns true when the level has reached its terminal state: the
    /// head sits on Wall or Rock terrain, has left the grid, or
    /// overlaps the snake's own body.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        let head = self.snake.head();
        match self.tile(head) {
            None | Some(Tile::Wall | Tile::Rock) => true,
            _ => self.snake.collides_with(head),
        }
    }

    /// Advances the snake one tick.
    ///
    /// Returns false without touching any state when the level has
    /// already ended, and false when this move ends it (score and speed
    /// stay as they were before the fatal move). A move onto Food grows
    /// the snake, bumps score and speed by one, and respawns Food on a
    /// uniformly chosen Empty cell.
    pub fn move_snake(&mut self, direction: Option<Direction>) -> bool {
        if self.is_ended() {
            return false;
        }

        // The grow check must use the heading that will actually be
        // applied, so a rejected reversal intent still probes straight
        // ahead.
        let effective = match direction {
            Some(requested) if !requested.is_opposite(self.snake.heading()) => requested,
            _ => self.snake.heading(),
        };
        let grow = self.tile(self.snake.head().translate(effective)) == Some(Tile::Food);

        self.snake.advance(direction, grow);

        if self.is_ended() {
            return false;
        }

        if grow {
            self.score += 1;
            self.speed += 1;
            self.place_food();
        }

        self.stamp_snake();
        true
    }

    /// Places food on a uniformly random Empty cell.
    ///
    /// Scans the grid and indexes into the empties instead of
    /// reject-sampling, so placement terminates no matter how full the
    /// board is. A board with no Empty cell left skips placement.
    fn place_food(&mut self) {
        let empties: Vec<usize> = self
            .grid
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Empty)
            .map(|(index, _)| index)
            .collect();

        if empties.is_empty() {
            return;
        }

        let choice = empties[self.rng.gen_range(0..empties.len())];
        self.grid[choice] = Tile::Food;
    }

    /// Re-stamps the snake's occupancy: clears every SnakeHead and
    /// SnakeBody cell, then marks the current body. Segments outside
    /// the grid (a start tail clipped by the level edge) are skipped.
    fn stamp_snake(&mut self) {
        for tile in &mut self.grid {
            if tile.is_snake() {
                *tile = Tile::Empty;
            }
        }

        let head = self.snake.head();
        let segments: Vec<Position> = self.snake.segments().copied().collect();
        for segment in segments {
            if segment.x < 0 || segment.y < 0 {
                continue;
            }
            let (col, row) = (segment.x as usize, segment.y as usize);
            if row >= self.rows || col >= self.cols {
                continue;
            }
            self.grid[row * self.cols + col] = if segment == head {
                Tile::SnakeHead
            } else {
                Tile::SnakeBody
            };
        }
    }

    fn tile(&self, position: Position) -> Option<Tile> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let (col, row) = (position.x as usize, position.y as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.grid[row * self.cols + col])
    }

    #[must_use]
    pub fn id(&self) -> &LevelId {
        &self.id
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Returns the tile at `(row, col)`.
    ///
    /// Querying outside the grid is a caller contract violation and
    /// panics.
    #[must_use]
    pub fn tile_at(&self, row: usize, col: usize) -> Tile {
        assert!(
            row < self.rows && col < self.cols,
            "tile_at out of range: ({row}, {col}) on a {}x{} grid",
            self.rows,
            self.cols,
        );
        self.grid[row * self.cols + col]
    }

    #[must_use]
    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Renders the grid back to its glyph form, one line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(self.grid[row * self.cols + col].glyph());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;
    use crate::snake::Position;
    use crate::tile::Tile;

    use super::{Level, LevelError, LevelId};

    fn easy(number: u32) -> LevelId {
        LevelId::new("easy", number)
    }

    fn open_room() -> Level {
        Level::from_rows_seeded(
            &["########", "#      #", "#  @   #", "#      #", "########"],
            easy(1),
            10,
            11,
        )
        .expect("level should parse")
    }

    #[test]
    fn level_id_normalizes_difficulty_to_uppercase() {
        let id = LevelId::new("medium", 3);
        assert_eq!(id.difficulty(), "MEDIUM");
        assert_eq!(id.to_string(), "MEDIUM-3");
    }

    #[test]
    fn dimensions_come_from_row_count_and_longest_row() {
        let level =
            Level::from_rows_seeded(&["####", "#@", "####"], easy(1), 10, 1).expect("should parse");

        assert_eq!(level.rows(), 3);
        assert_eq!(level.cols(), 4);
        // Short row is right-padded with Empty.
        assert_eq!(level.tile_at(1, 3), Tile::Empty);
    }

    #[test]
    fn missing_snake_marker_is_a_construction_error() {
        let result = Level::from_rows(&["####", "#  #", "####"], easy(1), 10);
        assert!(matches!(result, Err(LevelError::MissingSnakeMarker(_))));
    }

    #[test]
    fn empty_row_list_is_a_construction_error() {
        let result = Level::from_rows(&[], easy(1), 10);
        assert!(matches!(result, Err(LevelError::NoRows(_))));
    }

    #[test]
    fn snake_starts_facing_right_with_tail_behind() {
        let level = open_room();

        assert_eq!(level.head_position(), Position { x: 3, y: 2 });
        assert_eq!(level.snake().heading(), Direction::Right);
        assert_eq!(level.tile_at(2, 3), Tile::SnakeHead);
        assert_eq!(level.tile_at(2, 2), Tile::SnakeBody);
    }

    #[test]
    fn grid_matches_snake_after_every_move() {
        let mut level = open_room();

        let moves = [
            Some(Direction::Right),
            Some(Direction::Down),
            Some(Direction::Left),
            None,
        ];
        for direction in moves {
            assert!(level.move_snake(direction));

            let mut snake_cells = Vec::new();
            let mut head_cells = 0;
            for row in 0..level.rows() {
                for col in 0..level.cols() {
                    match level.tile_at(row, col) {
                        Tile::SnakeHead => {
                            head_cells += 1;
                            snake_cells.push(Position {
                                x: col as i32,
                                y: row as i32,
                            });
                        }
                        Tile::SnakeBody => snake_cells.push(Position {
                            x: col as i32,
                            y: row as i32,
                        }),
                        _ => {}
                    }
                }
            }

            let mut body: Vec<Position> = level.snake().segments().copied().collect();
            body.sort();
            snake_cells.sort();
            assert_eq!(snake_cells, body);
            assert_eq!(head_cells, 1);
        }
    }

    #[test]
    fn walking_into_a_wall_ends_the_level() {
        let mut level = open_room();

        assert!(level.move_snake(None)); // head at x=4
        assert!(level.move_snake(None)); // head at x=5
        assert!(level.move_snake(None)); // head at x=6
        assert!(!level.move_snake(None)); // x=7 is the wall

        assert!(level.is_ended());
        assert_eq!(level.score(), 0);
    }

    #[test]
    fn walking_into_a_rock_ends_the_level() {
        let mut level = Level::from_rows_seeded(&["  @R  "], easy(1), 10, 1).expect("should parse");

        assert!(!level.move_snake(None));
        assert!(level.is_ended());
    }

    #[test]
    fn leaving_the_grid_ends_the_level() {
        let mut level = Level::from_rows_seeded(&["  @ "], easy(1), 10, 1).expect("should parse");

        assert!(level.move_snake(None));
        assert!(!level.move_snake(None));
        assert!(level.is_ended());
    }

    #[test]
    fn eating_food_grows_scores_and_respawns() {
        let mut level = Level::from_rows_seeded(
            &["########", "#      #", "#  @F  #", "#      #", "########"],
            easy(1),
            10,
            5,
        )
        .expect("should parse");

        assert!(level.move_snake(None));

        assert_eq!(level.score(), 1);
        assert_eq!(level.speed(), 11);
        assert_eq!(level.snake().len(), 3);
        assert!(!level.is_ended());

        let food_cells = (0..level.rows())
            .flat_map(|row| (0..level.cols()).map(move |col| (row, col)))
            .filter(|&(row, col)| level.tile_at(row, col) == Tile::Food)
            .count();
        assert_eq!(food_cells, 1);
    }

    #[test]
    fn food_respawn_is_skipped_when_no_empty_cell_remains() {
        // One-row strip: after eating, every in-bounds cell is snake.
        let mut level = Level::from_rows_seeded(&[" @F"], easy(1), 10, 3).expect("should parse");

        assert!(level.move_snake(None));
        assert_eq!(level.score(), 1);

        let food_cells = (0..level.cols())
            .filter(|&col| level.tile_at(0, col) == Tile::Food)
            .count();
        assert_eq!(food_cells, 0);
    }

    #[test]
    fn grow_check_follows_the_effective_heading_on_rejected_reversal() {
        // Food sits behind the head; a reversal intent must not treat
        // it as the grow target.
        let mut level =
            Level::from_rows_seeded(&["#######", "#F @  #", "#######"], easy(1), 10, 2)
                .expect("should parse");

        assert!(level.move_snake(Some(Direction::Left)));

        assert_eq!(level.score(), 0);
        assert_eq!(level.snake().len(), 2);
        assert_eq!(level.head_position(), Position { x: 4, y: 1 });
    }

    #[test]
    fn self_collision_ends_the_level() {
        let mut level = Level::from_rows_seeded(
            &[
                "##########",
                "#        #",
                "#  @FFF  #",
                "#        #",
                "##########",
            ],
            easy(1),
            10,
            9,
        )
        .expect("should parse");

        // Eat three food cells in a row: length 5.
        assert!(level.move_snake(None));
        assert!(level.move_snake(None));
        assert!(level.move_snake(None));
        assert_eq!(level.snake().len(), 5);

        // A tight clockwise loop turns the head back into the body.
        assert!(level.move_snake(Some(Direction::Down)));
        assert!(level.move_snake(Some(Direction::Left)));
        assert!(!level.move_snake(Some(Direction::Up)));
        assert!(level.is_ended());
    }

    #[test]
    fn ended_level_ignores_further_moves() {
        let mut level = Level::from_rows_seeded(&["  @R"], easy(1), 10, 1).expect("should parse");

        assert!(!level.move_snake(None));
        let head = level.head_position();
        let len = level.snake().len();

        assert!(!level.move_snake(Some(Direction::Down)));
        assert_eq!(level.head_position(), head);
        assert_eq!(level.snake().len(), len);
    }

    #[test]
    fn fresh_start_resets_score_snake_and_terrain() {
        let mut template = Level::from_rows_seeded(
            &["########", "#      #", "#  @F  #", "#      #", "########"],
            easy(1),
            10,
            5,
        )
        .expect("should parse");

        let copy = template.fresh_start();
        // Play the template copy's source a bit to prove independence.
        assert!(template.move_snake(None));
        assert_eq!(template.score(), 1);

        assert_eq!(copy.score(), 0);
        assert_eq!(copy.speed(), 10);
        assert_eq!(copy.head_position(), Position { x: 3, y: 2 });
        assert_eq!(copy.snake().len(), 2);
        assert_eq!(copy.tile_at(2, 4), Tile::Food);
    }

    #[test]
    #[should_panic(expected = "tile_at out of range")]
    fn tile_at_outside_the_grid_panics() {
        let level = open_room();
        let _ = level.tile_at(level.rows(), 0);
    }
}
