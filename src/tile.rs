/// Semantic content of one grid cell.
///
/// Wall and Rock are permanent terrain set at load time; Food is
/// consumed and respawned during play; SnakeHead/SnakeBody are the
/// snake's projection onto the grid and are re-stamped every tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Tile {
    Wall,
    SnakeHead,
    SnakeBody,
    Food,
    Rock,
    Empty,
}

impl Tile {
    /// Returns the canonical single-character glyph for text export.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::SnakeHead => '@',
            Self::SnakeBody => 'O',
            Self::Food => 'F',
            Self::Rock => 'R',
            Self::Empty => ' ',
        }
    }

    /// Maps a catalog glyph to a tile.
    ///
    /// Unknown glyphs (including space) are Empty per the catalog
    /// grammar. `@` is handled by the level loader before this is
    /// consulted, but maps to SnakeHead for symmetry with `glyph`.
    #[must_use]
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            '#' => Self::Wall,
            '@' => Self::SnakeHead,
            'O' => Self::SnakeBody,
            'F' => Self::Food,
            'R' => Self::Rock,
            _ => Self::Empty,
        }
    }

    /// Returns true for the two snake-projection tiles.
    #[must_use]
    pub fn is_snake(self) -> bool {
        matches!(self, Self::SnakeHead | Self::SnakeBody)
    }
}
