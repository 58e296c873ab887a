use snake_arcade::game::{Game, GameError};
use snake_arcade::input::Direction;
use snake_arcade::level::{Level, LevelId};
use snake_arcade::score::MemoryScoreStore;
use snake_arcade::snake::Position;
use snake_arcade::tile::Tile;

#[test]
fn walled_room_walkthrough_ends_on_the_right_wall() {
    let level_text = ["#####", "#@  #", "#   #", "#####"];
    let mut level = Level::from_rows_seeded(&level_text, LevelId::new("EASY", 1), 10, 42)
        .expect("level should parse");

    // Head at (1,1) facing Right; the tail is pre-clipped over the
    // left wall cell, which gets stamped as body terrain.
    assert_eq!(level.head_position(), Position { x: 1, y: 1 });
    assert_eq!(level.snake().heading(), Direction::Right);
    assert_eq!(level.tile_at(1, 1), Tile::SnakeHead);
    assert_eq!(level.tile_at(1, 0), Tile::SnakeBody);

    assert!(level.move_snake(Some(Direction::Right)));
    assert!(level.move_snake(Some(Direction::Right)));
    // Col 4 is the right wall.
    assert!(!level.move_snake(Some(Direction::Right)));

    assert!(level.is_ended());
    assert_eq!(level.score(), 0);
    assert_eq!(level.head_position(), Position { x: 4, y: 1 });
}

const CATALOG: &str = "\
; easy 1
#########
# @F    #
#########
; easy 2
#########
#   @   #
#########
";

fn new_game() -> Game {
    Game::new(CATALOG, 10, Box::new(MemoryScoreStore::new()))
}

#[test]
fn eating_the_food_ahead_grows_and_respawns() {
    let mut game = new_game();
    game.load(&LevelId::new("EASY", 1)).expect("should load");

    assert!(game.step(None));

    let level = game.level().expect("level is active");
    assert_eq!(level.score(), 1);
    assert_eq!(level.speed(), 11);
    assert_eq!(level.snake().len(), 3);
    assert!(!level.is_ended());

    // Exactly one food cell remains, somewhere previously empty.
    let food_cells: Vec<(usize, usize)> = (0..level.rows())
        .flat_map(|row| (0..level.cols()).map(move |col| (row, col)))
        .filter(|&(row, col)| level.tile_at(row, col) == Tile::Food)
        .collect();
    assert_eq!(food_cells.len(), 1);
    // The eaten cell now holds the head, never the respawned food.
    assert_ne!(food_cells[0], (1, 3));
}

#[test]
fn unknown_level_load_leaves_the_active_level_untouched() {
    let mut game = new_game();
    game.load(&LevelId::new("EASY", 1)).expect("should load");
    assert!(game.step(None));
    assert_eq!(game.score(), 1);

    let result = game.load(&LevelId::new("EASY", 7));

    assert!(matches!(result, Err(GameError::UnknownLevel(_))));
    assert_eq!(game.score(), 1);
    assert_eq!(*game.level().expect("still active").id(), LevelId::new("EASY", 1));
}

#[test]
fn full_session_records_the_best_score_across_runs() {
    let mut game = new_game();
    let easy_1 = LevelId::new("EASY", 1);

    // Run 1: eat the food, then die against the top wall with score 1.
    game.load(&easy_1).expect("should load");
    assert!(game.step(None));
    assert!(!game.step(Some(Direction::Up)));
    assert!(game.is_ended());
    assert!(game.is_better_high_score());

    // Run 2: die immediately with score 0; the recorded 1 survives.
    game.load(&easy_1).expect("should reload");
    assert!(!game.is_better_high_score());
    assert!(!game.step(Some(Direction::Up)));
    assert!(!game.is_better_high_score());

    assert_eq!(game.high_score_for(&easy_1), 1);
    let listing = game.high_scores();
    assert_eq!(listing.len(), 2);
    assert!(listing.iter().any(|h| h.id() == easy_1 && h.score == 1));
}

#[test]
fn packaged_catalog_parses_cleanly() {
    let source = include_str!("../assets/levels.txt");
    let game = Game::new(source, 10, Box::new(MemoryScoreStore::new()));

    assert!(game.catalog_diagnostics().is_empty());
    assert_eq!(game.difficulties(), vec!["EASY", "HARD", "MEDIUM"]);
    assert_eq!(game.level_numbers("EASY"), Some(vec![1, 2, 3]));
    assert_eq!(game.level_numbers("MEDIUM"), Some(vec![1, 2]));
    assert_eq!(game.level_numbers("HARD"), Some(vec![1, 2]));
    assert_eq!(
        game.next_level_id(&LevelId::new("EASY", 1)),
        Some(LevelId::new("EASY", 2))
    );
}
