use std::fs;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use snake_arcade::config;
use snake_arcade::game::Game;
use snake_arcade::input::{self, Direction, GameInput};
use snake_arcade::level::LevelId;
use snake_arcade::renderer::{self, FrameView, Screen};
use snake_arcade::score::{JsonScoreStore, MemoryScoreStore, ScoreStore};

/// The packaged default level catalog.
const DEFAULT_LEVELS: &str = include_str!("../assets/levels.txt");

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to an alternate level catalog file.
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Path to an alternate high-score file.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Initial snake speed in ticks per second.
    #[arg(long, default_value_t = config::INITIAL_SPEED)]
    speed: u32,

    /// Keep high scores in memory only.
    #[arg(long = "no-persist")]
    no_persist: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let catalog_source = match &cli.levels {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_LEVELS.to_string(),
    };

    let store = open_score_store(&cli);
    let game = Game::new(&catalog_source, cli.speed.max(1), store);

    // Surface catalog problems before the alternate screen hides them.
    for diagnostic in game.catalog_diagnostics() {
        eprintln!("levels: {diagnostic}");
    }

    install_panic_hook();
    let result = run(game);
    cleanup_terminal()?;
    result
}

fn open_score_store(cli: &Cli) -> Box<dyn ScoreStore> {
    if cli.no_persist {
        return Box::new(MemoryScoreStore::new());
    }

    let path = cli
        .scores
        .clone()
        .unwrap_or_else(JsonScoreStore::default_path);
    match JsonScoreStore::open(path) {
        Ok(store) => Box::new(store),
        Err(error) => {
            eprintln!("High scores unavailable ({error}); continuing without persistence");
            Box::new(MemoryScoreStore::new())
        }
    }
}

struct App {
    game: Game,
    entries: Vec<LevelId>,
    selected: usize,
    show_scores: bool,
    screen: Screen,
    pending: Option<Direction>,
    last_tick: Instant,
}

fn run(game: Game) -> io::Result<()> {
    let mut terminal = setup_terminal()?;

    let entries = game.level_ids();
    let mut app = App {
        game,
        entries,
        selected: 0,
        show_scores: false,
        screen: Screen::Menu,
        pending: None,
        last_tick: Instant::now(),
    };

    loop {
        terminal.draw(|frame| {
            renderer::render(
                frame,
                &FrameView {
                    game: &app.game,
                    screen: app.screen,
                    entries: &app.entries,
                    selected: app.selected,
                    show_scores: app.show_scores,
                },
            )
        })?;

        if let Some(game_input) = input::poll_input(Duration::from_millis(config::INPUT_POLL_MS))? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }
            handle_input(&mut app, game_input);
        }

        if app.screen == Screen::Playing {
            let speed = app.game.level().map_or(1, |level| level.speed());
            if app.last_tick.elapsed() >= config::tick_interval_for_speed(speed) {
                app.game.step(app.pending.take());
                app.last_tick = Instant::now();

                if app.game.is_ended() {
                    app.screen = Screen::Ended;
                }
            }
        }
    }

    Ok(())
}

fn handle_input(app: &mut App, input: GameInput) {
    match app.screen {
        Screen::Menu => match input {
            GameInput::Direction(Direction::Up) => {
                app.selected = app.selected.saturating_sub(1);
            }
            GameInput::Direction(Direction::Down) => {
                if app.selected + 1 < app.entries.len() {
                    app.selected += 1;
                }
            }
            GameInput::Confirm => {
                if let Some(id) = app.entries.get(app.selected).cloned() {
                    if app.game.load(&id).is_ok() {
                        start_level(app);
                    }
                }
            }
            GameInput::ToggleScores => app.show_scores = !app.show_scores,
            _ => {}
        },
        Screen::Playing => match input {
            GameInput::Direction(direction) => app.pending = Some(direction),
            GameInput::Restart => reload_current(app),
            GameInput::Back => app.screen = Screen::Menu,
            _ => {}
        },
        Screen::Ended => match input {
            GameInput::Confirm => advance_or_menu(app),
            GameInput::Restart => reload_current(app),
            GameInput::Back => app.screen = Screen::Menu,
            _ => {}
        },
    }
}

fn advance_or_menu(app: &mut App) {
    let next = app
        .game
        .level()
        .and_then(|level| app.game.next_level_id(level.id()));

    match next {
        Some(id) if app.game.load(&id).is_ok() => start_level(app),
        _ => app.screen = Screen::Menu,
    }
}

fn reload_current(app: &mut App) {
    let current = app.game.level().map(|level| level.id().clone());
    if let Some(id) = current {
        if app.game.load(&id).is_ok() {
            start_level(app);
        }
    }
}

fn start_level(app: &mut App) {
    app.screen = Screen::Playing;
    app.pending = None;
    app.last_tick = Instant::now();
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
