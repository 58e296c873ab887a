use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{THEME_CLASSIC, Theme};
use crate::game::Game;
use crate::level::{Level, LevelId};
use crate::tile::Tile;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_end_popup, render_level_menu};

/// Which screen the driver is currently showing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Menu,
    Playing,
    Ended,
}

/// Read-only snapshot of everything one frame needs.
pub struct FrameView<'a> {
    pub game: &'a Game,
    pub screen: Screen,
    pub entries: &'a [LevelId],
    pub selected: usize,
    pub show_scores: bool,
}

/// Renders the full frame from immutable state.
pub fn render(frame: &mut Frame<'_>, view: &FrameView<'_>) {
    let theme = &THEME_CLASSIC;
    let area = frame.area();

    match view.screen {
        Screen::Menu => {
            let high_scores = view.game.high_scores();
            render_level_menu(
                frame,
                area,
                view.entries,
                view.selected,
                &high_scores,
                view.show_scores,
                theme,
            );
        }
        Screen::Playing | Screen::Ended => {
            let Some(level) = view.game.level() else {
                return;
            };

            let best = view.game.high_score_for(level.id());
            let play_area = render_hud(frame, area, level, best, theme);
            render_board(frame, play_area, level, theme);

            if view.screen == Screen::Ended {
                let has_next = view.game.next_level_id(level.id()).is_some();
                render_end_popup(
                    frame,
                    area,
                    level,
                    view.game.is_better_high_score(),
                    has_next,
                    theme,
                );
            }
        }
    }
}

/// Draws the tile grid centered in `area`, two terminal columns per
/// cell so cells come out roughly square.
fn render_board(frame: &mut Frame<'_>, area: Rect, level: &Level, theme: &Theme) {
    let width = (level.cols() as u16).saturating_mul(2).min(area.width);
    let height = (level.rows() as u16).min(area.height);
    let board = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let mut lines = Vec::with_capacity(level.rows());
    for row in 0..level.rows() {
        let spans: Vec<Span<'_>> = (0..level.cols())
            .map(|col| tile_span(level.tile_at(row, col), theme))
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), board);
}

fn tile_span(tile: Tile, theme: &Theme) -> Span<'static> {
    let color = match tile {
        Tile::Wall => theme.wall,
        Tile::Rock => theme.rock,
        Tile::Food => theme.food,
        Tile::SnakeHead => theme.snake_head,
        Tile::SnakeBody => theme.snake_body,
        Tile::Empty => theme.play_bg,
    };
    Span::styled("  ", Style::default().bg(color))
}
