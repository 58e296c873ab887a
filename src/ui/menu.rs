use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};

use crate::config::Theme;
use crate::level::{Level, LevelId};
use crate::score::HighScore;

/// Draws the level-select menu, or the high-score table when toggled.
pub fn render_level_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    entries: &[LevelId],
    selected: usize,
    high_scores: &[HighScore],
    show_scores: bool,
    theme: &Theme,
) {
    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(area);

    let title = if show_scores { "HIGH SCORES" } else { "SNAKE ARCADE" };
    frame.render_widget(
        Paragraph::new(Line::from(title))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body: Vec<Line<'_>> = if show_scores {
        high_scores
            .iter()
            .map(|entry| Line::from(format!("{}-{}  {:>4}", entry.difficulty, entry.number, entry.score)))
            .collect()
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let line = Line::from(id.to_string());
                if index == selected {
                    line.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(body).alignment(Alignment::Center),
        body_row,
    );

    let footer = if show_scores {
        "[H] back to levels   [Q] quit"
    } else {
        "[Up/Down] select   [Enter] play   [H] high scores   [Q] quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(footer))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the end-of-level popup over the board.
pub fn render_end_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    level: &Level,
    better_high_score: bool,
    has_next: bool,
    theme: &Theme,
) {
    let popup = centered_popup(area, 60, 45);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("GAME OVER"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut body = vec![Line::from(format!("{}  score {}", level.id(), level.score()))];
    if better_high_score {
        body.push(Line::from("New high score!"));
    }
    body.push(Line::from(""));
    if has_next {
        body.push(Line::from("[Enter] next level"));
    } else {
        body.push(Line::from("[Enter] back to menu"));
    }
    body.push(Line::from("[R] retry   [Esc] menu"));

    frame.render_widget(
        Paragraph::new(body).alignment(Alignment::Center),
        body_row,
    );
}

/// Returns a rect covering the given percentage of `area`, centered.
fn centered_popup(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, popup, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    popup
}
