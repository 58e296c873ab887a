use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::level::Level;

/// Draws the one-line status bar and returns the remaining play area.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, level: &Level, best: u32, theme: &Theme) -> Rect {
    let [bar, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let line = Line::from(format!(
        " {}   score {}   best {}   speed {} ",
        level.id(),
        level.score(),
        best,
        level.speed(),
    ));
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(theme.hud_fg)),
        bar,
    );

    play_area
}
