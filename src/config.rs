use std::time::Duration;

use ratatui::style::Color;

/// Default initial snake speed, in ticks per second.
pub const INITIAL_SPEED: u32 = 10;

/// Slowest tick interval in milliseconds (speed 1).
pub const BASE_TICK_INTERVAL_MS: u64 = 1000;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// How long the driver waits on input between frames, in milliseconds.
pub const INPUT_POLL_MS: u64 = 16;

/// Returns the tick interval for a speed level. Speed counts up by one
/// per food eaten, so the interval shrinks toward the minimum as the
/// snake grows.
#[must_use]
pub fn tick_interval_for_speed(speed: u32) -> Duration {
    let ms = (BASE_TICK_INTERVAL_MS / u64::from(speed.max(1))).max(MIN_TICK_INTERVAL_MS);
    Duration::from_millis(ms)
}

/// A color theme applied to all visual elements.
///
/// Every tile renders as a solid colored block; the per-tile fields
/// give the block color for that tile kind.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub wall: Color,
    pub rock: Color,
    pub food: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub play_bg: Color,
    pub hud_fg: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic green snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    wall: Color::Gray,
    rock: Color::DarkGray,
    food: Color::Red,
    snake_head: Color::White,
    snake_body: Color::Green,
    play_bg: Color::Black,
    hud_fg: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};
