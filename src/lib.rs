//! Level-based snake simulation with a terminal front end.
//!
//! The core (`snake`, `level`, `catalog`, `game`, `score`) is a
//! deterministic, externally paced simulation: the driver feeds one
//! directional intent per tick and reads state back through read-only
//! accessors. The `renderer` and `ui` modules draw that state with
//! ratatui and never mutate it.

pub mod catalog;
pub mod config;
pub mod game;
pub mod input;
pub mod level;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod tile;
pub mod ui;
