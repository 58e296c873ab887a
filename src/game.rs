use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::{self, CatalogDiagnostic};
use crate::input::Direction;
use crate::level::{Level, LevelId};
use crate::score::{HighScore, ScoreStore};

/// Errors reported by the game coordinator.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no such level: {0}")]
    UnknownLevel(LevelId),
}

/// Catalog of level templates, the active working copy, and the score
/// persistence coordination.
///
/// The catalog holds pristine templates that are never played; `load`
/// replaces the active slot wholesale with a fresh copy, so restarting
/// a level discards all in-progress state.
pub struct Game {
    catalog: BTreeMap<String, BTreeMap<u32, Level>>,
    active: Option<Level>,
    store: Box<dyn ScoreStore>,
    better_high_score: bool,
    diagnostics: Vec<CatalogDiagnostic>,
}

impl Game {
    /// Parses the catalog source and registers a zero score for every
    /// level it contains. The bootstrap registration never clobbers a
    /// better score the store already knows.
    #[must_use]
    pub fn new(catalog_source: &str, initial_speed: u32, mut store: Box<dyn ScoreStore>) -> Self {
        let parsed = catalog::parse_catalog(catalog_source, initial_speed);

        let mut catalog: BTreeMap<String, BTreeMap<u32, Level>> = BTreeMap::new();
        for level in parsed.levels {
            store.store(level.id(), 0);
            catalog
                .entry(level.id().difficulty().to_string())
                .or_default()
                .insert(level.id().number(), level);
        }

        Self {
            catalog,
            active: None,
            store,
            better_high_score: false,
            diagnostics: parsed.diagnostics,
        }
    }

    /// Replaces the active level with a fresh working copy of the
    /// template for `id`. On an unknown identifier the active level, if
    /// any, stays as it was.
    pub fn load(&mut self, id: &LevelId) -> Result<(), GameError> {
        let template = self
            .catalog
            .get(id.difficulty())
            .and_then(|levels| levels.get(&id.number()))
            .ok_or_else(|| GameError::UnknownLevel(id.clone()))?;

        self.active = Some(template.fresh_start());
        self.better_high_score = false;
        Ok(())
    }

    /// Advances the active level one tick. Returns false when no level
    /// is loaded or the move did not step (level ended or ending).
    ///
    /// The Active-to-Ended transition records `(id, score)` through the
    /// persistence capability exactly once; the store's acceptance is
    /// latched as the better-high-score flag until the next `load`.
    pub fn step(&mut self, direction: Option<Direction>) -> bool {
        let Some(level) = self.active.as_mut() else {
            return false;
        };

        let was_ended = level.is_ended();
        let stepped = level.move_snake(direction);

        if !was_ended && level.is_ended() {
            self.better_high_score = self.store.store(level.id(), level.score());
        }

        stepped
    }

    /// Returns the identifier one level number up in the same
    /// difficulty, when the catalog has it.
    #[must_use]
    pub fn next_level_id(&self, current: &LevelId) -> Option<LevelId> {
        let levels = self.catalog.get(current.difficulty())?;
        let next = current.number() + 1;
        levels
            .contains_key(&next)
            .then(|| LevelId::new(current.difficulty(), next))
    }

    /// Difficulties present in the catalog, sorted.
    #[must_use]
    pub fn difficulties(&self) -> Vec<&str> {
        self.catalog.keys().map(String::as_str).collect()
    }

    /// Level numbers defined for a difficulty, sorted; None when the
    /// difficulty is unknown.
    #[must_use]
    pub fn level_numbers(&self, difficulty: &str) -> Option<Vec<u32>> {
        self.catalog
            .get(difficulty)
            .map(|levels| levels.keys().copied().collect())
    }

    /// All level identifiers, grouped by difficulty then number.
    #[must_use]
    pub fn level_ids(&self) -> Vec<LevelId> {
        self.catalog
            .iter()
            .flat_map(|(difficulty, levels)| {
                levels
                    .keys()
                    .map(|&number| LevelId::new(difficulty, number))
            })
            .collect()
    }

    #[must_use]
    pub fn is_level_loaded(&self) -> bool {
        self.active.is_some()
    }

    /// Read-only view of the active level for rendering.
    #[must_use]
    pub fn level(&self) -> Option<&Level> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.active.as_ref().map_or(0, Level::score)
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.active.as_ref().is_some_and(Level::is_ended)
    }

    #[must_use]
    pub fn is_better_high_score(&self) -> bool {
        self.better_high_score
    }

    /// Full high-score listing, delegated to the persistence capability.
    #[must_use]
    pub fn high_scores(&self) -> Vec<HighScore> {
        self.store.load_all()
    }

    /// Best known score for one level; zero when none is recorded.
    #[must_use]
    pub fn high_score_for(&self, id: &LevelId) -> u32 {
        self.store
            .load_all()
            .into_iter()
            .find(|entry| entry.id() == *id)
            .map_or(0, |entry| entry.score)
    }

    /// Diagnostics collected while parsing the catalog, for the driver
    /// to surface before entering raw mode.
    #[must_use]
    pub fn catalog_diagnostics(&self) -> &[CatalogDiagnostic] {
        &self.diagnostics
    }
}
