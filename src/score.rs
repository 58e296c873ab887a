use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::level::LevelId;

const APP_DIR_NAME: &str = "snake-arcade";
const SCORE_FILE_NAME: &str = "scores.json";

/// One recorded best score for a level.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub difficulty: String,
    pub number: u32,
    pub score: u32,
}

impl HighScore {
    #[must_use]
    pub fn id(&self) -> LevelId {
        LevelId::new(&self.difficulty, self.number)
    }
}

/// Persistence capability consumed by the game.
///
/// `store` submits a score for a level and reports whether the stored
/// value changed: a submission is accepted iff it exceeds the currently
/// known score, or the known score is exactly zero (the bootstrap case
/// used when levels are registered at startup).
pub trait ScoreStore {
    fn store(&mut self, id: &LevelId, score: u32) -> bool;
    fn load_all(&self) -> Vec<HighScore>;
}

fn merge(scores: &mut BTreeMap<LevelId, u32>, id: &LevelId, score: u32) -> bool {
    match scores.get(id) {
        Some(&known) if score <= known && known != 0 => false,
        _ => {
            scores.insert(id.clone(), score);
            true
        }
    }
}

fn entries(scores: &BTreeMap<LevelId, u32>) -> Vec<HighScore> {
    scores
        .iter()
        .map(|(id, &score)| HighScore {
            difficulty: id.difficulty().to_string(),
            number: id.number(),
            score,
        })
        .collect()
}

/// Volatile in-memory score board.
///
/// Used directly in tests and as the degraded mode when the score file
/// cannot be opened; "is better" is then computed against the best
/// score seen this process.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: BTreeMap<LevelId, u32>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn store(&mut self, id: &LevelId, score: u32) -> bool {
        merge(&mut self.scores, id, score)
    }

    fn load_all(&self) -> Vec<HighScore> {
        entries(&self.scores)
    }
}

/// Score board backed by a JSON file.
///
/// Scores are held in memory and the file is rewritten whenever a
/// non-zero score is accepted, so the zero entries registered at
/// startup never reach disk. A write failure is reported on stderr and
/// the store keeps working in memory.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    scores: BTreeMap<LevelId, u32>,
}

impl JsonScoreStore {
    /// Returns the platform-correct default score file path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.push(APP_DIR_NAME);
        base.push(SCORE_FILE_NAME);
        base
    }

    /// Opens the store, loading any previously saved scores.
    ///
    /// A missing file is a first run and yields an empty board. A file
    /// that exists but cannot be read or parsed is an error, so the
    /// caller can surface a warning before entering raw terminal mode.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let scores = load_scores(&path)?;
        Ok(Self { path, scores })
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload: Vec<HighScore> = self
            .scores
            .iter()
            .filter(|&(_, &score)| score > 0)
            .map(|(id, &score)| HighScore {
                difficulty: id.difficulty().to_string(),
                number: id.number(),
                score,
            })
            .collect();
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

        fs::write(&self.path, json)
    }
}

impl ScoreStore for JsonScoreStore {
    fn store(&mut self, id: &LevelId, score: u32) -> bool {
        let accepted = merge(&mut self.scores, id, score);

        if accepted && score > 0 {
            if let Err(error) = self.persist() {
                eprintln!("Failed to save high scores: {error}");
            }
        }

        accepted
    }

    fn load_all(&self) -> Vec<HighScore> {
        entries(&self.scores)
    }
}

fn load_scores(path: &Path) -> io::Result<BTreeMap<LevelId, u32>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e),
    };

    let saved: Vec<HighScore> = serde_json::from_str(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(saved
        .into_iter()
        .map(|entry| (entry.id(), entry.score))
        .collect())
}
