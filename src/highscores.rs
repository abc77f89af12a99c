//! Best score persistence
//!
//! One integer survives across sessions. Storage is best effort: a missing
//! or unreadable file reads as zero, and write failures are logged and
//! swallowed so they can never take down a run.

use std::fs;
use std::path::PathBuf;

/// Default score file, relative to the working directory
pub const DEFAULT_SCORE_PATH: &str = "cube_dash_highscore.txt";

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// Best score on record, zero when there is none
    fn load(&self) -> u32;

    /// Record a new best. Must not panic on storage failure.
    fn save(&mut self, score: u32);
}

/// Plain text file holding a single integer
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match text.trim().parse() {
                Ok(score) => score,
                Err(_) => {
                    log::warn!(
                        "Score file {} is unreadable, starting fresh",
                        self.path.display()
                    );
                    0
                }
            },
            Err(_) => {
                log::info!("No score file at {}, starting fresh", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(err) = fs::write(&self.path, score.to_string()) {
            log::warn!("Could not save score to {}: {}", self.path.display(), err);
        }
    }
}

/// In-memory store for tests and headless sessions
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) {
        self.best = score;
    }
}
