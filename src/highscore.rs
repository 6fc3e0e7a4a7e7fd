//! High-score list and its on-disk store.
//!
//! The file is plain text, one integer per line. A missing or unreadable
//! file means "no scores yet"; malformed lines are skipped.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub const MAX_SCORES: usize = 20;
pub const SCORE_FILE: &str = "highscores.txt";

/// Up to `MAX_SCORES` scores, always sorted descending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighScoreList {
    scores: Vec<u32>,
    current: Option<u32>,
}

impl HighScoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from arbitrary scores, keeping the best `MAX_SCORES`.
    pub fn from_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_SCORES);
        HighScoreList {
            scores,
            current: None,
        }
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// The most recently added score.
    pub fn current_score(&self) -> Option<u32> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Record a finished run. The score is truncated to an integer; a short
    /// list always grows, a full one only replaces its minimum when beaten.
    /// Scores that are not finite and non-negative are discarded.
    pub fn add_score(&mut self, score: f64) -> Option<u32> {
        if !score.is_finite() || score < 0.0 {
            warn!(score, "Discarding invalid score");
            return None;
        }
        let s = score as u32;

        if self.scores.len() < MAX_SCORES {
            self.scores.push(s);
        } else if let Some(last) = self.scores.last_mut() {
            if s > *last {
                *last = s;
            }
        }

        self.current = Some(s);
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        debug!(scores = ?self.scores, "Score added");
        Some(s)
    }

    /// Position of the first entry equal to the current score.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current?;
        self.scores.iter().position(|&s| s == current)
    }
}

/// Parse the score file, skipping lines that are not integers.
pub fn parse_scores(text: &str) -> HighScoreList {
    let scores = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match line.parse::<u32>() {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(line, error = %e, "Skipping malformed score line");
                None
            }
        })
        .collect();
    HighScoreList::from_scores(scores)
}

// ── Persistence ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct HighScoreStore {
    dir: PathBuf,
}

impl HighScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        HighScoreStore { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SCORE_FILE)
    }

    pub fn load(&self) -> HighScoreList {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(text) => {
                let list = parse_scores(&text);
                info!(path = %path.display(), scores = ?list.scores(), "Loaded high scores");
                list
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => HighScoreList::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read high scores");
                HighScoreList::new()
            }
        }
    }

    /// Write the list, replacing the file in one step. An empty list leaves
    /// any existing file alone.
    pub fn save(&self, list: &HighScoreList) -> io::Result<()> {
        if list.is_empty() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)?;
        write_atomically(&self.path(), list.scores())?;
        info!(path = %self.path().display(), scores = ?list.scores(), "Saved high scores");
        Ok(())
    }
}

fn write_atomically(path: &Path, scores: &[u32]) -> io::Result<()> {
    let tmp = path.with_extension("txt.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        for s in scores {
            writeln!(file, "{s}")?;
        }
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}
