//! Top-ten table of finished runs, kept in a plain text file.
//!
//! One run per line: `<name> - Score: <score> - Time: <seconds>s`.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use bevy::prelude::*;

use crate::core::DataLoadError;

/// Default location of the leaderboard, relative to the working directory.
pub const LEADERBOARD_PATH: &str = "leaderboard.txt";
/// Runs kept after sorting.
pub const MAX_ENTRIES: usize = 10;

const SCORE_SEPARATOR: &str = " - Score: ";
const TIME_SEPARATOR: &str = " - Time: ";

/// What a finished run contributes to the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub name: String,
    pub score: u32,
    pub elapsed_secs: f32,
}

impl SessionRecord {
    /// Parse one leaderboard line. `None` if it is malformed.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (name, rest) = line.rsplit_once(SCORE_SEPARATOR)?;
        let (score, time) = rest.split_once(TIME_SEPARATOR)?;

        let score = score.trim().parse().ok()?;
        let elapsed_secs: f32 = time.trim().strip_suffix('s')?.trim().parse().ok()?;
        if !elapsed_secs.is_finite() || elapsed_secs < 0.0 {
            return None;
        }

        Some(Self {
            name: name.trim().to_string(),
            score,
            elapsed_secs,
        })
    }

    pub fn to_line(&self) -> String {
        format!(
            "{}{}{}{}{:.2}s",
            self.name, SCORE_SEPARATOR, self.score, TIME_SEPARATOR, self.elapsed_secs
        )
    }

    /// Higher score first, then the faster run.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.elapsed_secs.total_cmp(&other.elapsed_secs))
    }
}

/// Best runs, sorted and capped at [`MAX_ENTRIES`].
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<SessionRecord>,
}

impl Leaderboard {
    /// Build from file contents. Malformed lines are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match SessionRecord::parse_line(line) {
                Some(record) => entries.push(record),
                None => warn!("Skipping malformed leaderboard line {}: '{}'", number + 1, line),
            }
        }

        let mut board = Self { entries };
        board.sort_and_truncate();
        board
    }

    /// Add a run. Returns its 0-based rank if it made the table.
    pub fn insert(&mut self, record: SessionRecord) -> Option<usize> {
        let position = self
            .entries
            .iter()
            .position(|existing| record.rank(existing) == Ordering::Less)
            .unwrap_or(self.entries.len());

        self.entries.insert(position, record);
        self.sort_and_truncate();
        (position < MAX_ENTRIES).then_some(position)
    }

    fn sort_and_truncate(&mut self) {
        self.entries.sort_by(SessionRecord::rank);
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn entries(&self) -> &[SessionRecord] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.to_line() + "\n")
            .collect()
    }

    /// Read the table from disk. A missing file is an empty table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Ok(Self::parse(&text))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DataLoadError> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(|e| DataLoadError::WriteError {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: u32, elapsed_secs: f32) -> SessionRecord {
        SessionRecord {
            name: name.to_string(),
            score,
            elapsed_secs,
        }
    }

    #[test]
    fn parses_lines_and_skips_garbage() {
        let board = Leaderboard::parse(
            "Ann - Score: 300 - Time: 61.50s\n\
             not a leaderboard line\n\
             Bob - Score: lots - Time: 3s\n\
             Dash - Name - Score: 500 - Time: 12s\n",
        );

        assert_eq!(
            board.entries(),
            &[record("Dash - Name", 500, 12.0), record("Ann", 300, 61.5)]
        );
    }

    #[test]
    fn ties_go_to_the_faster_run() {
        let mut board = Leaderboard::default();
        board.insert(record("Slow", 200, 90.0));
        board.insert(record("Fast", 200, 30.0));
        board.insert(record("Best", 400, 120.0));

        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Best", "Fast", "Slow"]);
    }

    #[test]
    fn keeps_only_the_top_ten() {
        let mut board = Leaderboard::default();
        for score in 1..=12 {
            board.insert(record("Hero", score * 100, 10.0));
        }
        assert_eq!(board.entries().len(), MAX_ENTRIES);
        assert_eq!(board.entries()[0].score, 1200);
        assert_eq!(board.entries()[9].score, 300);

        assert_eq!(board.insert(record("Late", 50, 1.0)), None);
        assert_eq!(board.insert(record("Top", 5000, 1.0)), Some(0));
    }

    #[test]
    fn text_survives_a_reload() {
        let mut board = Leaderboard::default();
        board.insert(record("Hero", 1200, 75.25));
        board.insert(record("Mage", 800, 41.0));

        let text = board.to_text();
        assert_eq!(text.lines().next(), Some("Hero - Score: 1200 - Time: 75.25s"));
        assert_eq!(Leaderboard::parse(&text), board);
    }

    #[test]
    fn missing_file_is_an_empty_board() {
        let board = Leaderboard::load("no/such/leaderboard.txt").expect("missing file is fine");
        assert!(board.is_empty());
    }

    #[test]
    fn save_and_load_through_disk() {
        let path = std::env::temp_dir().join(format!(
            "arena-heroes-leaderboard-{}.txt",
            std::process::id()
        ));
        let mut board = Leaderboard::default();
        board.insert(record("Disk", 700, 20.0));
        board.save(&path).expect("temp dir is writable");

        let loaded = Leaderboard::load(&path).expect("file was just written");
        assert_eq!(loaded, board);
        let _ = fs::remove_file(&path);
    }
}
