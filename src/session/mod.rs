//! Session module - a single run, its per-frame step and the leaderboard.

mod leaderboard;
mod plugin;
mod simulation;

pub use leaderboard::{Leaderboard, SessionRecord, LEADERBOARD_PATH, MAX_ENTRIES};
pub use plugin::{ActiveSession, PlayerName, SessionPlugin};
pub use simulation::{InputSnapshot, Session, StepOutcome};
