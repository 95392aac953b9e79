//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example, the
//! simulation only steps in the InGame state, while class selection input
//! is only read in HeroSelect.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `HeroSelect` and pick a class
/// - `InGame` steps the session every frame
/// - `Paused` freezes the session but keeps the arena visible
/// - `GameOver` once the hero dies; any class key starts a new run
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Class selection screen
    #[default]
    HeroSelect,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Hero has died, score recorded
    GameOver,
}
