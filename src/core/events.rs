//! Global events used for cross-system communication.
//!
//! The session step reports what happened in a frame; the plugin turns that
//! into events so other systems (logging, leaderboard) stay decoupled from
//! the simulation.

use bevy::prelude::*;

/// Sent when the hero levels up.
#[derive(Event, Debug, Clone)]
pub struct LevelUpEvent {
    /// New level
    pub new_level: u32,
}

/// Sent for every enemy removed after its hp reached 0.
#[derive(Event, Debug, Clone)]
pub struct EnemyKilledEvent {
    /// Where the enemy died
    pub position: Vec2,
    /// Session score after the reward
    pub score: u32,
}

/// Sent once when the hero dies and the run is over.
#[derive(Event, Debug, Clone)]
pub struct SessionEndedEvent {
    pub name: String,
    pub score: u32,
    pub elapsed_secs: f32,
}
