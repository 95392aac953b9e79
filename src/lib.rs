//! Arena Heroes - a top-down arena brawler in Bevy.
//!
//! A hero (sword, gun or magic) fights endless enemies in a single room
//! scattered with wall clusters, levelling up from kills until it falls.
//!
//! # Architecture
//!
//! The simulation is plain Rust, stepped once per frame by the session;
//! Bevy only samples input, draws, and moves between screens.
//!
//! - **Core**: Game states, global events, config, shared entity building blocks
//! - **World**: Tile map generation and passability queries
//! - **Player**: The hero, its classes, levelling and movement
//! - **Enemies**: Chase AI and spawn policy
//! - **Combat**: Projectiles, the sword, hit resolution
//! - **Session**: The per-frame step, input sampling, leaderboard
//! - **Rendering**: Camera and gizmo view
//! - **UI**: HUD and overlays

pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod rendering;
pub mod session;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Class selection, stepping, leaderboard
            .add_plugins(session::SessionPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
