//! Arena Heroes - Entry Point
//!
//! Controls:
//! - 1 / 2 / 3: Pick the sword, gun or magic hero
//! - WASD: Move
//! - Mouse: Aim
//! - Left mouse / Space: Attack
//! - Right mouse / Q: Skill
//! - Escape: Pause/Unpause

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arena Heroes".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Our game plugin
        .add_plugins(arena_heroes::ArenaPlugin)

        .run();
}
