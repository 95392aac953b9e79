//! Core plugin that sets up game states, events, config and pausing.

use bevy::prelude::*;

use super::config::load_game_config;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (HeroSelect, InGame, Paused, GameOver)
/// - Global events (LevelUpEvent, EnemyKilledEvent, SessionEndedEvent)
/// - The `GameConfig` resource
/// - Pause toggling
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<LevelUpEvent>()
            .add_event::<EnemyKilledEvent>()
            .add_event::<SessionEndedEvent>()

            // Tuning must be in place before any session starts
            .add_systems(PreStartup, load_game_config)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused)))
            )

            // End-of-run summary in the log
            .add_systems(Update, log_milestones);
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

fn log_milestones(mut ended: EventReader<SessionEndedEvent>) {
    for event in ended.read() {
        info!(
            "Run over: {} scored {} in {:.1}s",
            event.name, event.score, event.elapsed_secs
        );
    }
}
