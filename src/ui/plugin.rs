//! UI plugin - class selection, pause and game over overlays, and the HUD.
//!
//! Everything is keyboard driven; the overlays only tell the player which
//! keys do what.

use bevy::prelude::*;

use super::hud;
use crate::core::GameState;
use crate::player::HeroClass;
use crate::session::{ActiveSession, Leaderboard};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Class selection
            .add_systems(OnEnter(GameState::HeroSelect), setup_hero_select)
            .add_systems(OnExit(GameState::HeroSelect), cleanup::<HeroSelectUi>)

            // Pause overlay
            .add_systems(OnEnter(GameState::Paused), setup_pause_overlay)
            .add_systems(OnExit(GameState::Paused), cleanup::<PauseUi>)

            // Game over
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup::<GameOverUi>);
    }
}

/// Marker for class selection UI entities.
#[derive(Component)]
struct HeroSelectUi;

/// Marker for pause overlay UI entities.
#[derive(Component)]
struct PauseUi;

/// Marker for game over UI entities.
#[derive(Component)]
struct GameOverUi;

fn setup_hero_select(mut commands: Commands) {
    let mut lines = vec![("ARENA HEROES".to_string(), 64.0, Color::srgb(0.8, 0.7, 0.6))];
    lines.push(("Choose your hero".to_string(), 24.0, Color::srgb(0.5, 0.5, 0.55)));
    for (i, class) in HeroClass::ALL.iter().enumerate() {
        lines.push((
            format!("[{}]  {}", i + 1, class),
            28.0,
            Color::srgb(0.8, 0.8, 0.85),
        ));
    }

    spawn_overlay(&mut commands, HeroSelectUi, Color::srgb(0.05, 0.05, 0.08), lines);
}

fn setup_pause_overlay(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        PauseUi,
        Color::srgba(0.0, 0.0, 0.0, 0.7),
        vec![
            ("PAUSED".to_string(), 48.0, Color::srgb(0.8, 0.8, 0.85)),
            ("Esc to resume".to_string(), 20.0, Color::srgb(0.5, 0.5, 0.55)),
        ],
    );
}

fn setup_game_over(
    mut commands: Commands,
    session: Option<Res<ActiveSession>>,
    leaderboard: Option<Res<Leaderboard>>,
) {
    let mut lines = vec![("YOU DIED".to_string(), 72.0, Color::srgb(0.8, 0.2, 0.2))];

    if let Some(session) = session {
        let record = session.0.record();
        lines.push((
            format!("Score {}   Time {:.1}s", record.score, record.elapsed_secs),
            28.0,
            Color::srgb(0.85, 0.85, 0.9),
        ));
    }

    if let Some(board) = leaderboard {
        lines.push(("Leaderboard".to_string(), 24.0, Color::srgb(0.8, 0.7, 0.6)));
        for (rank, entry) in board.entries().iter().enumerate() {
            lines.push((
                format!("{:>2}. {}", rank + 1, entry.to_line()),
                18.0,
                Color::srgb(0.7, 0.7, 0.75),
            ));
        }
    }

    lines.push((
        "Press 1, 2 or 3 to play again".to_string(),
        20.0,
        Color::srgb(0.5, 0.5, 0.55),
    ));

    spawn_overlay(&mut commands, GameOverUi, Color::srgba(0.1, 0.0, 0.0, 0.9), lines);
}

/// Full-screen column of centred text lines.
fn spawn_overlay<M: Component>(
    commands: &mut Commands,
    marker: M,
    background: Color,
    lines: Vec<(String, f32, Color)>,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(background),
            marker,
        ))
        .with_children(|parent| {
            for (text, size, color) in lines {
                parent.spawn((
                    Text::new(text),
                    TextFont {
                        font_size: size,
                        ..default()
                    },
                    TextColor(color),
                    Node {
                        margin: UiRect::bottom(Val::Px(12.0)),
                        ..default()
                    },
                ));
            }
        });
}

fn cleanup<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
