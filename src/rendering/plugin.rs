//! Rendering plugin - a 2D camera following the hero and gizmo outlines of
//! the arena.
//!
//! The simulation measures y downward (row 0 is the top of the map) while
//! Bevy's 2D world points y up, so every position is flipped on the way in
//! and out.

use bevy::prelude::*;

use super::view;
use crate::core::{EnemyKilledEvent, GameEntity, GameState, LevelUpEvent};
use crate::session::ActiveSession;

/// Marker for the single gameplay camera.
#[derive(Component)]
pub struct ArenaCamera;

/// Configuration for the arena view.
#[derive(Resource)]
pub struct RenderConfig {
    /// Seconds a kill burst stays on screen
    pub kill_flash_secs: f32,
    /// Seconds the level-up ring stays on screen
    pub level_up_flash_secs: f32,
    /// Extra world units drawn around the visible window
    pub cull_margin: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            kill_flash_secs: 0.3,
            level_up_flash_secs: 0.8,
            cull_margin: 64.0,
        }
    }
}

/// Short-lived ring drawn at a world point.
#[derive(Debug, Clone)]
pub struct Flash {
    pub position: Vec2,
    pub color: Color,
    pub radius: f32,
    pub remaining: f32,
    pub duration: f32,
}

/// Active flashes, oldest first.
#[derive(Resource, Default)]
pub struct Flashes(pub Vec<Flash>);

/// Rendering plugin - camera, arena gizmos and hit flashes.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RenderConfig::default())
            .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
            .init_resource::<Flashes>()
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(GameState::InGame), clear_stale_flashes)
            .add_systems(
                Update,
                (
                    camera_follow_hero,
                    (queue_flashes, age_flashes).chain(),
                    view::draw_arena,
                    view::draw_flashes,
                )
                    .run_if(resource_exists::<ActiveSession>),
            );
    }
}

/// Convert a simulation point to Bevy's y-up world space.
pub fn world_to_screen(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

/// Convert a Bevy world point back to simulation space.
pub fn screen_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, ArenaCamera));
}

fn camera_follow_hero(
    session: Res<ActiveSession>,
    mut camera_query: Query<&mut Transform, With<ArenaCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    let target = world_to_screen(session.0.hero().position());
    transform.translation.x = target.x;
    transform.translation.y = target.y;
}

fn queue_flashes(
    config: Res<RenderConfig>,
    session: Res<ActiveSession>,
    mut kills: EventReader<EnemyKilledEvent>,
    mut level_ups: EventReader<LevelUpEvent>,
    mut flashes: ResMut<Flashes>,
) {
    for kill in kills.read() {
        flashes.0.push(Flash {
            position: kill.position,
            color: Color::srgb(1.0, 0.5, 0.1),
            radius: 18.0,
            remaining: config.kill_flash_secs,
            duration: config.kill_flash_secs,
        });
    }

    for _ in level_ups.read() {
        flashes.0.push(Flash {
            position: session.0.hero().position(),
            color: Color::srgb(1.0, 0.85, 0.2),
            radius: 36.0,
            remaining: config.level_up_flash_secs,
            duration: config.level_up_flash_secs,
        });
    }
}

fn age_flashes(time: Res<Time>, mut flashes: ResMut<Flashes>) {
    let dt = time.delta_secs();
    flashes.0.retain_mut(|flash| {
        flash.remaining -= dt;
        flash.remaining > 0.0
    });
}

fn clear_stale_flashes(mut flashes: ResMut<Flashes>, session: Option<Res<ActiveSession>>) {
    // Resuming from pause keeps them; a brand new run does not.
    if session.is_some_and(|s| s.0.elapsed_secs() == 0.0) {
        flashes.0.clear();
    }
}
