//! Session plugin - class selection, per-frame input, stepping and the
//! leaderboard.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::leaderboard::{Leaderboard, SessionRecord, LEADERBOARD_PATH};
use super::simulation::{InputSnapshot, Session};
use crate::core::{
    EnemyKilledEvent, GameConfig, GameEntity, GameState, LevelUpEvent, SessionEndedEvent,
};
use crate::player::HeroClass;
use crate::rendering::{screen_to_world, ArenaCamera};

/// The run currently being played, if any.
#[derive(Resource)]
pub struct ActiveSession(pub Session);

/// Name recorded on the leaderboard.
#[derive(Resource, Debug, Clone)]
pub struct PlayerName(pub String);

impl Default for PlayerName {
    fn default() -> Self {
        Self("Hero".to_string())
    }
}

/// Session plugin - owns the run and drives it from player input.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputSnapshot>()
            .init_resource::<PlayerName>()

            // Persisted results
            .add_systems(Startup, load_leaderboard)

            // Class selection, also used to start over after dying
            .add_systems(OnEnter(GameState::HeroSelect), announce_classes)
            .add_systems(
                Update,
                choose_hero.run_if(in_state(GameState::HeroSelect).or(in_state(GameState::GameOver))),
            )

            // Gameplay: sample input, then step once
            .add_systems(
                Update,
                (sample_input, step_session)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            .add_systems(Update, record_finished_session.after(step_session));
    }
}

fn load_leaderboard(mut commands: Commands) {
    let board = match Leaderboard::load(LEADERBOARD_PATH) {
        Ok(board) => {
            info!("Loaded {} leaderboard entries", board.entries().len());
            board
        }
        Err(e) => {
            error!("{}. Starting with an empty leaderboard.", e);
            Leaderboard::default()
        }
    };
    commands.insert_resource(board);
}

fn announce_classes() {
    for (i, class) in HeroClass::ALL.iter().enumerate() {
        info!("Press {} for {}", i + 1, class);
    }
}

/// Keys 1/2/3 pick a class and start a new run.
fn choose_hero(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    name: Res<PlayerName>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let class = if keyboard.any_just_pressed([KeyCode::Digit1, KeyCode::Numpad1]) {
        HeroClass::Sword
    } else if keyboard.any_just_pressed([KeyCode::Digit2, KeyCode::Numpad2]) {
        HeroClass::Gun
    } else if keyboard.any_just_pressed([KeyCode::Digit3, KeyCode::Numpad3]) {
        HeroClass::Magic
    } else {
        return;
    };

    let session = Session::new(class, name.0.clone(), &config, StdRng::from_entropy());
    commands.insert_resource(ActiveSession(session));
    next_state.set(GameState::InGame);
}

/// Read keyboard and mouse into this frame's [`InputSnapshot`].
///
/// WASD or arrows move, the cursor aims, left mouse or Space attacks, right
/// mouse or Q uses the skill.
fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<ArenaCamera>>,
    session: Option<Res<ActiveSession>>,
    mut input: ResMut<InputSnapshot>,
) {
    let mut movement = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        movement.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        movement.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        movement.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        movement.x += 1.0;
    }

    let cursor = window_query
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .and_then(|cursor| {
            let (camera, transform) = camera_query.get_single().ok()?;
            camera.viewport_to_world_2d(transform, cursor).ok()
        })
        .map(screen_to_world);

    let aim = match (cursor, session.as_deref()) {
        (Some(target), Some(active)) => target - active.0.hero().position(),
        _ => movement,
    };

    *input = InputSnapshot {
        movement,
        aim,
        attack: mouse.pressed(MouseButton::Left) || keyboard.pressed(KeyCode::Space),
        skill: mouse.pressed(MouseButton::Right) || keyboard.pressed(KeyCode::KeyQ),
    };
}

/// Advance the run and report what happened.
fn step_session(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    session: Option<ResMut<ActiveSession>>,
    mut level_ups: EventWriter<LevelUpEvent>,
    mut kills: EventWriter<EnemyKilledEvent>,
    mut ended: EventWriter<SessionEndedEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut session) = session else {
        return;
    };

    let outcome = session.0.step(&input, time.delta_secs());
    let score = session.0.score();

    for position in outcome.kills {
        kills.send(EnemyKilledEvent { position, score });
    }
    for new_level in outcome.level_ups {
        level_ups.send(LevelUpEvent { new_level });
    }

    if outcome.hero_died {
        let SessionRecord {
            name,
            score,
            elapsed_secs,
        } = session.0.record();
        ended.send(SessionEndedEvent {
            name,
            score,
            elapsed_secs,
        });
        next_state.set(GameState::GameOver);
    }
}

/// Merge a finished run into the leaderboard and write it out.
fn record_finished_session(
    mut ended: EventReader<SessionEndedEvent>,
    mut board: ResMut<Leaderboard>,
) {
    for event in ended.read() {
        let rank = board.insert(SessionRecord {
            name: event.name.clone(),
            score: event.score,
            elapsed_secs: event.elapsed_secs,
        });
        match rank {
            Some(rank) => info!("New leaderboard entry at #{}", rank + 1),
            None => info!("Score did not make the leaderboard"),
        }

        if let Err(e) = board.save(LEADERBOARD_PATH) {
            error!("{}", e);
        }
    }
}
