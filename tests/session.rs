//! Scenario tests driving whole runs through `Session::step`.

use arena_heroes::core::{GameConfig, GameEntity};
use arena_heroes::player::HeroClass;
use arena_heroes::session::{InputSnapshot, Session, StepOutcome};
use arena_heroes::world::TileMap;
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

/// Open walled room with `S` enemy spawn tiles at the given coordinates.
fn room(width: usize, height: usize, spawns: &[(usize, usize)]) -> TileMap {
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        '#'
                    } else if spawns.contains(&(x, y)) {
                        'S'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    TileMap::from_rows(&rows)
}

fn start(class: HeroClass, config: &GameConfig, map: TileMap) -> Session {
    Session::with_map(class, "Tester", config, map, StdRng::seed_from_u64(17))
}

fn run(session: &mut Session, input: &InputSnapshot, steps: usize) -> Vec<StepOutcome> {
    (0..steps).map(|_| session.step(input, DT)).collect()
}

#[test]
fn gun_hero_shoots_an_enemy_and_levels_up() {
    // Hero starts at the centre tile (10, 4); the enemy spawns 112 px east.
    let mut session = start(HeroClass::Gun, &GameConfig::default(), room(20, 9, &[(13, 4)]));
    assert_eq!(session.hero().position(), Vec2::new(320.0, 144.0));
    assert_eq!(session.enemies().len(), 1);

    let fire_east = InputSnapshot {
        aim: Vec2::X,
        attack: true,
        ..Default::default()
    };
    let outcomes = run(&mut session, &fire_east, 90);

    let kills: usize = outcomes.iter().map(|o| o.kills.len()).sum();
    let level_ups: Vec<u32> = outcomes.iter().flat_map(|o| o.level_ups.clone()).collect();
    assert_eq!(kills, 1);
    assert_eq!(level_ups, vec![2]);

    assert!(session.enemies().is_empty());
    assert_eq!(session.score(), 100);
    assert_eq!(session.enemies_killed(), 1);
    assert_eq!(session.hero().level(), 2);
    assert_eq!(session.hero().exp(), 15);
    assert_eq!(session.hero().hp(), 110);
}

#[test]
fn sword_swing_cuts_down_an_adjacent_enemy() {
    let mut session = start(HeroClass::Sword, &GameConfig::default(), room(20, 9, &[(11, 4)]));
    let swing = InputSnapshot {
        aim: Vec2::X,
        attack: true,
        ..Default::default()
    };

    // The blade deals the hero's attack damage on every frame of the swing.
    let outcomes = run(&mut session, &swing, 5);
    assert_eq!(outcomes[4].kills.len(), 1);
    assert!(outcomes[..4].iter().all(|o| o.kills.is_empty()));
    assert_eq!(session.score(), 100);
}

#[test]
fn enemy_contact_ends_the_run_once() {
    let mut config = GameConfig::default();
    config.hero.max_hp = 20;
    let mut session = start(HeroClass::Magic, &config, room(20, 9, &[(11, 4)]));

    let idle = InputSnapshot::default();
    let outcomes = run(&mut session, &idle, 300);

    let deaths = outcomes.iter().filter(|o| o.hero_died).count();
    assert_eq!(deaths, 1);
    assert!(session.is_over());
    assert_eq!(session.hero().hp(), 0);

    // Two hits 0.5 s apart, the first after the enemy's initial cooldown.
    let died_at = outcomes.iter().position(|o| o.hero_died).unwrap_or(usize::MAX);
    assert!((55..=70).contains(&died_at), "died at step {died_at}");

    let elapsed = session.elapsed_secs();
    assert_eq!(session.step(&idle, DT), StepOutcome::default());
    assert_eq!(session.elapsed_secs(), elapsed);

    let record = session.record();
    assert_eq!(record.name, "Tester");
    assert_eq!(record.score, 0);
    assert!((record.elapsed_secs - elapsed).abs() < f32::EPSILON);
}

#[test]
fn enemies_spawn_on_the_interval_inside_the_annulus() {
    let mut config = GameConfig::default();
    config.spawn.initial_enemies = 0;
    // Hero at (480, 144); spawn tiles 304 px west and 336 px east.
    let spawns = [Vec2::new(176.0, 144.0), Vec2::new(816.0, 144.0)];
    let mut session = start(HeroClass::Gun, &config, room(30, 9, &[(5, 4), (25, 4)]));
    assert!(session.enemies().is_empty());

    let outcomes = run(&mut session, &InputSnapshot::default(), 175);
    assert!(outcomes.iter().all(|o| o.spawned == 0));

    let outcomes = run(&mut session, &InputSnapshot::default(), 15);
    let spawned: usize = outcomes.iter().map(|o| o.spawned).sum();
    assert_eq!(spawned, 1);
    assert_eq!(session.enemies().len(), 1);

    // It has had at most a handful of frames to walk toward the hero.
    let enemy = session.enemies()[0].position();
    assert!(spawns.iter().any(|s| s.distance(enemy) < 20.0));
}

#[test]
fn distant_enemies_despawn_without_reward() {
    // Hero at (1280, 144); the only enemy starts 1200 px away.
    let mut session = start(HeroClass::Gun, &GameConfig::default(), room(80, 9, &[(77, 4)]));
    assert_eq!(session.enemies().len(), 1);

    let outcome = session.step(&InputSnapshot::default(), DT);
    assert_eq!(outcome.despawned, 1);
    assert!(outcome.kills.is_empty());
    assert!(session.enemies().is_empty());
    assert_eq!(session.score(), 0);
}

#[test]
fn walking_into_a_wall_is_rejected() {
    let mut session = start(HeroClass::Gun, &GameConfig::default(), room(20, 9, &[]));
    let north = InputSnapshot {
        movement: Vec2::new(0.0, -1.0),
        ..Default::default()
    };

    // 2.5 px per step; the top wall row ends at y = 32 and the hero's top
    // edge starts at 144 - 12 = 132.
    run(&mut session, &north, 200);
    let position = session.hero().position();
    assert!(position.y - 12.0 >= 32.0);
    assert!(position.y - 12.0 < 35.0);
    assert_eq!(position.x, 320.0);
}
