//! Property-based tests using proptest
//!
//! Invariants that must hold for all inputs:
//! - Damage: armor never blocks the last point, hp never goes negative
//! - Levelling: one level per gain, stats grow by fixed steps
//! - Map: walled ring, spawn points reachable and far from the hero
//! - Animation: looping wraps, one-shot clamps
//! - Weapons: straight-line flight, cooldown gating

use arena_heroes::combat::{Projectile, WeaponKind};
use arena_heroes::core::{geometry, Animation, EnemyConfig, GameEntity, HeroConfig};
use arena_heroes::enemies::Enemy;
use arena_heroes::player::{exp_for_level, Hero, HeroClass};
use arena_heroes::world::{TileKind, TileMap};
use bevy::math::{URect, UVec2, Vec2};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hero_with_armor(armor: i32) -> Hero {
    let stats = HeroConfig {
        armor,
        ..Default::default()
    };
    Hero::new(HeroClass::Gun, "Prop", Vec2::new(100.0, 100.0), &stats)
}

// ============================================================
// Damage and levelling
// ============================================================

proptest! {
    #[test]
    fn prop_hero_damage_is_at_least_one(damage in -50i32..500, armor in 0i32..60) {
        let mut hero = hero_with_armor(armor);
        let before = hero.hp();
        hero.take_damage(damage);

        let expected = (before - (damage - armor).max(1)).max(0);
        prop_assert_eq!(hero.hp(), expected);
        prop_assert!(hero.hp() >= 0);
        prop_assert_eq!(hero.is_alive(), hero.hp() > 0);
    }

    #[test]
    fn prop_death_is_permanent(hits in proptest::collection::vec(0i32..80, 1..40)) {
        let mut hero = hero_with_armor(0);
        let mut died = false;
        for hit in hits {
            hero.take_damage(hit);
            if died {
                prop_assert!(!hero.is_alive());
                prop_assert_eq!(hero.hp(), 0);
            }
            died |= !hero.is_alive();
        }
    }

    #[test]
    fn prop_enemy_hp_clamps_at_zero(hits in proptest::collection::vec(0i32..60, 1..10)) {
        let mut enemy = Enemy::new(Vec2::ZERO, &EnemyConfig::default());
        let total: i32 = hits.iter().sum();
        for hit in &hits {
            enemy.take_damage(*hit);
        }
        prop_assert_eq!(enemy.hp(), (50 - total).max(0));
        prop_assert_eq!(enemy.is_alive(), total < 50);
    }

    #[test]
    fn prop_single_level_per_gain(amount in 10i32..5000) {
        let mut hero = hero_with_armor(0);
        prop_assert!(hero.gain_exp(amount));
        prop_assert_eq!(hero.level(), 2);
        prop_assert_eq!(hero.exp(), amount - 10);
        prop_assert_eq!(hero.max_hp(), 110);
        prop_assert_eq!(hero.hp(), 110);
        prop_assert_eq!(hero.speed(), 155.0);
        prop_assert_eq!(hero.attack_damage(), 12);
        prop_assert_eq!(hero.exp_to_next_level(), exp_for_level(2));
    }

    #[test]
    fn prop_below_threshold_keeps_level(amount in 0i32..10) {
        let mut hero = hero_with_armor(0);
        prop_assert!(!hero.gain_exp(amount));
        prop_assert_eq!(hero.level(), 1);
        prop_assert_eq!(hero.exp(), amount);
    }
}

// ============================================================
// Map generation
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_any_seed_generates_valid_map(seed in any::<u64>()) {
        let map = TileMap::generate(&mut StdRng::seed_from_u64(seed));

        for (coord, tile) in map.tiles() {
            let edge = coord.x == 0
                || coord.y == 0
                || coord.x == map.width() - 1
                || coord.y == map.height() - 1;
            if edge {
                prop_assert_eq!(tile.kind, TileKind::Wall);
            }
        }

        prop_assert!(map.is_passable(map.player_spawn()));
        prop_assert!(map.enemy_spawns().len() <= 50);
        for spawn in map.enemy_spawns() {
            prop_assert!(map.is_passable(*spawn));
            prop_assert!(geometry::distance(*spawn, map.player_spawn()) > 200.0);
        }
    }

    #[test]
    fn prop_outside_grid_is_impassable(seed in any::<u64>(), x in -5000.0f32..-0.01, y in -5000.0f32..5000.0) {
        let map = TileMap::generate(&mut StdRng::seed_from_u64(seed));
        prop_assert!(!map.is_passable(Vec2::new(x, y)));
        prop_assert!(!map.is_passable(Vec2::new(y, x)));
        let size = map.world_size();
        prop_assert!(!map.is_passable(Vec2::new(size.x - x, y)));
    }
}

// ============================================================
// Animation
// ============================================================

fn strip(frames: u32) -> Animation {
    Animation::from_sheet(UVec2::new(16 * frames, 16), UVec2::new(16, 16), frames, 0.1, true)
}

proptest! {
    #[test]
    fn prop_looping_animation_wraps(frames in 1u32..40) {
        let mut animation = strip(frames);
        for _ in 0..frames {
            animation.update(0.1);
        }
        prop_assert_eq!(animation.current_index(), 0);
        prop_assert!(!animation.is_finished());
    }

    #[test]
    fn prop_one_shot_animation_clamps(frames in 1u32..40, extra in 0u32..10) {
        let mut animation = strip(frames);
        animation.set_looping(false);
        for _ in 0..frames + extra {
            animation.update(0.1);
        }
        prop_assert_eq!(animation.current_index(), frames as usize - 1);
        prop_assert!(animation.is_finished());

        animation.reset();
        prop_assert_eq!(animation.current_index(), 0);
        prop_assert!(!animation.is_finished());
    }

    #[test]
    fn prop_out_of_range_frame_is_empty(frames in 0u32..10, index in 10usize..100) {
        let animation = strip(frames.max(1));
        prop_assert_eq!(animation.frame(index), URect::default());
    }
}

// ============================================================
// Weapons
// ============================================================

proptest! {
    #[test]
    fn prop_projectile_flies_straight(
        angle in 0.0f32..std::f32::consts::TAU,
        steps in 1usize..120,
        magic in any::<bool>(),
    ) {
        let kind = if magic { WeaponKind::MagicBullet } else { WeaponKind::Bullet };
        let origin = Vec2::new(500.0, 400.0);
        let direction = Vec2::from_angle(angle);
        let mut projectile = Projectile::new(kind, origin, direction * 3.0);
        let dt = 1.0 / 60.0;
        for _ in 0..steps {
            projectile.advance(dt);
        }

        let expected = origin + direction * projectile.speed() * dt * steps as f32;
        prop_assert!((projectile.position() - expected).length() < 0.05);
    }

    #[test]
    fn prop_attack_runs_once_per_window(wait in 0.0f32..0.29) {
        let mut hero = hero_with_armor(0);
        prop_assert!(hero.perform_attack());
        hero.tick_cooldowns(wait);
        prop_assert!(!hero.perform_attack());
        prop_assert_eq!(hero.projectiles().len(), 1);

        hero.tick_cooldowns(0.31);
        prop_assert!(hero.perform_attack());
        prop_assert_eq!(hero.projectiles().len(), 2);
    }
}
