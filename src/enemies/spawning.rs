//! Enemy spawn and despawn pacing around the hero.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::Stopwatch;
use rand::seq::SliceRandom;
use rand::Rng;

use super::enemy::Enemy;
use crate::core::{geometry, GameEntity, SpawnConfig};
use crate::world::TileMap;

/// Decides when and where new enemies appear and when distant ones go.
#[derive(Debug, Clone)]
pub struct SpawnDirector {
    clock: Stopwatch,
    config: SpawnConfig,
}

impl SpawnDirector {
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            clock: Stopwatch::new(),
            config,
        }
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn tick(&mut self, dt: f32) {
        self.clock.tick(Duration::from_secs_f32(dt.max(0.0)));
    }

    /// Spawn points used when a session starts.
    pub fn initial_points<'a>(&self, map: &'a TileMap) -> &'a [Vec2] {
        let spawns = map.enemy_spawns();
        &spawns[..spawns.len().min(self.config.initial_enemies)]
    }

    /// Where the next enemy should appear, if anywhere.
    ///
    /// Only asks once the interval has passed and fewer than the cap are
    /// alive. The interval restarts on every attempt, so an attempt with no
    /// qualifying point simply skips this round.
    pub fn next_spawn(
        &mut self,
        live: usize,
        map: &TileMap,
        hero: Vec2,
        rng: &mut impl Rng,
    ) -> Option<Vec2> {
        if self.clock.elapsed_secs() <= self.config.interval || live >= self.config.max_live {
            return None;
        }
        self.clock.reset();

        let point = choose_spawn_point(
            map,
            hero,
            self.config.min_distance,
            self.config.max_distance,
            rng,
        );
        if point.is_none() {
            debug!("No spawn point between {} and {} of the hero", self.config.min_distance, self.config.max_distance);
        }
        point
    }

    /// Drop enemies that wandered too far from the hero. Returns how many went.
    pub fn despawn_distant(&self, enemies: &mut Vec<Enemy>, hero: Vec2) -> usize {
        let before = enemies.len();
        let limit = self.config.despawn_distance;
        enemies.retain(|enemy| geometry::in_range(enemy.position(), hero, limit));

        let removed = before - enemies.len();
        if removed > 0 {
            debug!("Despawned {} distant enemies", removed);
        }
        removed
    }
}

/// Uniform pick among the map's spawn points strictly inside the
/// `(min, max)` distance annulus around `hero`.
pub fn choose_spawn_point(
    map: &TileMap,
    hero: Vec2,
    min: f32,
    max: f32,
    rng: &mut impl Rng,
) -> Option<Vec2> {
    let candidates: Vec<Vec2> = map
        .enemy_spawns()
        .iter()
        .copied()
        .filter(|&point| {
            let distance = geometry::distance(point, hero);
            distance > min && distance < max
        })
        .collect();

    candidates.choose(rng).copied()
}
