//! The single enemy type and its chase behaviour.

use bevy::prelude::*;

use crate::core::{geometry, Animation, Body, Cooldown, EnemyConfig, GameEntity};
use crate::player::FIXED_STEP;
use crate::world::TileMap;

/// Enemy hit box edge length.
pub const ENEMY_SIZE: f32 = 28.0;

/// AI state machine for enemy behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    /// Hero outside detection range.
    #[default]
    Idle,
    /// Walking toward the hero.
    Chasing,
    /// Close enough to hit; holds position. Hits are driven by the session.
    InRange,
}

/// A hostile that chases the hero.
///
/// Cloning yields an enemy without animation; the owner has to attach a
/// fresh one.
#[derive(Debug, Clone)]
pub struct Enemy {
    body: Body,
    state: AiState,
    hp: i32,
    max_hp: i32,
    damage: i32,
    speed: f32,
    detection_range: f32,
    attack_range: f32,
    attack_cooldown: Cooldown,
}

impl Enemy {
    pub fn new(position: Vec2, stats: &EnemyConfig) -> Self {
        Self {
            body: Body::new(position),
            state: AiState::Idle,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            damage: stats.damage,
            speed: stats.speed,
            detection_range: stats.detection_range,
            attack_range: stats.attack_range,
            attack_cooldown: Cooldown::from_secs(stats.attack_cooldown),
        }
    }

    /// Run the AI for one frame against the hero's current position.
    ///
    /// Chasing advances one fixed step; the move is dropped when the new
    /// centre would be on an impassable tile.
    pub fn update(&mut self, hero: Vec2, map: &TileMap, dt: f32) {
        self.attack_cooldown.tick(dt);
        if !self.body.is_alive() {
            return;
        }

        let position = self.body.position;
        self.state = if !geometry::in_range(position, hero, self.detection_range) {
            AiState::Idle
        } else if !geometry::in_range(position, hero, self.attack_range) {
            AiState::Chasing
        } else {
            AiState::InRange
        };

        self.body.velocity = Vec2::ZERO;
        if self.state == AiState::Chasing {
            let direction = geometry::direction(self.body.position, hero);
            let target = self.body.position + direction * self.speed * FIXED_STEP;
            if map.is_passable(target) {
                self.body.position = target;
                self.body.velocity = direction * self.speed;
            }
        }

        self.body.update_animation(dt);
    }

    /// Lose hp without armor. Death happens once, at the first hit that
    /// empties the pool; later hits change nothing.
    pub fn take_damage(&mut self, damage: i32) {
        if !self.body.is_alive() {
            return;
        }

        self.hp = (self.hp - damage.max(0)).max(0);
        if self.hp == 0 {
            self.body.kill();
        }
    }

    /// Whether the contact-damage clock has run out.
    pub fn can_attack(&self) -> bool {
        self.body.is_alive() && self.attack_cooldown.is_ready()
    }

    /// Take a swing if the cooldown allows, returning the damage dealt.
    pub fn try_attack(&mut self) -> Option<i32> {
        if !self.can_attack() {
            return None;
        }
        self.attack_cooldown.restart();
        Some(self.damage)
    }

    pub fn attach_animation(&mut self, animation: Animation) {
        self.body.attach_animation(animation);
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn detection_range(&self) -> f32 {
        self.detection_range
    }

    pub fn attack_range(&self) -> f32 {
        self.attack_range
    }
}

impl GameEntity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn bounds(&self) -> Rect {
        geometry::centered_rect(self.body.position, Vec2::splat(ENEMY_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::UVec2;

    fn room() -> TileMap {
        TileMap::from_rows(&[
            "############",
            "#..........#",
            "#....#.....#",
            "#..........#",
            "############",
        ])
    }

    fn enemy_at(position: Vec2) -> Enemy {
        Enemy::new(position, &EnemyConfig::default())
    }

    #[test]
    fn third_hit_on_a_dead_enemy_is_ignored() {
        let mut enemy = enemy_at(Vec2::ZERO);
        enemy.take_damage(25);
        assert!(enemy.is_alive());
        enemy.take_damage(25);
        assert_eq!(enemy.hp(), 0);
        assert!(!enemy.is_alive());
        enemy.take_damage(25);
        assert_eq!(enemy.hp(), 0);
    }

    #[test]
    fn ai_states_follow_distance() {
        let map = room();
        let mut enemy = enemy_at(Vec2::new(48.0, 48.0));

        enemy.update(Vec2::new(48.0 + 600.0, 48.0), &map, 0.016);
        assert_eq!(enemy.state(), AiState::Idle);
        assert_eq!(enemy.position(), Vec2::new(48.0, 48.0));

        enemy.update(Vec2::new(48.0, 112.0), &map, 0.016);
        assert_eq!(enemy.state(), AiState::Chasing);
        assert!(enemy.position().y > 48.0);

        let here = enemy.position();
        enemy.update(here + Vec2::new(10.0, 0.0), &map, 0.016);
        assert_eq!(enemy.state(), AiState::InRange);
        assert_eq!(enemy.position(), here);
    }

    #[test]
    fn range_edges_are_inclusive() {
        let map = room();
        let start = Vec2::new(48.0, 48.0);

        // Exactly at attack range: hold position.
        let mut enemy = enemy_at(start);
        enemy.update(start + Vec2::new(20.0, 0.0), &map, 0.016);
        assert_eq!(enemy.state(), AiState::InRange);
        assert_eq!(enemy.position(), start);

        // Exactly at detection range: still noticed.
        let mut enemy = enemy_at(start);
        enemy.update(start + Vec2::new(0.0, 500.0), &map, 0.016);
        assert_eq!(enemy.state(), AiState::Chasing);
    }

    #[test]
    fn chase_does_not_enter_walls() {
        let map = room();
        // The wall tile (5, 2) spans x 160..192; stand right next to it.
        let start = Vec2::new(159.0, 80.0);
        let mut enemy = enemy_at(start);
        enemy.update(Vec2::new(300.0, 80.0), &map, 0.016);
        assert_eq!(enemy.state(), AiState::Chasing);
        assert_eq!(enemy.position(), start);
    }

    #[test]
    fn fresh_enemy_waits_one_cooldown() {
        let map = room();
        let mut enemy = enemy_at(Vec2::new(48.0, 48.0));
        assert_eq!(enemy.try_attack(), None);

        enemy.update(Vec2::new(48.0, 48.0), &map, 0.6);
        assert_eq!(enemy.try_attack(), Some(15));
        assert_eq!(enemy.try_attack(), None);
    }

    #[test]
    fn clone_starts_without_animation() {
        let mut enemy = enemy_at(Vec2::ZERO);
        enemy.attach_animation(Animation::from_sheet(
            UVec2::new(380, 175),
            UVec2::new(190, 175),
            2,
            0.1,
            true,
        ));
        let copy = enemy.clone();
        assert!(enemy.current_frame().is_some());
        assert!(copy.current_frame().is_none());
        assert_eq!(copy.hp(), enemy.hp());
    }
}
