//! One run of the game: the map, the hero, the enemies and the step that
//! advances them together.

use bevy::prelude::*;
use rand::rngs::StdRng;

use super::leaderboard::SessionRecord;
use crate::combat::{resolve_enemy_contact, resolve_melee_hits, resolve_projectile_hits};
use crate::core::{Animation, GameConfig, GameEntity};
use crate::enemies::{Enemy, SpawnDirector};
use crate::player::{Hero, HeroClass};
use crate::world::TileMap;

/// How far around an unsafe player spawn to look for a free spot.
const SPAWN_RECHECK_RADIUS: f32 = 100.0;

/// Input sampled once per frame, before the step.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Requested walking direction; normalized by the hero.
    pub movement: Vec2,
    /// Where attacks point. Zero keeps the previous aim.
    pub aim: Vec2,
    pub attack: bool,
    pub skill: bool,
}

/// What happened during one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Positions of enemies removed after dying this step.
    pub kills: Vec<Vec2>,
    /// Levels reached this step.
    pub level_ups: Vec<u32>,
    /// Set on the step the hero's hp reached 0.
    pub hero_died: bool,
    pub spawned: usize,
    pub despawned: usize,
}

/// A single run, from class selection to the hero's death.
pub struct Session {
    config: GameConfig,
    map: TileMap,
    hero: Hero,
    enemies: Vec<Enemy>,
    spawner: SpawnDirector,
    rng: StdRng,

    score: u32,
    enemies_killed: u32,
    elapsed_secs: f32,
}

impl Session {
    /// Generate a fresh arena and place the hero and the first enemies.
    pub fn new(class: HeroClass, name: impl Into<String>, config: &GameConfig, mut rng: StdRng) -> Self {
        let map = TileMap::generate(&mut rng);
        Self::with_map(class, name, config, map, rng)
    }

    /// Start a run on an existing map.
    pub fn with_map(
        class: HeroClass,
        name: impl Into<String>,
        config: &GameConfig,
        map: TileMap,
        rng: StdRng,
    ) -> Self {
        let mut spawn = map.player_spawn();
        if !map.is_passable(spawn) {
            warn!("Player spawn ({}, {}) is blocked, searching nearby", spawn.x, spawn.y);
            spawn = map.find_safe_spawn(spawn, SPAWN_RECHECK_RADIUS);
        }

        let mut hero = Hero::new(class, name, spawn, &config.hero);
        hero.attach_animation(Animation::from_layout(&config.animation.hero));

        let spawner = SpawnDirector::new(config.spawn.clone());
        let initial: Vec<Vec2> = spawner.initial_points(&map).to_vec();

        let mut session = Self {
            config: config.clone(),
            map,
            hero,
            enemies: Vec::new(),
            spawner,
            rng,
            score: 0,
            enemies_killed: 0,
            elapsed_secs: 0.0,
        };
        for point in initial {
            session.spawn_enemy(point);
        }

        info!(
            "Session started: {} as {} at ({}, {}) with {} enemies",
            session.hero.name(),
            class,
            spawn.x,
            spawn.y,
            session.enemies.len()
        );
        session
    }

    fn spawn_enemy(&mut self, position: Vec2) {
        let mut enemy = Enemy::new(position, &self.config.enemy);
        enemy.attach_animation(Animation::from_layout(&self.config.animation.enemy));
        self.enemies.push(enemy);
        debug!("Enemy spawned at ({}, {})", position.x, position.y);
    }

    /// Advance the run by one frame of `dt` seconds.
    ///
    /// Order: hero actions, hero update, enemy AI, hits, removal of the dead
    /// with rewards, spawn and despawn, then the run clock. Nothing happens
    /// once the hero is dead.
    pub fn step(&mut self, input: &InputSnapshot, dt: f32) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.is_over() {
            return outcome;
        }

        // Hero actions
        self.hero.tick_cooldowns(dt);
        self.hero.set_aim(input.aim);
        if input.attack {
            self.hero.perform_attack();
        }
        if input.skill {
            self.hero.perform_skill();
        }

        self.hero.update(input.movement, &self.map, dt);

        let hero_position = self.hero.position();
        for enemy in &mut self.enemies {
            enemy.update(hero_position, &self.map, dt);
        }

        // Hits
        resolve_projectile_hits(self.hero.projectiles_mut(), &mut self.enemies);
        resolve_melee_hits(&self.hero, &mut self.enemies, &self.map);
        resolve_enemy_contact(&mut self.hero, &mut self.enemies);

        self.collect_dead(&mut outcome);

        // Spawn policy
        self.spawner.tick(dt);
        outcome.despawned = self
            .spawner
            .despawn_distant(&mut self.enemies, hero_position);
        let live = self.enemies.len();
        if let Some(point) = self
            .spawner
            .next_spawn(live, &self.map, hero_position, &mut self.rng)
        {
            self.spawn_enemy(point);
            outcome.spawned = 1;
        }

        self.elapsed_secs += dt;

        if !self.hero.is_alive() {
            outcome.hero_died = true;
            info!(
                "{} died after {:.1}s with {} points",
                self.hero.name(),
                self.elapsed_secs,
                self.score
            );
        }

        outcome
    }

    fn collect_dead(&mut self, outcome: &mut StepOutcome) {
        let rewards = self.config.rewards.clone();
        let hero = &mut self.hero;
        let mut score = self.score;
        let mut killed = self.enemies_killed;

        self.enemies.retain(|enemy| {
            if enemy.is_alive() {
                return true;
            }
            score += rewards.score_per_kill;
            killed += 1;
            if hero.gain_exp(rewards.exp_per_kill) {
                outcome.level_ups.push(hero.level());
            }
            outcome.kills.push(enemy.position());
            false
        });

        self.score = score;
        self.enemies_killed = killed;
    }

    /// Name, score and duration for the leaderboard.
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            name: self.hero.name().to_string(),
            score: self.score,
            elapsed_secs: self.elapsed_secs,
        }
    }

    pub fn is_over(&self) -> bool {
        !self.hero.is_alive()
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn enemies_killed(&self) -> u32 {
        self.enemies_killed
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn generated_session_starts_on_a_free_tile() {
        let session = Session::new(
            HeroClass::Gun,
            "Hero",
            &GameConfig::default(),
            StdRng::seed_from_u64(11),
        );
        assert!(session.map().is_passable(session.hero().position()));
        assert!(session.enemies().len() <= 3);
        assert!(session.hero().current_frame().is_some());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn steps_stop_after_death() {
        let config = GameConfig::default();
        let mut session = Session::new(HeroClass::Magic, "Hero", &config, StdRng::seed_from_u64(3));
        session.hero.take_damage(10_000);

        let outcome = session.step(&InputSnapshot::default(), 0.016);
        assert_eq!(outcome, StepOutcome::default());
        assert_eq!(session.elapsed_secs(), 0.0);
    }
}
