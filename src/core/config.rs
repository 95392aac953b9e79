//! Gameplay tuning loaded from an external RON file.
//!
//! Allows tweaking stats and spawn pacing without recompilation. Every field
//! has a default, so a partial file only overrides what it names.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::animation::SheetLayout;
use super::error::DataLoadError;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/game_config.ron";

/// Starting stats shared by every hero class.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub max_hp: i32,
    pub max_mana: i32,
    pub armor: i32,
    /// Pixels per second
    pub speed: f32,
    pub attack_damage: i32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            max_hp: 100,
            max_mana: 50,
            armor: 0,
            speed: 150.0,
            attack_damage: 10,
        }
    }
}

/// Stats for the single enemy type.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_hp: i32,
    pub damage: i32,
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    /// Seconds between two hits on the hero
    pub attack_cooldown: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_hp: 50,
            damage: 15,
            speed: 80.0,
            detection_range: 500.0,
            attack_range: 20.0,
            attack_cooldown: 0.5,
        }
    }
}

/// Enemy spawn and despawn pacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seconds between spawn attempts
    pub interval: f32,
    /// No spawning while this many enemies are alive
    pub max_live: usize,
    /// Spawn points must be strictly farther than this from the hero...
    pub min_distance: f32,
    /// ...and strictly closer than this.
    pub max_distance: f32,
    /// Enemies farther than this from the hero are removed
    pub despawn_distance: f32,
    /// Enemies placed on the first spawn points when a session starts
    pub initial_enemies: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval: 3.0,
            max_live: 15,
            min_distance: 200.0,
            max_distance: 500.0,
            despawn_distance: 1000.0,
            initial_enemies: 3,
        }
    }
}

/// What a kill is worth.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub score_per_kill: u32,
    pub exp_per_kill: i32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            score_per_kill: 100,
            exp_per_kill: 25,
        }
    }
}

/// Sprite-sheet layouts for animated entities.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub hero: SheetLayout,
    pub enemy: SheetLayout,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hero: SheetLayout {
                sheet_size: (1610, 868),
                frame_size: (322, 217),
                frame_count: 20,
                frame_duration: 0.1,
                looping: true,
            },
            enemy: SheetLayout {
                sheet_size: (1900, 1225),
                frame_size: (190, 175),
                frame_count: 70,
                frame_duration: 0.1,
                looping: true,
            },
        }
    }
}

/// All gameplay tuning, loaded from assets/data/game_config.ron.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub hero: HeroConfig,
    pub enemy: EnemyConfig,
    pub spawn: SpawnConfig,
    pub rewards: RewardConfig,
    pub animation: AnimationConfig,
}

impl GameConfig {
    /// Load and parse a config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }

        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;

        ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
            path: display,
            details: e.to_string(),
        })
    }

    /// Load from the default path, falling back to defaults on any failure.
    pub fn load() -> Self {
        match Self::load_from(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded game config from {}", CONFIG_PATH);
                config
            }
            Err(DataLoadError::FileNotFound(path)) => {
                warn!("Game config {} not found. Using defaults.", path);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

/// System to load the game config at startup.
pub fn load_game_config(mut commands: Commands) {
    commands.insert_resource(GameConfig::load());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: GameConfig = ron::from_str("(enemy: (max_hp: 80), spawn: (max_live: 4))")
            .expect("partial config should parse");
        assert_eq!(config.enemy.max_hp, 80);
        assert_eq!(config.enemy.damage, 15);
        assert_eq!(config.spawn.max_live, 4);
        assert_eq!(config.hero.max_hp, 100);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = GameConfig::load_from("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn bundled_config_parses() {
        let text = include_str!("../../assets/data/game_config.ron");
        let config: GameConfig = ron::from_str(text).expect("bundled config should parse");
        assert_eq!(config.spawn.interval, 3.0);
        assert_eq!(config.animation.enemy.frame_count, 70);
    }
}
