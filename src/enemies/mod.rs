//! Enemies module - the chasing enemy and its spawn policy.

mod enemy;
mod spawning;

pub use enemy::{AiState, Enemy, ENEMY_SIZE};
pub use spawning::{choose_spawn_point, SpawnDirector};
