//! Combat module - weapons and hit resolution.

mod collision;
mod weapon;

pub use collision::{resolve_enemy_contact, resolve_melee_hits, resolve_projectile_hits};
pub use weapon::*;
