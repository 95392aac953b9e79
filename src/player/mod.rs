//! Player module - the hero, its classes, progression and movement.

mod hero;

pub use hero::{exp_for_level, Hero, HeroClass, FIXED_STEP, HERO_SIZE};
