//! Core game module - states, events, config, and the building blocks every
//! simulated object shares.
//!
//! This module provides the foundation that all other game systems build upon.

mod animation;
mod config;
mod entity;
mod error;
mod events;
pub mod geometry;
mod plugin;
mod states;

pub use animation::{Animation, SheetLayout};
pub use config::*;
pub use entity::{Body, Cooldown, GameEntity};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
