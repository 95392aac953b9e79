//! Rendering module - camera and gizmo view of the arena.

mod plugin;
mod view;

pub use plugin::{screen_to_world, world_to_screen, ArenaCamera, Flash, Flashes, RenderConfig, RenderingPlugin};
