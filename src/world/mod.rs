//! World module - the tile map of the arena.

mod map;

pub use map::{Tile, TileKind, TileMap, MAP_HEIGHT, MAP_WIDTH, TILE_SIZE};
