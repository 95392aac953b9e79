//! Tile grid for the single arena room.
//!
//! The map is built once per session. Generation order matters, since every
//! step reads the passability left by the previous ones:
//! 1. Clear every cell.
//! 2. Wall off the outer ring so nothing can leave the grid.
//! 3. Scatter small wall clusters away from the centre.
//! 4. Pick the player spawn, preferring the centre.
//! 5. Sample enemy spawn points far enough from the player spawn.

use bevy::prelude::*;
use rand::Rng;

use crate::core::geometry;

/// Map width in tiles.
pub const MAP_WIDTH: i32 = 100;
/// Map height in tiles.
pub const MAP_HEIGHT: i32 = 76;
/// Tile edge length in world units (pixels).
pub const TILE_SIZE: f32 = 32.0;

const WALL_CLUSTERS: usize = 50;
const CLUSTER_WALL_PERCENT: u32 = 60;
/// Clusters anchored within this many tiles of the centre (on both axes) are skipped.
const CENTER_SAFE_TILES: i32 = 5;
const PLAYER_SPAWN_SEARCH_RADIUS: f32 = 100.0;
const PLAYER_SPAWN_ANGLE_STEP_DEG: usize = 30;
const FALLBACK_PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 100.0);
const ENEMY_SPAWN_POINTS: usize = 50;
const ENEMY_SPAWN_ATTEMPTS: usize = 100;
const ENEMY_SPAWN_MIN_DISTANCE: f32 = 200.0;
/// Fractions of the hero-to-target segment probed by [`TileMap::line_of_sight`].
const LINE_OF_SIGHT_SAMPLES: [f32; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// What occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    Door,
    SpawnPoint,
}

impl TileKind {
    /// Whether entities may stand on this kind of tile.
    pub fn is_passable(&self) -> bool {
        !matches!(self, TileKind::Wall)
    }
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub passable: bool,
    /// World-space area covered by the tile.
    pub rect: Rect,
}

impl Tile {
    fn new(kind: TileKind, coord: IVec2) -> Self {
        let min = coord.as_vec2() * TILE_SIZE;
        Self {
            kind,
            passable: kind.is_passable(),
            rect: Rect::from_corners(min, min + Vec2::splat(TILE_SIZE)),
        }
    }

    fn set_kind(&mut self, kind: TileKind) {
        self.kind = kind;
        self.passable = kind.is_passable();
    }
}

/// The arena: a fixed grid of tiles plus the spawn points found on it.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    /// Row-major, `y * width + x`.
    tiles: Vec<Tile>,
    player_spawn: Vec2,
    enemy_spawns: Vec<Vec2>,
}

impl TileMap {
    /// Generate a full-size arena.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut map = Self::blank(MAP_WIDTH, MAP_HEIGHT);
        map.build_outer_walls();
        map.scatter_wall_clusters(rng);
        map.player_spawn = map.find_player_spawn();
        map.enemy_spawns = map.sample_enemy_spawns(rng);

        info!(
            "Generated {}x{} map with {} enemy spawn points",
            map.width,
            map.height,
            map.enemy_spawns.len()
        );
        map
    }

    /// Build a map from ASCII rows: `#` wall, `.` floor, `D` door, `S` enemy
    /// spawn point. The outer ring is always walled, whatever the rows say.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut map = Self::blank(width, height);

        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let kind = match c {
                    '#' => TileKind::Wall,
                    '.' | ' ' => TileKind::Empty,
                    'D' => TileKind::Door,
                    'S' => TileKind::SpawnPoint,
                    other => {
                        warn!("Unknown map character '{}' at ({}, {})", other, x, y);
                        TileKind::Empty
                    }
                };
                let coord = IVec2::new(x as i32, y as i32);
                if let Some(tile) = map.tile_mut(coord) {
                    tile.set_kind(kind);
                }
            }
        }

        map.build_outer_walls();
        map.player_spawn = map.find_player_spawn();
        let spawns: Vec<Vec2> = map
            .tiles()
            .filter(|(_, tile)| tile.kind == TileKind::SpawnPoint)
            .map(|(coord, _)| map.tile_to_world(coord))
            .collect();
        map.enemy_spawns = spawns;
        map
    }

    fn blank(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(TileKind::Empty, IVec2::new(x, y)));
            }
        }

        Self {
            width,
            height,
            tiles,
            player_spawn: Vec2::ZERO,
            enemy_spawns: Vec::new(),
        }
    }

    fn build_outer_walls(&mut self) {
        for x in 0..self.width {
            self.set_kind(IVec2::new(x, 0), TileKind::Wall);
            self.set_kind(IVec2::new(x, self.height - 1), TileKind::Wall);
        }
        for y in 0..self.height {
            self.set_kind(IVec2::new(0, y), TileKind::Wall);
            self.set_kind(IVec2::new(self.width - 1, y), TileKind::Wall);
        }
    }

    fn scatter_wall_clusters(&mut self, rng: &mut impl Rng) {
        // Anchors are drawn from [10, size - 10); tiny maps get no clusters.
        if self.width <= 20 || self.height <= 20 {
            return;
        }

        let center = IVec2::new(self.width / 2, self.height / 2);

        for _ in 0..WALL_CLUSTERS {
            let anchor = IVec2::new(
                10 + rng.gen_range(0..self.width - 20),
                10 + rng.gen_range(0..self.height - 20),
            );

            let offset = (anchor - center).abs();
            if offset.x < CENTER_SAFE_TILES && offset.y < CENTER_SAFE_TILES {
                continue;
            }

            for dx in 0..=1 {
                for dy in 0..=1 {
                    let cell = anchor + IVec2::new(dx, dy);
                    let interior = cell.x >= 2
                        && cell.x < self.width - 2
                        && cell.y >= 2
                        && cell.y < self.height - 2;

                    if interior && rng.gen_range(0..100) < CLUSTER_WALL_PERCENT {
                        self.set_kind(cell, TileKind::Wall);
                    }
                }
            }
        }
    }

    fn find_player_spawn(&self) -> Vec2 {
        let preferred = self.world_size() / 2.0;
        self.find_safe_spawn(preferred, PLAYER_SPAWN_SEARCH_RADIUS)
    }

    /// Closest passable point to `preferred`. Never fails: searches rings
    /// around it, then the whole grid, then settles on a fixed default.
    pub fn find_safe_spawn(&self, preferred: Vec2, search_radius: f32) -> Vec2 {
        if self.is_passable(preferred) {
            return preferred;
        }

        let min = Vec2::splat(TILE_SIZE);
        let max = Vec2::new(
            (self.width - 1) as f32 * TILE_SIZE,
            (self.height - 1) as f32 * TILE_SIZE,
        );

        let mut radius = TILE_SIZE;
        while radius <= search_radius {
            for angle in (0..360).step_by(PLAYER_SPAWN_ANGLE_STEP_DEG) {
                let candidate = preferred + Vec2::from_angle((angle as f32).to_radians()) * radius;
                let in_bounds = candidate.x >= min.x
                    && candidate.x < max.x
                    && candidate.y >= min.y
                    && candidate.y < max.y;

                if in_bounds && self.is_passable(candidate) {
                    debug!("Found safe spawn at ({}, {})", candidate.x, candidate.y);
                    return candidate;
                }
            }
            radius += TILE_SIZE;
        }

        warn!("No safe spawn near preferred point, scanning the whole map");
        for x in 2..self.width - 2 {
            for y in 2..self.height - 2 {
                let candidate = self.tile_to_world(IVec2::new(x, y));
                if self.is_passable(candidate) {
                    return candidate;
                }
            }
        }

        warn!("No passable tile anywhere, using default spawn position");
        FALLBACK_PLAYER_SPAWN
    }

    fn sample_enemy_spawns(&mut self, rng: &mut impl Rng) -> Vec<Vec2> {
        let mut spawns = Vec::with_capacity(ENEMY_SPAWN_POINTS);
        if self.width <= 4 || self.height <= 4 {
            return spawns;
        }

        for _ in 0..ENEMY_SPAWN_POINTS {
            for _ in 0..ENEMY_SPAWN_ATTEMPTS {
                let coord = IVec2::new(
                    2 + rng.gen_range(0..self.width - 4),
                    2 + rng.gen_range(0..self.height - 4),
                );
                let point = self.tile_to_world(coord);

                if self.is_passable(point)
                    && geometry::distance(point, self.player_spawn) > ENEMY_SPAWN_MIN_DISTANCE
                {
                    self.set_kind(coord, TileKind::SpawnPoint);
                    spawns.push(point);
                    break;
                }
            }
        }

        spawns
    }

    fn index(&self, coord: IVec2) -> Option<usize> {
        let in_grid = coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height;
        in_grid.then(|| (coord.y * self.width + coord.x) as usize)
    }

    fn tile_mut(&mut self, coord: IVec2) -> Option<&mut Tile> {
        self.index(coord).map(|i| &mut self.tiles[i])
    }

    fn set_kind(&mut self, coord: IVec2, kind: TileKind) {
        if let Some(tile) = self.tile_mut(coord) {
            tile.set_kind(kind);
        }
    }

    /// Whether an entity may occupy `point`. Anything outside the grid is not.
    pub fn is_passable(&self, point: Vec2) -> bool {
        self.tile(self.world_to_tile(point))
            .is_some_and(|tile| tile.passable)
    }

    /// Tile coordinate containing a world point.
    pub fn world_to_tile(&self, point: Vec2) -> IVec2 {
        (point / TILE_SIZE).floor().as_ivec2()
    }

    /// World-space centre of a tile.
    pub fn tile_to_world(&self, coord: IVec2) -> Vec2 {
        coord.as_vec2() * TILE_SIZE + Vec2::splat(TILE_SIZE / 2.0)
    }

    pub fn tile(&self, coord: IVec2) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    /// Every tile with its coordinate, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, &Tile)> {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (IVec2::new(i as i32 % width, i as i32 / width), tile))
    }

    /// Tiles overlapping `view`, padded by one tile on each side.
    pub fn tiles_in_view(&self, view: Rect) -> impl Iterator<Item = (IVec2, &Tile)> {
        let start = (self.world_to_tile(view.min) - IVec2::ONE).max(IVec2::ZERO);
        let end = (self.world_to_tile(view.max) + IVec2::ONE)
            .min(IVec2::new(self.width - 1, self.height - 1));

        (start.y..=end.y).flat_map(move |y| {
            (start.x..=end.x).filter_map(move |x| {
                let coord = IVec2::new(x, y);
                self.tile(coord).map(|tile| (coord, tile))
            })
        })
    }

    /// Cheap line-of-sight test: probes a handful of points on the segment.
    /// Thin diagonal walls between two probes are not detected.
    pub fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        LINE_OF_SIGHT_SAMPLES
            .iter()
            .all(|&t| self.is_passable(from.lerp(to, t)))
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.player_spawn
    }

    pub fn enemy_spawns(&self) -> &[Vec2] {
        &self.enemy_spawns
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size of the map in world units.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    /// World-space rectangle covered by the grid.
    pub fn world_bounds(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.world_size())
    }
}
