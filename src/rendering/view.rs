//! Gizmo drawing of the arena and everything in it.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::plugin::{world_to_screen, ArenaCamera, Flashes, RenderConfig};
use crate::combat::SwordState;
use crate::core::GameEntity;
use crate::enemies::Enemy;
use crate::player::{Hero, HeroClass};
use crate::session::ActiveSession;
use crate::world::TileKind;

const WALL_COLOR: Color = Color::srgb(0.45, 0.45, 0.5);
const DOOR_COLOR: Color = Color::srgb(0.55, 0.35, 0.15);
const SPAWN_COLOR: Color = Color::srgb(0.35, 0.1, 0.1);
const BAR_BACK: Color = Color::srgb(0.1, 0.1, 0.1);
const BAR_FILL: Color = Color::srgb(0.2, 0.8, 0.3);

/// Hp bar width over the hero.
const HERO_BAR_WIDTH: f32 = 40.0;
/// Hp bar width over an enemy.
const ENEMY_BAR_WIDTH: f32 = 24.0;
const AIM_LENGTH: f32 = 30.0;
const BLADE_LENGTH: f32 = 40.0;

/// Draw the visible tiles, the hero with its weapons, and the enemies.
pub fn draw_arena(
    mut gizmos: Gizmos,
    config: Res<RenderConfig>,
    session: Res<ActiveSession>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<&OrthographicProjection, With<ArenaCamera>>,
) {
    let session = &session.0;
    let hero = session.hero();

    let window = window_query
        .get_single()
        .map(Window::size)
        .unwrap_or(Vec2::new(1280.0, 720.0));
    let scale = camera_query.get_single().map_or(1.0, |p| p.scale);
    let view = Rect::from_center_size(hero.position(), window * scale)
        .inflate(config.cull_margin);

    // Map
    let map = session.map();
    for (_, tile) in map.tiles_in_view(view) {
        let color = match tile.kind {
            TileKind::Wall => WALL_COLOR,
            TileKind::Door => DOOR_COLOR,
            TileKind::SpawnPoint => SPAWN_COLOR,
            TileKind::Empty => continue,
        };
        outline(&mut gizmos, tile.rect, color);
    }
    outline(&mut gizmos, map.world_bounds(), WALL_COLOR);

    // Enemies
    for enemy in session.enemies() {
        if enemy.is_alive() && view.contains(enemy.position()) {
            draw_enemy(&mut gizmos, enemy);
        }
    }

    draw_hero(&mut gizmos, hero);
}

fn draw_hero(gizmos: &mut Gizmos, hero: &Hero) {
    let color = match hero.class() {
        HeroClass::Sword => Color::srgb(0.3, 0.6, 1.0),
        HeroClass::Gun => Color::srgb(0.3, 0.9, 0.9),
        HeroClass::Magic => Color::srgb(0.7, 0.4, 1.0),
    };
    let position = hero.position();
    outline(gizmos, hero.bounds(), color);
    health_bar(gizmos, position, -25.0, HERO_BAR_WIDTH, hero.hp(), hero.max_hp());

    gizmos.line_2d(
        world_to_screen(position),
        world_to_screen(position + hero.aim() * AIM_LENGTH),
        color.with_alpha(0.6),
    );

    if let Some(sword) = hero.sword() {
        if let Some(area) = sword.attack_area() {
            let slash = match sword.state() {
                SwordState::SpecialSlash => Color::srgb(1.0, 0.5, 0.1),
                _ => Color::srgb(1.0, 1.0, 0.4),
            };
            outline(gizmos, area, slash.with_alpha(0.5));
        }
        if let Some(blade) = sword.blade_direction() {
            gizmos.line_2d(
                world_to_screen(position),
                world_to_screen(position + blade * BLADE_LENGTH),
                Color::WHITE,
            );
        }
    }

    for projectile in hero.projectiles() {
        gizmos.circle_2d(
            world_to_screen(projectile.position()),
            projectile.radius(),
            Color::srgb(1.0, 0.9, 0.3),
        );
    }
}

fn draw_enemy(gizmos: &mut Gizmos, enemy: &Enemy) {
    let health = enemy.hp() as f32 / enemy.max_hp().max(1) as f32;
    let color = if health > 0.6 {
        Color::srgb(0.9, 0.1, 0.1)
    } else if health > 0.3 {
        Color::srgb(1.0, 0.65, 0.0)
    } else {
        Color::srgb(0.55, 0.0, 0.0)
    };

    outline(gizmos, enemy.bounds(), color);
    health_bar(gizmos, enemy.position(), -18.0, ENEMY_BAR_WIDTH, enemy.hp(), enemy.max_hp());
}

/// Draw expanding rings for recent kills and level-ups.
pub fn draw_flashes(mut gizmos: Gizmos, flashes: Res<Flashes>) {
    for flash in &flashes.0 {
        let progress = 1.0 - (flash.remaining / flash.duration.max(f32::EPSILON)).clamp(0.0, 1.0);
        gizmos.circle_2d(
            world_to_screen(flash.position),
            flash.radius * (0.5 + progress),
            flash.color.with_alpha(1.0 - progress),
        );
    }
}

/// Outline a simulation-space rectangle.
fn outline(gizmos: &mut Gizmos, rect: Rect, color: Color) {
    gizmos.rect_2d(world_to_screen(rect.center()), rect.size(), color);
}

fn health_bar(gizmos: &mut Gizmos, above: Vec2, offset: f32, width: f32, hp: i32, max_hp: i32) {
    let fraction = (hp as f32 / max_hp.max(1) as f32).clamp(0.0, 1.0);
    let left = above + Vec2::new(-width / 2.0, offset);

    gizmos.line_2d(
        world_to_screen(left),
        world_to_screen(left + Vec2::X * width),
        BAR_BACK,
    );
    if fraction > 0.0 {
        gizmos.line_2d(
            world_to_screen(left),
            world_to_screen(left + Vec2::X * width * fraction),
            BAR_FILL,
        );
    }
}
