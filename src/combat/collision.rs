//! Hit resolution between heroes, their weapons and enemies.
//!
//! Run once per frame after everything has moved.

use crate::core::{geometry, GameEntity};
use crate::enemies::Enemy;
use crate::player::Hero;
use crate::world::TileMap;

use super::weapon::Projectile;

/// Projectiles against enemies. Each projectile hits at most one enemy, the
/// first overlapping one in order, and is consumed by it. Returns the number
/// of hits.
pub fn resolve_projectile_hits(projectiles: &mut Vec<Projectile>, enemies: &mut [Enemy]) -> usize {
    let mut hits = 0;

    for projectile in projectiles.iter_mut() {
        let bounds = projectile.bounds();
        let target = enemies
            .iter_mut()
            .find(|enemy| enemy.is_alive() && geometry::intersects(bounds, enemy.bounds()));

        if let Some(enemy) = target {
            enemy.take_damage(projectile.damage());
            projectile.expire();
            hits += 1;
        }
    }

    projectiles.retain(|p| p.is_alive());
    hits
}

/// Melee area against enemies. Every overlapping enemy with a clear line to
/// the hero takes the hero's attack damage. Runs on every frame the swing or
/// slash is live. Returns the number of enemies hit.
pub fn resolve_melee_hits(hero: &Hero, enemies: &mut [Enemy], map: &TileMap) -> usize {
    let Some(area) = hero.attack_area() else {
        return 0;
    };

    let origin = hero.position();
    let damage = hero.attack_damage();
    let mut hits = 0;

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if geometry::intersects(area, enemy.bounds())
            && map.line_of_sight(origin, enemy.position())
        {
            enemy.take_damage(damage);
            hits += 1;
        }
    }

    hits
}

/// Enemies touching the hero hit it when their own cooldown allows.
/// Returns the total damage requested.
pub fn resolve_enemy_contact(hero: &mut Hero, enemies: &mut [Enemy]) -> i32 {
    let mut total = 0;

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if !hero.is_alive() {
            break;
        }
        if !geometry::intersects(hero.bounds(), enemy.bounds()) {
            continue;
        }
        if let Some(damage) = enemy.try_attack() {
            hero.take_damage(damage);
            total += damage;
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::WeaponKind;
    use crate::core::{EnemyConfig, HeroConfig};
    use crate::player::HeroClass;
    use bevy::math::Vec2;

    fn room() -> TileMap {
        TileMap::from_rows(&[
            "############",
            "#..........#",
            "#..........#",
            "#....#.....#",
            "#..........#",
            "############",
        ])
    }

    fn enemy(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), &EnemyConfig::default())
    }

    #[test]
    fn projectile_hits_only_the_first_enemy() {
        let mut enemies = vec![enemy(100.0, 100.0), enemy(102.0, 100.0)];
        let mut shots = vec![Projectile::new(WeaponKind::Bullet, Vec2::new(101.0, 100.0), Vec2::X)];

        assert_eq!(resolve_projectile_hits(&mut shots, &mut enemies), 1);
        assert!(shots.is_empty());
        assert_eq!(enemies[0].hp(), 25);
        assert_eq!(enemies[1].hp(), 50);
    }

    #[test]
    fn dead_enemies_do_not_absorb_projectiles() {
        let mut enemies = vec![enemy(100.0, 100.0), enemy(100.0, 100.0)];
        enemies[0].take_damage(100);
        let mut shots = vec![Projectile::new(WeaponKind::MagicBullet, Vec2::new(100.0, 100.0), Vec2::X)];

        resolve_projectile_hits(&mut shots, &mut enemies);
        assert_eq!(enemies[1].hp(), 35);
    }

    #[test]
    fn melee_respects_line_of_sight() {
        let map = room();
        // Hero at tile (4, 3), wall at (5, 3).
        let mut hero = Hero::new(
            HeroClass::Sword,
            "Blade",
            Vec2::new(144.0, 112.0),
            &HeroConfig::default(),
        );
        assert!(hero.perform_attack());

        let mut enemies = vec![enemy(144.0, 80.0), enemy(176.0, 112.0)];
        assert_eq!(resolve_melee_hits(&hero, &mut enemies, &map), 1);
        assert_eq!(enemies[0].hp(), 40);
        assert_eq!(enemies[1].hp(), 50);
    }

    #[test]
    fn no_melee_without_active_attack() {
        let map = room();
        let hero = Hero::new(HeroClass::Sword, "Idle", Vec2::new(144.0, 112.0), &HeroConfig::default());
        let mut enemies = vec![enemy(144.0, 100.0)];
        assert_eq!(resolve_melee_hits(&hero, &mut enemies, &map), 0);
    }

    #[test]
    fn contact_damage_waits_for_enemy_cooldown() {
        let map = room();
        let mut hero = Hero::new(HeroClass::Gun, "Target", Vec2::new(100.0, 100.0), &HeroConfig::default());
        let mut enemies = vec![enemy(110.0, 100.0)];

        assert_eq!(resolve_enemy_contact(&mut hero, &mut enemies), 0);

        enemies[0].update(hero.position(), &map, 0.51);
        assert_eq!(resolve_enemy_contact(&mut hero, &mut enemies), 15);
        assert_eq!(hero.hp(), 85);
        assert_eq!(resolve_enemy_contact(&mut hero, &mut enemies), 0);
    }
}
