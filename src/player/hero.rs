//! The player-controlled hero and its three class kits.
//!
//! Attack and skill share one gate: check the cooldown (and, for skills, the
//! unlock level), restart the clock, then run the class-specific behaviour.
//! The clock is restarted first so a behaviour may start timed sub-states of
//! its own.

use std::fmt;

use bevy::prelude::*;

use crate::combat::{update_projectiles, Projectile, Sword, WeaponKind};
use crate::core::{geometry, Animation, Body, Cooldown, GameEntity, HeroConfig};
use crate::world::TileMap;

/// Movement always advances by this step, whatever the real frame delta.
pub const FIXED_STEP: f32 = 1.0 / 60.0;
/// Hero hit box edge length.
pub const HERO_SIZE: f32 = 24.0;
const DEFAULT_AIM: Vec2 = Vec2::new(0.0, -1.0);

const LEVEL_UP_MAX_HP: i32 = 10;
const LEVEL_UP_SPEED: f32 = 5.0;
const LEVEL_UP_ATTACK_DAMAGE: i32 = 2;

/// Playable archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroClass {
    Sword,
    Gun,
    Magic,
}

impl HeroClass {
    pub const ALL: [HeroClass; 3] = [HeroClass::Sword, HeroClass::Gun, HeroClass::Magic];

    /// Seconds between two attacks.
    pub fn attack_cooldown(&self) -> f32 {
        match self {
            HeroClass::Sword => 0.5,
            HeroClass::Gun => 0.3,
            HeroClass::Magic => 0.4,
        }
    }

    /// Seconds between two skill uses.
    pub fn skill_cooldown(&self) -> f32 {
        match self {
            HeroClass::Sword => 3.0,
            HeroClass::Gun => 5.0,
            HeroClass::Magic => 4.0,
        }
    }

    /// Level from which the skill can be used.
    pub fn skill_unlock_level(&self) -> u32 {
        match self {
            HeroClass::Sword | HeroClass::Gun => 10,
            HeroClass::Magic => 5,
        }
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeroClass::Sword => "Sword Hero",
            HeroClass::Gun => "Gun Hero",
            HeroClass::Magic => "Magic Hero",
        };
        f.write_str(name)
    }
}

/// Class-specific weapon state.
#[derive(Debug, Clone)]
enum Kit {
    /// One persistent blade, toggled rather than respawned.
    Sword(Sword),
    Gun,
    Magic,
}

/// A spread fan: `count` projectiles (odd) spaced `step` radians apart.
struct Fan {
    kind: WeaponKind,
    count: i32,
    step: f32,
}

const GUN_FAN: Fan = Fan {
    kind: WeaponKind::Bullet,
    count: 5,
    step: 0.3,
};

const MAGIC_FAN: Fan = Fan {
    kind: WeaponKind::MagicBullet,
    count: 3,
    step: 0.5,
};

#[derive(Debug, Clone)]
pub struct Hero {
    body: Body,
    class: HeroClass,
    kit: Kit,
    name: String,

    level: u32,
    exp: i32,
    exp_to_next_level: i32,

    hp: i32,
    max_hp: i32,
    mana: i32,
    max_mana: i32,
    armor: i32,
    /// Pixels per second
    speed: f32,
    attack_damage: i32,
    aim: Vec2,

    attack_cooldown: Cooldown,
    skill_cooldown: Cooldown,
    projectiles: Vec<Projectile>,
}

impl Hero {
    pub fn new(class: HeroClass, name: impl Into<String>, position: Vec2, stats: &HeroConfig) -> Self {
        let kit = match class {
            HeroClass::Sword => Kit::Sword(Sword::new(position)),
            HeroClass::Gun => Kit::Gun,
            HeroClass::Magic => Kit::Magic,
        };

        Self {
            body: Body::new(position),
            class,
            kit,
            name: name.into(),
            level: 1,
            exp: 0,
            exp_to_next_level: exp_for_level(1),
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            mana: stats.max_mana,
            max_mana: stats.max_mana,
            armor: stats.armor,
            speed: stats.speed,
            attack_damage: stats.attack_damage,
            aim: DEFAULT_AIM,
            attack_cooldown: Cooldown::ready_secs(class.attack_cooldown()),
            skill_cooldown: Cooldown::ready_secs(class.skill_cooldown()),
            projectiles: Vec::new(),
        }
    }

    /// Add experience. Crossing the threshold advances exactly one level and
    /// carries the surplus over once. Returns whether a level was gained.
    pub fn gain_exp(&mut self, amount: i32) -> bool {
        if amount <= 0 || !self.body.is_alive() {
            return false;
        }

        self.exp += amount;
        if self.exp >= self.exp_to_next_level {
            self.exp -= self.exp_to_next_level;
            self.level_up();
            return true;
        }
        false
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.exp_to_next_level = exp_for_level(self.level);
        self.max_hp += LEVEL_UP_MAX_HP;
        self.hp = self.max_hp;
        self.speed += LEVEL_UP_SPEED;
        self.attack_damage += LEVEL_UP_ATTACK_DAMAGE;

        info!("{} reached level {}", self.name, self.level);
    }

    /// Apply a hit. Armor soaks damage but at least one point always lands.
    pub fn take_damage(&mut self, damage: i32) {
        if !self.body.is_alive() {
            return;
        }

        let dealt = (damage - self.armor).max(1);
        self.hp = (self.hp - dealt).max(0);

        if self.hp == 0 {
            self.body.kill();
            info!("{} has fallen at level {}", self.name, self.level);
        }
    }

    pub fn heal(&mut self, amount: i32) {
        if self.body.is_alive() && amount > 0 {
            self.hp = (self.hp + amount).min(self.max_hp);
        }
    }

    /// Point attacks along `direction`. A zero vector keeps the previous aim.
    pub fn set_aim(&mut self, direction: Vec2) {
        let aim = geometry::normalize(direction);
        if aim != Vec2::ZERO {
            self.aim = aim;
        }
    }

    /// Advance the attack and skill clocks by the measured frame delta.
    pub fn tick_cooldowns(&mut self, dt: f32) {
        self.attack_cooldown.tick(dt);
        self.skill_cooldown.tick(dt);
    }

    pub fn can_attack(&self) -> bool {
        self.body.is_alive() && self.attack_cooldown.is_ready()
    }

    pub fn can_use_skill(&self) -> bool {
        self.body.is_alive()
            && self.skill_cooldown.is_ready()
            && self.level >= self.class.skill_unlock_level()
    }

    /// Attack if the cooldown allows it. Returns whether the attack ran.
    pub fn perform_attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.attack_cooldown.restart();
        self.execute_attack();
        true
    }

    /// Use the class skill if unlocked and off cooldown. Returns whether it ran.
    pub fn perform_skill(&mut self) -> bool {
        if !self.can_use_skill() {
            return false;
        }
        self.skill_cooldown.restart();
        self.execute_skill();
        true
    }

    fn execute_attack(&mut self) {
        let origin = self.body.position;
        match &mut self.kit {
            Kit::Sword(sword) => sword.start_swing(self.aim),
            Kit::Gun => self
                .projectiles
                .push(Projectile::fire(WeaponKind::Bullet, origin, self.aim)),
            Kit::Magic => self
                .projectiles
                .push(Projectile::fire(WeaponKind::MagicBullet, origin, self.aim)),
        }
    }

    fn execute_skill(&mut self) {
        let fan = match &mut self.kit {
            Kit::Sword(sword) => {
                sword.start_special(self.aim);
                return;
            }
            Kit::Gun => &GUN_FAN,
            Kit::Magic => &MAGIC_FAN,
        };
        self.fire_fan(fan);
    }

    fn fire_fan(&mut self, fan: &Fan) {
        let origin = self.body.position;
        let half = fan.count / 2;
        for i in -half..=half {
            let direction = geometry::rotate(self.aim, i as f32 * fan.step);
            self.projectiles
                .push(Projectile::fire(fan.kind, origin, direction));
        }
    }

    /// Try to move one fixed step along `direction`. The move is rejected
    /// outright if any corner of the hit box would end up in a wall.
    pub fn move_by(&mut self, direction: Vec2, map: &TileMap) -> bool {
        let direction = geometry::normalize(direction);
        if direction == Vec2::ZERO {
            self.body.velocity = Vec2::ZERO;
            return false;
        }

        let target = self.body.position + direction * self.speed * FIXED_STEP;
        let half = HERO_SIZE / 2.0;
        let corners = [
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(-half, half),
            Vec2::new(half, half),
        ];

        if corners.iter().all(|&c| map.is_passable(target + c)) {
            self.body.position = target;
            self.body.velocity = direction * self.speed;
            true
        } else {
            self.body.velocity = Vec2::ZERO;
            false
        }
    }

    /// Per-frame update after input: move, fly projectiles, run the sword
    /// timers and the animation.
    pub fn update(&mut self, movement: Vec2, map: &TileMap, dt: f32) {
        if self.body.is_alive() {
            self.move_by(movement, map);
        }

        update_projectiles(&mut self.projectiles, map, FIXED_STEP);

        let position = self.body.position;
        if let Kit::Sword(sword) = &mut self.kit {
            sword.update(position, dt);
        }

        self.body.update_animation(dt);
    }

    pub fn attach_animation(&mut self, animation: Animation) {
        self.body.attach_animation(animation);
    }

    pub fn class(&self) -> HeroClass {
        self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> i32 {
        self.exp
    }

    pub fn exp_to_next_level(&self) -> i32 {
        self.exp_to_next_level
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn max_mana(&self) -> i32 {
        self.max_mana
    }

    pub fn armor(&self) -> i32 {
        self.armor
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn attack_damage(&self) -> i32 {
        self.attack_damage
    }

    pub fn aim(&self) -> Vec2 {
        self.aim
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    /// The blade, for sword heroes.
    pub fn sword(&self) -> Option<&Sword> {
        match &self.kit {
            Kit::Sword(sword) => Some(sword),
            _ => None,
        }
    }

    /// Area the sword currently hurts; the special slash wins over a swing.
    pub fn attack_area(&self) -> Option<Rect> {
        self.sword().and_then(Sword::attack_area)
    }

    /// Whether a melee swing or slash is live.
    pub fn is_attacking(&self) -> bool {
        self.sword()
            .is_some_and(|s| s.is_swinging() || s.is_special_active())
    }
}

impl GameEntity for Hero {
    fn body(&self) -> &Body {
        &self.body
    }

    fn bounds(&self) -> Rect {
        geometry::centered_rect(self.body.position, Vec2::splat(HERO_SIZE))
    }
}

/// Experience needed to leave `level`: floor(10 * level^1.5).
pub fn exp_for_level(level: u32) -> i32 {
    (10.0 * (level as f32).powf(1.5)).floor() as i32
}
