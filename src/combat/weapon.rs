//! Weapons: free-flying projectiles and the sword hero's persistent blade.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::{geometry, Body, GameEntity};
use crate::world::TileMap;

/// Projectiles are culled once they leave the world by more than this.
const PROJECTILE_CULL_MARGIN: f32 = 100.0;

/// Seconds a normal swing lasts.
pub const SWING_DURATION: f32 = 0.2;
/// Total swing arc, centred on the aim direction.
pub const SWING_ARC_DEG: f32 = 90.0;
/// Seconds the special slash stays active.
pub const SPECIAL_SLASH_DURATION: f32 = 0.5;
/// Half extent of the box hit by a normal swing (blade length).
pub const SWING_REACH: f32 = 40.0;
/// Half extent of the box hit by the special slash.
pub const SPECIAL_SLASH_REACH: f32 = 120.0;
const SWORD_HANDLE_RADIUS: f32 = 8.0;

/// The closed set of weapon variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Bullet,
    MagicBullet,
    Sword,
}

/// Flight characteristics of a projectile variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileProfile {
    /// Pixels per second
    pub speed: f32,
    pub damage: i32,
    /// Radius of the round hit box
    pub radius: f32,
    /// Distance from the hero centre where the projectile appears
    pub muzzle_offset: f32,
}

const BULLET: ProjectileProfile = ProjectileProfile {
    speed: 400.0,
    damage: 25,
    radius: 4.0,
    muzzle_offset: 20.0,
};

const MAGIC_BULLET: ProjectileProfile = ProjectileProfile {
    speed: 350.0,
    damage: 15,
    radius: 8.0,
    muzzle_offset: 25.0,
};

impl WeaponKind {
    /// Profile for projectile variants; `None` for the sword.
    pub fn projectile_profile(&self) -> Option<ProjectileProfile> {
        match self {
            WeaponKind::Bullet => Some(BULLET),
            WeaponKind::MagicBullet => Some(MAGIC_BULLET),
            WeaponKind::Sword => None,
        }
    }
}

/// A bullet or magic bullet travelling in a straight line.
#[derive(Debug, Clone)]
pub struct Projectile {
    body: Body,
    kind: WeaponKind,
    profile: ProjectileProfile,
}

impl Projectile {
    /// Spawn at `origin` heading along `direction`. Falls back to a bullet
    /// profile if handed the sword kind.
    pub fn new(kind: WeaponKind, origin: Vec2, direction: Vec2) -> Self {
        let (kind, profile) = match kind.projectile_profile() {
            Some(profile) => (kind, profile),
            None => {
                warn!("{:?} is not a projectile, firing a bullet instead", kind);
                (WeaponKind::Bullet, BULLET)
            }
        };

        let mut body = Body::new(origin);
        body.velocity = geometry::normalize(direction) * profile.speed;

        Self {
            body,
            kind,
            profile,
        }
    }

    /// Spawn just in front of a shooter standing at `shooter`.
    pub fn fire(kind: WeaponKind, shooter: Vec2, direction: Vec2) -> Self {
        let offset = kind
            .projectile_profile()
            .map_or(0.0, |p| p.muzzle_offset);
        Self::new(kind, shooter + geometry::normalize(direction) * offset, direction)
    }

    /// Move along the velocity for `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.body.position += self.body.velocity * dt;
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn damage(&self) -> i32 {
        self.profile.damage
    }

    pub fn speed(&self) -> f32 {
        self.profile.speed
    }

    pub fn radius(&self) -> f32 {
        self.profile.radius
    }

    /// Consume the projectile after it hit something.
    pub fn expire(&mut self) {
        self.body.kill();
    }
}

impl GameEntity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn bounds(&self) -> Rect {
        geometry::centered_rect(self.body.position, Vec2::splat(self.profile.radius * 2.0))
    }
}

/// Advance every projectile by `dt` and drop the ones that hit a wall, left
/// the world, or were consumed by a hit.
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, map: &TileMap, dt: f32) {
    let limits = map.world_bounds().inflate(PROJECTILE_CULL_MARGIN);

    projectiles.retain_mut(|projectile| {
        projectile.advance(dt);
        let position = projectile.position();
        projectile.is_alive() && limits.contains(position) && map.is_passable(position)
    });
}

/// A timed sword action.
#[derive(Debug, Clone)]
struct Strike {
    direction: Vec2,
    timer: Timer,
    /// Still live on the exact instant the timer runs out; only overrunning
    /// the duration ends it.
    holds_at_end: bool,
}

impl Strike {
    fn new(direction: Vec2, seconds: f32, holds_at_end: bool) -> Self {
        Self {
            direction: geometry::normalize(direction),
            timer: Timer::from_seconds(seconds, TimerMode::Once),
            holds_at_end,
        }
    }

    /// Advance by `dt` seconds. Returns whether the strike is still live.
    fn tick(&mut self, dt: f32) -> bool {
        let delta = Duration::from_secs_f32(dt.max(0.0));
        let overruns = delta > self.timer.remaining();
        self.timer.tick(delta);

        if self.holds_at_end {
            !overruns
        } else {
            !self.timer.finished()
        }
    }
}

/// What the sword is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwordState {
    Idle,
    Swinging,
    SpecialSlash,
}

/// The sword hero's blade. Created once and toggled between states rather
/// than respawned.
#[derive(Debug, Clone)]
pub struct Sword {
    body: Body,
    swing: Option<Strike>,
    special: Option<Strike>,
}

impl Sword {
    pub fn new(position: Vec2) -> Self {
        Self {
            body: Body::new(position),
            swing: None,
            special: None,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        WeaponKind::Sword
    }

    /// Begin a swing along `direction`. Ignored while already swinging.
    pub fn start_swing(&mut self, direction: Vec2) {
        if self.swing.is_none() {
            self.swing = Some(Strike::new(direction, SWING_DURATION, false));
        }
    }

    /// Begin (or restart) the special slash along `direction`.
    pub fn start_special(&mut self, direction: Vec2) {
        self.special = Some(Strike::new(direction, SPECIAL_SLASH_DURATION, true));
    }

    /// Follow the wielder and run the swing and slash timers. A swing ends
    /// when its timer finishes; the slash only once it has run past 0.5 s.
    pub fn update(&mut self, wielder: Vec2, dt: f32) {
        self.body.position = wielder;

        if self.swing.as_mut().is_some_and(|swing| !swing.tick(dt)) {
            self.swing = None;
        }
        if self.special.as_mut().is_some_and(|special| !special.tick(dt)) {
            self.special = None;
        }
    }

    pub fn state(&self) -> SwordState {
        if self.special.is_some() {
            SwordState::SpecialSlash
        } else if self.swing.is_some() {
            SwordState::Swinging
        } else {
            SwordState::Idle
        }
    }

    pub fn is_swinging(&self) -> bool {
        self.swing.is_some()
    }

    pub fn is_special_active(&self) -> bool {
        self.special.is_some()
    }

    /// Blade offset from the aim direction, sweeping -45 to +45 degrees over
    /// the swing. Zero when idle.
    pub fn swing_angle_deg(&self) -> f32 {
        self.swing
            .as_ref()
            .map_or(0.0, |swing| (swing.timer.fraction() - 0.5) * SWING_ARC_DEG)
    }

    /// Direction the blade currently points at, for drawing.
    pub fn blade_direction(&self) -> Option<Vec2> {
        if let Some(special) = &self.special {
            return Some(special.direction);
        }
        self.swing.as_ref().map(|swing| {
            geometry::rotate(swing.direction, self.swing_angle_deg().to_radians())
        })
    }

    pub fn swing_area(&self) -> Option<Rect> {
        self.swing
            .as_ref()
            .map(|_| Rect::from_center_half_size(self.body.position, Vec2::splat(SWING_REACH)))
    }

    pub fn special_area(&self) -> Option<Rect> {
        self.special.as_ref().map(|_| {
            Rect::from_center_half_size(self.body.position, Vec2::splat(SPECIAL_SLASH_REACH))
        })
    }

    /// Area currently dealing damage; the special slash takes precedence.
    pub fn attack_area(&self) -> Option<Rect> {
        self.special_area().or_else(|| self.swing_area())
    }
}

impl GameEntity for Sword {
    fn body(&self) -> &Body {
        &self.body
    }

    fn bounds(&self) -> Rect {
        self.swing_area().unwrap_or_else(|| {
            geometry::centered_rect(self.body.position, Vec2::splat(SWORD_HANDLE_RADIUS * 2.0))
        })
    }
}
