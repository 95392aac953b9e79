//! Shared state carried by every simulated object.

use std::time::Duration;

use bevy::log::warn;
use bevy::math::{Rect, URect, Vec2};
use bevy::time::Stopwatch;

use super::animation::Animation;

/// Position, velocity, liveness and an optional exclusively-owned animation.
///
/// Cloning a body never clones its animation: the copy starts without one
/// and its new owner has to attach a fresh animation explicitly.
#[derive(Debug)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    alive: bool,
    animation: Option<Animation>,
}

impl Clone for Body {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            velocity: self.velocity,
            alive: self.alive,
            animation: None,
        }
    }
}

impl Body {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            alive: true,
            animation: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the body dead. There is no way back.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Attach an animation, replacing and dropping any previous one.
    pub fn attach_animation(&mut self, animation: Animation) {
        if animation.frame_count() == 0 {
            warn!("Animation has no frames, disabling it");
            self.disable_animation();
            return;
        }
        self.animation = Some(animation);
    }

    /// Detach the animation. The body keeps simulating and renders without
    /// a frame.
    pub fn disable_animation(&mut self) {
        self.animation = None;
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    /// Current frame rectangle for the renderer, if an animation is attached.
    pub fn current_frame(&self) -> Option<URect> {
        self.animation.as_ref().map(Animation::current_frame)
    }

    pub fn update_animation(&mut self, dt: f32) {
        if let Some(animation) = self.animation.as_mut() {
            animation.update(dt);
        }
    }
}

/// Read-only view every simulated object offers to collision and rendering.
pub trait GameEntity {
    fn body(&self) -> &Body;

    /// World-space hit box.
    fn bounds(&self) -> Rect;

    fn position(&self) -> Vec2 {
        self.body().position
    }

    fn velocity(&self) -> Vec2 {
        self.body().velocity
    }

    fn is_alive(&self) -> bool {
        self.body().is_alive()
    }

    fn current_frame(&self) -> Option<URect> {
        self.body().current_frame()
    }
}

/// Restart-on-use clock gating an action.
///
/// Ticked with the measured frame delta; ready once strictly more than
/// `duration` has elapsed since the last restart.
#[derive(Debug, Clone)]
pub struct Cooldown {
    clock: Stopwatch,
    duration: Duration,
}

impl Cooldown {
    /// A cooldown that has just been used.
    pub fn new(duration: Duration) -> Self {
        Self {
            clock: Stopwatch::new(),
            duration,
        }
    }

    /// A cooldown that can be used immediately.
    pub fn ready(duration: Duration) -> Self {
        let mut cooldown = Self::new(duration);
        cooldown.clock.set_elapsed(duration + Duration::from_millis(1));
        cooldown
    }

    pub fn from_secs(seconds: f32) -> Self {
        Self::new(Duration::from_secs_f32(seconds.max(0.0)))
    }

    pub fn ready_secs(seconds: f32) -> Self {
        Self::ready(Duration::from_secs_f32(seconds.max(0.0)))
    }

    pub fn tick(&mut self, dt: f32) {
        self.clock.tick(Duration::from_secs_f32(dt.max(0.0)));
    }

    pub fn is_ready(&self) -> bool {
        self.clock.elapsed() > self.duration
    }

    pub fn restart(&mut self) {
        self.clock.reset();
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.clock.elapsed_secs()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
