//! One-shot countdowns driving deferred behavior.
//!
//! A [`Countdown`] accumulates elapsed seconds and reports its completion
//! exactly once, on the tick where the accumulated time crosses the duration.
//! Systems consume that edge to fire a transition; a countdown that has
//! already completed keeps returning `false`, so stale timers attached to
//! entities that changed state in the meantime degrade to silent no-ops.
//!
//! Each scheduled behavior gets its own component slot wrapping a countdown,
//! so an entity can carry several timers at once and systems can query for
//! exactly the kind they resolve.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Debug, Clone)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    completed: bool,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            duration: seconds.max(0.0),
            elapsed: 0.0,
            completed: false,
        }
    }

    /// Advances the countdown. Returns `true` only on the tick where it
    /// completes; afterwards it stays completed and ticks return `false`.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.completed {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.completed = true;
            return true;
        }
        false
    }

    /// Completes the countdown immediately. Returns `true` if this call was
    /// the completion edge, `false` if it had already completed.
    pub fn force_complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.elapsed = self.duration;
        self.completed = true;
        true
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// Paces the idle/run toggling of a grounded evotar.
#[derive(Component, Debug)]
pub struct StateTimer(pub Countdown);

/// Recovery window after touching the ground, ends in `Idle`.
#[derive(Component, Debug)]
pub struct LandTimer(pub Countdown);

/// Scheduled automatic revive for a dead evotar.
#[derive(Component, Debug)]
pub struct DeathTimer(pub Countdown);

/// Wind-up before a jump launches. The horizontal speed is unsigned; the
/// facing direction at launch time decides the sign.
#[derive(Component, Debug)]
pub struct PendingJump {
    pub delay: Countdown,
    pub launch: Vec2,
}

/// Staggered activation for a dormant raider.
#[derive(Component, Debug)]
pub struct SpawnDelay(pub Countdown);

/// Fixed lifetime after which a raider starts fading out.
#[derive(Component, Debug)]
pub struct DespawnAfter(pub Countdown);
