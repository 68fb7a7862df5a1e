//! Scalar tweens and the fade/growth effects built on them.

use bevy_ecs::prelude::Component;

use crate::components::timer::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Interpolates a single value over a fixed duration. Runs once; a zero
/// duration snaps straight to the target.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    easing: Easing,
    time: f32,
    playing: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            easing: Easing::Linear,
            time: 0.0,
            playing: true,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advances the tween. Returns `true` on the tick where it finishes.
    pub fn advance(&mut self, delta: f32) -> bool {
        if !self.playing {
            return false;
        }
        self.time += delta;
        if self.time >= self.duration {
            self.time = self.duration;
            self.playing = false;
            return true;
        }
        false
    }

    pub fn value(&self) -> f32 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            self.time / self.duration
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        !self.playing && self.time >= self.duration
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

/// Duration of the alpha ramp played on ground spawns and revives.
pub const SPAWN_FADE_SECS: f32 = 0.5;
/// Duration of the alpha ramp played before an entity leaves the stage.
pub const DESPAWN_FADE_SECS: f32 = 1.0;

/// Alpha ramp toward visible. Used both for fresh ground spawns and for the
/// fade back in after a revive. Finished fades are cleaned up by the
/// simulation pass, which also fires any action deferred until the entity is
/// fully visible.
#[derive(Component, Debug)]
pub struct SpawnFade(pub Tween);

/// Alpha ramp toward invisible, ending in removal from the stage. Requesting
/// a despawn while one is already running is a no-op, which makes despawns
/// idempotent.
#[derive(Component, Debug)]
pub struct DespawnFade(pub Tween);

#[derive(Debug)]
pub enum GrowthPhase {
    Grow(Tween),
    Hold(Countdown),
    Revert(Tween),
}

/// Temporary scale boost: grow, hold, revert, then the component is removed.
/// Only one growth cycle can run at a time; requests made mid-cycle are
/// dropped.
#[derive(Component, Debug)]
pub struct Growth {
    pub phase: GrowthPhase,
    pub target: f32,
    pub hold_secs: f32,
}

impl Growth {
    pub const RAMP_SECS: f32 = 2.0;

    pub fn new(from: f32, target: f32, hold_secs: f32) -> Self {
        Self {
            phase: GrowthPhase::Grow(Tween::new(from, target, Self::RAMP_SECS)),
            target,
            hold_secs,
        }
    }
}
