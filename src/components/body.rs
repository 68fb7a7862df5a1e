//! Kinematics for evotars.
//!
//! All speeds are in stage pixels per second; the fixed-step driver at 60 Hz
//! reproduces the classic per-frame tuning exactly.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Downward acceleration applied while airborne.
pub const GRAVITY: f32 = 720.0;
/// Horizontal walking speed while in the run state.
pub const RUN_SPEED: f32 = 50.0;
/// Default horizontal launch speed of a jump (sign comes from facing).
pub const JUMP_SPEED_X: f32 = 210.0;
/// Default vertical launch speed of a jump (negative is up).
pub const JUMP_SPEED_Y: f32 = -480.0;
/// Default horizontal speed a dash starts with.
pub const DASH_FORCE: f32 = 840.0;
/// Dash deceleration constant; the per-tick slowdown is `DASH_DECEL / |v| * dt`,
/// so a dash bleeds off speed faster the slower it gets.
pub const DASH_DECEL: f32 = 648_000.0;

#[derive(Component, Debug, Clone)]
pub struct Body {
    pub velocity: Vec2,
    /// Facing: `1.0` right, `-1.0` left.
    pub direction: f32,
    pub dashing: bool,
    /// Set when a jump is requested and held until the landing recovery ends,
    /// covering the wind-up as well as the airborne phase.
    pub jumping: bool,
    /// Whether this entity can stomp-kill others this jump. Armed at launch
    /// when a jump-hit charge is spent, cleared on landing.
    pub kill_armed: bool,
}

impl Body {
    pub fn new(direction: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            direction,
            dashing: false,
            jumping: false,
            kill_armed: false,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(1.0)
    }
}
