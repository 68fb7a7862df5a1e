//! Afterimage trail left behind while dashing.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::timer::Countdown;

/// Seconds between ghost snapshots while a dash is running.
pub const TRAIL_SNAPSHOT_SECS: f32 = 0.05;
/// Alpha lost per second by each ghost.
pub const TRAIL_FADE_RATE: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct TrailGhost {
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
}

#[derive(Component, Debug, Default)]
pub struct MotionTrail {
    /// Snapshot pacing; only running while the owner dashes.
    pub next: Option<Countdown>,
    pub ghosts: Vec<TrailGhost>,
}
