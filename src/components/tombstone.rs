//! Grave markers dropped where an evotar was stomped.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::tween::Tween;

/// Seconds of the fade-out played when the owner comes back to life.
pub const TOMBSTONE_FADE_SECS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TombstoneVariant {
    Rip1,
    Rip2,
}

impl TombstoneVariant {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        if rng.bool() {
            TombstoneVariant::Rip1
        } else {
            TombstoneVariant::Rip2
        }
    }
}

/// A tombstone falls under gravity to the ground and stays until its owner
/// revives (smooth fade) or disappears entirely (instant removal).
#[derive(Component, Debug)]
pub struct Tombstone {
    pub owner: Entity,
    pub variant: TombstoneVariant,
    pub velocity: Vec2,
    pub fade: Option<Tween>,
}

impl Tombstone {
    pub fn new(owner: Entity, variant: TombstoneVariant) -> Self {
        Self {
            owner,
            variant,
            velocity: Vec2::ZERO,
            fade: None,
        }
    }
}
