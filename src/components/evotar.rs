//! Core identity and lifecycle state of a simulated chat avatar.

use bevy_ecs::prelude::Component;

use crate::color::Color;
use crate::events::inbound::ActionKind;

#[derive(Component, Debug, Clone)]
pub struct Evotar {
    pub name: String,
    /// Base tint from chat metadata.
    pub color: Color,
    /// Explicit override set through a color action; wins over `color`.
    pub user_color: Option<Color>,
    /// Anonymous entities hide their name label until they speak.
    pub is_anonymous: bool,
    /// Immortal entities ignore stomp kills entirely.
    pub is_immortal: bool,
}

impl Evotar {
    pub fn display_color(&self) -> Color {
        self.user_color.unwrap_or(self.color)
    }
}

impl Default for Evotar {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::default(),
            user_color: None,
            is_anonymous: false,
            is_immortal: false,
        }
    }
}

/// Lifecycle flags checked by every per-tick system. Once `despawned` is set
/// the entity is inert and gets reaped by the simulation pass.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Liveness {
    pub dead: bool,
    pub despawned: bool,
    /// Dormant entities exist but have not entered the stage yet
    /// (stagger-delayed raiders).
    pub dormant: bool,
}

impl Liveness {
    pub fn is_active(&self) -> bool {
        !self.dead && !self.despawned && !self.dormant
    }
}

/// Exclusive movement state; death is tracked separately in [`Liveness`] so a
/// revive can return to whatever motion makes sense.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Run,
    Jump,
    Fall,
    Land,
}

impl MotionState {
    /// Animation tag a renderer should play, folding death in.
    pub fn sprite_tag(self, liveness: &Liveness) -> &'static str {
        if liveness.dead {
            return "die";
        }
        match self {
            MotionState::Idle => "idle",
            MotionState::Run => "run",
            MotionState::Jump => "jump",
            MotionState::Fall => "fall",
            MotionState::Land => "land",
        }
    }
}

/// Marks raid guests. They share the evotar component set but are anonymous,
/// action-less and short-lived.
#[derive(Component, Debug, Default)]
pub struct Raider;

/// An action received before the entity existed, held until its spawn fade
/// completes.
#[derive(Component, Debug, Clone)]
pub struct DeferredAction(pub ActionKind);

/// Everything needed to materialize an evotar. Also carried on an entity that
/// must reappear after its despawn fade finishes (a broadcaster re-entering
/// as a falling raid leader).
#[derive(Debug, Clone)]
pub struct EvotarSeed {
    pub user_id: Option<String>,
    pub name: String,
    pub sprite: Option<String>,
    pub color: Option<Color>,
    pub scale: f32,
    pub is_anonymous: bool,
    pub is_immortal: bool,
    pub z_index: Option<i32>,
    pub falling: bool,
    /// Horizontal spawn position as a fraction of the stage width; random
    /// when absent.
    pub position_x: Option<f32>,
}

impl EvotarSeed {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            user_id: None,
            name: name.into(),
            sprite: None,
            color: None,
            scale: 1.0,
            is_anonymous: false,
            is_immortal: false,
            z_index: None,
            falling: false,
            position_x: None,
        }
    }
}

/// Respawn request resolved when the despawn fade of its carrier completes.
#[derive(Component, Debug, Clone)]
pub struct Respawn(pub EvotarSeed);
