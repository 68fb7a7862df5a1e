//! Speech bubble shown when a user chats.
//!
//! One bubble per entity, single slot: a new message replaces whatever is
//! showing. The bubble tweens in, holds while bobbing gently, then tweens
//! out.

use bevy_ecs::prelude::Component;

use crate::components::timer::Countdown;
use crate::components::tween::Tween;

/// How long a message stays up once fully shown.
pub const BUBBLE_HOLD_SECS: f32 = 10.0;
/// Duration of the show and hide alpha ramps.
pub const BUBBLE_FADE_SECS: f32 = 0.5;
/// Messages are clipped to this many characters before display.
pub const BUBBLE_MAX_CHARS: usize = 120;
/// Angular speed of the idle bob, radians per second.
pub const BUBBLE_BOB_RATE: f32 = 2.5;

#[derive(Debug, Default)]
pub enum BubblePhase {
    #[default]
    Hidden,
    ShowingIn(Tween),
    Holding(Countdown),
    HidingOut(Tween),
}

#[derive(Component, Debug, Default)]
pub struct SpeechBubble {
    pub text: Option<String>,
    pub phase: BubblePhase,
    pub alpha: f32,
    /// Offset of the bubble base above the entity anchor.
    pub offset_y: f32,
    /// Small sinusoidal vertical wobble while holding.
    pub bob: f32,
}

impl SpeechBubble {
    /// Shows `text`, superseding any message currently displayed or pending.
    pub fn show(&mut self, text: &str) {
        let mut clipped: String = text.chars().take(BUBBLE_MAX_CHARS).collect();
        if clipped.len() < text.len() {
            clipped.push('…');
        }
        self.text = Some(clipped);
        self.phase = BubblePhase::ShowingIn(Tween::new(self.alpha, 1.0, BUBBLE_FADE_SECS));
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, BubblePhase::Hidden)
    }
}
