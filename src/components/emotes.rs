//! Emote particles spat out above an entity after a chat message.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::components::timer::Countdown;

/// Seconds between consecutive emotes from the same queue.
pub const EMOTE_INTERVAL_SECS: f32 = 2.0;
/// Upward drift speed of a particle, pixels per second.
pub const EMOTE_RISE_SPEED: f32 = 50.0;
/// Scale growth per second; a particle starts tiny and inflates.
pub const EMOTE_GROW_RATE: f32 = 0.5;
/// Alpha lost per second once the particle has reached full size.
pub const EMOTE_FADE_RATE: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct EmoteParticle {
    pub name: String,
    /// Offset above the entity anchor, negative is up.
    pub offset_y: f32,
    pub scale: f32,
    pub alpha: f32,
}

#[derive(Component, Debug, Default)]
pub struct EmoteSpitter {
    pub queue: SmallVec<[String; 4]>,
    /// Pacing countdown; absent while the queue is empty.
    pub next: Option<Countdown>,
    pub active: Vec<EmoteParticle>,
}

impl EmoteSpitter {
    pub fn enqueue(&mut self, emotes: impl IntoIterator<Item = String>) {
        self.queue.extend(emotes);
        if self.next.is_none() && !self.queue.is_empty() {
            // First emote pops immediately, the rest are paced.
            self.next = Some(Countdown::new(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== EMOTE SPITTER TESTS ====================

    #[test]
    fn test_enqueue_starts_pacing_immediately() {
        let mut spitter = EmoteSpitter::default();
        spitter.enqueue(["Kappa".to_string(), "LUL".to_string()]);
        assert_eq!(spitter.queue.len(), 2);
        let next = spitter.next.as_mut().unwrap();
        assert!(next.tick(0.0), "first emote is due right away");
    }

    #[test]
    fn test_enqueue_keeps_running_countdown() {
        let mut spitter = EmoteSpitter::default();
        spitter.enqueue(["Kappa".to_string()]);
        spitter.next.as_mut().unwrap().tick(0.0);
        spitter.next = Some(Countdown::new(EMOTE_INTERVAL_SECS));
        spitter.next.as_mut().unwrap().tick(0.5);

        spitter.enqueue(["LUL".to_string()]);
        let next = spitter.next.as_mut().unwrap();
        assert!(!next.tick(1.0), "pacing interval is not reset by new emotes");
        assert!(next.tick(0.5));
    }

    #[test]
    fn test_enqueue_nothing_stays_idle() {
        let mut spitter = EmoteSpitter::default();
        spitter.enqueue(std::iter::empty());
        assert!(spitter.next.is_none());
    }
}
