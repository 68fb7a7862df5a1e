//! Presentation attachments: overhead layout, speech bubbles, emote
//! particles and dash trails. None of these feed back into physics or
//! lifecycle; they only produce values a renderer reads.

use bevy_ecs::prelude::*;

use crate::components::body::Body;
use crate::components::bubble::{
    BUBBLE_BOB_RATE, BUBBLE_FADE_SECS, BUBBLE_HOLD_SECS, BubblePhase, SpeechBubble,
};
use crate::components::emotes::{
    EMOTE_FADE_RATE, EMOTE_GROW_RATE, EMOTE_INTERVAL_SECS, EMOTE_RISE_SPEED, EmoteParticle,
    EmoteSpitter,
};
use crate::components::evotar::{Evotar, Liveness};
use crate::components::label::{BADGE_HEIGHT, InfoBadge, NAME_HEIGHT, NameLabel, STACK_GAP};
use crate::components::position::Position;
use crate::components::scale::Scale;
use crate::components::sprite::Skin;
use crate::components::timer::Countdown;
use crate::components::trail::{MotionTrail, TRAIL_FADE_RATE, TRAIL_SNAPSHOT_SECS, TrailGhost};
use crate::components::tween::Tween;
use crate::resources::worldtime::WorldTime;

/// Stacks the overhead column (name, badge, bubble) above the sprite for the
/// entity's current scale, and mirrors identity onto the name label.
pub fn layout_overhead(
    mut query: Query<(
        &Evotar,
        &Skin,
        &Scale,
        &mut NameLabel,
        &mut InfoBadge,
        &mut SpeechBubble,
    )>,
) {
    for (evotar, skin, scale, mut name, mut badge, mut bubble) in query.iter_mut() {
        let total = skin.total_scale(scale.value);
        let top = -skin.data.collider.h * total;
        name.text = evotar.name.clone();
        name.visible = !evotar.is_anonymous;
        name.offset_y = top - STACK_GAP;
        badge.offset_y = name.offset_y - NAME_HEIGHT - STACK_GAP;
        let badge_room = if badge.is_visible() {
            BADGE_HEIGHT + STACK_GAP
        } else {
            0.0
        };
        bubble.offset_y = badge.offset_y - badge_room;
    }
}

pub fn update_bubbles(mut query: Query<(&mut SpeechBubble, &Liveness)>, time: Res<WorldTime>) {
    for (mut bubble, liveness) in query.iter_mut() {
        if liveness.despawned {
            continue;
        }
        match &mut bubble.phase {
            BubblePhase::Hidden => {}
            BubblePhase::ShowingIn(tween) => {
                let finished = tween.advance(time.delta);
                bubble.alpha = tween.value();
                if finished {
                    bubble.phase = BubblePhase::Holding(Countdown::new(BUBBLE_HOLD_SECS));
                }
            }
            BubblePhase::Holding(countdown) => {
                if countdown.tick(time.delta) {
                    let from = bubble.alpha;
                    bubble.phase =
                        BubblePhase::HidingOut(Tween::new(from, 0.0, BUBBLE_FADE_SECS));
                }
            }
            BubblePhase::HidingOut(tween) => {
                let finished = tween.advance(time.delta);
                bubble.alpha = tween.value();
                if finished {
                    bubble.phase = BubblePhase::Hidden;
                    bubble.text = None;
                }
            }
        }
        bubble.bob = if bubble.is_visible() {
            (time.elapsed * BUBBLE_BOB_RATE).sin() * 4.0 - 2.0
        } else {
            0.0
        };
    }
}

/// Pops queued emotes one at a time and floats the active ones upward until
/// they inflate and dissolve.
pub fn update_emotes(mut query: Query<(&mut EmoteSpitter, &SpeechBubble)>, time: Res<WorldTime>) {
    for (mut spitter, bubble) in query.iter_mut() {
        let spitter = &mut *spitter;
        if let Some(countdown) = spitter.next.as_mut() {
            if countdown.tick(time.delta) {
                if let Some(name) = spitter.queue.first().cloned() {
                    spitter.queue.remove(0);
                    spitter.active.push(EmoteParticle {
                        name,
                        offset_y: bubble.offset_y,
                        scale: 0.0,
                        alpha: 1.0,
                    });
                }
                spitter.next = if spitter.queue.is_empty() {
                    None
                } else {
                    Some(Countdown::new(EMOTE_INTERVAL_SECS))
                };
            }
        }

        for particle in spitter.active.iter_mut() {
            particle.offset_y -= EMOTE_RISE_SPEED * time.delta;
            particle.scale += EMOTE_GROW_RATE * time.delta;
            if particle.scale > 1.0 {
                particle.alpha -= EMOTE_FADE_RATE * time.delta;
            }
        }
        spitter.active.retain(|p| p.alpha > 0.0);
    }
}

/// Snapshots dash afterimages and fades existing ghosts.
pub fn update_trails(
    mut query: Query<(&mut MotionTrail, &Position, &Body, &Skin, &Scale)>,
    time: Res<WorldTime>,
) {
    for (mut trail, position, body, skin, scale) in query.iter_mut() {
        let trail = &mut *trail;
        for ghost in trail.ghosts.iter_mut() {
            ghost.alpha -= TRAIL_FADE_RATE * time.delta;
        }
        trail.ghosts.retain(|g| g.alpha > 0.0);

        if body.dashing {
            let due = match trail.next.as_mut() {
                Some(countdown) => countdown.tick(time.delta),
                None => true,
            };
            if due {
                trail.ghosts.push(TrailGhost {
                    pos: position.pos,
                    scale: skin.total_scale(scale.value),
                    alpha: 1.0,
                });
                trail.next = Some(Countdown::new(TRAIL_SNAPSHOT_SECS));
            }
        } else {
            trail.next = None;
        }
    }
}
