//! Advances fades and growth cycles.
//!
//! These systems only move values; what happens when a fade finishes
//! (deferred actions, registry removal, entity reaping) belongs to the
//! simulation pass that runs after the schedule.

use bevy_ecs::prelude::*;

use crate::components::opacity::Opacity;
use crate::components::scale::Scale;
use crate::components::timer::Countdown;
use crate::components::tween::{DespawnFade, Growth, GrowthPhase, SpawnFade, Tween};
use crate::resources::worldtime::WorldTime;

pub fn advance_spawn_fades(
    mut query: Query<(&mut SpawnFade, &mut Opacity), Without<DespawnFade>>,
    time: Res<WorldTime>,
) {
    for (mut fade, mut opacity) in query.iter_mut() {
        fade.0.advance(time.delta);
        opacity.alpha = fade.0.value();
    }
}

/// A despawn fade wins over a spawn fade still present on the same entity.
pub fn advance_despawn_fades(
    mut query: Query<(&mut DespawnFade, &mut Opacity)>,
    time: Res<WorldTime>,
) {
    for (mut fade, mut opacity) in query.iter_mut() {
        fade.0.advance(time.delta);
        opacity.alpha = fade.0.value();
    }
}

pub fn advance_growth(
    mut query: Query<(Entity, &mut Growth, &mut Scale)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut growth, mut scale) in query.iter_mut() {
        match &mut growth.phase {
            GrowthPhase::Grow(tween) => {
                let finished = tween.advance(time.delta);
                scale.value = tween.value();
                if finished {
                    let hold = growth.hold_secs;
                    growth.phase = GrowthPhase::Hold(Countdown::new(hold));
                }
            }
            GrowthPhase::Hold(countdown) => {
                if countdown.tick(time.delta) {
                    growth.phase =
                        GrowthPhase::Revert(Tween::new(scale.value, 1.0, Growth::RAMP_SECS));
                }
            }
            GrowthPhase::Revert(tween) => {
                let finished = tween.advance(time.delta);
                scale.value = tween.value();
                if finished {
                    commands.entity(entity).remove::<Growth>();
                }
            }
        }
    }
}
