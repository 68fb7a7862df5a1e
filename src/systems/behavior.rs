//! Grounded behavior timers: idle/run toggling, jump wind-up, landing
//! recovery.

use bevy_ecs::prelude::*;

use crate::components::body::Body;
use crate::components::evotar::Liveness;
use crate::components::evotar::MotionState;
use crate::components::label::InfoBadge;
use crate::components::timer::{Countdown, LandTimer, PendingJump, StateTimer};
use crate::resources::worldtime::WorldTime;

/// A fresh spawn stands still this long before it starts wandering.
pub const FIRST_STATE_TOGGLE_SECS: f32 = 5.0;
/// Subsequent idle/run toggles happen after a random delay up to this.
pub const STATE_TOGGLE_MAX_SECS: f32 = 5.0;

/// Toggles grounded evotars between idle and run. Airborne or dead entities
/// keep their timer running but skip the toggle, so a missed edge simply
/// means waiting for the next one.
pub fn state_timers(
    mut query: Query<(&mut StateTimer, &mut MotionState, &Body, &Liveness)>,
    time: Res<WorldTime>,
    mut rng: Local<fastrand::Rng>,
) {
    for (mut timer, mut state, body, liveness) in query.iter_mut() {
        if !timer.0.tick(time.delta) {
            continue;
        }
        if !body.jumping && !liveness.dead && liveness.is_active() {
            match *state {
                MotionState::Idle => *state = MotionState::Run,
                MotionState::Run => *state = MotionState::Idle,
                _ => {}
            }
        }
        timer.0 = Countdown::new(rng.f32() * STATE_TOGGLE_MAX_SECS);
    }
}

/// Launches wound-up jumps. The launch direction is sampled at fire time, so
/// an entity that turned around during the wind-up jumps the way it now
/// faces. Spending a jump-hit charge arms the stomp for this flight.
pub fn pending_jumps(
    mut query: Query<(
        Entity,
        &mut PendingJump,
        &mut Body,
        &mut MotionState,
        &mut InfoBadge,
        &Liveness,
    )>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut pending, mut body, mut state, mut badge, liveness) in query.iter_mut() {
        if !pending.delay.tick(time.delta) {
            continue;
        }
        if !liveness.despawned && !liveness.dead {
            body.velocity.x = pending.launch.x * body.direction;
            body.velocity.y = pending.launch.y;
            *state = MotionState::Jump;
            if badge.jump_hits > 0 {
                badge.jump_hits -= 1;
                body.kill_armed = true;
            }
        }
        commands.entity(entity).remove::<PendingJump>();
    }
}

/// Ends the landing recovery, returning the entity to idle.
pub fn land_timers(
    mut query: Query<(Entity, &mut LandTimer, &mut Body, &mut MotionState, &Liveness)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut timer, mut body, mut state, liveness) in query.iter_mut() {
        if !timer.0.tick(time.delta) {
            continue;
        }
        if !liveness.despawned && !liveness.dead {
            *state = MotionState::Idle;
            body.jumping = false;
            body.kill_armed = false;
        }
        commands.entity(entity).remove::<LandTimer>();
    }
}
