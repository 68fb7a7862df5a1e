//! Physics integration for evotars.
//!
//! Runs in two chained passes, viewers first and raiders second, so a raid
//! wave never reorders ahead of the resident population within a tick. Both
//! passes share the same per-entity step.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::body::{Body, DASH_DECEL, GRAVITY, RUN_SPEED};
use crate::components::evotar::{Evotar, Liveness, MotionState, Raider};
use crate::components::position::Position;
use crate::components::scale::Scale;
use crate::components::sprite::Skin;
use crate::components::timer::{Countdown, LandTimer};
use crate::resources::stage::Stage;
use crate::resources::worldtime::WorldTime;

/// Recovery window between touching the ground and returning to idle.
pub const LAND_RECOVERY_SECS: f32 = 0.2;

/// Below this horizontal speed a dash is considered spent.
const DASH_MIN_SPEED: f32 = 1.0;

pub fn movement_viewers(
    mut query: Query<
        (
            Entity,
            &mut Position,
            &mut Body,
            &mut MotionState,
            &Skin,
            &Scale,
            &Liveness,
        ),
        (With<Evotar>, Without<Raider>),
    >,
    time: Res<WorldTime>,
    stage: Res<Stage>,
    mut commands: Commands,
) {
    for (entity, mut position, mut body, mut state, skin, scale, liveness) in query.iter_mut() {
        step_entity(
            entity,
            &mut position,
            &mut body,
            &mut state,
            skin,
            scale,
            liveness,
            &time,
            &stage,
            &mut commands,
        );
    }
}

pub fn movement_raiders(
    mut query: Query<
        (
            Entity,
            &mut Position,
            &mut Body,
            &mut MotionState,
            &Skin,
            &Scale,
            &Liveness,
        ),
        (With<Evotar>, With<Raider>),
    >,
    time: Res<WorldTime>,
    stage: Res<Stage>,
    mut commands: Commands,
) {
    for (entity, mut position, mut body, mut state, skin, scale, liveness) in query.iter_mut() {
        step_entity(
            entity,
            &mut position,
            &mut body,
            &mut state,
            skin,
            scale,
            liveness,
            &time,
            &stage,
            &mut commands,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn step_entity(
    entity: Entity,
    position: &mut Position,
    body: &mut Body,
    state: &mut MotionState,
    skin: &Skin,
    scale: &Scale,
    liveness: &Liveness,
    time: &WorldTime,
    stage: &Stage,
    commands: &mut Commands,
) {
    if !liveness.is_active() {
        return;
    }
    let dt = time.delta;

    if body.dashing {
        let speed = body.velocity.x.abs();
        if speed < DASH_MIN_SPEED {
            body.dashing = false;
            body.velocity.x = 0.0;
        } else {
            // Hyperbolic slowdown: the slower the dash, the harder it brakes.
            let sign = body.velocity.x.signum();
            body.velocity.x -= sign * DASH_DECEL / speed * dt;
            if body.velocity.x.signum() != sign || body.velocity.x.abs() < DASH_MIN_SPEED {
                body.dashing = false;
                body.velocity.x = 0.0;
            } else {
                position.pos.x += body.velocity.x * dt;
            }
        }
    } else {
        if *state == MotionState::Run {
            body.velocity.x = RUN_SPEED * body.direction;
        }
        body.velocity.y += GRAVITY * dt;
        position.pos += body.velocity * dt;

        if position.pos.y >= stage.ground() {
            position.pos.y = stage.ground();
            body.velocity = Vec2::ZERO;
            if *state == MotionState::Fall {
                *state = MotionState::Land;
                body.kill_armed = false;
                commands
                    .entity(entity)
                    .insert(LandTimer(Countdown::new(LAND_RECOVERY_SECS)));
            }
        } else if body.velocity.y > 0.0 {
            *state = MotionState::Fall;
        }
    }

    // Screen-edge bounce: anything moving horizontally turns around at the
    // sides. A grounded idler never walks off, so it is exempt.
    if *state != MotionState::Idle || body.dashing {
        let half = skin.half_width(skin.total_scale(scale.value));
        if position.pos.x - half < 0.0 {
            position.pos.x = half;
            body.direction = 1.0;
            body.velocity.x = body.velocity.x.abs();
        } else if position.pos.x + half > stage.width {
            position.pos.x = stage.width - half;
            body.direction = -1.0;
            body.velocity.x = -body.velocity.x.abs();
        }
    }
}
