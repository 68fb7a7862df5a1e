//! Lifecycle timers: automatic revives, staggered raider entrances, raider
//! expiry, and tombstone upkeep.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::body::Body;
use crate::components::evotar::Liveness;
use crate::components::opacity::Opacity;
use crate::components::position::Position;
use crate::components::scale::Scale;
use crate::components::sprite::Skin;
use crate::components::timer::{Countdown, DeathTimer, DespawnAfter, SpawnDelay};
use crate::components::tombstone::{TOMBSTONE_FADE_SECS, Tombstone};
use crate::components::tween::{DespawnFade, SPAWN_FADE_SECS, SpawnFade, Tween};
use crate::events::outbound::{SoundCmd, StageCmd};
use crate::resources::bridge::OverlayBridge;
use crate::resources::population::Population;
use crate::resources::stage::Stage;
use crate::resources::worldtime::WorldTime;

/// How long an activated raider stays before fading out.
pub const RAIDER_LIFETIME_SECS: f32 = 60.0;

/// Revives dead evotars whose death countdown ran out. The revival happens
/// in place: flags flip back, the scale boost from any growth cycle is
/// discarded, and the body fades back in where it fell.
pub fn death_timers(
    mut query: Query<(
        Entity,
        &mut DeathTimer,
        &mut Liveness,
        &mut Opacity,
        &mut Scale,
    )>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut timer, mut liveness, mut opacity, mut scale) in query.iter_mut() {
        if !timer.0.tick(time.delta) {
            continue;
        }
        if liveness.dead && !liveness.despawned {
            liveness.dead = false;
            opacity.visible = true;
            scale.value = 1.0;
            commands
                .entity(entity)
                .insert(SpawnFade(Tween::new(0.0, 1.0, SPAWN_FADE_SECS)));
        }
        commands.entity(entity).remove::<DeathTimer>();
    }
}

/// Wakes dormant raiders when their stagger delay expires: places them above
/// the screen at a random column, attaches them to the stage and starts
/// their lifetime clock.
pub fn raider_spawn_delays(
    mut query: Query<(
        Entity,
        &mut SpawnDelay,
        &mut Liveness,
        &mut Position,
        &mut Body,
        &Skin,
        &Scale,
    )>,
    time: Res<WorldTime>,
    stage: Res<Stage>,
    bridge: Res<OverlayBridge>,
    mut population: ResMut<Population>,
    mut commands: Commands,
    mut rng: Local<fastrand::Rng>,
) {
    for (entity, mut delay, mut liveness, mut position, mut body, skin, scale) in query.iter_mut() {
        if !delay.0.tick(time.delta) {
            continue;
        }
        let total = skin.total_scale(scale.value);
        let half = skin.half_width(total);
        let span = (stage.width - half * 2.0).max(0.0);
        position.pos = Vec2::new(half + rng.f32() * span, skin.falling_start_y(total));
        body.velocity = Vec2::ZERO;
        liveness.dormant = false;
        population.add_raider(entity);
        bridge.stage(StageCmd::Attach { entity });
        commands
            .entity(entity)
            .insert(DespawnAfter(Countdown::new(RAIDER_LIFETIME_SECS)))
            .remove::<SpawnDelay>();
        debug!("raider {:?} entered at x={}", entity, position.pos.x);
    }
}

/// Starts the fade-out of entities whose fixed lifetime ran out. Entities
/// already fading keep their running fade.
pub fn despawn_after(
    mut query: Query<(Entity, &mut DespawnAfter, &Opacity, Option<&DespawnFade>)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut timer, opacity, fade) in query.iter_mut() {
        if !timer.0.tick(time.delta) {
            continue;
        }
        if fade.is_none() {
            commands.entity(entity).insert(DespawnFade(Tween::new(
                opacity.alpha,
                0.0,
                crate::components::tween::DESPAWN_FADE_SECS,
            )));
        }
        commands.entity(entity).remove::<DespawnAfter>();
    }
}

/// Keeps tombstones consistent with their owners: a revived owner fades its
/// stone out smoothly, a vanished owner removes it outright.
pub fn tombstone_reconcile(
    mut stones: Query<(Entity, &mut Tombstone, &mut Opacity)>,
    owners: Query<&Liveness, Without<Tombstone>>,
    time: Res<WorldTime>,
    bridge: Res<OverlayBridge>,
    mut population: ResMut<Population>,
    mut commands: Commands,
) {
    for (entity, mut stone, mut opacity) in stones.iter_mut() {
        let owner_state = owners.get(stone.owner).ok().copied();
        let owner_gone = owner_state.is_none_or(|l| l.despawned);

        if owner_gone {
            population.remove_tombstone(entity);
            bridge.stage(StageCmd::Detach { entity });
            bridge.sound(SoundCmd::Play {
                name: "poof".to_string(),
            });
            commands.entity(entity).try_despawn();
            continue;
        }

        let owner_alive = owner_state.is_some_and(|l| !l.dead);
        if owner_alive && stone.fade.is_none() {
            stone.fade = Some(Tween::new(opacity.alpha, 0.0, TOMBSTONE_FADE_SECS));
        }

        if let Some(fade) = stone.fade.as_mut() {
            let finished = fade.advance(time.delta);
            opacity.alpha = fade.value();
            if finished {
                population.remove_tombstone(entity);
                bridge.stage(StageCmd::Detach { entity });
                commands.entity(entity).try_despawn();
            }
        }
    }
}
