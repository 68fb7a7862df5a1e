//! The simulation facade.
//!
//! [`Simulation`] owns the ECS world and the per-tick schedule, exposes the
//! chat-facing entry points (`process_message`, `process_action`,
//! `process_raid`, `process_chatters`) and performs the end-of-tick
//! resolution pass: stomp kills, finished fades, registry upkeep. All entity
//! creation and registry mutation funnels through here; the per-tick systems
//! only move state that already exists.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};

use crate::color::Color;
use crate::components::body::{Body, DASH_FORCE, JUMP_SPEED_X, JUMP_SPEED_Y};
use crate::components::bubble::SpeechBubble;
use crate::components::emotes::EmoteSpitter;
use crate::components::evotar::{
    DeferredAction, Evotar, EvotarSeed, Liveness, MotionState, Raider, Respawn,
};
use crate::components::label::{InfoBadge, NameLabel};
use crate::components::opacity::Opacity;
use crate::components::position::Position;
use crate::components::scale::Scale;
use crate::components::sprite::Skin;
use crate::components::timer::{Countdown, DeathTimer, PendingJump, SpawnDelay, StateTimer};
use crate::components::tombstone::{Tombstone, TombstoneVariant};
use crate::components::trail::MotionTrail;
use crate::components::tween::{
    DESPAWN_FADE_SECS, DespawnFade, Growth, SPAWN_FADE_SECS, SpawnFade, Tween,
};
use crate::components::zindex::ZIndex;
use crate::events::inbound::{ActionKind, ChatMessage, Chatter, Raid, UserAction, UserInfo};
use crate::events::kill::KillMessage;
use crate::events::outbound::{SoundCmd, StageCmd};
use crate::resources::bridge::{OverlayBridge, OverlayReceivers, create_bridge};
use crate::resources::population::Population;
use crate::resources::settings::OverlaySettings;
use crate::resources::sprites::{SpriteLoader, SpriteStore};
use crate::resources::stage::Stage;
use crate::resources::worldtime::WorldTime;
use crate::systems::behavior::{FIRST_STATE_TOGGLE_SECS, land_timers, pending_jumps, state_timers};
use crate::systems::collision::kill_sweep;
use crate::systems::cosmetics::{layout_overhead, update_bubbles, update_emotes, update_trails};
use crate::systems::lifecycle::{
    death_timers, despawn_after, raider_spawn_delays, tombstone_reconcile,
};
use crate::systems::movement::{movement_raiders, movement_viewers};
use crate::systems::time::update_world_time;
use crate::systems::tombstone::tombstone_fall;
use crate::systems::tween::{advance_despawn_fades, advance_growth, advance_spawn_fades};

/// Sheet worn by users with no sprite preference.
pub const DEFAULT_SPRITE: &str = "dude";
/// Seconds a stomped evotar stays dead before reviving on its own.
pub const DEATH_REVIVE_SECS: f32 = 180.0;
/// Silence window after which a user absent from the chatters snapshot is
/// despawned.
pub const ACTIVITY_WINDOW_SECS: f32 = 300.0;
/// A raid wave enters spread over this many seconds.
pub const RAID_WINDOW_SECS: f32 = 5.0;
/// Scale boost worn by a broadcaster leading a raid.
pub const RAID_BROADCASTER_SCALE: f32 = 2.0;
/// Wind-up between a jump request and the actual launch.
pub const PRE_JUMP_DELAY_SECS: f32 = 0.3;

pub struct Simulation {
    world: World,
    schedule: Schedule,
    rng: fastrand::Rng,
}

impl Simulation {
    pub fn new(settings: OverlaySettings) -> (Self, OverlayReceivers) {
        Self::with_sprite_loader(settings, None)
    }

    pub fn with_sprite_loader(
        settings: OverlaySettings,
        loader: Option<Box<dyn SpriteLoader>>,
    ) -> (Self, OverlayReceivers) {
        let mut world = World::new();
        let (bridge, receivers) = create_bridge();

        world.insert_resource(WorldTime::default());
        world.insert_resource(Stage::new(settings.stage_width, settings.stage_height));
        world.insert_resource(settings);
        world.insert_resource(Population::default());
        world.insert_resource(match loader {
            Some(loader) => SpriteStore::new(loader),
            None => SpriteStore::with_builtin(),
        });
        world.insert_resource(bridge);
        world.insert_resource(Messages::<KillMessage>::default());

        let mut schedule = Schedule::default();
        schedule.add_systems((advance_spawn_fades, advance_despawn_fades, advance_growth));
        schedule.add_systems((state_timers, pending_jumps, land_timers));
        schedule.add_systems(
            (movement_viewers, movement_raiders)
                .chain()
                .after(pending_jumps)
                .after(land_timers),
        );
        schedule.add_systems(tombstone_fall.after(movement_raiders));
        schedule.add_systems(kill_sweep.after(movement_raiders));
        schedule.add_systems(death_timers);
        schedule.add_systems(raider_spawn_delays.before(movement_raiders));
        schedule.add_systems(despawn_after);
        schedule.add_systems(tombstone_reconcile.after(death_timers).after(tombstone_fall));
        schedule.add_systems(layout_overhead.after(advance_growth));
        schedule.add_systems(update_bubbles.after(layout_overhead));
        schedule.add_systems(update_emotes.after(update_bubbles));
        schedule.add_systems(update_trails.after(movement_raiders));

        info!("Simulation ready");
        (
            Self {
                world,
                schedule,
                rng: fastrand::Rng::new(),
            },
            receivers,
        )
    }

    /// Reseeds internal randomness (spawn columns, facing, tombstone art).
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
    }

    // ==================== tick ====================

    /// Advances the simulation by `dt` seconds: runs the schedule, then
    /// resolves kills and finished fades produced during the tick.
    pub fn update(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.resolve_kills();
        self.resolve_fades();
        self.world.clear_trackers();
    }

    fn resolve_kills(&mut self) {
        let kills: Vec<KillMessage> = self
            .world
            .resource_mut::<Messages<KillMessage>>()
            .drain()
            .collect();
        for kill in kills {
            // The victim may already be dead from an earlier hit this tick.
            if self.kill(kill.victim) {
                if let Some(mut badge) = self.world.get_mut::<InfoBadge>(kill.attacker) {
                    badge.kills += 1;
                }
            }
        }
    }

    fn resolve_fades(&mut self) {
        let mut spawned: Vec<Entity> = Vec::new();
        let mut despawned: Vec<Entity> = Vec::new();
        {
            let mut query = self.world.query::<(Entity, &SpawnFade, Option<&DespawnFade>)>();
            for (entity, fade, out) in query.iter(&self.world) {
                if out.is_none() && fade.0.is_finished() {
                    spawned.push(entity);
                }
            }
            let mut query = self.world.query::<(Entity, &DespawnFade)>();
            for (entity, fade) in query.iter(&self.world) {
                if fade.0.is_finished() {
                    despawned.push(entity);
                }
            }
        }

        for entity in spawned {
            let deferred = self.world.entity_mut(entity).take::<DeferredAction>();
            self.world.entity_mut(entity).remove::<SpawnFade>();
            if let Some(DeferredAction(kind)) = deferred {
                self.apply_action(entity, &kind);
            }
        }

        for entity in despawned {
            if let Some(mut liveness) = self.world.get_mut::<Liveness>(entity) {
                liveness.despawned = true;
            }
            let respawn = self.world.entity_mut(entity).take::<Respawn>();
            {
                let mut population = self.world.resource_mut::<Population>();
                population.remove_viewer_entity(entity);
                population.remove_raider(entity);
            }
            self.drop_tombstone_of(entity);
            self.world
                .resource::<OverlayBridge>()
                .stage(StageCmd::Detach { entity });
            self.world.despawn(entity);
            debug!("despawned {:?}", entity);
            if let Some(Respawn(seed)) = respawn {
                self.spawn_evotar(seed);
            }
        }
    }

    // ==================== chat entry points ====================

    pub fn process_message(&mut self, msg: &ChatMessage) {
        let now = self.world.resource::<WorldTime>().elapsed;
        let entity = match self.world.resource::<Population>().viewer(&msg.user_id) {
            Some(entity) => {
                self.refresh_identity(entity, &msg.info);
                entity
            }
            None => {
                let falling = {
                    let settings = self.world.resource::<OverlaySettings>();
                    let population = self.world.resource::<Population>();
                    settings.falling_evotars && !population.has_activity(&msg.user_id)
                };
                let seed = EvotarSeed {
                    user_id: Some(msg.user_id.clone()),
                    sprite: msg.info.sprite.clone(),
                    color: msg.info.color.as_deref().and_then(Color::parse),
                    falling,
                    ..EvotarSeed::named(msg.info.display_name.clone())
                };
                self.spawn_evotar(seed)
            }
        };

        self.world
            .resource_mut::<Population>()
            .stamp_activity(msg.user_id.clone(), now);

        if !msg.message.trim().is_empty() {
            self.raise_message(entity, &msg.message);
        }
        if !msg.emotes.is_empty() {
            if let Some(mut spitter) = self.world.get_mut::<EmoteSpitter>(entity) {
                spitter.enqueue(msg.emotes.iter().cloned());
            }
        }
    }

    pub fn process_action(&mut self, action: &UserAction) {
        match self.world.resource::<Population>().viewer(&action.user_id) {
            Some(entity) => {
                self.refresh_identity(entity, &action.info);
                self.apply_action(entity, &action.action);
            }
            None => {
                // Spawn first; the action fires once the entrance fade ends.
                let seed = EvotarSeed {
                    user_id: Some(action.user_id.clone()),
                    sprite: action.info.sprite.clone(),
                    color: action.info.color.as_deref().and_then(Color::parse),
                    ..EvotarSeed::named(action.info.display_name.clone())
                };
                let entity = self.spawn_evotar(seed);
                self.world
                    .entity_mut(entity)
                    .insert(DeferredAction(action.action.clone()));
            }
        }
    }

    pub fn process_raid(&mut self, raid: &Raid) {
        if !self.world.resource::<OverlaySettings>().falling_raiders {
            return;
        }
        let now = self.world.resource::<WorldTime>().elapsed;
        let color = raid.broadcaster.info.color.as_deref().and_then(Color::parse);

        if raid.viewers.count > 0 {
            let step = RAID_WINDOW_SECS / raid.viewers.count as f32;
            for i in 0..raid.viewers.count {
                self.spawn_raider(&raid.viewers.sprite, color, step * i as f32);
            }
            info!(
                "raid: {} guests over {}s",
                raid.viewers.count, RAID_WINDOW_SECS
            );
        }

        // The broadcaster leads the raid: despawn any resident avatar and
        // re-enter falling, oversized and immortal.
        let seed = EvotarSeed {
            user_id: Some(raid.broadcaster.id.clone()),
            sprite: raid.broadcaster.info.sprite.clone(),
            color,
            scale: RAID_BROADCASTER_SCALE,
            is_immortal: true,
            falling: true,
            position_x: Some(0.5),
            ..EvotarSeed::named(raid.broadcaster.info.display_name.clone())
        };
        self.world
            .resource_mut::<Population>()
            .stamp_activity(raid.broadcaster.id.clone(), now);
        match self
            .world
            .resource::<Population>()
            .viewer(&raid.broadcaster.id)
        {
            None => {
                self.spawn_evotar(seed);
            }
            Some(entity) => {
                self.world.entity_mut(entity).insert(Respawn(seed));
                self.begin_despawn(entity);
            }
        }
    }

    /// Reconciles the population against a present-chatters snapshot: users
    /// gone from chat and silent beyond the activity window are despawned;
    /// optionally, lurkers present in chat get anonymous avatars.
    pub fn process_chatters(&mut self, chatters: &[Chatter]) {
        let now = self.world.resource::<WorldTime>().elapsed;
        let show_anonymous = self
            .world
            .resource::<OverlaySettings>()
            .show_anonymous_evotars;

        let stale: Vec<Entity> = {
            let population = self.world.resource::<Population>();
            population
                .viewer_entries()
                .filter(|(id, _)| {
                    !chatters.iter().any(|c| c.user_id == *id)
                        && !population.recent_activity(id, now, ACTIVITY_WINDOW_SECS)
                })
                .map(|(_, entity)| entity)
                .collect()
        };
        for entity in stale {
            self.begin_despawn(entity);
        }

        if show_anonymous {
            for chatter in chatters {
                if self
                    .world
                    .resource::<Population>()
                    .viewer(&chatter.user_id)
                    .is_some()
                {
                    continue;
                }
                let is_anonymous = !self
                    .world
                    .resource::<Population>()
                    .has_activity(&chatter.user_id);
                let seed = EvotarSeed {
                    user_id: Some(chatter.user_id.clone()),
                    is_anonymous,
                    ..EvotarSeed::named(chatter.name.clone())
                };
                self.spawn_evotar(seed);
            }
        }
    }

    /// Replaces the settings resource; stage dimensions apply immediately.
    pub fn update_settings(&mut self, settings: OverlaySettings) {
        self.world
            .insert_resource(Stage::new(settings.stage_width, settings.stage_height));
        self.world.insert_resource(settings);
    }

    // ==================== lifecycle operations ====================

    /// Kills an evotar: hides it, drops a tombstone where it stood and
    /// schedules the automatic revive. Returns `false` when the target is
    /// immortal, already dead, or gone.
    pub fn kill(&mut self, victim: Entity) -> bool {
        let Some(liveness) = self.world.get::<Liveness>(victim).copied() else {
            return false;
        };
        let Some(evotar) = self.world.get::<Evotar>(victim) else {
            return false;
        };
        if !liveness.is_active() || evotar.is_immortal {
            return false;
        }

        let (center, scale_value) = {
            let Some(position) = self.world.get::<Position>(victim) else {
                return false;
            };
            let skin = self.world.get::<Skin>(victim);
            let scale = self.world.get::<Scale>(victim).copied().unwrap_or_default();
            let offset = skin
                .map(|s| s.center_offset_y(s.total_scale(scale.value)))
                .unwrap_or(0.0);
            (position.pos - Vec2::new(0.0, offset), scale.value)
        };

        if let Some(mut l) = self.world.get_mut::<Liveness>(victim) {
            l.dead = true;
        }
        if let Some(mut opacity) = self.world.get_mut::<Opacity>(victim) {
            opacity.visible = false;
        }
        self.world
            .entity_mut(victim)
            .insert(DeathTimer(Countdown::new(DEATH_REVIVE_SECS)))
            .remove::<PendingJump>();

        let variant = TombstoneVariant::random(&mut self.rng);
        let stone = self
            .world
            .spawn((
                Tombstone::new(victim, variant),
                Position::new(center.x, center.y),
                Scale::new(scale_value),
                Opacity::default(),
                ZIndex(0),
            ))
            .id();
        self.world.resource_mut::<Population>().add_tombstone(stone);
        {
            let bridge = self.world.resource::<OverlayBridge>();
            bridge.stage(StageCmd::Attach { entity: stone });
            bridge.sound(SoundCmd::Play {
                name: "poof".to_string(),
            });
        }
        debug!("killed {:?}, tombstone {:?}", victim, stone);
        true
    }

    /// Brings a dead evotar back early, at its tombstone's resting place.
    /// No-op unless a revive is actually pending.
    pub fn resurrect(&mut self, entity: Entity) {
        let Some(mut timer) = self.world.get_mut::<DeathTimer>(entity) else {
            return;
        };
        if !timer.0.force_complete() {
            return;
        }
        let Some(liveness) = self.world.get::<Liveness>(entity).copied() else {
            return;
        };
        if !liveness.dead || liveness.despawned {
            self.world.entity_mut(entity).remove::<DeathTimer>();
            return;
        }

        if let Some((stone, resting)) = self.find_tombstone(entity) {
            if let Some(mut position) = self.world.get_mut::<Position>(entity) {
                position.pos = resting;
            }
            self.world
                .resource_mut::<Population>()
                .remove_tombstone(stone);
            {
                let bridge = self.world.resource::<OverlayBridge>();
                bridge.stage(StageCmd::Detach { entity: stone });
                bridge.sound(SoundCmd::Play {
                    name: "poof".to_string(),
                });
            }
            self.world.despawn(stone);
        }

        if let Some(mut l) = self.world.get_mut::<Liveness>(entity) {
            l.dead = false;
        }
        if let Some(mut opacity) = self.world.get_mut::<Opacity>(entity) {
            opacity.visible = true;
            opacity.alpha = 0.0;
        }
        if let Some(mut scale) = self.world.get_mut::<Scale>(entity) {
            scale.value = 1.0;
        }
        self.world
            .entity_mut(entity)
            .remove::<DeathTimer>()
            .insert(SpawnFade(Tween::new(0.0, 1.0, SPAWN_FADE_SECS)));
        debug!("resurrected {:?}", entity);
    }

    /// Starts the fade-out of an evotar. Idempotent: a fade already running
    /// is left alone.
    pub fn begin_despawn(&mut self, entity: Entity) {
        if self.world.get::<DespawnFade>(entity).is_some() {
            return;
        }
        let Some(liveness) = self.world.get::<Liveness>(entity).copied() else {
            return;
        };
        if liveness.despawned {
            return;
        }
        let alpha = self
            .world
            .get::<Opacity>(entity)
            .map(|o| o.alpha)
            .unwrap_or(1.0);
        self.world
            .entity_mut(entity)
            .remove::<SpawnFade>()
            .insert(DespawnFade(Tween::new(alpha, 0.0, DESPAWN_FADE_SECS)));
    }

    // ==================== spawning ====================

    fn spawn_evotar(&mut self, seed: EvotarSeed) -> Entity {
        let (skin_name, sheet) = self.resolve_sheet(seed.sprite.as_deref());
        let skin = Skin::new(skin_name, sheet);
        let stage = *self.world.resource::<Stage>();
        let total = skin.total_scale(seed.scale);
        let half = skin.half_width(total);

        let x = match seed.position_x {
            Some(fraction) => fraction.clamp(0.0, 1.0) * stage.width,
            None => half + self.rng.f32() * (stage.width - half * 2.0).max(0.0),
        };
        let y = if seed.falling {
            skin.falling_start_y(total)
        } else {
            stage.ground()
        };
        let direction = if self.rng.bool() { 1.0 } else { -1.0 };
        let z = seed
            .z_index
            .unwrap_or_else(|| if seed.falling { 0 } else { self.z_index_floor() });
        let alpha = if seed.falling { 1.0 } else { 0.0 };

        let entity = self
            .world
            .spawn((
                Evotar {
                    name: seed.name.clone(),
                    color: seed.color.unwrap_or_default(),
                    user_color: None,
                    is_anonymous: seed.is_anonymous,
                    is_immortal: seed.is_immortal,
                },
                Liveness::default(),
                MotionState::Idle,
                Body::new(direction),
                Position::new(x, y),
                Scale::new(seed.scale),
                ZIndex(z),
                Opacity {
                    alpha,
                    visible: true,
                },
                skin,
            ))
            .id();
        self.world.entity_mut(entity).insert((
            NameLabel::default(),
            InfoBadge::default(),
            SpeechBubble::default(),
            EmoteSpitter::default(),
            MotionTrail::default(),
            StateTimer(Countdown::new(FIRST_STATE_TOGGLE_SECS)),
        ));
        if !seed.falling {
            self.world
                .entity_mut(entity)
                .insert(SpawnFade(Tween::new(0.0, 1.0, SPAWN_FADE_SECS)));
        }
        self.world
            .resource::<OverlayBridge>()
            .stage(StageCmd::Attach { entity });

        if let Some(user_id) = &seed.user_id {
            self.world
                .resource_mut::<Population>()
                .add_viewer(user_id.clone(), entity);
            self.evict_overflow();
        }
        debug!("spawned '{}' as {:?} at x={:.0}", seed.name, entity, x);
        entity
    }

    fn spawn_raider(&mut self, sprite: &str, color: Option<Color>, delay: f32) {
        let (skin_name, sheet) = self.resolve_sheet(Some(sprite));
        let skin = Skin::new(skin_name, sheet);
        let direction = if self.rng.bool() { 1.0 } else { -1.0 };
        // Parked far above the stage until the stagger delay expires.
        let entity = self
            .world
            .spawn((
                Evotar {
                    // Guests wear their leader's color.
                    color: color.unwrap_or_default(),
                    is_anonymous: true,
                    ..Evotar::default()
                },
                Liveness {
                    dormant: true,
                    ..Liveness::default()
                },
                MotionState::Idle,
                Body::new(direction),
                Position::new(0.0, -10_000.0),
                Scale::default(),
                ZIndex(-1),
                Opacity::default(),
                skin,
                Raider,
            ))
            .id();
        self.world.entity_mut(entity).insert((
            NameLabel::default(),
            InfoBadge::default(),
            SpeechBubble::default(),
            EmoteSpitter::default(),
            MotionTrail::default(),
            StateTimer(Countdown::new(FIRST_STATE_TOGGLE_SECS)),
            SpawnDelay(Countdown::new(delay)),
        ));
    }

    fn resolve_sheet(&mut self, name: Option<&str>) -> (String, crate::components::sprite::SheetData) {
        let mut store = self.world.resource_mut::<SpriteStore>();
        let want = name.unwrap_or(DEFAULT_SPRITE);
        match store.get(want) {
            Some(data) => (want.to_string(), data),
            None => (
                DEFAULT_SPRITE.to_string(),
                store.get(DEFAULT_SPRITE).unwrap_or_default(),
            ),
        }
    }

    fn evict_overflow(&mut self) {
        let Some(max) = self.world.resource::<OverlaySettings>().max_evotars else {
            return;
        };
        loop {
            let victim = {
                let population = self.world.resource::<Population>();
                if population.viewer_count() <= max {
                    break;
                }
                population.oldest_viewer().map(str::to_string)
            };
            let Some(user_id) = victim else { break };
            let Some(entity) = self
                .world
                .resource_mut::<Population>()
                .remove_viewer(&user_id)
            else {
                break;
            };
            debug!("evicting oldest viewer '{}'", user_id);
            self.begin_despawn(entity);
        }
    }

    // ==================== per-entity operations ====================

    fn raise_message(&mut self, entity: Entity, text: &str) {
        if let Some(mut evotar) = self.world.get_mut::<Evotar>(entity) {
            evotar.is_anonymous = false;
        }
        // Speaking cancels a pending disappearance.
        if self.world.get::<DespawnFade>(entity).is_some() {
            self.world.entity_mut(entity).remove::<DespawnFade>();
            if let Some(mut opacity) = self.world.get_mut::<Opacity>(entity) {
                opacity.alpha = 1.0;
            }
        }
        if let Some(mut bubble) = self.world.get_mut::<SpeechBubble>(entity) {
            bubble.show(text);
        }
        let top = self.z_index_ceiling(entity);
        if let Some(mut z) = self.world.get_mut::<ZIndex>(entity) {
            z.0 = top;
        }
    }

    fn apply_action(&mut self, entity: Entity, kind: &ActionKind) {
        let Some(liveness) = self.world.get::<Liveness>(entity).copied() else {
            return;
        };
        if liveness.despawned {
            return;
        }
        match kind {
            ActionKind::Jump {
                velocity_x,
                velocity_y,
            } => {
                if liveness.dead {
                    return;
                }
                let Some(mut body) = self.world.get_mut::<Body>(entity) else {
                    return;
                };
                if body.jumping {
                    return;
                }
                body.jumping = true;
                let launch = Vec2::new(
                    velocity_x.unwrap_or(JUMP_SPEED_X).abs(),
                    velocity_y.unwrap_or(JUMP_SPEED_Y),
                );
                self.world.entity_mut(entity).insert(PendingJump {
                    delay: Countdown::new(PRE_JUMP_DELAY_SECS),
                    launch,
                });
                self.world.resource::<OverlayBridge>().sound(SoundCmd::Play {
                    name: "jump".to_string(),
                });
            }
            ActionKind::Dash { force } => {
                if liveness.dead {
                    return;
                }
                let Some(mut body) = self.world.get_mut::<Body>(entity) else {
                    return;
                };
                if !body.dashing {
                    body.dashing = true;
                    body.velocity.x = body.direction * force.unwrap_or(DASH_FORCE).abs();
                }
            }
            ActionKind::Color { color } => match Color::parse(color) {
                Some(parsed) => {
                    if let Some(mut evotar) = self.world.get_mut::<Evotar>(entity) {
                        evotar.user_color = Some(parsed);
                    }
                }
                None => warn!("dropping unparseable color '{}'", color),
            },
            ActionKind::Grow { scale, duration } => {
                if self.world.get::<Growth>(entity).is_some() {
                    return;
                }
                let current = self
                    .world
                    .get::<Scale>(entity)
                    .map(|s| s.value)
                    .unwrap_or(1.0);
                self.world.entity_mut(entity).insert(Growth::new(
                    current,
                    scale.unwrap_or(2.0),
                    duration.unwrap_or(10.0),
                ));
            }
            ActionKind::Sprite { sprite } => {
                self.set_sprite(entity, sprite);
            }
            ActionKind::AddJumpHits { count } => {
                if let Some(mut badge) = self.world.get_mut::<InfoBadge>(entity) {
                    badge.jump_hits = badge.jump_hits.saturating_add(*count);
                }
            }
            ActionKind::Resurrect => {
                self.resurrect(entity);
            }
        }
    }

    /// Swaps the worn sheet, leaving motion state and physics alone.
    fn set_sprite(&mut self, entity: Entity, name: &str) {
        let data = {
            let mut store = self.world.resource_mut::<SpriteStore>();
            store.get(name)
        };
        let Some(data) = data else { return };
        if let Some(mut skin) = self.world.get_mut::<Skin>(entity) {
            *skin = Skin::new(name, data);
        }
    }

    fn refresh_identity(&mut self, entity: Entity, info: &UserInfo) {
        let new_sprite = {
            let Some(mut evotar) = self.world.get_mut::<Evotar>(entity) else {
                return;
            };
            evotar.name = info.display_name.clone();
            if let Some(color) = info.color.as_deref().and_then(Color::parse) {
                evotar.color = color;
            }
            info.sprite.clone()
        };
        if let Some(sprite) = new_sprite {
            let differs = self
                .world
                .get::<Skin>(entity)
                .is_some_and(|skin| skin.name != sprite);
            if differs {
                self.set_sprite(entity, &sprite);
            }
        }
    }

    // ==================== z-order scans ====================

    fn z_index_floor(&mut self) -> i32 {
        let viewers: Vec<Entity> = self
            .world
            .resource::<Population>()
            .viewer_entries()
            .map(|(_, e)| e)
            .collect();
        let mut floor = 0;
        for entity in viewers {
            if let Some(z) = self.world.get::<ZIndex>(entity) {
                if z.0 <= floor {
                    floor = z.0 - 1;
                }
            }
        }
        floor
    }

    fn z_index_ceiling(&mut self, entity: Entity) -> i32 {
        let from = self.world.get::<ZIndex>(entity).map(|z| z.0).unwrap_or(0);
        let viewers: Vec<Entity> = self
            .world
            .resource::<Population>()
            .viewer_entries()
            .map(|(_, e)| e)
            .collect();
        let mut ceiling = from;
        for other in viewers {
            if other == entity {
                continue;
            }
            if let Some(z) = self.world.get::<ZIndex>(other) {
                if z.0 >= ceiling {
                    ceiling = z.0 + 1;
                }
            }
        }
        ceiling
    }

    fn find_tombstone(&mut self, owner: Entity) -> Option<(Entity, Vec2)> {
        let mut query = self.world.query::<(Entity, &Tombstone, &Position)>();
        query
            .iter(&self.world)
            .find(|(_, stone, _)| stone.owner == owner)
            .map(|(entity, _, position)| (entity, position.pos))
    }

    fn drop_tombstone_of(&mut self, owner: Entity) {
        if let Some((stone, _)) = self.find_tombstone(owner) {
            self.world
                .resource_mut::<Population>()
                .remove_tombstone(stone);
            {
                let bridge = self.world.resource::<OverlayBridge>();
                bridge.stage(StageCmd::Detach { entity: stone });
                bridge.sound(SoundCmd::Play {
                    name: "poof".to_string(),
                });
            }
            self.world.despawn(stone);
        }
    }

    // ==================== introspection ====================

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn viewer(&self, user_id: &str) -> Option<Entity> {
        self.world.resource::<Population>().viewer(user_id)
    }

    pub fn viewer_count(&self) -> usize {
        self.world.resource::<Population>().viewer_count()
    }

    pub fn raider_count(&self) -> usize {
        self.world.resource::<Population>().raider_count()
    }

    pub fn tombstone_count(&self) -> usize {
        self.world.resource::<Population>().tombstone_count()
    }

    pub fn elapsed(&self) -> f32 {
        self.world.resource::<WorldTime>().elapsed
    }
}
