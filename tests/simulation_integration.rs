//! End-to-end tests driving the simulation facade the way a host would:
//! chat messages, actions, raids and chatters snapshots in, population
//! behavior out.

#![allow(dead_code, unused_imports)]

use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::With;
use glam::Vec2;

use evotars::color::Color;

use evotars::components::body::Body;
use evotars::components::bubble::SpeechBubble;
use evotars::components::evotar::{Evotar, Liveness, MotionState, Raider};
use evotars::components::label::InfoBadge;
use evotars::components::opacity::Opacity;
use evotars::components::position::Position;
use evotars::components::scale::Scale;
use evotars::components::timer::PendingJump;
use evotars::components::tombstone::Tombstone;
use evotars::components::tween::{DespawnFade, Growth};
use evotars::components::zindex::ZIndex;
use evotars::events::inbound::{
    ActionKind, ChatMessage, Chatter, Raid, RaidBroadcaster, RaidViewers, UserAction, UserInfo,
};
use evotars::resources::settings::OverlaySettings;
use evotars::simulation::{RAID_BROADCASTER_SCALE, Simulation};

const DT: f32 = 1.0 / 60.0;

fn info(name: &str) -> UserInfo {
    UserInfo {
        display_name: name.to_string(),
        color: None,
        sprite: None,
    }
}

fn message(id: &str, name: &str, text: &str) -> ChatMessage {
    ChatMessage {
        user_id: id.to_string(),
        message: text.to_string(),
        emotes: vec![],
        info: info(name),
    }
}

fn action(id: &str, name: &str, kind: ActionKind) -> UserAction {
    UserAction {
        user_id: id.to_string(),
        info: info(name),
        action: kind,
    }
}

fn make_sim(configure: impl FnOnce(&mut OverlaySettings)) -> Simulation {
    let mut settings = OverlaySettings::new();
    configure(&mut settings);
    let (mut sim, _receivers) = Simulation::new(settings);
    sim.seed_rng(7);
    sim
}

fn run(sim: &mut Simulation, seconds: f32) {
    let ticks = (seconds / DT).round() as u64;
    for _ in 0..ticks {
        sim.update(DT);
    }
}

// ==================== POPULATION TESTS ====================

#[test]
fn test_message_spawns_one_viewer_per_user() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hello"));
    let first = sim.viewer("1").unwrap();
    sim.update(DT);
    sim.process_message(&message("1", "ada", "again"));
    assert_eq!(sim.viewer_count(), 1);
    assert_eq!(sim.viewer("1"), Some(first));
}

#[test]
fn test_capacity_evicts_oldest_first() {
    let mut sim = make_sim(|s| s.max_evotars = Some(3));
    for i in 0..5 {
        sim.process_message(&message(&format!("u{i}"), &format!("user{i}"), "hi"));
        assert!(sim.viewer_count() <= 3);
        sim.update(DT);
    }
    assert_eq!(sim.viewer_count(), 3);
    assert!(sim.viewer("u0").is_none());
    assert!(sim.viewer("u1").is_none());
    assert!(sim.viewer("u4").is_some());
}

#[test]
fn test_first_time_chatter_falls_from_sky_when_enabled() {
    let mut sim = make_sim(|s| s.falling_evotars = true);
    sim.process_message(&message("1", "ada", "geronimo"));
    let entity = sim.viewer("1").unwrap();
    let y = sim.world().get::<Position>(entity).unwrap().pos.y;
    assert!(y < 0.0, "falling spawn starts above the screen, got y={y}");
    // and lands eventually, never sinking below the ground line
    run(&mut sim, 5.0);
    let pos = sim.world().get::<Position>(entity).unwrap().pos;
    assert!((pos.y - 1080.0).abs() < 1.0);
}

#[test]
fn test_ground_spawn_fades_in() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    let entity = sim.viewer("1").unwrap();
    assert!(sim.world().get::<Opacity>(entity).unwrap().alpha < 0.1);
    run(&mut sim, 1.0);
    assert!((sim.world().get::<Opacity>(entity).unwrap().alpha - 1.0).abs() < 1e-4);
}

// ==================== ACTION TESTS ====================

#[test]
fn test_jump_winds_up_then_flies_and_lands() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    let entity = sim.viewer("1").unwrap();
    run(&mut sim, 1.0);

    sim.process_action(&action(
        "1",
        "ada",
        ActionKind::Jump {
            velocity_x: None,
            velocity_y: None,
        },
    ));
    assert!(sim.world().get::<Body>(entity).unwrap().jumping);
    assert!(sim.world().get::<PendingJump>(entity).is_some());

    // second request during the wind-up is swallowed
    sim.process_action(&action(
        "1",
        "ada",
        ActionKind::Jump {
            velocity_x: None,
            velocity_y: None,
        },
    ));

    run(&mut sim, 0.4);
    assert!(sim.world().get::<PendingJump>(entity).is_none());
    let pos = sim.world().get::<Position>(entity).unwrap().pos;
    assert!(pos.y < 1080.0, "airborne after launch");

    run(&mut sim, 4.0);
    let body = sim.world().get::<Body>(entity).unwrap();
    assert!(!body.jumping, "back on the ground and recovered");
    let pos = sim.world().get::<Position>(entity).unwrap().pos;
    assert!((pos.y - 1080.0).abs() < 1e-3);
}

#[test]
fn test_action_for_unknown_user_spawns_then_fires() {
    let mut sim = make_sim(|_| {});
    sim.process_action(&action(
        "1",
        "ada",
        ActionKind::Jump {
            velocity_x: None,
            velocity_y: None,
        },
    ));
    let entity = sim.viewer("1").unwrap();
    // deferred until the spawn fade completes
    assert!(!sim.world().get::<Body>(entity).unwrap().jumping);
    run(&mut sim, 0.6);
    assert!(sim.world().get::<Body>(entity).unwrap().jumping);
}

#[test]
fn test_grow_is_not_reentrant() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    let entity = sim.viewer("1").unwrap();
    run(&mut sim, 1.0);

    sim.process_action(&action(
        "1",
        "ada",
        ActionKind::Grow {
            scale: Some(3.0),
            duration: Some(5.0),
        },
    ));
    run(&mut sim, 1.0);
    let mid = sim.world().get::<Scale>(entity).unwrap().value;
    assert!(mid > 1.0 && mid < 3.0);

    // a second request mid-cycle changes nothing
    sim.process_action(&action(
        "1",
        "ada",
        ActionKind::Grow {
            scale: Some(10.0),
            duration: Some(1.0),
        },
    ));
    assert_eq!(sim.world().get::<Growth>(entity).unwrap().target, 3.0);

    run(&mut sim, 1.5);
    assert!((sim.world().get::<Scale>(entity).unwrap().value - 3.0).abs() < 1e-4);
}

#[test]
fn test_bad_color_is_dropped() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    let entity = sim.viewer("1").unwrap();
    sim.process_action(&action(
        "1",
        "ada",
        ActionKind::Color {
            color: "not-a-color".to_string(),
        },
    ));
    assert!(sim.world().get::<Evotar>(entity).unwrap().user_color.is_none());
    sim.process_action(&action(
        "1",
        "ada",
        ActionKind::Color {
            color: "#ff0000".to_string(),
        },
    ));
    assert!(sim.world().get::<Evotar>(entity).unwrap().user_color.is_some());
}

// ==================== KILL AND REVIVE TESTS ====================

/// Places `attacker` directly above `victim`, armed and falling, then ticks
/// once so the sweep resolves.
fn stage_stomp(sim: &mut Simulation, attacker: Entity, victim: Entity) {
    let ground = 1080.0;
    {
        let world = sim.world_mut();
        world.get_mut::<Position>(victim).unwrap().pos = Vec2::new(500.0, ground);
        world.get_mut::<Position>(attacker).unwrap().pos = Vec2::new(500.0, ground - 120.0);
        let mut body = world.get_mut::<Body>(attacker).unwrap();
        body.velocity = Vec2::new(0.0, 480.0);
        body.kill_armed = true;
        body.jumping = true;
    }
    sim.update(DT);
}

fn spawn_two(sim: &mut Simulation) -> (Entity, Entity) {
    sim.process_message(&message("1", "ada", "hi"));
    sim.process_message(&message("2", "grace", "hi"));
    run(sim, 1.0);
    (sim.viewer("1").unwrap(), sim.viewer("2").unwrap())
}

#[test]
fn test_stomp_kills_victim_and_credits_attacker() {
    let mut sim = make_sim(|_| {});
    let (attacker, victim) = spawn_two(&mut sim);
    stage_stomp(&mut sim, attacker, victim);

    let liveness = sim.world().get::<Liveness>(victim).unwrap();
    assert!(liveness.dead);
    assert!(!sim.world().get::<Opacity>(victim).unwrap().visible);
    assert_eq!(sim.world().get::<InfoBadge>(attacker).unwrap().kills, 1);
    assert_eq!(sim.tombstone_count(), 1);
}

#[test]
fn test_immortal_victim_survives_stomp() {
    let mut sim = make_sim(|_| {});
    let (attacker, victim) = spawn_two(&mut sim);
    sim.world_mut()
        .get_mut::<Evotar>(victim)
        .unwrap()
        .is_immortal = true;
    stage_stomp(&mut sim, attacker, victim);

    assert!(!sim.world().get::<Liveness>(victim).unwrap().dead);
    assert_eq!(sim.world().get::<InfoBadge>(attacker).unwrap().kills, 0);
    assert_eq!(sim.tombstone_count(), 0);
}

#[test]
fn test_resurrect_returns_at_tombstone() {
    let mut sim = make_sim(|_| {});
    let (_, victim) = spawn_two(&mut sim);
    assert!(sim.kill(victim));
    assert_eq!(sim.tombstone_count(), 1);

    // let the stone fall to its resting place
    run(&mut sim, 3.0);
    let stone_pos = {
        let world = sim.world_mut();
        let mut query = world.query::<(&Tombstone, &Position)>();
        query.iter(world).next().unwrap().1.pos
    };

    sim.process_action(&action("2", "grace", ActionKind::Resurrect));
    assert!(!sim.world().get::<Liveness>(victim).unwrap().dead);
    assert_eq!(sim.tombstone_count(), 0);
    let pos = sim.world().get::<Position>(victim).unwrap().pos;
    assert_eq!(pos, stone_pos);

    // a second resurrect is a stale no-op
    sim.process_action(&action("2", "grace", ActionKind::Resurrect));
    assert!(!sim.world().get::<Liveness>(victim).unwrap().dead);
}

#[test]
fn test_kill_is_idempotent() {
    let mut sim = make_sim(|_| {});
    let (_, victim) = spawn_two(&mut sim);
    assert!(sim.kill(victim));
    assert!(!sim.kill(victim));
    assert_eq!(sim.tombstone_count(), 1);
}

// ==================== DESPAWN TESTS ====================

#[test]
fn test_despawn_is_idempotent_and_removes_viewer() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    let entity = sim.viewer("1").unwrap();
    run(&mut sim, 1.0);

    sim.begin_despawn(entity);
    sim.begin_despawn(entity);
    run(&mut sim, 1.2);

    assert_eq!(sim.viewer_count(), 0);
    assert!(sim.world().get_entity(entity).is_err());
    // requesting again on the reaped entity must not panic
    sim.begin_despawn(entity);
}

#[test]
fn test_speaking_cancels_pending_despawn() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    let entity = sim.viewer("1").unwrap();
    run(&mut sim, 1.0);

    sim.begin_despawn(entity);
    run(&mut sim, 0.5);
    assert!(sim.world().get::<DespawnFade>(entity).is_some());

    sim.process_message(&message("1", "ada", "wait, one more thing"));
    assert!(sim.world().get::<DespawnFade>(entity).is_none());
    assert!((sim.world().get::<Opacity>(entity).unwrap().alpha - 1.0).abs() < 1e-4);
    let bubble = sim.world().get::<SpeechBubble>(entity).unwrap();
    assert!(bubble.text.is_some());

    run(&mut sim, 2.0);
    assert_eq!(sim.viewer_count(), 1, "speaking keeps the evotar alive");
}

#[test]
fn test_message_raises_z_order() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    sim.process_message(&message("2", "grace", "hi"));
    let a = sim.viewer("1").unwrap();
    let b = sim.viewer("2").unwrap();
    sim.process_message(&message("1", "ada", "me again"));
    let za = sim.world().get::<ZIndex>(a).unwrap().0;
    let zb = sim.world().get::<ZIndex>(b).unwrap().0;
    assert!(za > zb);
}

// ==================== CHATTERS SNAPSHOT TESTS ====================

#[test]
fn test_silent_absentees_are_despawned() {
    let mut sim = make_sim(|_| {});
    sim.process_message(&message("1", "ada", "hi"));
    sim.process_message(&message("2", "grace", "hi"));
    run(&mut sim, 1.0);

    // fast-forward past the activity window (ticks are clamped to 0.1s)
    for _ in 0..3100 {
        sim.update(0.1);
    }
    sim.process_chatters(&[Chatter {
        user_id: "2".to_string(),
        name: "grace".to_string(),
    }]);
    run(&mut sim, 1.5);

    assert!(sim.viewer("1").is_none(), "silent absentee leaves");
    assert!(sim.viewer("2").is_some(), "present chatter stays");
}

#[test]
fn test_lurkers_materialize_when_enabled() {
    let mut sim = make_sim(|s| s.show_anonymous_evotars = true);
    sim.process_chatters(&[Chatter {
        user_id: "9".to_string(),
        name: "lurker".to_string(),
    }]);
    let entity = sim.viewer("9").unwrap();
    assert!(sim.world().get::<Evotar>(entity).unwrap().is_anonymous);
}

// ==================== RAID TESTS ====================

fn raid(count: u32) -> Raid {
    Raid {
        broadcaster: RaidBroadcaster {
            id: "99".to_string(),
            info: info("streamer"),
        },
        viewers: RaidViewers {
            count,
            sprite: "agent".to_string(),
        },
    }
}

#[test]
fn test_raid_disabled_by_default() {
    let mut sim = make_sim(|_| {});
    sim.process_raid(&raid(10));
    run(&mut sim, 1.0);
    assert_eq!(sim.raider_count(), 0);
    assert!(sim.viewer("99").is_none());
}

#[test]
fn test_raid_staggers_ten_guests_over_five_seconds() {
    let mut sim = make_sim(|s| s.falling_raiders = true);
    sim.process_raid(&raid(10));

    run(&mut sim, 1.0 + DT);
    // delays 0.0, 0.5 and 1.0 have fired
    assert_eq!(sim.raider_count(), 3);

    run(&mut sim, 4.0);
    assert_eq!(sim.raider_count(), 10);
}

#[test]
fn test_raid_broadcaster_enters_large_and_immortal() {
    let mut sim = make_sim(|s| s.falling_raiders = true);
    sim.process_raid(&raid(1));
    let entity = sim.viewer("99").unwrap();
    let evotar = sim.world().get::<Evotar>(entity).unwrap();
    assert!(evotar.is_immortal);
    assert_eq!(
        sim.world().get::<Scale>(entity).unwrap().value,
        RAID_BROADCASTER_SCALE
    );
    let pos = sim.world().get::<Position>(entity).unwrap().pos;
    assert!(pos.y < 0.0, "drops in from above");
    assert!((pos.x - 960.0).abs() < 1.0, "centered entrance");
}

#[test]
fn test_raid_guests_wear_broadcaster_color() {
    let mut sim = make_sim(|s| s.falling_raiders = true);
    let mut colored = raid(3);
    colored.broadcaster.info.color = Some("#ff0000".to_string());
    sim.process_raid(&colored);

    let world = sim.world_mut();
    let mut query = world.query_filtered::<&Evotar, With<Raider>>();
    let guests: Vec<&Evotar> = query.iter(world).collect();
    assert_eq!(guests.len(), 3);
    for guest in guests {
        assert_eq!(guest.color, Color::rgb(255, 0, 0));
    }
}

#[test]
fn test_raiders_leave_a_minute_after_their_own_entrance() {
    let mut sim = make_sim(|s| s.falling_raiders = true);
    sim.process_raid(&raid(1));

    // enters immediately and stays around for the better part of a minute
    for _ in 0..300 {
        sim.update(0.1);
    }
    assert_eq!(sim.raider_count(), 1);

    // past the 60 s lifetime plus the fade the guest is gone
    for _ in 0..320 {
        sim.update(0.1);
    }
    assert_eq!(sim.raider_count(), 0);
    let world = sim.world_mut();
    let mut query = world.query_filtered::<(), With<Raider>>();
    assert_eq!(query.iter(world).count(), 0, "raider entity is reaped");
}

#[test]
fn test_raid_respawns_resident_broadcaster() {
    let mut sim = make_sim(|s| s.falling_raiders = true);
    sim.process_message(&message("99", "streamer", "hi"));
    let old = sim.viewer("99").unwrap();
    run(&mut sim, 1.0);

    sim.process_raid(&raid(0));
    // the resident avatar fades out, then re-enters falling
    run(&mut sim, 1.5);
    let reborn = sim.viewer("99").unwrap();
    assert_ne!(reborn, old);
    assert!(sim.world().get::<Evotar>(reborn).unwrap().is_immortal);
}
