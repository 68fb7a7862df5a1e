//! Headless demo runner.
//!
//! Drives the simulation with a scripted stream of chat traffic and logs
//! what the population does. Useful for eyeballing behavior without a
//! rendering host:
//!
//! ```sh
//! cargo run --release -- --seconds 60
//! cargo run --release -- --script demo.json --config overlay.ini
//! ```
//!
//! A script is a JSON array of timed events:
//!
//! ```json
//! [
//!   { "at": 1.0, "kind": "message", "payload": { "user_id": "1",
//!       "message": "hi", "info": { "display_name": "ada" } } },
//!   { "at": 5.0, "kind": "raid", "payload": {
//!       "broadcaster": { "id": "7", "info": { "display_name": "streamer" } },
//!       "viewers": { "count": 10, "sprite": "agent" } } }
//! ]
//! ```

use clap::Parser;
use log::{debug, info};
use serde::Deserialize;
use std::path::PathBuf;

use evotars::events::inbound::{ChatMessage, Chatter, Raid, UserAction, UserInfo};
use evotars::resources::settings::OverlaySettings;
use evotars::simulation::Simulation;

/// Evotars overlay simulation
#[derive(Parser)]
#[command(version, about = "Headless runner for the evotars chat-avatar simulation")]
struct Cli {
    /// JSON script of timed chat events; a built-in demo runs without it.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Settings INI file (see OverlaySettings docs for keys).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Fixed tick rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Debug, Deserialize)]
struct ScriptedEvent {
    at: f32,
    #[serde(flatten)]
    entry: ScriptEntry,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
enum ScriptEntry {
    Message(ChatMessage),
    Action(UserAction),
    Raid(Raid),
    Chatters(Vec<Chatter>),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = OverlaySettings::new();
    if let Some(path) = &cli.config {
        settings.config_path = path.clone();
        if let Err(e) = settings.load_from_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    } else {
        // Make the demo lively even without a config file.
        settings.falling_evotars = true;
        settings.falling_raiders = true;
    }

    let mut events = match &cli.script {
        Some(path) => match load_script(path) {
            Ok(events) => events,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => builtin_demo(),
    };
    events.sort_by(|a, b| a.at.total_cmp(&b.at));

    let (mut sim, receivers) = Simulation::new(settings);

    let dt = 1.0 / cli.fps.max(1) as f32;
    let total_ticks = (cli.seconds.max(0.0) * cli.fps as f32).ceil() as u64;
    let mut next_event = 0;

    for tick in 0..total_ticks {
        let now = tick as f32 * dt;
        while next_event < events.len() && events[next_event].at <= now {
            dispatch(&mut sim, &events[next_event].entry);
            next_event += 1;
        }
        sim.update(dt);

        for cmd in receivers.sounds.try_iter() {
            debug!("sound: {:?}", cmd);
        }
        for cmd in receivers.stage.try_iter() {
            debug!("stage: {:?}", cmd);
        }
        if tick % cli.fps as u64 == 0 {
            info!(
                "t={:>5.1}s viewers={} raiders={} tombstones={}",
                sim.elapsed(),
                sim.viewer_count(),
                sim.raider_count(),
                sim.tombstone_count()
            );
        }
    }

    info!(
        "done after {:.1}s: viewers={} raiders={} tombstones={}",
        sim.elapsed(),
        sim.viewer_count(),
        sim.raider_count(),
        sim.tombstone_count()
    );
}

fn dispatch(sim: &mut Simulation, entry: &ScriptEntry) {
    match entry {
        ScriptEntry::Message(msg) => sim.process_message(msg),
        ScriptEntry::Action(action) => sim.process_action(action),
        ScriptEntry::Raid(raid) => sim.process_raid(raid),
        ScriptEntry::Chatters(chatters) => sim.process_chatters(chatters),
    }
}

fn load_script(path: &PathBuf) -> Result<Vec<ScriptedEvent>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("bad script {}: {e}", path.display()))
}

fn user(name: &str) -> UserInfo {
    UserInfo {
        display_name: name.to_string(),
        color: None,
        sprite: None,
    }
}

/// A small scripted session: three chatters, some jumps, a raid.
fn builtin_demo() -> Vec<ScriptedEvent> {
    let message = |at: f32, id: &str, name: &str, text: &str| ScriptedEvent {
        at,
        entry: ScriptEntry::Message(ChatMessage {
            user_id: id.to_string(),
            message: text.to_string(),
            emotes: vec![],
            info: user(name),
        }),
    };
    let action = |at: f32, id: &str, name: &str, json: &str| ScriptedEvent {
        at,
        entry: ScriptEntry::Action(UserAction {
            user_id: id.to_string(),
            info: user(name),
            action: serde_json::from_str(json).expect("demo action json"),
        }),
    };

    vec![
        message(0.5, "1", "ada", "hello overlay"),
        message(1.0, "2", "grace", "o/"),
        message(2.0, "3", "linus", "first time here"),
        action(4.0, "1", "ada", r#"{ "name": "jump" }"#),
        action(5.0, "2", "grace", r#"{ "name": "dash" }"#),
        action(6.0, "1", "ada", r#"{ "name": "add_jump_hits", "data": { "count": 1 } }"#),
        action(7.0, "1", "ada", r#"{ "name": "jump" }"#),
        action(9.0, "3", "linus", r#"{ "name": "grow", "data": { "scale": 3.0 } }"#),
        ScriptedEvent {
            at: 12.0,
            entry: ScriptEntry::Raid(Raid {
                broadcaster: evotars::events::inbound::RaidBroadcaster {
                    id: "9".to_string(),
                    info: user("streamer"),
                },
                viewers: evotars::events::inbound::RaidViewers {
                    count: 8,
                    sprite: "agent".to_string(),
                },
            }),
        },
        message(20.0, "2", "grace", "that was a raid"),
    ]
}
