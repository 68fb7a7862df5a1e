//! Evotars simulation library.
//!
//! Entity simulation for a chat-driven streaming overlay: every chatting
//! user gets a small animated avatar (an "evotar") that wanders a stage,
//! jumps, dashes, stomps other avatars, dies, and comes back. The crate owns
//! physics, timers, and population lifecycle; rendering and audio live in
//! the host, fed through channels.
//!
//! - [`components`] - ECS components (position, body, skin, timers, fades, ...)
//! - [`events`] - inbound chat payloads, kill messages, outbound commands
//! - [`resources`] - ECS resources (time, stage, settings, registries, sprites)
//! - [`systems`] - per-tick systems (movement, behavior, collision, lifecycle)
//! - [`simulation`] - the facade tying it all together

pub mod color;
pub mod components;
pub mod events;
pub mod resources;
pub mod simulation;
pub mod systems;
