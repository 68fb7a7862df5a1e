//! Commands pushed over channels to the embedding overlay.
//!
//! The simulation core owns no audio or scene graph; it only tells the host
//! what happened. Channels are unbounded and non-blocking on the send side.

use bevy_ecs::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundCmd {
    Play { name: String },
}

/// Stage membership changes the host mirrors into its display list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageCmd {
    Attach { entity: Entity },
    Detach { entity: Entity },
}
