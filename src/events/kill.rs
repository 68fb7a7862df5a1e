use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

/// Emitted by the stomp sweep, resolved by the simulation at the end of the
/// same tick. The victim may have died to an earlier kill in the same batch;
/// resolution re-checks its state.
#[derive(Message, Debug, Clone, Copy)]
pub struct KillMessage {
    pub attacker: Entity,
    pub victim: Entity,
}
