//! Tombstone physics: the stone drops from where its owner died and rests
//! on the ground line.

use bevy_ecs::prelude::*;

use crate::components::body::GRAVITY;
use crate::components::position::Position;
use crate::components::tombstone::Tombstone;
use crate::resources::stage::Stage;
use crate::resources::worldtime::WorldTime;

pub fn tombstone_fall(
    mut query: Query<(&mut Position, &mut Tombstone)>,
    time: Res<WorldTime>,
    stage: Res<Stage>,
) {
    for (mut position, mut stone) in query.iter_mut() {
        if position.pos.y >= stage.ground() {
            continue;
        }
        stone.velocity.y += GRAVITY * time.delta;
        position.pos += stone.velocity * time.delta;
        if position.pos.y > stage.ground() {
            position.pos.y = stage.ground();
            stone.velocity.y = 0.0;
        }
    }
}
