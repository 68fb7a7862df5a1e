//! Stomp detection.
//!
//! Every kill-armed airborne evotar is swept against every other live,
//! mortal viewer. The sweep is O(n^2) over a population that is small by
//! construction (tens of entities), so no broad phase is kept. Hits are
//! emitted as [`KillMessage`]s and resolved by the simulation layer at the
//! end of the tick; the sweep itself never mutates anything.

use bevy_ecs::prelude::*;

use crate::components::body::Body;
use crate::components::evotar::{Evotar, Liveness, Raider};
use crate::components::position::Position;
use crate::components::scale::Scale;
use crate::components::sprite::Skin;
use crate::events::kill::KillMessage;
use crate::resources::worldtime::WorldTime;

pub fn kill_sweep(
    query: Query<
        (
            Entity,
            &Position,
            &Body,
            &Skin,
            &Scale,
            &Liveness,
            &Evotar,
        ),
        Without<Raider>,
    >,
    time: Res<WorldTime>,
    mut kills: MessageWriter<KillMessage>,
) {
    for (attacker, a_pos, a_body, a_skin, a_scale, a_live, _) in query.iter() {
        if !a_body.kill_armed || !a_live.is_active() {
            continue;
        }
        let a_col = a_skin.collider(a_pos.pos, a_skin.total_scale(a_scale.value));
        // Displacement the attacker will cover next tick; the stomp test
        // looks one step ahead of the already-integrated position.
        let step = a_body.velocity * time.delta;

        for (victim, v_pos, _, v_skin, v_scale, v_live, v_evotar) in query.iter() {
            if victim == attacker {
                continue;
            }
            if !v_live.is_active() || v_evotar.is_immortal {
                continue;
            }
            let v_col = v_skin.collider(v_pos.pos, v_skin.total_scale(v_scale.value));
            if a_col.lands_on_top_of(&v_col, step) {
                kills.write(KillMessage { attacker, victim });
            }
        }
    }
}
