//! Channel bridge to the embedding overlay.
//!
//! Systems and the simulation layer push [`SoundCmd`] and [`StageCmd`] into
//! unbounded channels; the host drains the receiving ends on its own thread
//! and schedule. Sends never block and a disconnected host is tolerated.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;

use crate::events::outbound::{SoundCmd, StageCmd};

#[derive(Resource)]
pub struct OverlayBridge {
    tx_sound: Sender<SoundCmd>,
    tx_stage: Sender<StageCmd>,
}

impl OverlayBridge {
    pub fn sound(&self, cmd: SoundCmd) {
        trace!("sound cmd: {:?}", cmd);
        // Receiver may be gone during shutdown.
        let _ = self.tx_sound.send(cmd);
    }

    pub fn stage(&self, cmd: StageCmd) {
        trace!("stage cmd: {:?}", cmd);
        let _ = self.tx_stage.send(cmd);
    }
}

/// Host-side ends of the bridge.
pub struct OverlayReceivers {
    pub sounds: Receiver<SoundCmd>,
    pub stage: Receiver<StageCmd>,
}

pub fn create_bridge() -> (OverlayBridge, OverlayReceivers) {
    let (tx_sound, rx_sound) = unbounded();
    let (tx_stage, rx_stage) = unbounded();
    (
        OverlayBridge { tx_sound, tx_stage },
        OverlayReceivers {
            sounds: rx_sound,
            stage: rx_stage,
        },
    )
}
