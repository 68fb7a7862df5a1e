//! Overhead text attachments: name label and the kills/jump-hits badge.

use bevy_ecs::prelude::Component;

/// Nominal line height of the name label, used for stacking the overhead
/// column.
pub const NAME_HEIGHT: f32 = 18.0;
/// Nominal line height of the info badge.
pub const BADGE_HEIGHT: f32 = 14.0;
/// Vertical gap between stacked overhead elements.
pub const STACK_GAP: f32 = 6.0;

#[derive(Component, Debug, Clone, Default)]
pub struct NameLabel {
    pub text: String,
    pub visible: bool,
    /// Offset from the entity anchor (negative is up).
    pub offset_y: f32,
}

/// Kill and jump-hit counters shown above the name. Hidden while both are
/// zero.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct InfoBadge {
    pub kills: u32,
    pub jump_hits: u32,
    pub offset_y: f32,
}

impl InfoBadge {
    pub fn is_visible(&self) -> bool {
        self.kills > 0 || self.jump_hits > 0
    }
}
