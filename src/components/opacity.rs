use bevy_ecs::prelude::Component;

/// Visual presence. `alpha` is driven by fades; `visible` is a hard toggle
/// used while an entity is dead and its tombstone stands in for it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Opacity {
    pub alpha: f32,
    pub visible: bool,
}

impl Opacity {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            visible: true,
        }
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            visible: true,
        }
    }
}
