use bevy_ecs::prelude::Component;

/// Per-entity scale multiplier, on top of the sheet's base scale.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub value: f32,
}

impl Scale {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}
