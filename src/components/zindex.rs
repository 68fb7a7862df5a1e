use bevy_ecs::prelude::Component;

/// Draw order. Higher values render on top.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZIndex(pub i32);
