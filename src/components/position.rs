// World position in stage pixels. Origin is the top-left corner of the
// overlay, y grows downward. An entity's position is its bottom-center
// anchor point.
use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub pos: Vec2,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
