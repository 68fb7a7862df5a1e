use bevy_ecs::prelude::Resource;

/// Overlay dimensions in pixels. The ground line is the bottom edge.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn ground(&self) -> f32 {
        self.height
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}
