use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    /// Scaled simulation seconds since start.
    pub elapsed: f32,
    /// Scaled seconds advanced this tick.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}
