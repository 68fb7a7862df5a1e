//! Sprite sheet metadata attached to simulated entities.
//!
//! The simulation never touches pixels; it only needs the geometry a sheet
//! declares (collider rectangle, frame size, base scale) to place entities
//! and resolve stomps. The anchor convention is bottom-center: an entity's
//! position is the point between its feet.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetData {
    pub collider: ColliderRect,
    pub size: FrameSize,
    /// Base scale baked into the sheet, multiplied with the entity scale.
    pub scale: f32,
    /// Whether the renderer mirrors the sheet when facing left.
    #[serde(default)]
    pub flip: bool,
    /// Layer names that take the user color.
    #[serde(default)]
    pub colored: Vec<String>,
}

impl Default for SheetData {
    fn default() -> Self {
        Self {
            collider: ColliderRect {
                x: 8.0,
                y: 6.0,
                w: 16.0,
                h: 26.0,
            },
            size: FrameSize { w: 32.0, h: 32.0 },
            scale: 4.0,
            flip: true,
            colored: vec!["body".to_string()],
        }
    }
}

/// The sheet an entity currently wears. Swapping the skin keeps the entity's
/// motion state and physics untouched.
#[derive(Component, Debug, Clone)]
pub struct Skin {
    pub name: String,
    pub data: SheetData,
}

impl Skin {
    pub fn new(name: impl Into<String>, data: SheetData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Total display scale for a given entity scale.
    pub fn total_scale(&self, entity_scale: f32) -> f32 {
        entity_scale * self.data.scale
    }

    /// World-space collider for an entity anchored at `pos` (bottom-center).
    pub fn collider(&self, pos: Vec2, total_scale: f32) -> BoxCollider {
        let c = &self.data.collider;
        BoxCollider::new(
            pos.x - c.x * total_scale,
            pos.y - c.h * total_scale,
            c.w * total_scale,
            c.h * total_scale,
        )
    }

    pub fn half_width(&self, total_scale: f32) -> f32 {
        self.data.collider.w * 0.5 * total_scale
    }

    pub fn center_offset_y(&self, total_scale: f32) -> f32 {
        self.data.collider.h * 0.5 * total_scale
    }

    /// Spawn height for falling entrances, just above the top of the screen.
    pub fn falling_start_y(&self, total_scale: f32) -> f32 {
        let c = &self.data.collider;
        -(c.y + c.h - self.data.size.h * 0.5) * total_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== SKIN GEOMETRY TESTS ====================

    #[test]
    fn test_collider_anchored_at_feet() {
        let skin = Skin::new("dude", SheetData::default());
        let col = skin.collider(Vec2::new(100.0, 500.0), 1.0);
        assert_eq!(col.x, 92.0);
        assert_eq!(col.y, 474.0);
        assert_eq!(col.w, 16.0);
        assert_eq!(col.h, 26.0);
        assert_eq!(col.bottom(), 500.0);
    }

    #[test]
    fn test_collider_scales_uniformly() {
        let skin = Skin::new("dude", SheetData::default());
        let col = skin.collider(Vec2::new(0.0, 0.0), 4.0);
        assert_eq!(col.w, 64.0);
        assert_eq!(col.h, 104.0);
        assert_eq!(col.bottom(), 0.0);
    }

    #[test]
    fn test_falling_start_is_above_screen() {
        let skin = Skin::new("dude", SheetData::default());
        assert!(skin.falling_start_y(4.0) < 0.0);
    }

    #[test]
    fn test_total_scale_multiplies_sheet_base() {
        let skin = Skin::new("dude", SheetData::default());
        assert_eq!(skin.total_scale(2.0), 8.0);
    }
}
