//! Axis-aligned collision rectangles.

use glam::Vec2;

/// World-space AABB. Overlap tests use strict inequalities, so rectangles
/// that merely share an edge do not collide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoxCollider {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn overlaps(&self, other: &BoxCollider) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn shifted(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Stomp test: after applying `delta`, does this box overlap `target`
    /// having crossed its top edge from above? The bottom edge must start
    /// strictly above the target's top and end at or below it.
    pub fn lands_on_top_of(&self, target: &BoxCollider, delta: Vec2) -> bool {
        let moved = self.shifted(delta);
        moved.overlaps(target) && self.bottom() < target.y && moved.bottom() >= target.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== OVERLAP TESTS ====================

    #[test]
    fn test_overlapping_boxes() {
        let a = BoxCollider::new(0.0, 0.0, 10.0, 10.0);
        let b = BoxCollider::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = BoxCollider::new(0.0, 0.0, 10.0, 10.0);
        let b = BoxCollider::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = BoxCollider::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_disjoint_boxes() {
        let a = BoxCollider::new(0.0, 0.0, 4.0, 4.0);
        let b = BoxCollider::new(100.0, 100.0, 4.0, 4.0);
        assert!(!a.overlaps(&b));
    }

    // ==================== STOMP TESTS ====================

    #[test]
    fn test_lands_on_top_crossing_edge() {
        let target = BoxCollider::new(0.0, 50.0, 20.0, 20.0);
        let falling = BoxCollider::new(5.0, 20.0, 10.0, 10.0);
        // bottom at 30, moves down 25 to 55, crossing target top (50)
        assert!(falling.lands_on_top_of(&target, Vec2::new(0.0, 25.0)));
    }

    #[test]
    fn test_no_stomp_when_starting_inside() {
        let target = BoxCollider::new(0.0, 50.0, 20.0, 20.0);
        let inside = BoxCollider::new(5.0, 45.0, 10.0, 10.0);
        // bottom already at 55, below the target top
        assert!(!inside.lands_on_top_of(&target, Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_no_stomp_without_horizontal_overlap() {
        let target = BoxCollider::new(0.0, 50.0, 20.0, 20.0);
        let beside = BoxCollider::new(40.0, 20.0, 10.0, 10.0);
        assert!(!beside.lands_on_top_of(&target, Vec2::new(0.0, 25.0)));
    }

    #[test]
    fn test_no_stomp_moving_upward() {
        let target = BoxCollider::new(0.0, 50.0, 20.0, 20.0);
        let below = BoxCollider::new(5.0, 80.0, 10.0, 10.0);
        assert!(!below.lands_on_top_of(&target, Vec2::new(0.0, -25.0)));
    }

    #[test]
    fn test_stomp_needs_penetration_past_the_edge() {
        let target = BoxCollider::new(0.0, 50.0, 20.0, 20.0);
        let falling = BoxCollider::new(5.0, 30.0, 10.0, 10.0);
        // bottom 40 -> 50: an exact edge-touch is not a collision
        assert!(!falling.lands_on_top_of(&target, Vec2::new(0.0, 10.0)));
        // the slightest penetration past the top is
        assert!(falling.lands_on_top_of(&target, Vec2::new(0.0, 10.001)));
    }
}
