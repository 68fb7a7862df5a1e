pub mod behavior;
pub mod collision;
pub mod cosmetics;
pub mod lifecycle;
pub mod movement;
pub mod time;
pub mod tombstone;
pub mod tween;
