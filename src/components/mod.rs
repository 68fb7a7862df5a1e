pub mod body;
pub mod boxcollider;
pub mod bubble;
pub mod emotes;
pub mod evotar;
pub mod label;
pub mod opacity;
pub mod position;
pub mod scale;
pub mod sprite;
pub mod timer;
pub mod tombstone;
pub mod trail;
pub mod tween;
pub mod zindex;
