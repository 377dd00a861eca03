//! Logical viewport. Game logic works in 800x600 top-left screen space
//! (y grows downward); sprites live in Bevy's centred, y-up world space.

use bevy::prelude::*;

pub const VIEW_W: f32 = 800.0;
pub const VIEW_H: f32 = 600.0;
pub const VIEW_SIZE: Vec2 = Vec2::new(VIEW_W, VIEW_H);

/// World-space centre of a rectangle whose top-left corner is `top_left`.
pub fn to_world(top_left: Vec2, size: Vec2, z: f32) -> Vec3 {
    let centre = top_left + size / 2.0;
    Vec3::new(centre.x - VIEW_W / 2.0, VIEW_H / 2.0 - centre.y, z)
}

pub fn to_screen(world: Vec2) -> Vec2 {
    Vec2::new(world.x + VIEW_W / 2.0, VIEW_H / 2.0 - world.y)
}
