use bevy::{input::InputSystem, prelude::*, window::PrimaryWindow};

use crate::{view, MainCamera};

/// Pointer state sampled once per frame, in logical screen coordinates.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// `None` while the cursor is outside the window.
    pub pos: Option<Vec2>,
    /// Primary button held.
    pub pressed: bool,
}

impl Pointer {
    #[cfg(test)]
    pub fn at(pos: Vec2, pressed: bool) -> Self {
        Self {
            pos: Some(pos),
            pressed,
        }
    }
}

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Pointer>()
            .add_systems(PreUpdate, sample_pointer.after(InputSystem));
    }
}

fn sample_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    cam: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut pointer: ResMut<Pointer>,
) {
    pointer.pressed = mouse.pressed(MouseButton::Left);
    pointer.pos = None;

    let Ok(win) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_t)) = cam.get_single() else {
        return;
    };
    let Some(cursor) = win.cursor_position() else {
        return;
    };
    let Some(world) = camera.viewport_to_world_2d(cam_t, cursor).ok() else {
        return;
    };
    pointer.pos = Some(view::to_screen(world));
}
