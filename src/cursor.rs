//! Sprite cursor with a drop shadow, plus a ripple on every click.

use bevy::{prelude::*, window::PrimaryWindow};

use crate::assets;
use crate::pointer::Pointer;
use crate::view;

const CURSOR_DIR: &str = "data/common/m_cursor";
const CURSOR_SIZE: Vec2 = Vec2::new(32.0, 32.0);
const RIPPLE_SIZE: Vec2 = Vec2::new(32.0, 32.0);
const RIPPLE_TIME: f32 = 0.75;
const RIPPLE_START_SCALE: f32 = 0.1;
const RIPPLE_END_SCALE: f32 = 2.0;

const Z_RIPPLE: f32 = 99.0;
const Z_SHADOW: f32 = 100.0;
const Z_CURSOR: f32 = 101.0;

/// Expanding, fading ring left where the button went down.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Ripple {
    elapsed: f32,
}

impl Ripple {
    pub fn progress(&self) -> f32 {
        (self.elapsed / RIPPLE_TIME).min(1.0)
    }

    pub fn scale(&self) -> f32 {
        RIPPLE_START_SCALE + (RIPPLE_END_SCALE - RIPPLE_START_SCALE) * self.progress()
    }

    pub fn alpha(&self) -> u8 {
        (255.0 * (1.0 - self.progress())) as u8
    }

    /// Returns `false` once the ripple has played out.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.progress() < 1.0
    }
}

/// Detects the not-pressed -> pressed edge of the primary button.
#[derive(Resource, Default, Debug)]
pub struct ClickEdge {
    held: bool,
}

impl ClickEdge {
    pub fn update(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.held;
        self.held = pressed;
        rising
    }
}

#[derive(Resource)]
struct CursorImages {
    normal: Handle<Image>,
    clicked: Handle<Image>,
    normal_shadow: Handle<Image>,
    clicked_shadow: Handle<Image>,
    ripple: Handle<Image>,
}

#[derive(Component)]
struct CursorSprite {
    shadow: bool,
}

pub struct CursorPlugin;

impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickEdge>()
            .add_systems(Startup, (hide_os_cursor, spawn_cursor))
            .add_systems(Update, (spawn_ripples, follow_pointer, play_ripples));
    }
}

fn cursor_image(asset_server: &AssetServer, name: &str) -> Handle<Image> {
    asset_server.load(format!("{CURSOR_DIR}/{name}"))
}

fn hide_os_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut win in windows.iter_mut() {
        win.cursor_options.visible = false;
    }
}

fn spawn_cursor(mut cmd: Commands, asset_server: Res<AssetServer>) {
    let images = CursorImages {
        normal: cursor_image(&asset_server, "mausuk_n01_c01.png"),
        clicked: cursor_image(&asset_server, "mausuk_n02_c01.png"),
        normal_shadow: cursor_image(&asset_server, "mausuk_n01_s.png"),
        clicked_shadow: cursor_image(&asset_server, "mausuk_n02_s.png"),
        ripple: cursor_image(&asset_server, "mausuk_e01_c01.png"),
    };

    for shadow in [true, false] {
        cmd.spawn((
            Sprite {
                custom_size: Some(CURSOR_SIZE),
                ..default()
            },
            Transform::default(),
            Visibility::Hidden,
            CursorSprite { shadow },
        ));
    }
    cmd.insert_resource(images);
}

fn follow_pointer(
    pointer: Res<Pointer>,
    asset_server: Res<AssetServer>,
    images: Option<Res<CursorImages>>,
    mut sprites: Query<(&CursorSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let Some(images) = images else { return };

    for (cursor, mut sprite, mut t, mut vis) in sprites.iter_mut() {
        let Some(pos) = pointer.pos else {
            *vis = Visibility::Hidden;
            continue;
        };
        *vis = Visibility::Visible;

        let (handle, z, fallback) = match (cursor.shadow, pointer.pressed) {
            (true, false) => (&images.normal_shadow, Z_SHADOW, Color::NONE),
            (true, true) => (&images.clicked_shadow, Z_SHADOW, Color::NONE),
            (false, false) => (&images.normal, Z_CURSOR, Color::WHITE),
            (false, true) => (&images.clicked, Z_CURSOR, Color::WHITE),
        };
        let (image, color) = assets::resolve_image(&asset_server, handle, fallback);
        sprite.image = image;
        sprite.color = color;
        t.translation = view::to_world(pos - CURSOR_SIZE / 2.0, CURSOR_SIZE, z);
    }
}

fn spawn_ripples(
    mut cmd: Commands,
    pointer: Res<Pointer>,
    mut edge: ResMut<ClickEdge>,
    images: Option<Res<CursorImages>>,
) {
    let Some(images) = images else { return };
    if !edge.update(pointer.pressed) {
        return;
    }
    let Some(pos) = pointer.pos else { return };

    let ripple = Ripple::default();
    cmd.spawn((
        Sprite {
            image: images.ripple.clone(),
            custom_size: Some(RIPPLE_SIZE),
            ..default()
        },
        assets::Placeholder(Color::WHITE),
        Transform::from_translation(view::to_world(pos - RIPPLE_SIZE / 2.0, RIPPLE_SIZE, Z_RIPPLE))
            .with_scale(Vec3::splat(ripple.scale())),
        ripple,
    ));
}

fn play_ripples(
    mut cmd: Commands,
    time: Res<Time>,
    mut ripples: Query<(Entity, &mut Ripple, &mut Transform, &mut Sprite)>,
) {
    for (entity, mut ripple, mut t, mut sprite) in ripples.iter_mut() {
        if !ripple.advance(time.delta_secs()) {
            cmd.entity(entity).despawn();
            continue;
        }
        t.scale = Vec3::splat(ripple.scale());
        sprite.color.set_alpha(f32::from(ripple.alpha()) / 255.0);
    }
}
