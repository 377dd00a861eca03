//! Image and audio loading with flat-colour fallbacks. A missing file never
//! stops the frame loop: sprites degrade to a coloured rectangle of the
//! requested size, music is dropped.

use bevy::{
    asset::LoadState,
    audio::{PlaybackMode, Volume},
    prelude::*,
};

pub const FALLBACK_BACKDROP: Color = Color::srgb(50.0 / 255.0, 50.0 / 255.0, 100.0 / 255.0);
pub const FALLBACK_CARD: Color = Color::srgb(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);
pub const FALLBACK_BUTTON: Color = Color::srgb(100.0 / 255.0, 100.0 / 255.0, 1.0);

pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, (swap_failed_images, drop_failed_music));
    }
}

/// Colour shown in place of a sprite's image if that image fails to load.
#[derive(Component, Clone, Copy, Debug)]
pub struct Placeholder(pub Color);

/// Looping background track.
#[derive(Component)]
pub struct Music;

/// Sprite that stretches `path` to `size`, with `fallback` as placeholder.
pub fn image_sprite(
    asset_server: &AssetServer,
    path: &str,
    size: Vec2,
    fallback: Color,
) -> (Sprite, Placeholder) {
    (
        Sprite {
            image: asset_server.load(path.to_string()),
            custom_size: Some(size),
            ..default()
        },
        Placeholder(fallback),
    )
}

pub fn music(asset_server: &AssetServer, path: &str, volume: f32) -> (AudioPlayer, PlaybackSettings, Music) {
    (
        AudioPlayer::new(asset_server.load(path.to_string())),
        PlaybackSettings {
            mode: PlaybackMode::Loop,
            volume: Volume::new(volume),
            ..default()
        },
        Music,
    )
}

pub fn has_failed(asset_server: &AssetServer, id: impl Into<bevy::asset::UntypedAssetId>) -> bool {
    matches!(asset_server.get_load_state(id), Some(LoadState::Failed(_)))
}

/// Image and tint to draw for `handle`: the image itself, or the plain
/// placeholder colour once loading has failed.
pub fn resolve_image(
    asset_server: &AssetServer,
    handle: &Handle<Image>,
    fallback: Color,
) -> (Handle<Image>, Color) {
    if has_failed(asset_server, handle.id()) {
        (Handle::default(), fallback)
    } else {
        (handle.clone(), Color::WHITE)
    }
}

fn swap_failed_images(
    mut cmd: Commands,
    asset_server: Res<AssetServer>,
    mut sprites: Query<(Entity, &mut Sprite, &Placeholder)>,
) {
    for (entity, mut sprite, placeholder) in sprites.iter_mut() {
        match asset_server.get_load_state(sprite.image.id()) {
            Some(LoadState::Failed(err)) => {
                warn!("Image failed to load, using placeholder: {}", err);
                let alpha = sprite.color.alpha();
                sprite.image = Handle::default();
                sprite.color = placeholder.0.with_alpha(alpha * placeholder.0.alpha());
                cmd.entity(entity).remove::<Placeholder>();
            }
            Some(LoadState::Loaded) => {
                cmd.entity(entity).remove::<Placeholder>();
            }
            _ => {}
        }
    }
}

fn drop_failed_music(
    mut cmd: Commands,
    asset_server: Res<AssetServer>,
    tracks: Query<(Entity, &AudioPlayer), With<Music>>,
) {
    for (entity, player) in tracks.iter() {
        if has_failed(&asset_server, player.0.id()) {
            warn!("Music failed to load, continuing without it");
            cmd.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), AssetsPlugin))
            .init_asset::<Image>()
            .init_asset::<AudioSource>();
        app
    }

    /// Runs frames until `done` holds; loads finish on the IO task pool.
    fn settle(app: &mut App, done: impl Fn(&mut World) -> bool) {
        for _ in 0..500 {
            app.update();
            if done(app.world_mut()) {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("load never finished");
    }

    #[test]
    fn missing_image_becomes_flat_placeholder_of_same_size() {
        let mut app = app();
        let server = app.world().resource::<AssetServer>().clone();
        let size = Vec2::new(120.0, 180.0);
        let id = app
            .world_mut()
            .spawn((
                image_sprite(&server, "data/nowhere/missing.png", size, FALLBACK_CARD),
                Transform::default(),
            ))
            .id();

        settle(&mut app, |world| world.get::<Placeholder>(id).is_none());

        let sprite = app.world().get::<Sprite>(id).unwrap();
        assert_eq!(sprite.custom_size, Some(size));
        assert_eq!(sprite.color, FALLBACK_CARD);
        assert_eq!(sprite.image, Handle::default());
    }

    #[test]
    fn placeholder_keeps_the_sprite_transparency() {
        let mut app = app();
        let server = app.world().resource::<AssetServer>().clone();
        let (mut sprite, placeholder) =
            image_sprite(&server, "data/nowhere/logo.png", Vec2::new(800.0, 600.0), FALLBACK_BACKDROP);
        sprite.color.set_alpha(0.0);
        let id = app.world_mut().spawn((sprite, placeholder)).id();

        settle(&mut app, |world| world.get::<Placeholder>(id).is_none());

        let sprite = app.world().get::<Sprite>(id).unwrap();
        assert_eq!(sprite.color, FALLBACK_BACKDROP.with_alpha(0.0));
    }

    #[test]
    fn missing_music_is_dropped() {
        let mut app = app();
        let server = app.world().resource::<AssetServer>().clone();
        app.world_mut()
            .spawn(music(&server, "sound/nowhere/missing.wav", 0.5));

        settle(&mut app, |world| {
            world
                .query_filtered::<Entity, With<Music>>()
                .iter(world)
                .next()
                .is_none()
        });
    }

    #[test]
    fn unloaded_handle_resolves_to_itself() {
        let app = app();
        let server = app.world().resource::<AssetServer>();
        let handle: Handle<Image> = Handle::default();
        let (image, color) = resolve_image(server, &handle, FALLBACK_CARD);
        assert_eq!(image, handle);
        assert_eq!(color, Color::WHITE);
    }
}
