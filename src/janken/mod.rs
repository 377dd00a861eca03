//! Janken screen: spawns the table, ticks the round at a fixed rate and
//! mirrors it onto sprites.

pub mod card;
pub mod fade;
pub mod game;

use bevy::prelude::*;

use crate::assets::{self, FALLBACK_BACKDROP, FALLBACK_CARD};
use crate::pointer::Pointer;
use crate::screen::{despawn, Screen};
use crate::{scroll, view};
use card::{Card, Hand, Side, Slot, CARD_SIZE};
use game::{deck_pos, Janken, Phase};

const BG: &str = "data/y/janken/jan_bg_01.png";
const BG_LAYERS: [&str; 2] = ["data/y/janken/jan_bg_02.png", "data/y/janken/jan_bg_03.png"];
const CARD_BACK: &str = "data/y/janken/0000.png";
const MUSIC: &str = "sound/bgm/y_gx_17.wav";
const MUSIC_VOLUME: f32 = 0.5;

// Draw order
const Z_BG: f32 = 0.0;
const Z_LAYERS: [f32; 2] = [1.0, 2.0];
const Z_DECK: f32 = 5.0;
const Z_PLAYER: f32 = 10.0;
const Z_SELECTED: f32 = 11.0;
const Z_ENEMY: f32 = 12.0;
const Z_FADE: f32 = 50.0;
// Keeps cards on the same layer in slot order while they share the deck
const Z_SLOT_STEP: f32 = 0.1;

pub struct JankenPlugin;

impl Plugin for JankenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Janken), setup)
            .add_systems(OnExit(Screen::Janken), (despawn::<JankenRoot>, teardown))
            .add_systems(FixedUpdate, tick.run_if(in_state(Screen::Janken)))
            .add_systems(
                Update,
                (sync_layers, sync_deck, sync_cards, sync_fade, leave_when_loaded)
                    .run_if(in_state(Screen::Janken)),
            );
    }
}

#[derive(Component)]
struct JankenRoot;

#[derive(Component)]
struct LayerSprite(usize);

#[derive(Component)]
struct DeckSprite;

#[derive(Component)]
struct CardSprite {
    side: Side,
    slot: Slot,
}

#[derive(Component)]
struct FadeSprite;

#[derive(Resource)]
struct CardImages {
    back: Handle<Image>,
    rock: Handle<Image>,
    paper: Handle<Image>,
    scissors: Handle<Image>,
}

impl CardImages {
    fn face(&self, hand: Hand) -> &Handle<Image> {
        match hand {
            Hand::Rock => &self.rock,
            Hand::Paper => &self.paper,
            Hand::Scissors => &self.scissors,
        }
    }
}

fn setup(mut cmd: Commands, asset_server: Res<AssetServer>) {
    info!("Entering janken");
    cmd.insert_resource(Janken::new());

    let images = CardImages {
        back: asset_server.load(CARD_BACK),
        rock: asset_server.load("data/y/janken/jan_card_01.png"),
        paper: asset_server.load("data/y/janken/jan_card_03.png"),
        scissors: asset_server.load("data/y/janken/jan_card_02.png"),
    };

    cmd.spawn((
        assets::image_sprite(&asset_server, BG, view::VIEW_SIZE, FALLBACK_BACKDROP),
        Transform::from_xyz(0.0, 0.0, Z_BG),
        JankenRoot,
    ));

    for (i, path) in BG_LAYERS.iter().enumerate() {
        let layer = scroll::ScrollLayer::new(game::LAYER_SPEEDS[i], view::VIEW_H);
        let sprite = assets::image_sprite(&asset_server, path, view::VIEW_SIZE, Color::NONE);
        let id = scroll::spawn_layer(&mut cmd, layer, sprite, Z_LAYERS[i]);
        cmd.entity(id).insert((LayerSprite(i), JankenRoot));
    }

    cmd.spawn((
        Sprite {
            image: images.back.clone(),
            custom_size: Some(CARD_SIZE),
            ..default()
        },
        Transform::from_translation(view::to_world(deck_pos(), CARD_SIZE, Z_DECK)),
        Visibility::Hidden,
        DeckSprite,
        JankenRoot,
    ));

    for side in [Side::Enemy, Side::Player] {
        for slot in Slot::ALL {
            cmd.spawn((
                Sprite {
                    image: images.back.clone(),
                    custom_size: Some(CARD_SIZE),
                    ..default()
                },
                Transform::from_translation(view::to_world(deck_pos(), CARD_SIZE, Z_PLAYER)),
                Visibility::Hidden,
                CardSprite { side, slot },
                JankenRoot,
            ));
        }
    }

    cmd.spawn((
        Sprite::from_color(Color::BLACK, view::VIEW_SIZE),
        Transform::from_xyz(0.0, 0.0, Z_FADE),
        FadeSprite,
        JankenRoot,
    ));

    cmd.spawn((assets::music(&asset_server, MUSIC, MUSIC_VOLUME), JankenRoot));
    cmd.insert_resource(images);
}

fn teardown(mut cmd: Commands) {
    cmd.remove_resource::<Janken>();
    cmd.remove_resource::<CardImages>();
    info!("Left janken");
}

fn tick(time: Res<Time>, pointer: Res<Pointer>, janken: Option<ResMut<Janken>>) {
    let Some(mut janken) = janken else { return };

    let before = janken.phase();
    janken.update(&pointer, time.delta_secs());
    if janken.phase() != before {
        info!("Janken phase {:?} -> {:?}", before, janken.phase());
        if janken.phase() == Phase::Dueling {
            if let Some(card) = janken.selected() {
                info!("Picked {:?}", card.hand());
            }
        }
    }
}

/// Draw depth of a card: unselected player cards, then the selected one,
/// then the enemy row on top.
fn card_z(card: &Card) -> f32 {
    let base = match card.side() {
        Side::Enemy => Z_ENEMY,
        Side::Player if card.is_selected() => Z_SELECTED,
        Side::Player => Z_PLAYER,
    };
    base + card.slot().index() as f32 * Z_SLOT_STEP
}

fn sync_layers(
    janken: Option<Res<Janken>>,
    mut layers: Query<(&LayerSprite, &mut Transform)>,
) {
    let Some(janken) = janken else { return };

    for (layer, mut t) in layers.iter_mut() {
        if let Some(state) = janken.layers().get(layer.0) {
            t.translation = state.translation(t.translation.z);
        }
    }
}

fn sync_deck(
    janken: Option<Res<Janken>>,
    asset_server: Res<AssetServer>,
    images: Option<Res<CardImages>>,
    mut deck: Query<(&mut Sprite, &mut Visibility), With<DeckSprite>>,
) {
    let (Some(janken), Some(images)) = (janken, images) else {
        return;
    };

    for (mut sprite, mut vis) in deck.iter_mut() {
        *vis = if janken.phase() == Phase::Waiting {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        let (image, color) = assets::resolve_image(&asset_server, &images.back, FALLBACK_CARD);
        sprite.image = image;
        sprite.color = color;
    }
}

fn sync_cards(
    janken: Option<Res<Janken>>,
    asset_server: Res<AssetServer>,
    images: Option<Res<CardImages>>,
    mut cards: Query<(&CardSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let (Some(janken), Some(images)) = (janken, images) else {
        return;
    };

    for (tag, mut sprite, mut t, mut vis) in cards.iter_mut() {
        let Some(card) = janken.card(tag.side, tag.slot) else {
            *vis = Visibility::Hidden;
            continue;
        };
        *vis = Visibility::Visible;

        let handle = match card.hand() {
            Some(hand) if !card.is_hidden() => images.face(hand),
            _ => &images.back,
        };
        let (image, color) = assets::resolve_image(&asset_server, handle, FALLBACK_CARD);
        sprite.image = image;
        sprite.color = color;

        t.translation = view::to_world(card.draw_pos(), CARD_SIZE, card_z(card));
        t.rotation = Quat::from_rotation_z(card.rotation());
    }
}

fn sync_fade(
    janken: Option<Res<Janken>>,
    mut overlay: Query<(&mut Sprite, &mut Visibility), With<FadeSprite>>,
) {
    let Some(janken) = janken else { return };

    for (mut sprite, mut vis) in overlay.iter_mut() {
        if janken.phase().shows_overlay() {
            *vis = Visibility::Visible;
            sprite.color.set_alpha(janken.fade().opacity());
        } else {
            *vis = Visibility::Hidden;
        }
    }
}

fn leave_when_loaded(janken: Option<Res<Janken>>, mut next: ResMut<NextState<Screen>>) {
    if janken.is_some_and(|j| j.phase() == Phase::Loading) {
        next.set(Screen::MainMenu);
    }
}
