//! Title screen: scrolling backdrop, mascots, five stacked buttons.

use bevy::prelude::*;

use crate::assets::{self, FALLBACK_BACKDROP, FALLBACK_BUTTON};
use crate::pointer::Pointer;
use crate::screen::{despawn, Screen};
use crate::scroll::{self, ScrollLayer};
use crate::view::{self, VIEW_H, VIEW_SIZE, VIEW_W};

const BG: &str = "data/menu/abmake_bg_01.png";
const BG_LAYER: &str = "data/menu/abmake_bg_02.png";
const MUSIC: &str = "sound/bgm/y_gx_01.wav";
const MUSIC_VOLUME: f32 = 0.8;
const SCROLL_SPEED: f32 = 1.0;

const BUTTONS: [(&str, MenuAction); 5] = [
    ("data/title/title_botton_01_01_e.png", MenuAction::Online),
    ("data/title/title_botton_02_01_e.png", MenuAction::Options),
    ("data/title/title_botton_03_01_e.png", MenuAction::Website),
    ("data/title/title_botton_04_01_e.png", MenuAction::Delete),
    ("data/title/title_botton_05_01_e.png", MenuAction::Quit),
];

// Logical sizes the artwork is stretched to
const BUTTON_SIZE: Vec2 = Vec2::new(220.0, 40.0);
const TITLE_SIZE: Vec2 = Vec2::new(420.0, 150.0);
const BADGE_SIZE: Vec2 = Vec2::new(96.0, 30.0);
const MASCOT_SIZE: Vec2 = Vec2::new(300.0, 450.0);
const COPYRIGHT_SIZE: Vec2 = Vec2::new(360.0, 16.0);
const BUTTONS_BOTTOM_MARGIN: f32 = 85.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuAction {
    Online,
    Options,
    Website,
    Delete,
    Quit,
}

/// Top-left screen positions of every title element.
#[derive(Resource, Clone, Debug)]
pub struct MenuLayout {
    pub title: Vec2,
    pub badge: Vec2,
    pub left_mascot: Vec2,
    pub right_mascot: Vec2,
    pub buttons: Vec<(Rect, MenuAction)>,
    pub copyright: Vec2,
}

impl MenuLayout {
    pub fn new(width: f32, height: f32) -> Self {
        let stack_h = BUTTON_SIZE.y * BUTTONS.len() as f32;
        let top = height - stack_h - BUTTONS_BOTTOM_MARGIN;
        let x = (width - BUTTON_SIZE.x) / 2.0;
        let buttons = BUTTONS
            .iter()
            .enumerate()
            .map(|(i, &(_, action))| {
                let min = Vec2::new(x, top + i as f32 * BUTTON_SIZE.y);
                (Rect::from_corners(min, min + BUTTON_SIZE), action)
            })
            .collect();

        Self {
            title: Vec2::new((width - TITLE_SIZE.x) / 2.0, 30.0),
            badge: Vec2::new(10.0, 10.0),
            left_mascot: Vec2::new(-MASCOT_SIZE.x * 0.2, height - MASCOT_SIZE.y),
            right_mascot: Vec2::new(width - MASCOT_SIZE.x * 0.65, height - MASCOT_SIZE.y),
            buttons,
            copyright: Vec2::new(
                (width - COPYRIGHT_SIZE.x) / 2.0,
                height - COPYRIGHT_SIZE.y - 10.0,
            ),
        }
    }

    pub fn hit(&self, pos: Vec2) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, action)| action)
    }
}

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::MainMenu), setup)
            .add_systems(OnExit(Screen::MainMenu), (despawn::<MenuRoot>, teardown))
            .add_systems(
                FixedUpdate,
                scroll::advance_layers.run_if(in_state(Screen::MainMenu)),
            )
            .add_systems(Update, click_buttons.run_if(in_state(Screen::MainMenu)));
    }
}

#[derive(Component)]
struct MenuRoot;

fn setup(mut cmd: Commands, asset_server: Res<AssetServer>) {
    let layout = MenuLayout::new(VIEW_W, VIEW_H);

    cmd.spawn((
        assets::image_sprite(&asset_server, BG, VIEW_SIZE, FALLBACK_BACKDROP),
        Transform::from_xyz(0.0, 0.0, 0.0),
        MenuRoot,
    ));

    let layer = ScrollLayer::new(SCROLL_SPEED, VIEW_H);
    let sprite = assets::image_sprite(&asset_server, BG_LAYER, VIEW_SIZE, Color::NONE);
    let id = scroll::spawn_layer(&mut cmd, layer, sprite, 1.0);
    cmd.entity(id).insert((layer, MenuRoot));

    let mut put = |path: &str, at: Vec2, size: Vec2, fallback: Color, z: f32| {
        cmd.spawn((
            assets::image_sprite(&asset_server, path, size, fallback),
            Transform::from_translation(view::to_world(at, size, z)),
            MenuRoot,
        ));
    };

    put("data/title/title_kyara_01.png", layout.left_mascot, MASCOT_SIZE, Color::NONE, 2.0);
    put("data/title/title_kyara_02.png", layout.right_mascot, MASCOT_SIZE, Color::NONE, 2.0);
    for (&(path, _), (rect, _)) in BUTTONS.iter().zip(layout.buttons.iter()) {
        put(path, rect.min, BUTTON_SIZE, FALLBACK_BUTTON, 3.0);
    }
    put("data/title/title_title_01_e.png", layout.title, TITLE_SIZE, Color::NONE, 4.0);
    put("data/title/title_konami_01.png", layout.badge, BADGE_SIZE, Color::NONE, 5.0);
    put("data/title/title_copy_01_e.png", layout.copyright, COPYRIGHT_SIZE, Color::NONE, 6.0);

    cmd.spawn((assets::music(&asset_server, MUSIC, MUSIC_VOLUME), MenuRoot));
    cmd.insert_resource(layout);
}

fn teardown(mut cmd: Commands) {
    cmd.remove_resource::<MenuLayout>();
}

fn click_buttons(
    mouse: Res<ButtonInput<MouseButton>>,
    pointer: Res<Pointer>,
    layout: Option<Res<MenuLayout>>,
    mut next: ResMut<NextState<Screen>>,
    mut exit: EventWriter<AppExit>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let (Some(layout), Some(pos)) = (layout, pointer.pos) else {
        return;
    };

    match layout.hit(pos) {
        Some(MenuAction::Online) => next.set(Screen::Janken),
        Some(MenuAction::Quit) => {
            exit.send(AppExit::Success);
        }
        Some(action) => info!("{:?} is not available yet", action),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_stack_without_gaps_above_bottom_margin() {
        let layout = MenuLayout::new(800.0, 600.0);
        assert_eq!(layout.buttons.len(), 5);
        for pair in layout.buttons.windows(2) {
            assert_eq!(pair[0].0.max.y, pair[1].0.min.y);
        }
        let last = layout.buttons.last().unwrap().0;
        assert_eq!(last.max.y, 600.0 - 85.0);
        assert_eq!(last.min.x, (800.0 - BUTTON_SIZE.x) / 2.0);
    }

    #[test]
    fn fixed_elements_are_anchored() {
        let layout = MenuLayout::new(800.0, 600.0);
        assert_eq!(layout.title, Vec2::new(190.0, 30.0));
        assert_eq!(layout.badge, Vec2::new(10.0, 10.0));
        assert_eq!(layout.left_mascot, Vec2::new(-60.0, 150.0));
        assert_eq!(layout.right_mascot, Vec2::new(605.0, 150.0));
        assert_eq!(layout.copyright.y, 600.0 - 16.0 - 10.0);
    }

    #[test]
    fn hit_test_maps_buttons_in_order() {
        let layout = MenuLayout::new(800.0, 600.0);
        let expected = [
            MenuAction::Online,
            MenuAction::Options,
            MenuAction::Website,
            MenuAction::Delete,
            MenuAction::Quit,
        ];
        for ((rect, _), action) in layout.buttons.iter().zip(expected) {
            assert_eq!(layout.hit(rect.center()), Some(action));
        }
        assert_eq!(layout.hit(Vec2::new(10.0, 300.0)), None);
        assert_eq!(layout.hit(Vec2::new(400.0, 599.0)), None);
    }
}
