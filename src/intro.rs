//! Publisher splash: black, logo fades in, holds, fades out, black pause.

use bevy::prelude::*;

use crate::assets;
use crate::screen::{despawn, Screen};
use crate::view::VIEW_SIZE;

const LOGO: &str = "data/logo/konami_logo_0_j.png";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntroStage {
    Start,
    FadeIn,
    Hold,
    FadeOut,
    Pause,
    End,
}

impl IntroStage {
    /// Seconds spent in the stage.
    pub fn duration(self) -> f32 {
        match self {
            IntroStage::Start => 3.0,
            IntroStage::FadeIn => 1.5,
            IntroStage::Hold => 2.0,
            IntroStage::FadeOut => 1.5,
            IntroStage::Pause => 5.0,
            IntroStage::End => 0.0,
        }
    }

    fn next(self) -> IntroStage {
        match self {
            IntroStage::Start => IntroStage::FadeIn,
            IntroStage::FadeIn => IntroStage::Hold,
            IntroStage::Hold => IntroStage::FadeOut,
            IntroStage::FadeOut => IntroStage::Pause,
            IntroStage::Pause | IntroStage::End => IntroStage::End,
        }
    }
}

#[derive(Resource, Debug)]
pub struct IntroSequence {
    stage: IntroStage,
    elapsed: f32,
}

impl Default for IntroSequence {
    fn default() -> Self {
        Self {
            stage: IntroStage::Start,
            elapsed: 0.0,
        }
    }
}

impl IntroSequence {
    pub fn stage(&self) -> IntroStage {
        self.stage
    }

    pub fn is_finished(&self) -> bool {
        self.stage == IntroStage::End
    }

    fn progress(&self) -> f32 {
        (self.elapsed / self.stage.duration()).min(1.0)
    }

    /// Logo opacity, 0-255.
    pub fn alpha(&self) -> u8 {
        match self.stage {
            IntroStage::FadeIn => (255.0 * self.progress()) as u8,
            IntroStage::Hold => 255,
            IntroStage::FadeOut => (255.0 * (1.0 - self.progress())) as u8,
            IntroStage::Start | IntroStage::Pause | IntroStage::End => 0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed += dt;
        if self.progress() >= 1.0 {
            self.stage = self.stage.next();
            self.elapsed = 0.0;
        }
    }
}

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Intro), setup)
            .add_systems(OnExit(Screen::Intro), (despawn::<IntroLogo>, teardown))
            .add_systems(Update, intro_tick.run_if(in_state(Screen::Intro)));
    }
}

#[derive(Component)]
struct IntroLogo;

fn setup(mut cmd: Commands, asset_server: Res<AssetServer>) {
    cmd.insert_resource(IntroSequence::default());

    let (mut sprite, placeholder) =
        assets::image_sprite(&asset_server, LOGO, VIEW_SIZE, assets::FALLBACK_BACKDROP);
    sprite.color.set_alpha(0.0);
    cmd.spawn((sprite, placeholder, Transform::default(), IntroLogo));
}

fn teardown(mut cmd: Commands) {
    cmd.remove_resource::<IntroSequence>();
}

fn intro_tick(
    time: Res<Time>,
    seq: Option<ResMut<IntroSequence>>,
    mut logo: Query<&mut Sprite, With<IntroLogo>>,
    mut next: ResMut<NextState<Screen>>,
) {
    let Some(mut seq) = seq else { return };

    let before = seq.stage();
    seq.advance(time.delta_secs());
    if seq.stage() != before {
        debug!("Intro {:?} -> {:?}", before, seq.stage());
    }
    for mut sprite in logo.iter_mut() {
        sprite.color.set_alpha(f32::from(seq.alpha()) / 255.0);
    }

    if seq.is_finished() {
        next.set(Screen::MainMenu);
    }
}
