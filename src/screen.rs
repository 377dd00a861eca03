use bevy::{prelude::*, state::state::StateTransitionEvent};
use clap::ValueEnum;

/// The one screen alive at a time. Each screen spawns its entities on
/// `OnEnter` and despawns them, plus its resources, on `OnExit`.
#[derive(States, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Intro,
    #[value(name = "menu")]
    MainMenu,
    Janken,
}

pub struct ScreenPlugin;

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (quit_on_escape, log_screen_changes));
    }
}

pub fn despawn<T: Component>(mut cmd: Commands, q: Query<Entity, With<T>>) {
    for e in q.iter() {
        cmd.entity(e).despawn_recursive();
    }
}

fn quit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}

fn log_screen_changes(mut transitions: EventReader<StateTransitionEvent<Screen>>) {
    for t in transitions.read() {
        info!("Screen {:?} -> {:?}", t.exited, t.entered);
    }
}
