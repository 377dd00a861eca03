//! YU-GI-OH! ONLINE 2 client front-end.
//! Intro splash, title menu, and the Janken card mini-game.

use bevy::{prelude::*, render::camera::ScalingMode};
use chrono::Local;
use clap::Parser;

mod assets;
mod config;
mod cursor;
mod error;
mod intro;
mod janken;
mod menu;
mod pointer;
mod screen;
mod scroll;
mod view;

use config::{Cli, GameConfig, LaunchReport, Settings};
use view::{VIEW_H, VIEW_W};

const ASSETS_DIR: &str = "assets";

/// The single 2D camera; the pointer is projected through it.
#[derive(Component)]
pub struct MainCamera;

fn main() {
    // Load env vars
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut issues = Vec::new();

    let (mut settings, loaded) = match Settings::load(&cli.settings) {
        Ok(settings) => (settings, true),
        Err(e) => {
            issues.push(e);
            (Settings::default(), false)
        }
    };
    let config = GameConfig::resolve(&cli, &settings, &mut issues);

    // Leave an unreadable settings file alone for the launcher to report
    if loaded {
        settings.last_launch = Some(Local::now().naive_local());
        if let Err(e) = settings.save(&cli.settings) {
            issues.push(e);
        }
    }

    let asset_root = std::env::var("YO2_ASSETS").unwrap_or_else(|_| ASSETS_DIR.to_string());

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(config.window()),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: asset_root,
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(LaunchReport::new(&settings, &issues))
        .insert_state(config.start)
        .insert_resource(config)
        .add_plugins((
            screen::ScreenPlugin,
            assets::AssetsPlugin,
            pointer::PointerPlugin,
            cursor::CursorPlugin,
            intro::IntroPlugin,
            menu::MenuPlugin,
            janken::JankenPlugin,
        ))
        .add_systems(Startup, (setup_camera, config::report_launch))
        .run();
}

fn setup_camera(mut cmd: Commands) {
    cmd.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: VIEW_W,
                height: VIEW_H,
            },
            ..OrthographicProjection::default_2d()
        },
        MainCamera,
    ));
}
