//! Launch configuration: the launcher's settings file, overridden by
//! command-line flags.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use bevy::{
    prelude::*,
    window::{MonitorSelection, WindowMode},
};
use chrono::NaiveDateTime;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::screen::Screen;

pub const WINDOW_TITLE: &str = "Yu-Gi-Oh! ONLINE 2";
pub const SETTINGS_FILE: &str = "launcher_config.json";
pub const DEFAULT_RESOLUTION: Resolution = Resolution {
    width: 800,
    height: 600,
};
pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidResolution(s.to_string());
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Resolution { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Yu-Gi-Oh! ONLINE 2 client.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Window size as WIDTHxHEIGHT.
    #[arg(long)]
    pub resolution: Option<Resolution>,

    /// Borderless fullscreen on the primary monitor.
    #[arg(long, default_value_t = false)]
    pub fullscreen: bool,

    /// Interface language.
    #[arg(long)]
    pub language: Option<String>,

    /// Screen to open on.
    #[arg(long, value_enum, default_value_t = Screen::Intro)]
    pub start: Screen,

    /// Launcher settings file supplying defaults for the flags above.
    #[arg(long, default_value = SETTINGS_FILE)]
    pub settings: PathBuf,
}

/// The launcher's flat settings record. Keys missing from the file keep
/// their defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub resolution: String,
    pub fullscreen: bool,
    pub language: String,
    pub last_launch: Option<NaiveDateTime>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION.to_string(),
            fullscreen: false,
            language: DEFAULT_LANGUAGE.to_string(),
            last_launch: None,
        }
    }
}

impl Settings {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(ConfigError::io(path, e)),
        };
        serde_json::from_str(&text).map_err(|e| ConfigError::json(path, e))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self).map_err(|e| ConfigError::json(path, e))?;
        fs::write(path, text).map_err(|e| ConfigError::io(path, e))
    }

    pub fn resolution(&self) -> Result<Resolution, ConfigError> {
        self.resolution.parse()
    }

    /// Game flags for the values that differ from the defaults.
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.resolution != DEFAULT_RESOLUTION.to_string() {
            args.extend(["--resolution".to_string(), self.resolution.clone()]);
        }
        if self.fullscreen {
            args.push("--fullscreen".to_string());
        }
        if self.language != DEFAULT_LANGUAGE {
            args.extend(["--language".to_string(), self.language.to_lowercase()]);
        }
        args
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub resolution: Resolution,
    pub fullscreen: bool,
    pub language: String,
    pub start: Screen,
}

impl GameConfig {
    /// Flags win over the settings file. Unusable settings fall back to
    /// defaults and are reported in `issues`.
    pub fn resolve(cli: &Cli, settings: &Settings, issues: &mut Vec<ConfigError>) -> Self {
        let resolution = match cli.resolution {
            Some(res) => res,
            None => settings.resolution().unwrap_or_else(|e| {
                issues.push(e);
                DEFAULT_RESOLUTION
            }),
        };

        Self {
            resolution,
            fullscreen: cli.fullscreen || settings.fullscreen,
            language: cli
                .language
                .clone()
                .unwrap_or_else(|| settings.language.to_lowercase()),
            start: cli.start,
        }
    }

    pub fn window(&self) -> Window {
        Window {
            title: WINDOW_TITLE.into(),
            resolution: (self.resolution.width as f32, self.resolution.height as f32).into(),
            mode: if self.fullscreen {
                WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
            } else {
                WindowMode::Windowed
            },
            resizable: false,
            ..default()
        }
    }
}

/// What the launch resolved from, logged once the app is up.
#[derive(Resource, Debug, Default)]
pub struct LaunchReport {
    /// Flags the settings file stands for.
    pub flags: Vec<String>,
    /// Problems found while resolving the configuration.
    pub issues: Vec<String>,
}

impl LaunchReport {
    pub fn new(settings: &Settings, issues: &[ConfigError]) -> Self {
        Self {
            flags: settings.launch_args(),
            issues: issues.iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn report_launch(config: Res<GameConfig>, report: Res<LaunchReport>) {
    info!(
        "Starting at {} ({}), language {}, screen {:?}",
        config.resolution,
        if config.fullscreen { "fullscreen" } else { "windowed" },
        config.language,
        config.start
    );
    if !report.flags.is_empty() {
        info!("Settings file flags: {}", report.flags.join(" "));
    }
    for issue in report.issues.iter() {
        warn!("{}", issue);
    }
}
