use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_ENV: &str = "COLOR_CLICKY_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    /// `#rrggbb`
    pub background: String,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub mute: bool,
    pub tick_rate: u32,
    pub assets_dir: Option<PathBuf>,
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 400,
            window_height: 700,
            title: "Color Clicky".to_string(),
            background: "#2d2d44".to_string(),
            music_volume: 0.2,
            sfx_volume: 1.0,
            mute: false,
            tick_rate: 60,
            assets_dir: None,
            storage_path: None,
        }
    }
}

impl Config {
    /// Reads the config from `COLOR_CLICKY_CONFIG` or the platform config dir.
    /// A missing or broken file yields the defaults.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| project_dirs().map(|dirs| dirs.config_dir().join("config.json")));

        match path {
            Some(path) if path.exists() => match Self::from_file(&path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn background_color(&self) -> [f32; 4] {
        parse_hex_color(&self.background).unwrap_or([0.176, 0.176, 0.267, 1.0])
    }

    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_local_dir().join("storage.json")))
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "colorclicky", "ColorClicky")
}

pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(crate::game::palette::rgb_to_rgba(value))
}
