use crate::torch::TorchConfig;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub torch: TorchConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

#[derive(Debug, Deserialize)]
pub struct PlayerConfig {
    /// Distance moved per frame while a movement key is held
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Radians turned per frame while a rotation key is held
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    /// Collision radius of the particle
    #[serde(default = "default_particle_radius")]
    pub radius: f32,
    /// Fixed physics step in seconds
    #[serde(default = "default_time_step")]
    pub time_step: f32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_window_width")]
    pub window_width: i32,
    #[serde(default = "default_window_height")]
    pub window_height: i32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_true")]
    pub show_labels: bool,
    /// Start with the camera following the particle instead of the whole map
    #[serde(default = "default_true")]
    pub follow_camera: bool,
}

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_scene_path")]
    pub path: String,
}

// Default values
fn default_move_speed() -> f32 { 0.15 }
fn default_rotation_speed() -> f32 { 0.1 }
fn default_particle_radius() -> f32 { 0.3 }
fn default_time_step() -> f32 { 0.01 }
fn default_window_title() -> String { "Torchlight".to_string() }
fn default_window_width() -> i32 { 1280 }
fn default_window_height() -> i32 { 960 }
fn default_bg_r() -> u8 { 13 }
fn default_bg_g() -> u8 { 13 }
fn default_bg_b() -> u8 { 18 }
fn default_true() -> bool { true }
fn default_scene_path() -> String { "scene.json".to_string() }

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            rotation_speed: default_rotation_speed(),
            radius: default_particle_radius(),
            time_step: default_time_step(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_grid: true,
            show_labels: true,
            follow_camera: true,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: default_scene_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            torch: TorchConfig::default(),
            player: PlayerConfig::default(),
            visual: VisualConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl VisualConfig {
    pub fn aspect(&self) -> f32 {
        if self.window_height > 0 {
            self.window_width as f32 / self.window_height as f32
        } else {
            1.0
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, or use defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load configuration from `path`; missing or malformed files fall back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                info!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
