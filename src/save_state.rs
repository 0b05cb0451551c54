use crate::obstacle::Obstacle;
use macroquad::math::{vec2, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to access scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scene file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot of the map and the particle, without any per-frame state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub obstacles: Vec<Obstacle>,
    /// Particle position
    pub particle_x: f32,
    pub particle_y: f32,
    /// Torch aim in radians
    pub aim_angle: f32,
}

impl SceneState {
    pub fn new(obstacles: &[Obstacle], particle: Vec2, aim_angle: f32) -> Self {
        SceneState {
            obstacles: obstacles.to_vec(),
            particle_x: particle.x,
            particle_y: particle.y,
            aim_angle,
        }
    }

    pub fn particle_position(&self) -> Vec2 {
        vec2(self.particle_x, self.particle_y)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SceneError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &Path) -> Result<Self, SceneError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
