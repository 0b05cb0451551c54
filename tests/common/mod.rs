#![allow(dead_code)]

use macroquad::math::{vec2, Vec2};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use torchlight::{ConeSample, Obstacle, TorchConfig};

pub const SCENARIO_DIR: &str = "./test_data/scenarios";

/// Torch scenario stored as JSON under test_data/scenarios
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub origin: [f32; 2],
    pub aim_angle: f32,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub torch: TorchConfig,
    pub expected_paths: usize,
    #[serde(default)]
    pub expected_points_per_path: Option<usize>,
}

impl Scenario {
    pub fn origin(&self) -> Vec2 {
        vec2(self.origin[0], self.origin[1])
    }
}

/// Load a scenario from a JSON file
pub fn load_scenario(path: &Path) -> Result<Scenario, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&contents)?;
    Ok(scenario)
}

/// All scenarios in the scenario directory, sorted by file name
pub fn load_all_scenarios() -> Vec<Scenario> {
    let mut entries: Vec<_> = match fs::read_dir(SCENARIO_DIR) {
        Ok(entries) => entries.filter_map(Result::ok).collect(),
        Err(e) => panic!("Failed to read {}: {}", SCENARIO_DIR, e),
    };
    entries.sort_by_key(|e| e.file_name());

    entries
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|p| match load_scenario(&p) {
            Ok(s) => s,
            Err(e) => panic!("Failed to load {}: {}", p.display(), e),
        })
        .collect()
}

/// Polyline length of a path
pub fn path_length(path: &[Vec2]) -> f32 {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Largest distance of any path point from the line through the origin along `direction`
pub fn max_deviation(path: &[Vec2], direction: Vec2) -> f32 {
    let origin = path[0];
    path.iter()
        .map(|&p| direction.perp_dot(p - origin).abs())
        .fold(0.0, f32::max)
}

/// First path point lying strictly inside any obstacle
pub fn first_point_inside(samples: &[ConeSample], obstacles: &[Obstacle]) -> Option<Vec2> {
    samples
        .iter()
        .flat_map(|s| s.path.iter().copied())
        .find(|&p| obstacles.iter().any(|o| o.strictly_contains(p)))
}
