use crate::compositor::{beam_strips, ray_outlines, source_core, source_glow};
use crate::obstacle::Obstacle;
use crate::primitive::RenderPrimitive;
use crate::ray::trace_cone;
use crate::scatter::{flame_particles, volumetric_particles};
use log::trace;
use macroquad::math::Vec2;
use rand::Rng;
use serde::Deserialize;

/// Tunable parameters of the torch light cone
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TorchConfig {
    /// Angular intervals across the cone; values below 2 collapse the cone to one ray
    #[serde(default = "default_ray_count")]
    pub ray_count: usize,
    /// Full opening angle of the cone in radians
    #[serde(default = "default_cone_angle")]
    pub cone_angle: f32,
    /// Nominal ray length before the per-ray variation
    #[serde(default = "default_base_length")]
    pub base_length: f32,
    #[serde(default = "default_bend_steps")]
    pub bend_steps: usize,
    #[serde(default = "default_bend_factor")]
    pub bend_factor: f32,
    /// Weight kept from the previous step's direction
    #[serde(default = "default_smoothing_factor")]
    pub smoothing_factor: f32,
    /// Margin around an obstacle inside which it pushes rays
    #[serde(default = "default_obstacle_influence_radius")]
    pub obstacle_influence_radius: f32,
    #[serde(default = "default_corner_threshold")]
    pub corner_threshold: f32,
    /// Radius of the light source; sizes the glow, the core and the flame cluster
    #[serde(default = "default_source_radius")]
    pub source_radius: f32,
}

// Default values
fn default_ray_count() -> usize { 80 }
fn default_cone_angle() -> f32 { std::f32::consts::PI / 3.8 }
fn default_base_length() -> f32 { default_source_radius() * 1.5 * 3.5 }
fn default_bend_steps() -> usize { 30 }
fn default_bend_factor() -> f32 { 0.25 }
fn default_smoothing_factor() -> f32 { 0.7 }
fn default_obstacle_influence_radius() -> f32 { 1.0 }
fn default_corner_threshold() -> f32 { 0.5 }
fn default_source_radius() -> f32 { 0.3 }

impl Default for TorchConfig {
    fn default() -> Self {
        Self {
            ray_count: default_ray_count(),
            cone_angle: default_cone_angle(),
            base_length: default_base_length(),
            bend_steps: default_bend_steps(),
            bend_factor: default_bend_factor(),
            smoothing_factor: default_smoothing_factor(),
            obstacle_influence_radius: default_obstacle_influence_radius(),
            corner_threshold: default_corner_threshold(),
            source_radius: default_source_radius(),
        }
    }
}

/// Deterministic part of the torch: source glow, cone fill and ray outlines
pub fn render_beam(
    origin: Vec2,
    aim_angle: f32,
    obstacles: &[Obstacle],
    config: &TorchConfig,
) -> Vec<RenderPrimitive> {
    if !(config.base_length > 0.0) {
        return Vec::new();
    }

    let samples = trace_cone(origin, aim_angle, obstacles, config);

    let mut out = Vec::with_capacity(samples.len() + 8);
    out.push(source_glow(origin, config.source_radius));
    out.extend(beam_strips(&samples));
    out.extend(ray_outlines(&samples, config.ray_count));
    out
}

/// Render the torch light cone at `origin` aimed along `aim_angle`.
///
/// Primitives come back in draw order: glow, cone fill, outlines, volumetric
/// particles, flame particles and finally the bright core. Everything except the
/// two particle layers is a pure function of the inputs; the particles draw from
/// `rng`, so pass a seeded generator to get repeatable frames.
pub fn render_torch<R: Rng + ?Sized>(
    origin: Vec2,
    aim_angle: f32,
    obstacles: &[Obstacle],
    config: &TorchConfig,
    rng: &mut R,
) -> Vec<RenderPrimitive> {
    let mut out = render_beam(origin, aim_angle, obstacles, config);
    if out.is_empty() {
        return out;
    }

    out.extend(volumetric_particles(origin, aim_angle, obstacles, config, rng));
    out.extend(flame_particles(origin, config, rng));
    out.push(source_core(origin, config.source_radius));

    trace!("torch at ({:.2}, {:.2}) emitted {} primitives", origin.x, origin.y, out.len());
    out
}

/// Aim angle of a direction vector
pub fn aim_angle(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}
