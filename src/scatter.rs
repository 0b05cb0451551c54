use crate::obstacle::{any_contains, Obstacle};
use crate::primitive::RenderPrimitive;
use crate::torch::TorchConfig;
use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};
use rand::Rng;
use std::f32::consts::PI;

pub const VOLUMETRIC_PARTICLES: usize = 60;
pub const FLAME_PARTICLES: usize = 15;

const VOLUMETRIC_SEGMENTS: usize = 6;
const FLAME_SEGMENTS: usize = 8;

/// Distance fraction of the base length where volumetric particles may appear
const DISTANCE_RANGE: (f32, f32) = (0.2, 0.9);
const SIZE_RANGE: (f32, f32) = (0.02, 0.07);
const ALPHA_RANGE: (f32, f32) = (0.1, 0.4);
const FLAME_MIN_OFFSET: f32 = 0.05;

/// Uniform sample in [lo, hi); collapses to `lo` for an empty range instead of panicking
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Small translucent discs scattered inside the cone to fake light scattering.
///
/// Particles that land inside an obstacle are dropped, so fewer than
/// [`VOLUMETRIC_PARTICLES`] fans may be returned.
pub fn volumetric_particles<R: Rng + ?Sized>(
    origin: Vec2,
    base_angle: f32,
    obstacles: &[Obstacle],
    config: &TorchConfig,
    rng: &mut R,
) -> Vec<RenderPrimitive> {
    let half = config.cone_angle / 2.0;
    let mut out = Vec::with_capacity(VOLUMETRIC_PARTICLES);

    for _ in 0..VOLUMETRIC_PARTICLES {
        let angle = base_angle + uniform(rng, -half, half);
        let fraction = uniform(rng, DISTANCE_RANGE.0, DISTANCE_RANGE.1);
        let center = origin + Vec2::from_angle(angle) * (fraction * config.base_length);

        if any_contains(obstacles, center) {
            continue;
        }

        let size = uniform(rng, SIZE_RANGE.0, SIZE_RANGE.1) * 0.8;
        let alpha = uniform(rng, ALPHA_RANGE.0, ALPHA_RANGE.1) * (1.0 - fraction * 0.7);

        out.push(RenderPrimitive::radial_fan(
            center,
            size,
            VOLUMETRIC_SEGMENTS,
            Color::new(1.0, 0.7, 0.2, alpha),
            Color::new(1.0, 0.5, 0.0, 0.0),
        ));
    }

    out
}

/// Bright flickering discs clustered at the light source; no obstacle check
pub fn flame_particles<R: Rng + ?Sized>(
    origin: Vec2,
    config: &TorchConfig,
    rng: &mut R,
) -> Vec<RenderPrimitive> {
    let max_offset = config.source_radius * 0.8;

    (0..FLAME_PARTICLES)
        .map(|_| {
            let angle = uniform(rng, -PI, PI);
            let offset = uniform(rng, FLAME_MIN_OFFSET.min(max_offset), max_offset);
            let center = origin + vec2(angle.cos(), angle.sin()) * offset;
            let size = uniform(rng, SIZE_RANGE.0, SIZE_RANGE.1);

            RenderPrimitive::radial_fan(
                center,
                size,
                FLAME_SEGMENTS,
                Color::new(1.0, 0.9, 0.3, 0.8),
                Color::new(1.0, 0.5, 0.0, 0.0),
            )
        })
        .collect()
}
