use crate::cone::{Cone, ConeRay, ConeSample};
use crate::obstacle::{any_contains, Obstacle, SurfaceFeature};
use crate::torch::TorchConfig;
use macroquad::math::Vec2;

/// Ordered points of one traced ray, origin first
pub type RayPath = Vec<Vec2>;

/// Repulsion coefficient for the nearest edge
const EDGE_FORCE: f32 = 0.08;
/// Softening term added to d² for the edge force
const EDGE_SOFTENING: f32 = 0.1;
/// Repulsion coefficient for the 45 degree corner push
const CORNER_FORCE: f32 = 0.15;
/// Softening term added to d² for the corner force
const CORNER_SOFTENING: f32 = 0.05;
/// Edge distances outside (MIN, MAX) produce no force
const FORCE_MIN_DISTANCE: f32 = 0.01;
const FORCE_MAX_DISTANCE: f32 = 2.0;
/// Shortest direction that is still renormalized
const NORMALIZE_EPSILON: f32 = 0.001;
/// Upper bound on steps per ray; keeps a beam strip within 16-bit mesh indices
pub const MAX_BEND_STEPS: usize = 4096;

/// Decay applied to obstacle forces at `step`: 1.0 at the first step, approaching 0.5 at the last
pub fn distance_decay(step: usize, steps: usize) -> f32 {
    1.0 - step as f32 / steps.max(1) as f32 * 0.5
}

/// Target length of a ray at normalized cone position `ratio`
/// The sine bump keeps the silhouette from looking like a rigid fan
pub fn ray_length(base_length: f32, ratio: f32) -> f32 {
    base_length * (0.85 + 0.3 * (ratio * std::f32::consts::PI).sin())
}

/// Sum of repulsive forces acting on `point` from every obstacle within influence range
pub fn deflection_force(
    point: Vec2,
    obstacles: &[Obstacle],
    config: &TorchConfig,
    decay: f32,
) -> Vec2 {
    let mut force = Vec2::ZERO;

    for obstacle in obstacles {
        if !obstacle.contains_with_margin(point, config.obstacle_influence_radius) {
            continue;
        }

        let feature = obstacle.nearest_feature(point, config.corner_threshold);
        let d = feature.distance();
        if d <= FORCE_MIN_DISTANCE || d >= FORCE_MAX_DISTANCE {
            continue;
        }

        let d2 = d * d;
        force += feature.edge_normal() * (EDGE_FORCE / (d2 + EDGE_SOFTENING) * decay);

        if let SurfaceFeature::Corner { diagonal, .. } = feature {
            force += diagonal * (CORNER_FORCE / (d2 + CORNER_SOFTENING) * decay);
        }
    }

    force
}

/// Step a single ray through `config.bend_steps` steps, bending it away from obstacles.
///
/// The path stops early, without the offending point, as soon as a step would land
/// inside an obstacle.
pub fn trace_ray(
    origin: Vec2,
    ray: &ConeRay,
    obstacles: &[Obstacle],
    config: &TorchConfig,
) -> RayPath {
    let steps = config.bend_steps.clamp(1, MAX_BEND_STEPS);
    let step_size = ray_length(config.base_length, ray.ratio) / steps as f32;

    let mut path = Vec::with_capacity(steps + 1);
    path.push(origin);

    let mut current = origin;
    let mut direction = ray.direction();
    let mut previous = direction;

    for step in 0..steps {
        let decay = distance_decay(step, steps);
        let force = deflection_force(current, obstacles, config, decay);

        let bent = direction + force * config.bend_factor;
        let smoothed = previous * config.smoothing_factor + bent * (1.0 - config.smoothing_factor);
        previous = smoothed;

        let length = smoothed.length();
        if length > NORMALIZE_EPSILON {
            direction = smoothed / length;
        }

        let next = current + direction * step_size;
        if any_contains(obstacles, next) {
            break;
        }

        current = next;
        path.push(current);
    }

    path
}

/// Trace every ray of the torch cone aimed at `base_angle`.
///
/// Returns one sample per cone ray, left edge first. A non-positive base length
/// yields no samples.
pub fn trace_cone(
    origin: Vec2,
    base_angle: f32,
    obstacles: &[Obstacle],
    config: &TorchConfig,
) -> Vec<ConeSample> {
    if !(config.base_length > 0.0) {
        return Vec::new();
    }

    let cone = Cone::new(base_angle, config.cone_angle, config.ray_count);
    cone.rays()
        .map(|ray| ConeSample::new(ray.ratio, trace_ray(origin, &ray, obstacles, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    fn config() -> TorchConfig {
        TorchConfig::default()
    }

    #[test]
    fn test_distance_decay_range() {
        assert_eq!(distance_decay(0, 30), 1.0);
        let last = distance_decay(29, 30);
        assert!(last > 0.5 && last < 0.52);
        assert_eq!(distance_decay(0, 0), 1.0);
    }

    #[test]
    fn test_ray_length_peaks_at_center() {
        assert!((ray_length(1.0, 0.0) - 0.85).abs() < 1e-6);
        assert!((ray_length(1.0, 0.5) - 1.15).abs() < 1e-6);
        assert!((ray_length(1.0, 1.0) - 0.85).abs() < 1e-5);
    }

    #[test]
    fn test_no_force_outside_influence() {
        let obstacles = [Obstacle::new(10.0, 10.0, 1.0, 1.0)];
        let force = deflection_force(vec2(0.0, 0.0), &obstacles, &config(), 1.0);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_no_force_from_outside_point_in_margin() {
        // Inside the influence margin but outside the rectangle: the interior-facing
        // distance is negative, so the edge contributes nothing
        let obstacles = [Obstacle::new(0.0, 0.0, 2.0, 2.0)];
        let force = deflection_force(vec2(1.5, 0.0), &obstacles, &config(), 1.0);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_interior_point_pushed_toward_nearest_edge() {
        let obstacles = [Obstacle::new(0.0, 0.0, 4.0, 4.0)];
        let force = deflection_force(vec2(1.0, 0.0), &obstacles, &config(), 1.0);
        // d = 1.0 from the right edge
        let expected = EDGE_FORCE / (1.0 + EDGE_SOFTENING);
        assert!((force.x - expected).abs() < 1e-6);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_corner_adds_diagonal_push() {
        let obstacles = [Obstacle::new(0.0, 0.0, 4.0, 4.0)];
        let edge_only = deflection_force(vec2(1.0, 0.0), &obstacles, &config(), 1.0);
        let corner = deflection_force(vec2(1.8, 1.7), &obstacles, &config(), 1.0);
        assert!(corner.y > 0.0);
        assert!(corner.x > edge_only.x);
    }

    #[test]
    fn test_straight_ray_without_obstacles() {
        let cone = Cone::new(0.0, 0.0, 1);
        let ray = cone.ray(0);
        let path = trace_ray(Vec2::ZERO, &ray, &[], &config());
        assert_eq!(path.len(), config().bend_steps + 1);
        for p in &path {
            assert!(p.y.abs() < 1e-5);
        }
    }

    #[test]
    fn test_ray_stops_before_wall() {
        let obstacles = [Obstacle::new(1.0, 0.0, 0.2, 4.0)];
        let cone = Cone::new(0.0, 0.0, 1);
        let mut cfg = config();
        cfg.base_length = 3.0;
        let path = trace_ray(Vec2::ZERO, &cone.ray(0), &obstacles, &cfg);
        assert!(path.len() < cfg.bend_steps + 1);
        let last = path[path.len() - 1];
        assert!(last.x < 0.9);
    }

    /// Thin slab y in [-0.1, 0.1] with a one-step ray starting just under its top edge
    fn slab_setup() -> ([Obstacle; 1], Vec2, TorchConfig) {
        let obstacles = [Obstacle::new(0.0, 0.0, 4.0, 0.2)];
        let mut cfg = config();
        cfg.base_length = 1.0;
        cfg.bend_steps = 1;
        cfg.corner_threshold = 0.01;
        (obstacles, vec2(0.0, 0.05), cfg)
    }

    #[test]
    fn test_ray_bends_away_from_edge() {
        let (obstacles, origin, cfg) = slab_setup();
        let ray = Cone::new(0.0, 0.0, 1).ray(0);
        let path = trace_ray(origin, &ray, &obstacles, &cfg);
        assert_eq!(path.len(), 2);

        // d = 0.05 from the top edge, normal +y
        let force = EDGE_FORCE / (0.05 * 0.05 + EDGE_SOFTENING);
        // bent = (1, 0.25 f), smoothed = 0.7 * (1, 0) + 0.3 * bent
        let expected_slope = 0.3 * 0.25 * force;
        let step = path[1] - path[0];
        assert!(
            (step.y / step.x - expected_slope).abs() < 1e-4,
            "slope {} expected {}",
            step.y / step.x,
            expected_slope
        );
        assert!((step.length() - ray_length(1.0, 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_bend_without_smoothing_is_sharper() {
        let (obstacles, origin, mut cfg) = slab_setup();
        cfg.smoothing_factor = 0.0;
        let ray = Cone::new(0.0, 0.0, 1).ray(0);
        let path = trace_ray(origin, &ray, &obstacles, &cfg);

        let force = EDGE_FORCE / (0.05 * 0.05 + EDGE_SOFTENING);
        let step = path[1] - path[0];
        assert!((step.y / step.x - 0.25 * force).abs() < 1e-4);
    }

    #[test]
    fn test_vanishing_direction_keeps_previous() {
        let (obstacles, origin, mut cfg) = slab_setup();
        cfg.smoothing_factor = 0.0;
        // Aim straight down into the edge force and scale the bend so it cancels the ray
        let force = deflection_force(origin, &obstacles, &cfg, 1.0);
        assert!(force.y > 0.0);
        cfg.bend_factor = 1.0 / force.y;

        let ray = Cone::new(-std::f32::consts::FRAC_PI_2, 0.0, 1).ray(0);
        let path = trace_ray(origin, &ray, &obstacles, &cfg);
        assert_eq!(path.len(), 2);

        let step = (path[1] - path[0]).normalize();
        assert!(step.x.abs() < 1e-4, "direction drifted to {:?}", step);
        assert!((step.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_bend_steps_are_clamped() {
        let mut cfg = config();
        cfg.bend_steps = 100_000;
        let path = trace_ray(Vec2::ZERO, &Cone::new(0.0, 0.0, 1).ray(0), &[], &cfg);
        assert_eq!(path.len(), MAX_BEND_STEPS + 1);
    }

    #[test]
    fn test_non_positive_length_yields_nothing() {
        let mut cfg = config();
        cfg.base_length = 0.0;
        assert!(trace_cone(Vec2::ZERO, 0.0, &[], &cfg).is_empty());
        cfg.base_length = -1.0;
        assert!(trace_cone(Vec2::ZERO, 0.0, &[], &cfg).is_empty());
    }
}
