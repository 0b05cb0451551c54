use macroquad::math::Vec2;

/// Upper bound on angular intervals; larger configured counts are clamped
pub const MAX_RAY_COUNT: usize = 4096;

/// One sampled direction of the aiming cone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeRay {
    /// Ray index in [0, ray_count]
    pub index: usize,
    /// Normalized position within the cone (0 = left edge, 1 = right edge)
    pub ratio: f32,
    /// Absolute angle in radians
    pub angle: f32,
}

impl ConeRay {
    /// Unit vector along the sampled angle
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}

/// Cone represents the angular span of a light beam around a base aim angle
/// Rays are spread evenly from `base - aperture/2` to `base + aperture/2`.
/// A ray count of 1 (or less) collapses the cone into a single central ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    /// Base aim angle in radians
    pub base_angle: f32,
    /// Full opening angle in radians
    pub aperture: f32,
    /// Number of angular intervals; the cone yields `ray_count + 1` rays unless degenerate
    pub ray_count: usize,
}

impl Cone {
    /// Create a new cone; the ray count is clamped to [1, MAX_RAY_COUNT]
    pub fn new(base_angle: f32, aperture: f32, ray_count: usize) -> Self {
        Cone {
            base_angle,
            aperture,
            ray_count: ray_count.clamp(1, MAX_RAY_COUNT),
        }
    }

    pub fn left_edge(&self) -> f32 {
        self.base_angle - self.aperture / 2.0
    }

    pub fn right_edge(&self) -> f32 {
        self.base_angle + self.aperture / 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.ray_count <= 1
    }

    /// Sample the ray at `index`
    pub fn ray(&self, index: usize) -> ConeRay {
        if self.is_degenerate() {
            return ConeRay {
                index: 0,
                ratio: 0.5,
                angle: self.base_angle,
            };
        }
        let ratio = index as f32 / self.ray_count as f32;
        ConeRay {
            index,
            ratio,
            angle: self.left_edge() + self.aperture * ratio,
        }
    }

    /// Number of rays produced by [`Cone::rays`]
    pub fn sample_count(&self) -> usize {
        if self.is_degenerate() {
            1
        } else {
            self.ray_count + 1
        }
    }

    /// All sampled rays, left edge first
    pub fn rays(&self) -> impl Iterator<Item = ConeRay> + '_ {
        (0..self.sample_count()).map(move |i| self.ray(i))
    }
}

/// Per-ray metadata kept alongside a traced path for shading
#[derive(Debug, Clone, PartialEq)]
pub struct ConeSample {
    /// Normalized angular position within the cone (0 = left, 1 = right)
    pub position: f32,
    /// Traced points from the origin
    pub path: Vec<Vec2>,
}

impl ConeSample {
    pub fn new(position: f32, path: Vec<Vec2>) -> Self {
        ConeSample { position, path }
    }

    /// Number of points in the path
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
