use macroquad::math::{vec2, Vec2};
use serde::{Deserialize, Serialize};

/// Components of a 45 degree diagonal unit vector
const DIAGONAL: f32 = 0.7071;

/// Axis-aligned rectangular obstacle
/// Positions are stored as center + full extents, matching how the map is authored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Center X
    pub x: f32,
    /// Center Y
    pub y: f32,
    /// Full width
    pub width: f32,
    /// Full height
    pub height: f32,
}

/// Signed, interior-facing distances from a point to each edge of an obstacle
/// Positive values mean the point is on the inner side of that edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistances {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl EdgeDistances {
    /// Smallest of the four distances
    pub fn min(&self) -> f32 {
        self.left.min(self.right).min(self.top).min(self.bottom)
    }
}

/// Nearest surface feature of an obstacle relative to a query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceFeature {
    /// Closest edge with its outward normal
    Edge { normal: Vec2, distance: f32 },
    /// Point sits near two adjacent edges at once.
    /// `edge_normal` is still the closest edge; `diagonal` points out of the corner at 45 degrees.
    Corner {
        edge_normal: Vec2,
        diagonal: Vec2,
        distance: f32,
    },
}

impl SurfaceFeature {
    pub fn distance(&self) -> f32 {
        match *self {
            SurfaceFeature::Edge { distance, .. } => distance,
            SurfaceFeature::Corner { distance, .. } => distance,
        }
    }

    /// Outward normal of the closest edge
    pub fn edge_normal(&self) -> Vec2 {
        match *self {
            SurfaceFeature::Edge { normal, .. } => normal,
            SurfaceFeature::Corner { edge_normal, .. } => edge_normal,
        }
    }
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Obstacle { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.height / 2.0
    }

    /// Check if a point is inside the rectangle (bounds inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        self.contains_with_margin(p, 0.0)
    }

    /// Check if a point is inside the rectangle grown by `margin` on every side
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= self.left() - margin
            && p.x <= self.right() + margin
            && p.y >= self.bottom() - margin
            && p.y <= self.top() + margin
    }

    /// Check if a point is strictly inside the rectangle (bounds exclusive)
    pub fn strictly_contains(&self, p: Vec2) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.bottom() && p.y < self.top()
    }

    /// Closest point of the rectangle to `p` (p itself when inside)
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        vec2(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.bottom(), self.top()),
        )
    }

    pub fn edge_distances(&self, p: Vec2) -> EdgeDistances {
        EdgeDistances {
            left: p.x - self.left(),
            right: self.right() - p.x,
            top: self.top() - p.y,
            bottom: p.y - self.bottom(),
        }
    }

    /// Find the surface feature closest to `p`.
    ///
    /// The edge is picked by the minimum interior-facing distance; ties resolve in
    /// left, right, top, bottom order. If `p` is also within `corner_threshold` of two
    /// adjacent edges the result is a [`SurfaceFeature::Corner`], checked in
    /// top-left, top-right, bottom-left, bottom-right order.
    pub fn nearest_feature(&self, p: Vec2, corner_threshold: f32) -> SurfaceFeature {
        let d = self.edge_distances(p);
        let distance = d.min();

        let edge_normal = if distance == d.left {
            vec2(-1.0, 0.0)
        } else if distance == d.right {
            vec2(1.0, 0.0)
        } else if distance == d.top {
            vec2(0.0, 1.0)
        } else {
            vec2(0.0, -1.0)
        };

        let near_left = d.left < corner_threshold;
        let near_right = d.right < corner_threshold;
        let near_top = d.top < corner_threshold;
        let near_bottom = d.bottom < corner_threshold;

        let diagonal = if near_left && near_top {
            Some(vec2(-DIAGONAL, DIAGONAL))
        } else if near_right && near_top {
            Some(vec2(DIAGONAL, DIAGONAL))
        } else if near_left && near_bottom {
            Some(vec2(-DIAGONAL, -DIAGONAL))
        } else if near_right && near_bottom {
            Some(vec2(DIAGONAL, -DIAGONAL))
        } else {
            None
        };

        match diagonal {
            Some(diagonal) => SurfaceFeature::Corner {
                edge_normal,
                diagonal,
                distance,
            },
            None => SurfaceFeature::Edge {
                normal: edge_normal,
                distance,
            },
        }
    }
}

/// True if `p` lies inside any obstacle (inclusive bounds)
pub fn any_contains(obstacles: &[Obstacle], p: Vec2) -> bool {
    obstacles.iter().any(|o| o.contains(p))
}
