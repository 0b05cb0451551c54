use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};

/// How a primitive's vertex list should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// First vertex is the hub, the rest walk the rim
    TriangleFan,
    /// Vertices alternate between two parallel rails
    QuadStrip,
    /// Consecutive vertices are joined by line segments
    LineStrip,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderVertex {
    pub position: Vec2,
    pub color: Color,
}

impl RenderVertex {
    pub fn new(position: Vec2, color: Color) -> Self {
        RenderVertex { position, color }
    }
}

/// A drawable unit produced by the torch renderer
/// Carries no identity beyond a single render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPrimitive {
    pub kind: PrimitiveKind,
    pub vertices: Vec<RenderVertex>,
}

impl RenderPrimitive {
    pub fn new(kind: PrimitiveKind) -> Self {
        RenderPrimitive {
            kind,
            vertices: Vec::new(),
        }
    }

    pub fn push(&mut self, position: Vec2, color: Color) {
        self.vertices.push(RenderVertex::new(position, color));
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Radial fan: solid `center_color` at the hub fading to `rim_color` on a closed rim
    pub fn radial_fan(
        center: Vec2,
        radius: f32,
        segments: usize,
        center_color: Color,
        rim_color: Color,
    ) -> Self {
        let segments = segments.max(3);
        let mut fan = RenderPrimitive::new(PrimitiveKind::TriangleFan);
        fan.push(center, center_color);
        for i in 0..=segments {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            fan.push(
                center + vec2(angle.cos(), angle.sin()) * radius,
                rim_color,
            );
        }
        fan
    }

    /// Triangle index triples for filled kinds, empty for line strips
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        let n = self.vertices.len();
        match self.kind {
            PrimitiveKind::TriangleFan => (1..n.saturating_sub(1)).map(|i| [0, i, i + 1]).collect(),
            PrimitiveKind::QuadStrip => {
                let mut tris = Vec::new();
                let mut i = 0;
                while i + 3 < n {
                    tris.push([i, i + 1, i + 2]);
                    tris.push([i + 1, i + 3, i + 2]);
                    i += 2;
                }
                tris
            }
            PrimitiveKind::LineStrip => Vec::new(),
        }
    }
}
