use crate::cone::ConeSample;
use crate::primitive::{PrimitiveKind, RenderPrimitive};
use macroquad::color::Color;
use macroquad::math::Vec2;

/// Only every Nth ray gets a visible outline
const OUTLINE_STRIDE: usize = 15;
/// Outlines are skipped for sparse cones
const OUTLINE_MIN_RAYS: usize = 10;
const OUTLINE_ALPHA: f32 = 0.2;

const GLOW_SEGMENTS: usize = 32;
const CORE_SEGMENTS: usize = 16;

/// Cone shading at `position` (0..1 across the cone): 1 at the center ray, 0 at the edges
pub fn center_factor(position: f32) -> f32 {
    1.0 - ((position - 0.5).abs() * 2.0).powf(1.5)
}

/// Brightness falloff along a ray at progress `t` (0 at origin, 1 at the end)
pub fn distance_factor(t: f32) -> f32 {
    1.0 - t.powf(1.2) * 0.8
}

/// Quad-strip vertex color for cone position `position` and ray progress `t`
pub fn beam_color(position: f32, t: f32) -> Color {
    let center = center_factor(position);
    let alpha = (0.85 * center * distance_factor(t)).max(0.0);
    Color::new(1.0, 0.9 - 0.7 * t.powf(1.2), 0.25 * (1.0 - t) * center, alpha)
}

/// Fill the space between adjacent rays with quad strips.
///
/// Pairs where either path has fewer than two points are skipped. Strip `i` is
/// shaded as sitting at `i / (strips - 1)` across the cone.
pub fn beam_strips(samples: &[ConeSample]) -> Vec<RenderPrimitive> {
    if samples.len() < 2 {
        return Vec::new();
    }

    let strips = samples.len() - 1;
    let mut out = Vec::with_capacity(strips);

    for (i, pair) in samples.windows(2).enumerate() {
        let (a, b) = (&pair[0].path, &pair[1].path);
        if a.len() < 2 || b.len() < 2 {
            continue;
        }

        let position = if strips > 1 {
            i as f32 / (strips - 1) as f32
        } else {
            0.5
        };

        let len = a.len().min(b.len());
        let mut strip = RenderPrimitive::new(PrimitiveKind::QuadStrip);
        for j in 0..len {
            let t = j as f32 / (len - 1) as f32;
            let color = beam_color(position, t);
            strip.push(a[j], color);
            strip.push(b[j], color);
        }
        out.push(strip);
    }

    out
}

/// Thin line strips along every 15th ray for texture
pub fn ray_outlines(samples: &[ConeSample], ray_count: usize) -> Vec<RenderPrimitive> {
    if ray_count <= OUTLINE_MIN_RAYS {
        return Vec::new();
    }

    samples
        .iter()
        .step_by(OUTLINE_STRIDE)
        .filter(|s| s.path.len() > 1)
        .map(|sample| {
            let path = &sample.path;
            let mut line = RenderPrimitive::new(PrimitiveKind::LineStrip);
            line.push(path[0], Color::new(1.0, 0.9, 0.4, OUTLINE_ALPHA));
            for (j, &p) in path.iter().enumerate().skip(1) {
                let t = j as f32 / path.len() as f32;
                line.push(
                    p,
                    Color::new(1.0, 0.8 - 0.6 * t, 0.0, OUTLINE_ALPHA * (1.0 - t * t)),
                );
            }
            line
        })
        .collect()
}

/// Soft orange halo around the light source
pub fn source_glow(origin: Vec2, source_radius: f32) -> RenderPrimitive {
    RenderPrimitive::radial_fan(
        origin,
        source_radius * 1.5,
        GLOW_SEGMENTS,
        Color::new(1.0, 0.6, 0.0, 0.7),
        Color::new(1.0, 0.3, 0.0, 0.0),
    )
}

/// Bright hot spot drawn on top of everything else
pub fn source_core(origin: Vec2, source_radius: f32) -> RenderPrimitive {
    RenderPrimitive::radial_fan(
        origin,
        source_radius * 0.6,
        CORE_SEGMENTS,
        Color::new(1.0, 1.0, 0.7, 0.95),
        Color::new(1.0, 0.8, 0.2, 0.0),
    )
}
