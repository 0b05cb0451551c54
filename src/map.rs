use crate::obstacle::Obstacle;
use macroquad::math::{vec2, Vec2};

/// Height of the visible map in world units; width follows the window aspect ratio
pub const VIEW_HEIGHT: f32 = 10.0;

/// Visible world rectangle, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub width: f32,
    pub height: f32,
}

impl ViewBounds {
    pub fn from_aspect(aspect: f32) -> Self {
        ViewBounds {
            width: VIEW_HEIGHT * aspect,
            height: VIEW_HEIGHT,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a disc center so the whole disc stays in view
    pub fn clamp(&self, p: Vec2, radius: f32) -> Vec2 {
        let half = self.half_extents();
        vec2(
            p.x.clamp(-half.x + radius, half.x - radius),
            p.y.clamp(-half.y + radius, half.y - radius),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPoint {
    pub name: &'static str,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationLabel {
    pub text: &'static str,
    pub position: Vec2,
}

/// Bomb site marker drawn as a lettered disc
#[derive(Debug, Clone, PartialEq)]
pub struct SiteMarker {
    pub name: &'static str,
    pub position: Vec2,
}

/// Radius of a site marker disc
pub const SITE_MARKER_RADIUS: f32 = 0.3;

/// The tactical map layout. X coordinates and horizontal lengths stretch with `aspect`.
pub fn default_layout(aspect: f32) -> Vec<Obstacle> {
    let s = aspect;
    vec![
        // Defender spawn
        Obstacle::new(-2.0 * s, 3.0, 4.0 * s, 0.2),
        Obstacle::new(-4.0 * s, 2.5, 0.2, 1.0),
        Obstacle::new(0.0, 2.5, 0.2, 1.0),
        // A site
        Obstacle::new(3.0 * s, 3.0, 4.0 * s, 0.2),
        Obstacle::new(1.0 * s, 2.0, 0.2, 2.0),
        Obstacle::new(3.0 * s, 1.5, 4.0 * s, 0.2),
        // A main
        Obstacle::new(3.0 * s, 0.5, 0.2, 2.0),
        // A link
        Obstacle::new(1.5 * s, 1.0, 3.0 * s, 0.2),
        // A lobby
        Obstacle::new(3.0 * s, -1.5, 0.2, 2.0),
        // Mid courtyard
        Obstacle::new(0.0, 0.0, 2.0 * s, 2.0),
        // Mid top
        Obstacle::new(-1.5 * s, 1.5, 3.0 * s, 0.2),
        // B site
        Obstacle::new(-3.0 * s, 1.5, 2.0 * s, 0.2),
        Obstacle::new(-2.0 * s, 2.0, 0.2, 1.0),
        // B main
        Obstacle::new(-3.0 * s, 0.0, 0.2, 3.0),
        // B market
        Obstacle::new(-1.5 * s, -0.5, 3.0 * s, 0.2),
        // Mid tiles
        Obstacle::new(0.0, -1.5, 2.0 * s, 0.2),
        // Mid bottom
        Obstacle::new(-1.5 * s, -2.0, 3.0 * s, 0.2),
        // B lobby
        Obstacle::new(-2.0 * s, -2.5, 0.2, 1.0),
        // Attacker spawn
        Obstacle::new(0.0, -3.0, 4.0 * s, 0.2),
    ]
}

pub fn spawn_points(aspect: f32) -> [SpawnPoint; 2] {
    [
        SpawnPoint {
            name: "Defender",
            position: vec2(-2.0 * aspect, 3.5),
        },
        SpawnPoint {
            name: "Attacker",
            position: vec2(0.0, -3.5),
        },
    ]
}

pub fn site_markers(aspect: f32) -> [SiteMarker; 2] {
    [
        SiteMarker {
            name: "A",
            position: vec2(3.5 * aspect, 2.0),
        },
        SiteMarker {
            name: "B",
            position: vec2(-3.0 * aspect, 2.0),
        },
    ]
}

pub fn location_labels(aspect: f32) -> Vec<LocationLabel> {
    let s = aspect;
    let label = |text, x: f32, y: f32| LocationLabel {
        text,
        position: vec2(x, y),
    };
    vec![
        label("DEFENDER SIDE SPAWN", -2.0 * s, 3.5),
        label("A SITE", 3.0 * s, 2.5),
        label("A ELBOW", 4.0 * s, 1.0),
        label("A LINK", 1.5 * s, 1.3),
        label("A MAIN", 3.5 * s, 0.0),
        label("A LOBBY", 3.5 * s, -2.0),
        label("MID COURTYARD", 0.0, 0.3),
        label("MID TOP", -1.5 * s, 1.8),
        label("MID TILES", 0.0, -1.8),
        label("MID BOTTOM", -1.5 * s, -2.3),
        label("B SITE", -3.0 * s, 2.5),
        label("B BOBA", -3.5 * s, 1.0),
        label("B MAIN", -3.5 * s, -1.0),
        label("B MARKET", -1.5 * s, -0.8),
        label("B LOBBY", -2.5 * s, -2.8),
        label("ATTACKER SIDE SPAWN", 0.0, -3.5),
    ]
}
