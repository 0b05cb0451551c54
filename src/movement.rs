use crate::map::ViewBounds;
use crate::obstacle::Obstacle;
use macroquad::math::{vec2, Vec2};
use std::f32::consts::TAU;

/// Sub-steps used to find how far a blocked axis can still advance
const SLIDE_SUBSTEPS: usize = 10;
/// Fraction of the free distance actually taken when an axis is blocked
const SLIDE_SAFETY: f32 = 0.9;

/// Keys held during one frame, captured by the window layer before any physics runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Counter-clockwise
    pub rotate_left: bool,
    /// Clockwise
    pub rotate_right: bool,
}

impl FrameInput {
    pub fn is_moving(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Unscaled velocity direction from the held movement keys
    pub fn movement_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y += 1.0;
        }
        if self.down {
            axis.y -= 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }
}

/// Torch aim, kept as an angle in [0, 2π)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimState {
    pub angle: f32,
}

impl AimState {
    pub fn new(angle: f32) -> Self {
        AimState {
            angle: wrap_angle(angle),
        }
    }

    /// Apply this frame's rotation keys
    pub fn update(&mut self, input: &FrameInput, rotation_speed: f32) {
        let mut angle = self.angle;
        if input.rotate_left {
            angle += rotation_speed;
        }
        if input.rotate_right {
            angle -= rotation_speed;
        }
        self.angle = wrap_angle(angle);
    }

    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}

/// Wrap an angle into [0, 2π)
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Circle-vs-rectangle test against every obstacle
pub fn collides(obstacles: &[Obstacle], point: Vec2, radius: f32) -> bool {
    obstacles.iter().any(|o| {
        let closest = o.closest_point(point);
        point.distance_squared(closest) < radius * radius || o.strictly_contains(point)
    })
}

/// Result of resolving one frame of player movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Furthest distance along one axis (as a multiple of `delta`) reachable in sub-steps
fn partial_advance(obstacles: &[Obstacle], position: Vec2, delta: Vec2, radius: f32) -> Vec2 {
    let step = delta / SLIDE_SUBSTEPS as f32;
    let mut moved = Vec2::ZERO;
    for _ in 0..SLIDE_SUBSTEPS {
        if collides(obstacles, position + moved + step, radius) {
            break;
        }
        moved += step;
    }
    moved * SLIDE_SAFETY
}

/// Move a disc of `radius` according to `input`, sliding along obstacles.
///
/// Each axis is tried on its own. A blocked axis creeps forward in sub-steps and
/// keeps 90% of the free distance. When both axes are free but the diagonal is
/// not, whichever single axis stays clear wins. The result is clamped to `bounds`
/// inset by `radius`.
pub fn resolve_movement(
    obstacles: &[Obstacle],
    position: Vec2,
    input: &FrameInput,
    move_speed: f32,
    radius: f32,
    bounds: &ViewBounds,
) -> MoveResult {
    let velocity = input.movement_axis() * move_speed;
    if velocity == Vec2::ZERO {
        return MoveResult {
            position,
            velocity: Vec2::ZERO,
        };
    }

    let mut next = position;

    let dx = vec2(velocity.x, 0.0);
    let can_move_x = !collides(obstacles, position + dx, radius);
    next.x = if can_move_x {
        position.x + velocity.x
    } else {
        position.x + partial_advance(obstacles, position, dx, radius).x
    };

    let dy = vec2(0.0, velocity.y);
    let can_move_y = !collides(obstacles, position + dy, radius);
    next.y = if can_move_y {
        position.y + velocity.y
    } else {
        position.y + partial_advance(obstacles, position, dy, radius).y
    };

    if can_move_x && can_move_y && collides(obstacles, next, radius) {
        if !collides(obstacles, vec2(next.x, position.y), radius) {
            next.y = position.y;
        } else if !collides(obstacles, vec2(position.x, next.y), radius) {
            next.x = position.x;
        } else {
            next = position;
        }
    }

    MoveResult {
        position: bounds.clamp(next, radius),
        velocity,
    }
}

/// Undo an integration step that pushed the disc into an obstacle.
/// Keeps the X move if that alone is clear, else the Y move, else reverts.
pub fn settle_after_step(obstacles: &[Obstacle], old: Vec2, new: Vec2, radius: f32) -> Vec2 {
    if !collides(obstacles, new, radius) {
        return new;
    }
    if !collides(obstacles, vec2(new.x, old.y), radius) {
        vec2(new.x, old.y)
    } else if !collides(obstacles, vec2(old.x, new.y), radius) {
        vec2(old.x, new.y)
    } else {
        old
    }
}
