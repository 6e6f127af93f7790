//! Static field geometry: boundary walls and goal mouths
//!
//! Everything lives in world X/Z. A wall is a thin axis-aligned slab that
//! constrains one axis (its normal) and spans the other; a goal mouth is the
//! pocket behind a gap in an end wall.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which team an entity or goal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Axis-aligned rectangle in world X/Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Aabb {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Inclusive containment test, ignoring height
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) * 0.5,
            0.0,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// Shrink on every side; collapses to the centre line when too small
    pub fn inset(&self, margin: f32) -> Aabb {
        let c = self.center();
        Aabb::new(
            (self.min_x + margin).min(c.x),
            (self.max_x - margin).max(c.x),
            (self.min_z + margin).min(c.z),
            (self.max_z - margin).max(c.z),
        )
    }
}

/// Which axis a wall runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallOrientation {
    /// Runs along X, constrains Z (end walls)
    Horizontal,
    /// Runs along Z, constrains X (side walls)
    Vertical,
}

/// Field boundary slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub bounds: Aabb,
    pub orientation: WallOrientation,
    /// +1 when the field lies toward larger coordinates on the constrained axis
    pub inward: f32,
}

impl Wall {
    /// Coordinate of the face that looks into the field
    pub fn inner_face(&self) -> f32 {
        match (self.orientation, self.inward > 0.0) {
            (WallOrientation::Horizontal, true) => self.bounds.max_z,
            (WallOrientation::Horizontal, false) => self.bounds.min_z,
            (WallOrientation::Vertical, true) => self.bounds.max_x,
            (WallOrientation::Vertical, false) => self.bounds.min_x,
        }
    }

    /// Split a point into (spanned-axis, constrained-axis) coordinates
    fn axes(&self, p: Vec3) -> (f32, f32) {
        match self.orientation {
            WallOrientation::Horizontal => (p.x, p.z),
            WallOrientation::Vertical => (p.z, p.x),
        }
    }

    fn span(&self) -> (f32, f32) {
        match self.orientation {
            WallOrientation::Horizontal => (self.bounds.min_x, self.bounds.max_x),
            WallOrientation::Vertical => (self.bounds.min_z, self.bounds.max_z),
        }
    }

    /// True if `next` lies past the inner face while inside the span widened
    /// by `extension` on both ends
    pub fn is_crossed_by(&self, next: Vec3, extension: f32) -> bool {
        let (along, across) = self.axes(next);
        let (lo, hi) = self.span();
        let in_span = along >= lo - extension && along <= hi + extension;
        in_span && (across - self.inner_face()) * self.inward < 0.0
    }

    /// True if `velocity` carries the ball out through this wall
    pub fn is_heading_out(&self, velocity: Vec3) -> bool {
        let (_, across) = self.axes(velocity);
        across * self.inward < 0.0
    }
}

/// Pocket behind a gap in an end wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalMouth {
    pub bounds: Aabb,
    /// The side that defends this goal; the other side scores here
    pub defended_by: Side,
    /// +1 when the pocket extends toward +Z
    pub outward: f32,
}

impl GoalMouth {
    /// Centre of the goal line
    pub fn line_center(&self) -> Vec3 {
        let z = if self.outward > 0.0 {
            self.bounds.min_z
        } else {
            self.bounds.max_z
        };
        Vec3::new((self.bounds.min_x + self.bounds.max_x) * 0.5, 0.0, z)
    }

    /// True once `next` is at least `depth_bias` behind the goal line
    pub fn is_entered(&self, next: Vec3, depth_bias: f32) -> bool {
        let mut pocket = self.bounds;
        if self.outward > 0.0 {
            pocket.min_z += depth_bias;
        } else {
            pocket.max_z -= depth_bias;
        }
        pocket.contains(next)
    }

    pub fn scorer(&self) -> Side {
        self.defended_by.other()
    }
}

/// The whole playing field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Playable interior
    pub interior: Aabb,
    pub walls: Vec<Wall>,
    pub goals: [GoalMouth; 2],
}

impl Field {
    /// Rectangular field with a centred goal mouth in each end wall.
    /// The player defends +Z, the opponent defends -Z.
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let interior = Aabb::new(
            tuning.field_min_x,
            tuning.field_max_x,
            tuning.field_min_z,
            tuning.field_max_z,
        );
        let t = tuning.wall_thickness;
        let center_x = interior.center().x;
        let goal_left = center_x - tuning.goal_width * 0.5;
        let goal_right = center_x + tuning.goal_width * 0.5;

        let mut walls = vec![
            Wall {
                bounds: Aabb::new(
                    interior.min_x - t,
                    interior.min_x,
                    interior.min_z,
                    interior.max_z,
                ),
                orientation: WallOrientation::Vertical,
                inward: 1.0,
            },
            Wall {
                bounds: Aabb::new(
                    interior.max_x,
                    interior.max_x + t,
                    interior.min_z,
                    interior.max_z,
                ),
                orientation: WallOrientation::Vertical,
                inward: -1.0,
            },
        ];
        for (min_z, max_z, inward) in [
            (interior.min_z - t, interior.min_z, 1.0),
            (interior.max_z, interior.max_z + t, -1.0),
        ] {
            for (min_x, max_x) in [(interior.min_x, goal_left), (goal_right, interior.max_x)] {
                walls.push(Wall {
                    bounds: Aabb::new(min_x, max_x, min_z, max_z),
                    orientation: WallOrientation::Horizontal,
                    inward,
                });
            }
        }

        let goals = [
            GoalMouth {
                bounds: Aabb::new(
                    goal_left,
                    goal_right,
                    interior.max_z,
                    interior.max_z + tuning.goal_depth,
                ),
                defended_by: Side::Player,
                outward: 1.0,
            },
            GoalMouth {
                bounds: Aabb::new(
                    goal_left,
                    goal_right,
                    interior.min_z - tuning.goal_depth,
                    interior.min_z,
                ),
                defended_by: Side::Opponent,
                outward: -1.0,
            },
        ];

        Self {
            interior,
            walls,
            goals,
        }
    }

    pub fn goal_defended_by(&self, side: Side) -> &GoalMouth {
        match side {
            Side::Player => &self.goals[0],
            Side::Opponent => &self.goals[1],
        }
    }

    /// Clamp a position into the interior, keeping `radius` clear of the walls
    pub fn confine(&self, p: Vec3, radius: f32) -> Vec3 {
        let area = self.interior.inset(radius);
        Vec3::new(
            p.x.clamp(area.min_x, area.max_x),
            p.y,
            p.z.clamp(area.min_z, area.max_z),
        )
    }
}
