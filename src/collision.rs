/// Collision primitives for the arcade physics backend
///
/// This module provides AABB (Axis-Aligned Bounding Box) detection and the
/// vocabulary used to register collision pairs between entity groups.
///
/// # Architecture
///
/// - `Aabb`: float rectangle in world pixels (top-left origin, y grows down)
/// - `Collidable` trait: anything that exposes bounds and can be tested
/// - `ContactKind`: blocking (solid) vs. non-blocking (overlap) pairs
/// - AABB functions: pure functions for rectangle intersection detection

/// Axis-aligned rectangle. `x`/`y` are the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Aabb {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from its centre point, the way sprites are placed.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Aabb::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// How the physics backend responds when a registered pair intersects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// Blocking contact: bodies are separated, then the pair is reported
    Solid,
    /// Proximity only: nothing moves, the pair is reported
    Overlap,
}

/// Trait for entities that participate in collision detection.
pub trait Collidable {
    /// Returns the axis-aligned bounding box for this entity.
    fn get_bounds(&self) -> Aabb;
}

impl Collidable for Aabb {
    fn get_bounds(&self) -> Aabb {
        *self
    }
}

/// Checks if two axis-aligned bounding boxes intersect.
///
/// Touching edges do not count as an intersection.
pub fn aabb_intersect(a: &Aabb, b: &Aabb) -> bool {
    let x_overlap = a.x < b.right() && a.right() > b.x;
    let y_overlap = a.y < b.bottom() && a.bottom() > b.y;

    x_overlap && y_overlap
}

/// Calculates the overlap between two intersecting rectangles.
///
/// Returns `(overlap_x, overlap_y)`:
///
/// - `overlap_x`: Positive if `a` overlaps to the right of `b`, negative if left
/// - `overlap_y`: Positive if `a` overlaps below `b`, negative if above
///
/// The values are meaningless when the rectangles do not intersect.
pub fn calculate_overlap(a: &Aabb, b: &Aabb) -> (f32, f32) {
    let overlap_x = if a.x <= b.x {
        a.right() - b.x
    } else {
        a.x - b.right()
    };

    let overlap_y = if a.y <= b.y {
        a.bottom() - b.y
    } else {
        a.y - b.bottom()
    };

    (overlap_x, overlap_y)
}
