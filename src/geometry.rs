//! Axis-aligned rectangles and axis-separated collision resolution.
//!
//! Movement is always resolved one axis at a time: X is applied and
//! corrected against every obstacle, then Y. Resolving a combined vector
//! instead lets entities clip through wall corners diagonally.

use glam::Vec2;

/// An axis-aligned rectangle in world space. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// What happens to a mover that ends up overlapping an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Snap flush against the side of the obstacle the mover came from.
    Flush,
    /// Put the coordinate back where it was before the move.
    Revert,
}

/// Which axes were blocked by an obstacle during a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blocked {
    pub x: bool,
    pub y: bool,
}

impl Blocked {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    /// Bounding box of a `w × h` sprite rotated to face `direction`.
    ///
    /// The unrotated sprite is taken to face +X, so a sprite facing up or down
    /// has its width and height swapped.
    pub fn rotated_bounds(center: Vec2, w: f32, h: f32, direction: Vec2) -> Self {
        let dir = direction.try_normalize().unwrap_or(Vec2::X);
        let (cos, sin) = (dir.x.abs(), dir.y.abs());
        Self::from_center(center, w * cos + h * sin, w * sin + h * cos)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Point containment, half-open on the right and bottom edges.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Keep the rectangle inside `bounds` on all four edges.
    pub fn clamped_to(&self, bounds: &Rect) -> Self {
        let mut r = *self;
        r.x = r.x.max(bounds.left());
        r.y = r.y.max(bounds.top());
        if r.right() > bounds.right() {
            r.x = bounds.right() - r.w;
        }
        if r.bottom() > bounds.bottom() {
            r.y = bounds.bottom() - r.h;
        }
        r
    }
}

/// Strict overlap test: rectangles that only share an edge do not intersect.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Move `rect` by `delta` along one axis and correct against every obstacle.
///
/// Returns the resolved rectangle and whether any obstacle blocked the move.
/// A zero delta never moves and never reports a block.
pub fn resolve_axis_move(
    rect: Rect,
    axis: Axis,
    delta: f32,
    obstacles: &[Rect],
    resolution: Resolution,
) -> (Rect, bool) {
    if delta == 0.0 {
        return (rect, false);
    }

    let mut moved = rect;
    match axis {
        Axis::X => moved.x += delta,
        Axis::Y => moved.y += delta,
    }

    let mut blocked = false;
    for wall in obstacles {
        if !intersects(&moved, wall) {
            continue;
        }
        blocked = true;
        match resolution {
            Resolution::Revert => return (rect, true),
            Resolution::Flush => match (axis, delta > 0.0) {
                (Axis::X, true) => moved.x = wall.left() - moved.w,
                (Axis::X, false) => moved.x = wall.right(),
                (Axis::Y, true) => moved.y = wall.top() - moved.h,
                (Axis::Y, false) => moved.y = wall.bottom(),
            },
        }
    }
    (moved, blocked)
}

/// Apply `delta` X-first, then Y, each axis fully resolved before the next.
pub fn move_and_collide(
    rect: Rect,
    delta: Vec2,
    obstacles: &[Rect],
    resolution: Resolution,
) -> (Rect, Blocked) {
    let (rect, x) = resolve_axis_move(rect, Axis::X, delta.x, obstacles, resolution);
    let (rect, y) = resolve_axis_move(rect, Axis::Y, delta.y, obstacles, resolution);
    (rect, Blocked { x, y })
}
