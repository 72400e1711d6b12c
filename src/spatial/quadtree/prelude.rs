extern crate nalgebra as na;

use serde::{Deserialize, Serialize};

/// Points live in 2-dimensional space.
pub type Point = na::Point2<f64>;

/// One of the four equal quarters of a Boundary. The y axis grows downward, so "north" is the
/// half with the smaller y values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// Every quadrant, in the order children are created, stored and visited.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Returns the direction of this quadrant from its parent's center as (sign x, sign y).
    pub fn signs(&self) -> (f64, f64) {
        match self {
            Quadrant::NorthWest => (-1.0, -1.0),
            Quadrant::NorthEast => (1.0, -1.0),
            Quadrant::SouthWest => (-1.0, 1.0),
            Quadrant::SouthEast => (1.0, 1.0),
        }
    }
}

/// Plain parameters describing a Boundary by its center (x, y), height h and width w.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryParams {
    pub x: f64,
    pub y: f64,
    pub h: f64,
    pub w: f64,
}

impl From<BoundaryParams> for Boundary {
    fn from(p: BoundaryParams) -> Self {
        Boundary::new(p.x, p.y, p.h, p.w)
    }
}

impl From<&Boundary> for BoundaryParams {
    fn from(b: &Boundary) -> Self {
        BoundaryParams { x: b.x(), y: b.y(), h: b.h(), w: b.w() }
    }
}

/// A closed interval of values along one axis.
struct Range(pub (f64, f64));

impl Range {
    /// Returns true if the two closed intervals share at least one value.
    pub fn intersects(&self, other: &Range) -> bool {
        self.0.0 <= other.0.1 && other.0.0 <= self.0.1
    }

    pub fn contains(&self, v: f64) -> bool {
        self.0.0 <= v && v <= self.0.1
    }
}

/// An axis-aligned rectangle described by its center and full extents.
///
/// The edges are computed once when the Boundary is built. There are no setters: a moved or
/// resized window is a new Boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Boundary {
    x: f64,
    y: f64,
    h: f64,
    w: f64,

    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Boundary {
    /// Builds the rectangle centered at (x, y) with height h and width w. Negative or zero
    /// extents are accepted and give an inverted or degenerate rectangle.
    pub fn new(x: f64, y: f64, h: f64, w: f64) -> Self {
        Self {
            x,
            y,
            h,
            w,
            left: x - w / 2.0,
            right: x + w / 2.0,
            top: y - h / 2.0,
            bottom: y + h / 2.0,
        }
    }

    /// Builds the rectangle from its edges, keeping the edges exactly as given.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            x: (left + right) / 2.0,
            y: (top + bottom) / 2.0,
            h: bottom - top,
            w: right - left,
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns true if the extents are finite and strictly positive, and the center is finite.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.h, self.w].iter().all(|v| v.is_finite())
            && self.h > 0.0
            && self.w > 0.0
    }

    /// Returns true if the point lies inside the rectangle or on any of its edges.
    pub fn contains(&self, p: &Point) -> bool {
        self.xrange().contains(p.x) && self.yrange().contains(p.y)
    }

    /// Returns true if the two rectangles overlap, touching edges included.
    pub fn intersects(&self, other: &Boundary) -> bool {
        self.xrange().intersects(&other.xrange()) && self.yrange().intersects(&other.yrange())
    }

    /// Returns the quarter of this rectangle lying in the direction (sign(dx), sign(dy)) from its
    /// center. Only the sign of each argument matters; a zero keeps the child centered on that
    /// axis.
    ///
    /// The child's edges are taken from this rectangle's edges and center, so the four quadrants
    /// cover it exactly.
    pub fn create_child(&self, dx: f64, dy: f64) -> Boundary {
        let (left, right) = Self::half(self.left, self.x, self.right, dx);
        let (top, bottom) = Self::half(self.top, self.y, self.bottom, dy);

        Self::from_edges(left, top, right, bottom)
    }

    /// Returns the given quadrant of this rectangle.
    pub fn child(&self, quadrant: Quadrant) -> Boundary {
        let (dx, dy) = quadrant.signs();
        self.create_child(dx, dy)
    }

    /// Picks the half of [lo, hi] (split at mid) in the direction of d.
    fn half(lo: f64, mid: f64, hi: f64, d: f64) -> (f64, f64) {
        if d < 0.0 {
            (lo, mid)
        } else if d > 0.0 {
            (mid, hi)
        } else {
            let quarter = (hi - lo) / 4.0;
            (mid - quarter, mid + quarter)
        }
    }

    fn xrange(&self) -> Range {
        Range((self.left, self.right))
    }

    fn yrange(&self) -> Range {
        Range((self.top, self.bottom))
    }
}
