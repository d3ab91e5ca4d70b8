//! Geometric primitives for footprint coordinates.
//!
//! - [`Point`] - A 2D coordinate in millimetres
//! - [`Position`] - A point with optional rotation and the `unlocked` flag
//! - [`Size`] - Width and height
//! - [`Xyz`] - A 3D triple for model offset, scale and rotation
//!
//! # Coordinate System
//!
//! Footprints use the board coordinate system, relative to the footprint
//! anchor:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Angles are in degrees, counter-clockwise.

/// A 2D point in millimetres.
///
/// # Examples
///
/// ```
/// # use kiform_core::geometry::Point;
/// let p = Point::new(1.27, -0.5);
/// assert_eq!(p.x(), 1.27);
/// assert!(!p.is_zero());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Where a text, pad or footprint is placed: `(at x y [angle] [unlocked])`.
///
/// The angle is kept optional so `(at 0 0)` and `(at 0 0 0)` both survive a
/// round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    point: Point,
    angle: Option<f64>,
    unlocked: bool,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            angle: None,
            unlocked: false,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    /// Marks a text as free to move independently of the footprint.
    pub fn with_unlocked(mut self, unlocked: bool) -> Self {
        self.unlocked = unlocked;
        self
    }

    pub fn point(self) -> Point {
        self.point
    }

    pub fn x(self) -> f64 {
        self.point.x()
    }

    pub fn y(self) -> f64 {
        self.point.y()
    }

    pub fn angle(self) -> Option<f64> {
        self.angle
    }

    pub fn unlocked(self) -> bool {
        self.unlocked
    }
}

/// Width and height in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A square size.
    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }
}

/// A 3D triple.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiply every component by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}
