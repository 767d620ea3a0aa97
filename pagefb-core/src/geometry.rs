//! Pixel coordinates and rectangles
//!
//! Rectangles are inclusive on both corners, matching how dirty regions are
//! transmitted (`left..=right` columns of each page).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pixel coordinate
///
/// Signed so that layouts may start off-screen; drawing clips silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Default for Rect {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Rect {
    /// The empty rectangle
    ///
    /// Corners are inverted to the extremes, so a union with any real
    /// rectangle yields that rectangle.
    pub const EMPTY: Self = Self {
        top_left: Point::new(i32::MAX, i32::MAX),
        bottom_right: Point::new(i32::MIN, i32::MIN),
    };

    /// Create a rectangle from its corners, as given
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Create a rectangle spanning two corners in any order
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            top_left: Point::new(x1.min(x2), y1.min(y2)),
            bottom_right: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    /// Create a rectangle from an origin and a size
    ///
    /// A zero width or height gives [`Rect::EMPTY`].
    pub fn with_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::EMPTY;
        }
        Self {
            top_left: Point::new(x, y),
            bottom_right: Point::new(
                x.saturating_add(i32::try_from(width - 1).unwrap_or(i32::MAX)),
                y.saturating_add(i32::try_from(height - 1).unwrap_or(i32::MAX)),
            ),
        }
    }

    /// Check if the rectangle contains no pixels
    pub const fn is_empty(&self) -> bool {
        self.top_left.x > self.bottom_right.x || self.top_left.y > self.bottom_right.y
    }

    /// Width in pixels (0 when empty)
    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            let span = i64::from(self.bottom_right.x) - i64::from(self.top_left.x) + 1;
            u32::try_from(span).unwrap_or(u32::MAX)
        }
    }

    /// Height in pixels (0 when empty)
    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            let span = i64::from(self.bottom_right.y) - i64::from(self.top_left.y) + 1;
            u32::try_from(span).unwrap_or(u32::MAX)
        }
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Rect {
            top_left: Point::new(
                self.top_left.x.min(other.top_left.x),
                self.top_left.y.min(other.top_left.y),
            ),
            bottom_right: Point::new(
                self.bottom_right.x.max(other.bottom_right.x),
                self.bottom_right.y.max(other.bottom_right.y),
            ),
        }
    }

    /// Overlapping area, or [`Rect::EMPTY`]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let rect = Rect {
            top_left: Point::new(
                self.top_left.x.max(other.top_left.x),
                self.top_left.y.max(other.top_left.y),
            ),
            bottom_right: Point::new(
                self.bottom_right.x.min(other.bottom_right.x),
                self.bottom_right.y.min(other.bottom_right.y),
            ),
        };
        if rect.is_empty() {
            Self::EMPTY
        } else {
            rect
        }
    }

    /// Check if a point lies inside
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }
}
