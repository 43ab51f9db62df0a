//! Screen-space geometry primitives
//!
//! All coordinates are physical pixels in the virtual desktop space, with the
//! origin at the top-left of the primary monitor.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` placed at `origin`
    pub const fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// One past the right-most column
    #[expect(
        clippy::cast_possible_wrap,
        reason = "screen dimensions are far below i32::MAX"
    )]
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// One past the bottom-most row
    #[expect(
        clippy::cast_possible_wrap,
        reason = "screen dimensions are far below i32::MAX"
    )]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Horizontal center
    #[expect(
        clippy::cast_possible_wrap,
        reason = "screen dimensions are far below i32::MAX"
    )]
    pub const fn center_x(&self) -> i32 {
        self.x + (self.width / 2) as i32
    }

    /// Vertical center
    #[expect(
        clippy::cast_possible_wrap,
        reason = "screen dimensions are far below i32::MAX"
    )]
    pub const fn center_y(&self) -> i32 {
        self.y + (self.height / 2) as i32
    }

    /// Clamp the top-left corner of a `size`-sized box so the box stays inside `self`.
    ///
    /// When the box is larger than `self` along an axis it is pinned to the
    /// leading edge of that axis.
    #[expect(
        clippy::cast_possible_wrap,
        reason = "screen dimensions are far below i32::MAX"
    )]
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let max_x = (self.right() - size.width as i32).max(self.x);
        let max_y = (self.bottom() - size.height as i32).max(self.y);
        Point::new(origin.x.clamp(self.x, max_x), origin.y.clamp(self.y, max_y))
    }

    /// Whether `other` lies entirely inside `self`
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
