//! Geometric primitives for viewport calculations.
//!
//! This module provides the small set of geometric types the viewer needs to
//! place a rendered diagram inside its container.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in screen space
//! - [`Size`] - Width and height dimensions
//!
//! # Coordinate System
//!
//! dotview uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point representing a position in screen coordinate space.
///
/// # Examples
///
/// ```
/// # use dotview_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let offset = p1.sub_point(p2);
/// assert_eq!(offset.x(), 5.0);
/// assert_eq!(offset.y(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dotview_core::geometry::Point;
    /// let point = Point::new(10.0, 20.0);
    ///
    /// let halved = point.scale(0.5);
    /// assert_eq!(halved.x(), 5.0);
    /// assert_eq!(halved.y(), 10.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns the largest uniform scale at which this size fits inside `container`.
    ///
    /// Empty sizes yield `1.0` so callers never divide by zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dotview_core::geometry::Size;
    /// let image = Size::new(200.0, 100.0);
    /// let container = Size::new(100.0, 100.0);
    /// assert_eq!(image.fit_scale(container), 0.5);
    /// ```
    pub fn fit_scale(self, container: Size) -> f32 {
        if self.is_empty() || container.is_empty() {
            return 1.0;
        }
        (container.width / self.width).min(container.height / self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert_eq!(point.x(), 0.0);
        assert_eq!(point.y(), 0.0);
    }

    #[test]
    fn test_point_sub_and_scale() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p2.sub_point(p1), Point::new(2.0, 2.0));
        assert_eq!(p2.scale(2.0), Point::new(6.0, 8.0));
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(10.0, -1.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_fit_scale_uses_tighter_axis() {
        let image = Size::new(100.0, 400.0);
        let container = Size::new(800.0, 800.0);
        assert_eq!(image.fit_scale(container), 2.0);
    }

    #[test]
    fn test_fit_scale_of_empty_size_is_identity() {
        assert_eq!(Size::default().fit_scale(Size::new(10.0, 10.0)), 1.0);
        assert_eq!(Size::new(10.0, 10.0).fit_scale(Size::default()), 1.0);
    }
}
