//! Plane geometry primitives
//!
//! PRG programs describe motion in a 2D plane with the Y axis pointing up.
//! These types carry coordinates in program units; conversion to SVG space
//! happens in the visualizer.

use serde::{Deserialize, Serialize};

/// A point in program units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate (increasing upward)
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0)
    pub fn origin() -> Self {
        Self::default()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// True if both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned bounding box in program units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box from its extents
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Geometric center of the box
    ///
    /// Finite whenever the width and height are finite, even for extents
    /// near `f64::MAX`.
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    /// Return a copy grown by `padding` on every side
    pub fn padded(&self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }

    /// True if the point lies inside or on the edge of the box
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }

    #[test]
    fn test_bounding_box_padding_and_center() {
        let bbox = BoundingBox::new(1.0, 1.0, 5.0, 5.0).padded(1.0);
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 6.0, 6.0));
        assert_eq!(bbox.width(), 6.0);
        assert_eq!(bbox.height(), 6.0);
        assert_eq!(bbox.center(), Point::new(3.0, 3.0));
    }

    #[test]
    fn test_center_of_huge_box_is_finite() {
        let bbox = BoundingBox::new(1.0e308, 1.0e308, 1.7e308, 1.7e308);
        assert!(bbox.width().is_finite());
        let center = bbox.center();
        assert!(center.is_finite());
        assert!(((center.x - 1.35e308) / 1.35e308).abs() < 1e-12);
        assert_eq!(center.x, center.y);
    }

    #[test]
    fn test_distance_between_distant_points() {
        let a = Point::new(-1.0e200, 0.0);
        let b = Point::new(1.0e200, 0.0);
        assert_eq!(a.distance_to(&b), 2.0e200);
    }

    #[test]
    fn test_bounding_box_contains() {
        let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        assert!(bbox.contains(&Point::origin()));
        assert!(bbox.contains(&Point::new(1.0, -1.0)));
        assert!(!bbox.contains(&Point::new(1.5, 0.0)));
    }
}
