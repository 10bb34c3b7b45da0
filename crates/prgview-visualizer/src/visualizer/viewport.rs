//! Viewport fitting for SVG output.
//!
//! PRG coordinates grow upward while SVG coordinates grow downward, so the
//! fitted viewport carries a transform that mirrors content about the center
//! of its own bounding box.

use prgview_core::constants::{FALLBACK_MAX_X, FALLBACK_MAX_Y, FALLBACK_MIN_X, FALLBACK_MIN_Y};
use prgview_core::{BoundingBox, Point};
use tracing::{debug, warn};

use super::svg::fmt_num;
use crate::prg::Program;

/// Bounding box accumulator used while scanning program points.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Grow to include `point`; non-finite points are ignored
    pub fn update(&mut self, point: Point) {
        if !point.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    /// False until at least one finite point has been seen
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// Pad the accumulated box, or fall back to the fixed default box when
    /// nothing was accumulated or the padded extents overflow.
    pub fn finalize_with_padding(self, padding: f64) -> BoundingBox {
        if !self.is_valid() {
            return fallback_bounds();
        }
        let bbox =
            BoundingBox::new(self.min_x, self.min_y, self.max_x, self.max_y).padded(padding);
        if !(bbox.width().is_finite() && bbox.height().is_finite()) {
            warn!(
                "Bounds x=[{}, {}], y=[{}, {}] overflow when padded, using fallback viewport",
                self.min_x, self.max_x, self.min_y, self.max_y
            );
            return fallback_bounds();
        }
        bbox
    }
}

/// Box used for programs that reference no points
pub fn fallback_bounds() -> BoundingBox {
    BoundingBox::new(FALLBACK_MIN_X, FALLBACK_MIN_Y, FALLBACK_MAX_X, FALLBACK_MAX_Y)
}

/// Fitted SVG viewport: a padded box plus the Y-flip transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: BoundingBox,
}

impl Viewport {
    pub fn new(bounds: BoundingBox) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// `viewBox` attribute value: `min_x min_y width height`
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            fmt_num(self.bounds.min_x),
            fmt_num(self.bounds.min_y),
            fmt_num(self.bounds.width()),
            fmt_num(self.bounds.height())
        )
    }

    /// Mirror vertically about the box center without moving or rescaling it
    pub fn transform(&self) -> String {
        let center = self.bounds.center();
        format!(
            "translate({}, {}) scale(1, -1) translate({}, {})",
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(-center.x),
            fmt_num(-center.y)
        )
    }

    /// Map a program point to where it lands in the viewBox after the flip
    pub fn flip(&self, point: Point) -> Point {
        let center = self.bounds.center();
        Point::new(point.x, center.y + (center.y - point.y))
    }
}

/// Fit a viewport around every point referenced by any command
///
/// All commands count, including rapid `PTP` targets and `ENDS` coordinates,
/// not only the geometry that ends up drawn.
pub fn fit_viewport(program: &Program, padding: f64) -> Viewport {
    let mut bounds = Bounds::new();
    for point in program.points() {
        bounds.update(point);
    }

    let has_points = bounds.is_valid();
    let bbox = bounds.finalize_with_padding(padding);
    if has_points {
        debug!(
            "Bounds: x=[{:.2}, {:.2}], y=[{:.2}, {:.2}]",
            bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y
        );
    } else {
        debug!("Program has no points, using fallback viewport");
    }
    Viewport::new(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prg::parse;

    #[test]
    fn test_bounds_with_default_padding() {
        let program = parse("ptp (X,Y),1,1\nline (X,Y),5,5");
        let viewport = fit_viewport(&program, 1.0);
        assert_eq!(viewport.bounds(), BoundingBox::new(0.0, 0.0, 6.0, 6.0));
        assert_eq!(viewport.view_box(), "0 0 6 6");
    }

    #[test]
    fn test_transform_flips_about_center() {
        let program = parse("ptp (X,Y),1,1\nline (X,Y),5,5");
        let viewport = fit_viewport(&program, 1.0);
        assert_eq!(
            viewport.transform(),
            "translate(3, 3) scale(1, -1) translate(-3, -3)"
        );
        assert_eq!(viewport.flip(Point::new(1.0, 1.0)), Point::new(1.0, 5.0));
        assert_eq!(viewport.flip(Point::new(3.0, 3.0)), Point::new(3.0, 3.0));
    }

    #[test]
    fn test_empty_program_uses_fallback() {
        let viewport = fit_viewport(&Program::new(), 1.0);
        assert_eq!(viewport.bounds(), fallback_bounds());
        assert_eq!(viewport.view_box(), "0 0 100 100");
        assert!(!viewport.transform().contains("NaN"));
        assert!(!viewport.transform().contains("inf"));
    }

    #[test]
    fn test_ends_point_counts_toward_bounds() {
        let program = parse("MSEG (X,Y),0,0\nline (X,Y),1,0\nENDS (X,Y),10,-3");
        let viewport = fit_viewport(&program, 0.0);
        assert_eq!(viewport.bounds(), BoundingBox::new(0.0, -3.0, 10.0, 0.0));
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let program = parse(&format!(
            "ptp (X,Y),{:.0},{:.0}\nline (X,Y),{:.0},{:.0}",
            1.0e308, 1.0e308, 1.7e308, 1.7e308
        ));
        let viewport = fit_viewport(&program, 1.0);
        assert!(viewport.bounds().center().is_finite());
        assert!(!viewport.transform().contains("inf"));
        assert!(!viewport.view_box().contains("inf"));
    }

    #[test]
    fn test_overflowing_extent_uses_fallback() {
        let program = parse(&format!(
            "ptp (X,Y),{:.0},0\nline (X,Y),{:.0},0",
            -1.7e308, 1.7e308
        ));
        let viewport = fit_viewport(&program, 1.0);
        assert_eq!(viewport.bounds(), fallback_bounds());
    }

    #[test]
    fn test_single_point_program() {
        let program = parse("ptp (X,Y),2,2");
        let viewport = fit_viewport(&program, 1.0);
        assert_eq!(viewport.view_box(), "1 1 2 2");
    }
}
