//! SVG markup assembly
//! Renders traced toolpaths as a standalone SVG document, one `<path>` per
//! finalized record, styled by printing state.

use std::fmt::Write;

use prgview_core::constants::{
    DEFAULT_HEIGHT_PX, DEFAULT_LINE_THICKNESS, DEFAULT_WIDTH_PX, PRINTING_COLOR,
    RAPID_COLOR, RAPID_STROKE_RATIO, SVG_NAMESPACE, VIEW_PADDING,
};
use prgview_core::PrgError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::toolpath::{trace, PathOp, PathRecord, Toolpath};
use super::viewport::{fit_viewport, Viewport};
use crate::prg::Program;

/// Output options for SVG rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Pixel width of the SVG element
    pub width: u32,
    /// Pixel height of the SVG element
    pub height: u32,
    /// Stroke width of printing paths, in program units
    pub line_thickness: f64,
    /// Padding around the fitted bounding box, in program units
    pub padding: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH_PX,
            height: DEFAULT_HEIGHT_PX,
            line_thickness: DEFAULT_LINE_THICKNESS,
            padding: VIEW_PADDING,
        }
    }
}

impl RenderOptions {
    pub fn new(width: u32, height: u32, line_thickness: f64) -> Self {
        Self {
            width,
            height,
            line_thickness,
            ..Self::default()
        }
    }

    /// Check that every option is in range
    pub fn validate(&self) -> Result<(), PrgError> {
        if self.width == 0 || self.height == 0 {
            return Err(PrgError::InvalidOption {
                name: "size".to_string(),
                reason: "width and height must be > 0".to_string(),
            });
        }
        if !self.line_thickness.is_finite() || self.line_thickness <= 0.0 {
            return Err(PrgError::InvalidOption {
                name: "line_thickness".to_string(),
                reason: format!("must be a positive number, got {}", self.line_thickness),
            });
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(PrgError::InvalidOption {
                name: "padding".to_string(),
                reason: format!("must be a non-negative number, got {}", self.padding),
            });
        }
        Ok(())
    }
}

/// Stroke style for one class of path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: &'static str,
    pub width: f64,
}

impl StrokeStyle {
    /// Style for a path given its printing state
    pub fn for_path(printing: bool, line_thickness: f64) -> Self {
        if printing {
            Self {
                color: PRINTING_COLOR,
                width: line_thickness,
            }
        } else {
            Self {
                color: RAPID_COLOR,
                width: line_thickness * RAPID_STROKE_RATIO,
            }
        }
    }
}

/// Format a number in shortest round-trip form, writing negative zero as `0`
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// SVG path data (`d` attribute) for a record
pub fn path_data(record: &PathRecord) -> String {
    let mut d = String::with_capacity(record.ops().len() * 16);
    for (i, op) in record.ops().iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let _ = match op {
            PathOp::MoveTo(p) => write!(d, "M {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathOp::LineTo(p) => write!(d, "L {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathOp::ArcTo(arc) => write!(
                d,
                "A {r} {r} 0 {} {} {} {}",
                u8::from(arc.large_arc),
                u8::from(arc.sweep),
                fmt_num(arc.to.x),
                fmt_num(arc.to.y),
                r = fmt_num(arc.radius)
            ),
        };
    }
    d
}

/// Assemble an SVG document from an already traced toolpath
///
/// `options` must pass [`RenderOptions::validate`]; out-of-range values would
/// be written into the markup as is.
pub fn render_toolpath(toolpath: &Toolpath, viewport: &Viewport, options: &RenderOptions) -> String {
    debug_assert!(
        options.validate().is_ok(),
        "render options must be validated before rendering: {:?}",
        options
    );
    let mut svg = String::with_capacity(256 + toolpath.len() * 160);

    let _ = writeln!(
        svg,
        r#"<svg viewBox="{}" width="{}" height="{}" xmlns="{}">"#,
        viewport.view_box(),
        options.width,
        options.height,
        SVG_NAMESPACE
    );
    let _ = writeln!(svg, r#"  <g transform="{}">"#, viewport.transform());

    for record in &toolpath.paths {
        let style = StrokeStyle::for_path(record.is_printing(), options.line_thickness);
        let _ = writeln!(
            svg,
            r#"    <path d="{}" stroke="{}" stroke-width="{}" fill="none" stroke-linecap="round" stroke-linejoin="round" />"#,
            path_data(record),
            style.color,
            fmt_num(style.width)
        );
    }

    svg.push_str("  </g>\n</svg>\n");
    svg
}

/// Render a parsed program to an SVG document
///
/// `options` must pass [`RenderOptions::validate`].
pub fn render(program: &Program, options: &RenderOptions) -> String {
    let viewport = fit_viewport(program, options.padding);
    let toolpath = trace(program);
    let svg = render_toolpath(&toolpath, &viewport, options);
    debug!(
        "Rendered {} paths into {} bytes of SVG",
        toolpath.len(),
        svg.len()
    );
    svg
}
