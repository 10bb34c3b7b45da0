//! 2D toolpath visualization
//!
//! This module provides:
//! - Toolpath tracing (printing vs rapid path records)
//! - Viewport fitting with Y-axis flip
//! - SVG document assembly

pub mod svg;
pub mod toolpath;
pub mod viewport;

pub use svg::{fmt_num, path_data, render, render_toolpath, RenderOptions, StrokeStyle};
pub use toolpath::{
    arc_parameters, trace, ArcTo, PathOp, PathRecord, Toolpath, ToolpathStats,
};
pub use viewport::{fallback_bounds, fit_viewport, Bounds, Viewport};
