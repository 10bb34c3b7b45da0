//! Shared constants for rendering PRG programs.

/// Default output width in pixels.
pub const DEFAULT_WIDTH_PX: u32 = 800;

/// Default output height in pixels.
pub const DEFAULT_HEIGHT_PX: u32 = 600;

/// Default stroke width for printing moves, in program units.
pub const DEFAULT_LINE_THICKNESS: f64 = 1.0;

/// Padding added on every side of the fitted bounding box, in program units.
pub const VIEW_PADDING: f64 = 1.0;

/// Rapid moves are stroked at this fraction of the printing line thickness.
pub const RAPID_STROKE_RATIO: f64 = 0.7;

/// Stroke color for printing (shutter open) paths.
pub const PRINTING_COLOR: &str = "#2563eb";

/// Stroke color for rapid (shutter closed) paths.
pub const RAPID_COLOR: &str = "#dc2626";

/// Bounds used when a program references no points at all.
pub const FALLBACK_MIN_X: f64 = 0.0;
pub const FALLBACK_MIN_Y: f64 = 0.0;
pub const FALLBACK_MAX_X: f64 = 100.0;
pub const FALLBACK_MAX_Y: f64 = 100.0;

/// Below this magnitude `sin(|angle| / 2)` is treated as zero and an arc
/// degenerates to its chord.
pub const ARC_DEGENERATE_EPSILON: f64 = 1e-9;

/// SVG namespace for the root element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
