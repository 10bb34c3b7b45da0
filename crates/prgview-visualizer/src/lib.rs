//! # prgview Visualizer
//!
//! PRG program parsing and SVG visualization for prgview.
//! Includes the permissive line parser, the toolpath tracer, the viewport
//! fitter, and the SVG markup assembler.

pub mod prg;
pub mod visualizer;

pub use prg::{
    parse, Command, CommandType, PrgParser, DEMO_PROGRAM, Program, SkipReason, SkippedLine,
};

pub use visualizer::{
    fit_viewport, render, render_toolpath, trace, ArcTo, PathOp, PathRecord, RenderOptions,
    Toolpath, ToolpathStats, Viewport,
};
