//! PRG program model and parser
//!
//! This module provides:
//! - Motion command types (`PTP`, `LINE`, `ARC2`, `MSEG`, `ENDS`)
//! - The parsed program container with per-command shutter state
//! - A permissive line parser with skipped-line diagnostics

pub mod command;
pub mod demo;
pub mod parser;

pub use command::*;
pub use demo::DEMO_PROGRAM;
pub use parser::*;
