//! # prgview Core
//!
//! Core types and utilities shared by the prgview crates.
//! Provides the plane geometry primitives, rendering constants, and
//! error types used by the parser, renderer, and settings layers.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{BoundingBox, Point};

pub use error::{Error, PrgError, Result};
