//! # prgview
//!
//! Renders aerosol-jet PRG motion programs as SVG, drawing printing moves
//! (shutter open) and rapid moves (shutter closed) in distinct styles.
//!
//! ## Architecture
//!
//! prgview is organized as a workspace with multiple crates:
//!
//! 1. **prgview-core** - Points, bounding boxes, constants and error types
//! 2. **prgview-visualizer** - PRG parser, toolpath tracer, viewport fitting, SVG output
//! 3. **prgview-settings** - Render settings with TOML/JSON persistence
//! 4. **prgview** - Command-line front end that ties the crates together
//!
//! ## Pipeline
//!
//! ```
//! use prgview::{parse, render, RenderOptions};
//!
//! let program = parse("ShutterOpen\nMSEG (X,Y),0,0\nline (X,Y),1,0\nENDS (X,Y)");
//! let svg = render(&program, &RenderOptions::default());
//! assert!(svg.contains("<path"));
//! ```

pub mod cli;

pub use prgview_core::{constants, BoundingBox, Error, Point, PrgError, Result};

pub use prgview_visualizer::{
    fit_viewport, parse, render, render_toolpath, trace, ArcTo, Command, CommandType, PathOp,
    PathRecord, PrgParser, Program, RenderOptions, SkipReason, SkippedLine, Toolpath,
    ToolpathStats, Viewport, DEMO_PROGRAM,
};

pub use prgview_settings::{default_config_path, RenderSettings, SettingsError, SettingsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log line format on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line records
    #[default]
    Text,
    /// One JSON object per record
    Json,
}

/// Initialize logging
///
/// Installs a `tracing` subscriber writing to stderr, leaving stdout free for
/// SVG output. The level defaults to `info` and is overridden by `RUST_LOG`.
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .json(),
            )
            .try_init(),
    }
    .context("Failed to install the logging subscriber")?;

    Ok(())
}
