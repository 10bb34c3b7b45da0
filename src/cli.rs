//! Command-line front end
//!
//! Reads a PRG program from a file, stdin or the built-in demo, renders it and
//! writes the SVG document to a file or stdout. Option precedence is command
//! line, then config file, then built-in defaults.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use prgview_core::Result;
use prgview_settings::RenderSettings;
use prgview_visualizer::{
    fit_viewport, parse, render_toolpath, trace, RenderOptions, SkippedLine, ToolpathStats,
    DEMO_PROGRAM,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::LogFormat;

/// Version string shown by `--version`
const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Render a PRG motion program as SVG
///
/// Printing moves (shutter open) and rapid moves (shutter closed) are drawn
/// in distinct styles. Size and style options override the config file;
/// without `--config`, `prgview/config.toml` in the platform config directory
/// is read when it exists.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[clap(name = "prgview", author, version = LONG_VERSION, about, long_about = None)]
pub struct Args {
    /// Program file to render; omit or pass `-` to read stdin
    #[clap(value_name = "PATH", conflicts_with = "demo")]
    pub input: Option<String>,

    /// Write SVG to this file instead of stdout
    #[clap(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// SVG element width in pixels
    #[clap(long, value_name = "PX")]
    pub width: Option<u32>,

    /// SVG element height in pixels
    #[clap(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Printing stroke width in program units
    #[clap(long, value_name = "N")]
    pub line_width: Option<f64>,

    /// Padding around the drawing in program units
    #[clap(long, value_name = "N")]
    pub padding: Option<f64>,

    /// Read render settings from a .toml or .json file
    #[clap(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print toolpath statistics and skipped lines to stderr as JSON
    #[clap(long)]
    pub stats: bool,

    /// Render the built-in demo program
    #[clap(long)]
    pub demo: bool,

    /// Log format on stderr
    #[clap(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    /// Resolve render options from config and command-line overrides
    pub fn render_options(&self) -> anyhow::Result<RenderOptions> {
        let mut settings = RenderSettings::load_or_default(self.config.as_deref())
            .context("Failed to load render settings")?;

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(line_width) = self.line_width {
            settings.line_thickness = line_width;
        }
        if let Some(padding) = self.padding {
            settings.padding = padding;
        }

        settings.validate()?;
        Ok(settings.to_render_options())
    }
}

/// Diagnostics printed by `--stats`
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub commands: usize,
    pub view_box: String,
    pub toolpath: ToolpathStats,
    pub skipped_lines: Vec<SkippedLine>,
}

/// Output of one render run
#[derive(Debug, Clone)]
pub struct Rendered {
    pub svg: String,
    pub report: RenderReport,
}

/// Parse and render program text
pub fn render_text(text: &str, options: &RenderOptions) -> Rendered {
    let program = parse(text);
    let viewport = fit_viewport(&program, options.padding);
    let toolpath = trace(&program);
    let svg = render_toolpath(&toolpath, &viewport, options);

    Rendered {
        svg,
        report: RenderReport {
            commands: program.len(),
            view_box: viewport.view_box(),
            toolpath: toolpath.stats,
            skipped_lines: program.skipped().to_vec(),
        },
    }
}

/// Read program text from a path, or stdin for `None`/`-`
pub fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| prgview_core::Error::other(format!("Failed to read {}: {}", path, e))),
    }
}

/// Write the document to a file, or stdout for `None`
pub fn write_output(svg: &str, out: Option<&Path>) -> Result<()> {
    match out {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => std::fs::write(path, svg)
            .map_err(|e| prgview_core::Error::other(format!("Failed to write {}: {}", path.display(), e)))?,
    }
    Ok(())
}

/// Execute a render request end to end
pub fn run(args: &Args) -> anyhow::Result<RenderReport> {
    let options = args.render_options()?;
    debug!("Render options: {:?}", options);

    let text = if args.demo {
        DEMO_PROGRAM.to_string()
    } else {
        read_input(args.input.as_deref())?
    };

    let Rendered { svg, report } = render_text(&text, &options);
    write_output(&svg, args.out.as_deref())?;

    info!(
        "Rendered {} commands into {} paths ({} printing, {} rapid), {} lines skipped",
        report.commands,
        report.toolpath.printing_paths + report.toolpath.rapid_paths,
        report.toolpath.printing_paths,
        report.toolpath.rapid_paths,
        report.skipped_lines.len()
    );

    if args.stats {
        let json = serde_json::to_string_pretty(&report)?;
        eprintln!("{json}");
    }
    Ok(report)
}
