//! Toolpath tracing
//!
//! Walks a parsed program once, keeping a cursor and at most one open path,
//! and produces finalized path records tagged printing or rapid.

use prgview_core::constants::ARC_DEGENERATE_EPSILON;
use prgview_core::Point;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::prg::{Command, CommandType, Program};

/// Arc drawing parameters in SVG terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcTo {
    pub radius: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// One drawing operation in a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    ArcTo(ArcTo),
}

impl PathOp {
    /// The point this operation ends at
    pub fn end_point(&self) -> Point {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => *p,
            Self::ArcTo(arc) => arc.to,
        }
    }
}

/// A finalized drawable path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRecord {
    ops: Vec<PathOp>,
    printing: bool,
}

impl PathRecord {
    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    /// True if drawn with the shutter open
    pub fn is_printing(&self) -> bool {
        self.printing
    }

    /// End point of every operation, starting with the initial move-to
    pub fn points(&self) -> Vec<Point> {
        self.ops.iter().map(PathOp::end_point).collect()
    }
}

/// Counters collected during a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToolpathStats {
    pub printing_paths: usize,
    pub rapid_paths: usize,
    /// Paths closed before drawing anything
    pub discarded_paths: usize,
    /// Implicit paths dropped unfinalized because a later draw command
    /// outside a segment started over at the cursor
    pub replaced_paths: usize,
    pub arcs: usize,
    /// Arcs drawn as straight chords because the radius was undefined
    pub degenerate_arcs: usize,
    /// Arcs dropped because no usable angle was given
    pub skipped_arcs: usize,
}

/// Result of tracing a program
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Toolpath {
    pub paths: Vec<PathRecord>,
    pub stats: ToolpathStats,
}

impl Toolpath {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn printing_paths(&self) -> impl Iterator<Item = &PathRecord> + '_ {
        self.paths.iter().filter(|p| p.printing)
    }

    pub fn rapid_paths(&self) -> impl Iterator<Item = &PathRecord> + '_ {
        self.paths.iter().filter(|p| !p.printing)
    }
}

/// Path currently being built
#[derive(Debug, Clone, PartialEq)]
enum PathState {
    Idle,
    Active {
        ops: Vec<PathOp>,
        /// Opened by `MSEG` rather than implicitly by a draw command
        explicit: bool,
    },
}

struct Tracer {
    cursor: Point,
    state: PathState,
    toolpath: Toolpath,
}

impl Tracer {
    fn new() -> Self {
        Self {
            cursor: Point::origin(),
            state: PathState::Idle,
            toolpath: Toolpath::default(),
        }
    }

    fn step(&mut self, idx: usize, command: &Command, shutter_open: bool) {
        trace!("Cmd[{}]: {} shutter={}", idx, command, shutter_open);

        match command.kind {
            CommandType::Mseg => {
                // An interrupted path is never tagged printing
                self.finalize(false);
                if let Some(point) = command.point {
                    self.state = PathState::Active {
                        ops: vec![PathOp::MoveTo(point)],
                        explicit: true,
                    };
                    self.cursor = point;
                }
            }
            CommandType::Ends => {
                self.finalize(shutter_open);
            }
            CommandType::Line => {
                if let Some(point) = command.point {
                    self.draw(PathOp::LineTo(point));
                    self.cursor = point;
                }
            }
            CommandType::Arc2 => {
                if let Some(point) = command.point {
                    self.arc(idx, point, command.angle);
                }
            }
            CommandType::Ptp => {
                self.finalize(shutter_open);
                if let Some(point) = command.point {
                    self.cursor = point;
                }
            }
        }
    }

    fn arc(&mut self, idx: usize, to: Point, angle: Option<f64>) {
        let Some(angle) = angle.filter(|a| a.is_finite()) else {
            warn!(
                "Arc[{}]: no usable angle, skipping arc to {} and holding cursor at {}",
                idx, to, self.cursor
            );
            self.toolpath.stats.skipped_arcs += 1;
            return;
        };

        self.toolpath.stats.arcs += 1;
        let from = self.cursor;
        let op = match arc_parameters(from, to, angle) {
            Some(arc) => {
                trace!("Arc[{}]: radius={:.4}", idx, arc.radius);
                PathOp::ArcTo(arc)
            }
            None => {
                trace!(
                    "Arc[{}]: undefined radius for angle={}, treating as line segment",
                    idx,
                    angle
                );
                self.toolpath.stats.degenerate_arcs += 1;
                PathOp::LineTo(to)
            }
        };
        self.draw(op);
        self.cursor = to;
    }

    /// Append a draw operation
    ///
    /// Inside an `MSEG` segment the op extends the segment. Outside one, every
    /// draw command starts a fresh implicit path at the cursor, dropping any
    /// implicit path that was still open.
    fn draw(&mut self, op: PathOp) {
        match &mut self.state {
            PathState::Active {
                ops,
                explicit: true,
            } => ops.push(op),
            state => {
                if let PathState::Active { ops, .. } = &*state {
                    trace!("Dropping open implicit path with {} ops", ops.len());
                    self.toolpath.stats.replaced_paths += 1;
                }
                *state = PathState::Active {
                    ops: vec![PathOp::MoveTo(self.cursor), op],
                    explicit: false,
                };
            }
        }
    }

    /// Close the open path, keeping it only if it draws something
    fn finalize(&mut self, printing: bool) {
        let PathState::Active { ops, explicit } =
            std::mem::replace(&mut self.state, PathState::Idle)
        else {
            return;
        };

        if ops.len() > 1 {
            trace!(
                "Finalize {} path with {} ops as {}",
                if explicit { "explicit" } else { "implicit" },
                ops.len(),
                if printing { "printing" } else { "rapid" }
            );
            if printing {
                self.toolpath.stats.printing_paths += 1;
            } else {
                self.toolpath.stats.rapid_paths += 1;
            }
            self.toolpath.paths.push(PathRecord { ops, printing });
        } else {
            self.toolpath.stats.discarded_paths += 1;
        }
    }
}

/// SVG arc parameters for an arc from `from` to `to` sweeping `angle` radians
///
/// Returns `None` when the radius is undefined: the half-angle sine vanishes
/// (angle near 0 or a full turn) or the computed radius is not finite.
pub fn arc_parameters(from: Point, to: Point, angle: f64) -> Option<ArcTo> {
    let chord = from.distance_to(&to);
    let half_sin = (angle.abs() / 2.0).sin();
    if half_sin.abs() < ARC_DEGENERATE_EPSILON {
        return None;
    }

    let radius = chord / (2.0 * half_sin);
    if !radius.is_finite() {
        return None;
    }

    Some(ArcTo {
        radius,
        large_arc: angle.abs() > std::f64::consts::PI,
        sweep: angle >= 0.0,
        to,
    })
}

/// Trace a program into finalized printing/rapid paths
///
/// # Panics
///
/// Panics if the program's command and shutter flag sequences differ in
/// length, which cannot happen for programs built by the parser.
pub fn trace(program: &Program) -> Toolpath {
    assert_eq!(
        program.commands().len(),
        program.shutter_flags().len(),
        "program commands and shutter flags must pair up"
    );

    let mut tracer = Tracer::new();
    for (idx, (command, shutter_open)) in program.iter().enumerate() {
        tracer.step(idx, command, shutter_open);
    }
    // A path still open at the end is rapid by convention
    tracer.finalize(false);

    let toolpath = tracer.toolpath;
    debug!(
        "Trace complete: {} printing, {} rapid, {} discarded, {} replaced, {} arcs ({} degenerate, {} skipped)",
        toolpath.stats.printing_paths,
        toolpath.stats.rapid_paths,
        toolpath.stats.discarded_paths,
        toolpath.stats.replaced_paths,
        toolpath.stats.arcs,
        toolpath.stats.degenerate_arcs,
        toolpath.stats.skipped_arcs
    );
    toolpath
}
