//! PRG command types and the parsed program container

use prgview_core::{Point, PrgError};
use serde::{Deserialize, Serialize};

/// Motion command keyword
///
/// The closed set of motion commands the renderer understands. Lines with any
/// other keyword never produce a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    /// Point-to-point rapid move
    Ptp,
    /// Linear draw
    Line,
    /// Circular arc draw defined by end point and included angle
    Arc2,
    /// Begin an explicit motion segment
    Mseg,
    /// End an explicit motion segment
    Ends,
}

impl CommandType {
    /// Keywords in the order they are attempted against a line
    pub const MATCH_ORDER: [CommandType; 5] = [
        CommandType::Mseg,
        CommandType::Ends,
        CommandType::Line,
        CommandType::Arc2,
        CommandType::Ptp,
    ];

    /// Upper-case program keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Ptp => "PTP",
            Self::Line => "LINE",
            Self::Arc2 => "ARC2",
            Self::Mseg => "MSEG",
            Self::Ends => "ENDS",
        }
    }

    /// Whether a command of this type is dropped when it has no `(X,Y)` point
    pub fn requires_point(&self) -> bool {
        !matches!(self, Self::Ends)
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A recognized motion command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Command keyword
    pub kind: CommandType,
    /// Target point; absent only for an `ENDS` without coordinates
    pub point: Option<Point>,
    /// Signed included angle in radians (`ARC2` only)
    pub angle: Option<f64>,
    /// Numeric speed parameter, if present (never used geometrically)
    pub speed: Option<f64>,
    /// 1-based line number in the source text
    pub line_number: usize,
}

impl Command {
    /// Create a command with a target point
    pub fn new(kind: CommandType, point: Point) -> Self {
        Self {
            kind,
            point: Some(point),
            angle: None,
            speed: None,
            line_number: 0,
        }
    }

    /// Create an `ENDS` command without coordinates
    pub fn ends() -> Self {
        Self {
            kind: CommandType::Ends,
            point: None,
            angle: None,
            speed: None,
            line_number: 0,
        }
    }

    /// Create an `ARC2` command
    pub fn arc2(point: Point, angle: Option<f64>) -> Self {
        Self {
            angle,
            ..Self::new(CommandType::Arc2, point)
        }
    }

    /// Set the source line number
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(point) = self.point {
            write!(f, " {}", point)?;
        }
        if let Some(angle) = self.angle {
            write!(f, " angle={}", angle)?;
        }
        Ok(())
    }
}

/// Why a non-blank line produced no command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Line starts with the `!` comment marker
    Comment,
    /// Line starts with the `#` program header marker
    Header,
    /// Control-flow or timing keyword (`IF`, `END`, `STOP`, `TILL`, `WAIT`)
    Control(String),
    /// Motion keyword recognized but the `(X,Y)` point could not be read
    MissingPoint(CommandType),
    /// No known keyword
    Unrecognized,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Comment => write!(f, "comment"),
            Self::Header => write!(f, "program header"),
            Self::Control(keyword) => write!(f, "control keyword {}", keyword),
            Self::MissingPoint(kind) => write!(f, "{} without (X,Y) point", kind),
            Self::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Diagnostic record for a dropped line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    /// Why the line was dropped
    pub reason: SkipReason,
}

/// Parsed PRG program
///
/// Commands are paired index-for-index with the shutter state in effect when
/// each command was recognized. The two sequences always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProgramParts")]
pub struct Program {
    commands: Vec<Command>,
    shutter_flags: Vec<bool>,
    skipped: Vec<SkippedLine>,
}

/// Serialized form of a [`Program`], checked on the way in
#[derive(Deserialize)]
struct ProgramParts {
    commands: Vec<Command>,
    shutter_flags: Vec<bool>,
    #[serde(default)]
    skipped: Vec<SkippedLine>,
}

impl TryFrom<ProgramParts> for Program {
    type Error = PrgError;

    fn try_from(parts: ProgramParts) -> Result<Self, Self::Error> {
        let mut program = Program::from_parts(parts.commands, parts.shutter_flags)?;
        program.skipped = parts.skipped;
        Ok(program)
    }
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a program from parallel command and shutter flag sequences
    pub fn from_parts(commands: Vec<Command>, shutter_flags: Vec<bool>) -> Result<Self, PrgError> {
        if commands.len() != shutter_flags.len() {
            return Err(PrgError::LengthMismatch {
                commands: commands.len(),
                flags: shutter_flags.len(),
            });
        }
        Ok(Self {
            commands,
            shutter_flags,
            skipped: Vec::new(),
        })
    }

    /// Append a command with the shutter state it was recognized under
    pub fn push(&mut self, command: Command, shutter_open: bool) {
        self.commands.push(command);
        self.shutter_flags.push(shutter_open);
    }

    pub(crate) fn record_skip(&mut self, line_number: usize, reason: SkipReason) {
        self.skipped.push(SkippedLine {
            line_number,
            reason,
        });
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn shutter_flags(&self) -> &[bool] {
        &self.shutter_flags
    }

    /// Lines that were dropped during parsing
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over `(command, shutter_open)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Command, bool)> + '_ {
        self.commands
            .iter()
            .zip(self.shutter_flags.iter().copied())
    }

    /// Every point referenced by any command
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|cmd| cmd.point)
    }

    /// Number of commands of the given type
    pub fn count(&self, kind: CommandType) -> usize {
        self.commands.iter().filter(|cmd| cmd.kind == kind).count()
    }
}
