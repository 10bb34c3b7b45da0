//! PRG parser
//!
//! Best-effort: every line either contributes a command, toggles the shutter,
//! or is dropped. Dropped non-blank lines are kept as diagnostics on the
//! returned [`Program`]; parsing itself never fails.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use super::{Command, CommandType, Program, SkipReason};
use prgview_core::Point;

/// Comment marker
const COMMENT_MARKER: char = '!';
/// Program header marker (`#0`, `#1`, ...)
const HEADER_MARKER: char = '#';

/// First-word keywords that are recognized only to be ignored
const CONTROL_KEYWORDS: [&str; 5] = ["IF", "END", "STOP", "TILL", "WAIT"];

const SHUTTER_OPEN_MARKER: &str = "SHUTTEROPEN";
const SHUTTER_CLOSE_MARKER: &str = "SHUTTERCLOSE";

/// What a single trimmed line means to the parser
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    Skip(SkipReason),
    Shutter(bool),
    Motion(CommandType),
}

/// Parameters read from the `(X,Y),x,y[,third]` template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub point: Option<Point>,
    /// Third numeric parameter, if it is a number
    pub third: Option<f64>,
}

/// PRG parser handle
///
/// Holds no state between calls; each [`PrgParser::parse`] is independent and
/// the handle may be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrgParser;

impl PrgParser {
    /// Create a new PRG parser
    pub fn new() -> Self {
        Self
    }

    /// Parse program text into commands and shutter flags
    pub fn parse(&self, text: &str) -> Program {
        parse(text)
    }
}

/// Accumulator threaded through the line fold
#[derive(Debug, Default)]
struct ParseState {
    shutter_open: bool,
    program: Program,
}

impl ParseState {
    fn consume(mut self, line_number: usize, raw: &str) -> Self {
        let line = raw.trim();
        match classify_line(line) {
            LineKind::Blank => {}
            LineKind::Skip(reason) => {
                trace!("Line {}: skipped ({})", line_number, reason);
                self.program.record_skip(line_number, reason);
            }
            LineKind::Shutter(open) => {
                trace!("Line {}: shutter {}", line_number, if open { "open" } else { "closed" });
                self.shutter_open = open;
            }
            LineKind::Motion(kind) => match build_command(kind, line) {
                Some(command) => {
                    trace!("Line {}: {}", line_number, command);
                    self.program
                        .push(command.at_line(line_number), self.shutter_open);
                }
                None => {
                    trace!("Line {}: {} without point, dropped", line_number, kind);
                    self.program
                        .record_skip(line_number, SkipReason::MissingPoint(kind));
                }
            },
        }
        self
    }
}

/// Parse program text into commands and shutter flags
///
/// The shutter starts closed. Every command captures the shutter state in
/// effect at the moment it is recognized.
pub fn parse(text: &str) -> Program {
    debug!("Starting PRG parse, input size: {} bytes", text.len());

    let state = text
        .lines()
        .enumerate()
        .fold(ParseState::default(), |state, (idx, raw)| {
            state.consume(idx + 1, raw)
        });
    let program = state.program;

    debug!(
        "Parse complete: MSEG={}, ENDS={}, LINE={}, ARC2={}, PTP={}, skipped lines={}",
        program.count(CommandType::Mseg),
        program.count(CommandType::Ends),
        program.count(CommandType::Line),
        program.count(CommandType::Arc2),
        program.count(CommandType::Ptp),
        program.skipped().len()
    );
    program
}

/// Classify one trimmed line
pub fn classify_line(line: &str) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(COMMENT_MARKER) {
        return LineKind::Skip(SkipReason::Comment);
    }
    if line.starts_with(HEADER_MARKER) {
        return LineKind::Skip(SkipReason::Header);
    }

    let upper = line.to_uppercase();

    let word = leading_word(&upper);
    if let Some(keyword) = CONTROL_KEYWORDS.iter().find(|kw| **kw == word) {
        return LineKind::Skip(SkipReason::Control((*keyword).to_string()));
    }

    // Shutter toggles win over any motion keyword on the same line
    if upper.contains(SHUTTER_OPEN_MARKER) {
        return LineKind::Shutter(true);
    }
    if upper.contains(SHUTTER_CLOSE_MARKER) {
        return LineKind::Shutter(false);
    }

    CommandType::MATCH_ORDER
        .iter()
        .find(|kind| upper.starts_with(kind.keyword()))
        .map(|kind| LineKind::Motion(*kind))
        .unwrap_or(LineKind::Skip(SkipReason::Unrecognized))
}

/// Leading run of identifier characters, so `END` does not match `ENDS`
fn leading_word(upper: &str) -> &str {
    let end = upper
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(upper.len());
    &upper[..end]
}

/// Read the `(X,Y),x,y[,third]` parameter template from a motion line
pub fn extract_params(line: &str) -> MotionParams {
    static POINT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = POINT_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)\(X,Y\),\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*,\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))(?:\s*,\s*([^,;\s]+))?",
        )
        .expect("invalid regex pattern")
    });

    let Some(caps) = regex.captures(line) else {
        return MotionParams {
            point: None,
            third: None,
        };
    };

    let number = |idx: usize| {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };

    let point = match (number(1), number(2)) {
        (Some(x), Some(y)) => Some(Point::new(x, y)),
        _ => None,
    };

    MotionParams {
        point,
        third: point.and(number(3)),
    }
}

fn build_command(kind: CommandType, line: &str) -> Option<Command> {
    let params = extract_params(line);
    let Some(point) = params.point else {
        return (!kind.requires_point()).then(Command::ends);
    };

    match kind {
        CommandType::Arc2 => Some(Command::arc2(point, params.third)),
        CommandType::Ends => Some(Command::new(kind, point)),
        _ => {
            let mut command = Command::new(kind, point);
            command.speed = params.third;
            Some(command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(
            classify_line("! line (X,Y),1,1"),
            LineKind::Skip(SkipReason::Comment)
        );
        assert_eq!(classify_line("#0"), LineKind::Skip(SkipReason::Header));
    }

    #[test]
    fn test_classify_control_keywords() {
        assert_eq!(
            classify_line("wait 2"),
            LineKind::Skip(SkipReason::Control("WAIT".to_string()))
        );
        assert_eq!(
            classify_line("STOP"),
            LineKind::Skip(SkipReason::Control("STOP".to_string()))
        );
        assert_eq!(
            classify_line("till (^X_AST.#MOVE) & (^Y_AST.#MOVE)"),
            LineKind::Skip(SkipReason::Control("TILL".to_string()))
        );
        assert_eq!(
            classify_line("End"),
            LineKind::Skip(SkipReason::Control("END".to_string()))
        );
    }

    #[test]
    fn test_ends_is_not_swallowed_by_end() {
        assert_eq!(
            classify_line("ENDS (X,Y)"),
            LineKind::Motion(CommandType::Ends)
        );
    }

    #[test]
    fn test_shutter_wins_over_motion_keyword() {
        assert_eq!(
            classify_line("line (X,Y),1,1 ShutterOpen"),
            LineKind::Shutter(true)
        );
        assert_eq!(
            classify_line("Start gIntSubBuffer,ShutterClose;TILL PST(gIntSubBuffer).#RUN = 0"),
            LineKind::Shutter(false)
        );
    }

    #[test]
    fn test_motion_prefixes() {
        assert_eq!(
            classify_line("ptp/ev (X,Y),1,1,gDblRapidSpeed"),
            LineKind::Motion(CommandType::Ptp)
        );
        assert_eq!(
            classify_line("arc2 (X,Y),1,1,3.14"),
            LineKind::Motion(CommandType::Arc2)
        );
        assert_eq!(
            classify_line("call subroutine"),
            LineKind::Skip(SkipReason::Unrecognized)
        );
    }

    #[test]
    fn test_extract_params() {
        let params = extract_params("line (X,Y), -1.5 , +2.25");
        assert_eq!(params.point, Some(Point::new(-1.5, 2.25)));
        assert_eq!(params.third, None);

        let params = extract_params("ARC2 (x,y),.5,3.,-1.5708");
        assert_eq!(params.point, Some(Point::new(0.5, 3.0)));
        assert_eq!(params.third, Some(-1.5708));

        let params = extract_params("ptp/ev (X,Y),1.0,1.0,gDblRapidSpeed");
        assert_eq!(params.point, Some(Point::new(1.0, 1.0)));
        assert_eq!(params.third, None);

        assert_eq!(extract_params("ENDS (X,Y)").point, None);
    }

    #[test]
    fn test_arc_without_angle_is_kept() {
        let program = parse("arc2 (X,Y),4,0");
        assert_eq!(program.len(), 1);
        assert_eq!(program.commands()[0].angle, None);
    }

    #[test]
    fn test_ptp_speed_is_captured() {
        let program = parse("ptp (X,Y),1,2,50");
        assert_eq!(program.commands()[0].speed, Some(50.0));
        assert_eq!(program.commands()[0].angle, None);
    }

    #[test]
    fn test_missing_point_is_reported() {
        let program = parse("line 5,5\nMSEG\nENDS");
        assert_eq!(program.len(), 1);
        assert_eq!(program.commands()[0].kind, CommandType::Ends);
        let reasons: Vec<_> = program.skipped().iter().map(|s| s.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::MissingPoint(CommandType::Line),
                SkipReason::MissingPoint(CommandType::Mseg),
            ]
        );
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let program = parse("\n! comment\nline (X,Y),1,1");
        assert_eq!(program.commands()[0].line_number, 3);
        assert_eq!(program.skipped()[0].line_number, 2);
    }
}
