//! Property tests over arbitrary PRG-like input

use prgview_visualizer::{fit_viewport, parse, render, trace, RenderOptions};
use proptest::prelude::*;

fn motion_line() -> impl Strategy<Value = String> {
    let keyword = prop_oneof![
        Just("MSEG"),
        Just("line"),
        Just("arc2"),
        Just("ptp/ev"),
        Just("ENDS"),
    ];
    (keyword, -100.0f64..100.0, -100.0f64..100.0, -6.0f64..6.0)
        .prop_map(|(kw, x, y, third)| format!("{kw} (X,Y),{x:.3},{y:.3},{third:.3}"))
}

fn program_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => motion_line(),
        1 => Just("ShutterOpen".to_string()),
        1 => Just("ShutterClose".to_string()),
        1 => Just("wait 2".to_string()),
        1 => Just("! comment".to_string()),
        1 => "[ -~]{0,40}",
    ]
}

fn program_text() -> impl Strategy<Value = String> {
    prop::collection::vec(program_line(), 0..60).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn commands_and_flags_pair_up(text in program_text()) {
        let program = parse(&text);
        prop_assert_eq!(program.commands().len(), program.shutter_flags().len());
    }

    #[test]
    fn commented_lines_never_produce_commands(lines in prop::collection::vec(motion_line(), 0..30)) {
        let text: Vec<String> = lines.iter().map(|l| format!("!{l}")).collect();
        let program = parse(&text.join("\n"));
        prop_assert!(program.is_empty());
        prop_assert_eq!(program.skipped().len(), lines.len());
    }

    #[test]
    fn traced_paths_always_draw_something(text in program_text()) {
        let toolpath = trace(&parse(&text));
        for path in &toolpath.paths {
            prop_assert!(path.ops().len() > 1);
        }
        prop_assert_eq!(
            toolpath.stats.printing_paths + toolpath.stats.rapid_paths,
            toolpath.len()
        );
    }

    #[test]
    fn viewport_contains_every_point(text in program_text(), padding in 0.0f64..5.0) {
        let program = parse(&text);
        let bounds = fit_viewport(&program, padding).bounds();
        for point in program.points() {
            prop_assert!(bounds.contains(&point));
        }
    }

    #[test]
    fn rendering_is_stable_and_finite(text in program_text()) {
        let program = parse(&text);
        let options = RenderOptions::default();
        let svg = render(&program, &options);
        prop_assert!(!svg.contains("NaN"));
        prop_assert!(!svg.contains("inf"));
        prop_assert_eq!(svg, render(&program, &options));
    }
}
