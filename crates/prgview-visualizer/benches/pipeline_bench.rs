use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use prgview_visualizer::{fit_viewport, parse, render, trace, RenderOptions, DEMO_PROGRAM};

/// Grid of small squares joined by rapid moves, with an arc on every fourth cell
fn synthetic_program(cells: usize) -> String {
    let mut text = String::from("#0\n! generated\n");
    for i in 0..cells {
        let x = (i % 100) as f64 * 2.0;
        let y = (i / 100) as f64 * 2.0;
        text.push_str(&format!("ptp/ev (X,Y),{x},{y},gDblRapidSpeed\n"));
        text.push_str("Start gIntSubBuffer,ShutterOpen;TILL PST(gIntSubBuffer).#RUN = 0\n");
        text.push_str(&format!("MSEG (X,Y),{x},{y}\n"));
        text.push_str(&format!("line (X,Y),{x},{}\n", y + 1.0));
        text.push_str(&format!("line (X,Y),{},{}\n", x + 1.0, y + 1.0));
        if i % 4 == 0 {
            text.push_str(&format!("arc2 (X,Y),{},{y},-1.5707963\n", x + 1.0));
        } else {
            text.push_str(&format!("line (X,Y),{},{y}\n", x + 1.0));
        }
        text.push_str("ENDS (X,Y)\n");
        text.push_str("Start gIntSubBuffer,ShutterClose;TILL PST(gIntSubBuffer).#RUN = 0\n");
    }
    text.push_str("STOP\n");
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.bench_function("demo", |b| b.iter(|| parse(DEMO_PROGRAM)));
    for cells in [100, 10_000] {
        let text = synthetic_program(cells);
        group.bench_with_input(BenchmarkId::from_parameter(cells), &text, |b, text| {
            b.iter(|| parse(text))
        });
    }
    group.finish();
}

fn bench_trace_and_fit(c: &mut Criterion) {
    let program = parse(&synthetic_program(10_000));
    c.bench_function("trace_10000", |b| b.iter(|| trace(&program)));
    c.bench_function("fit_viewport_10000", |b| {
        b.iter(|| fit_viewport(&program, 1.0))
    });
}

fn bench_render(c: &mut Criterion) {
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("render");
    for cells in [100, 10_000] {
        let program = parse(&synthetic_program(cells));
        group.bench_with_input(BenchmarkId::from_parameter(cells), &program, |b, program| {
            b.iter(|| render(program, &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_trace_and_fit, bench_render);
criterion_main!(benches);
