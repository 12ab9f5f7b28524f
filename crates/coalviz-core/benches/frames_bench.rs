use coalviz_core::{build_chart, Observation, SceneOptions, Selection, SourceTable, TrajectoryFrames};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_rows(countries: usize, years: i32) -> Vec<Observation> {
    let mut v = Vec::with_capacity(countries * years as usize);
    for c in 0..countries {
        let name = format!("Country {c:03}");
        for (i, year) in (1960..1960 + years).enumerate() {
            // slow drift in both metrics
            let x = 20.0 + (i as f64 * 0.05 + c as f64).sin() * 15.0;
            let y = 500.0 + i as f64 * 40.0 + c as f64 * 10.0;
            v.push(Observation::new(name.clone(), year, x, y));
        }
    }
    v
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory_frames");
    for &countries in &[5usize, 50usize, 200usize] {
        let source = SourceTable::new(gen_rows(countries, 60)).expect("rows");
        let table = source.filter(&Selection::all());
        group.bench_with_input(BenchmarkId::from_parameter(format!("c{countries}_y60")), &table, |b, t| {
            b.iter(|| {
                let frames = TrajectoryFrames::new(t).expect("frames");
                let n: usize = frames.map(|f| black_box(f.entries.len())).sum();
                black_box(n)
            });
        });
    }
    group.finish();
}

fn bench_build_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chart");
    let opts = SceneOptions::default();
    for &countries in &[5usize, 50usize] {
        let source = SourceTable::new(gen_rows(countries, 60)).expect("rows");
        group.bench_with_input(BenchmarkId::from_parameter(format!("c{countries}_y60")), &source, |b, s| {
            b.iter(|| {
                let build = build_chart(s, &Selection::all(), &opts).expect("build");
                black_box(build.scene.frames.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frames, bench_build_chart);
criterion_main!(benches);
