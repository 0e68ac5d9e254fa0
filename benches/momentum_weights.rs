use criterion::{criterion_group, criterion_main, Criterion};

use themis::input::panel::Panel;
use themis::runner::WalkForward;
use themis::source::random::random_panel;
use themis::strategy::momentum::MomentumNeutral;
use themis::strategy::WeightStrategy;

fn universe() -> Panel {
    let symbols: Vec<String> = (0..50).map(|i| format!("S{i:02}")).collect();
    let symbols_ref: Vec<&str> = symbols.iter().map(|s| s.as_str()).collect();
    random_panel(750, &symbols_ref, 42).unwrap()
}

fn benchmarks(c: &mut Criterion) {
    let panel = universe();
    let strat = MomentumNeutral::default();

    c.bench_function("momentum single date", |b| {
        let view = panel.latest().unwrap();
        b.iter(|| strat.weights(&view))
    });

    let runner = WalkForward::new(MomentumNeutral::default());
    c.bench_function("momentum walk forward", |b| b.iter(|| runner.run(&panel)));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
