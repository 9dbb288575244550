use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ocean_core::{AppConfig, SimulationContext};

fn config(population: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.cols = 120;
    config.world.rows = 90;
    config.world.seed = Some(42);
    config.world.initial_population = population;
    config
}

/// Benchmark a full world tick with a modest population.
fn bench_tick_small(c: &mut Criterion) {
    let mut ctx = match SimulationContext::new(config(20)) {
        Ok(ctx) => ctx,
        Err(e) => panic!("benchmark world failed to build: {e}"),
    };

    c.bench_function("tick_120x90_pop20", |b| {
        b.iter(|| {
            let events = ctx.tick();
            black_box(events)
        })
    });
}

/// Benchmark a full world tick near the development cap.
fn bench_tick_crowded(c: &mut Criterion) {
    let mut ctx = match SimulationContext::new(config(400)) {
        Ok(ctx) => ctx,
        Err(e) => panic!("benchmark world failed to build: {e}"),
    };

    c.bench_function("tick_120x90_pop400", |b| {
        b.iter(|| {
            let events = ctx.tick();
            black_box(events)
        })
    });
}

/// Benchmark world construction.
fn bench_world_build(c: &mut Criterion) {
    c.bench_function("world_build_120x90", |b| {
        b.iter(|| black_box(SimulationContext::new(config(20))))
    });
}

criterion_group!(benches, bench_tick_small, bench_tick_crowded, bench_world_build);
criterion_main!(benches);
