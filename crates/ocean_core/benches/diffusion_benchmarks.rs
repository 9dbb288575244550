use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ocean_core::config::{AppConfig, DiffusionConfig};
use ocean_core::diffusion::{relax, DiffusionSystem};
use ocean_core::grid::{Grid, GridSystem};
use ocean_core::stratification::Stratification;

fn world(cols: usize, rows: usize) -> (GridSystem, Stratification) {
    let mut config = AppConfig::default();
    config.world.cols = cols;
    config.world.rows = rows;
    (
        GridSystem::generate(cols, rows, 42),
        Stratification::new(&config),
    )
}

/// Benchmark one relaxation pass over a single channel.
fn bench_relax_single_grid(c: &mut Criterion) {
    let mut grid = Grid::from_fn(200, 150, |col, row| ((col * 31 + row * 17) % 100) as f64);

    c.bench_function("relax_200x150", |b| {
        b.iter(|| {
            relax(black_box(&mut grid), 0.001, |_| 0.1);
        })
    });
}

/// Benchmark the full diffusion system at default settings.
fn bench_diffusion_system(c: &mut Criterion) {
    let (mut grids, strat) = world(200, 150);
    let config = DiffusionConfig::default();

    c.bench_function("diffusion_system_200x150", |b| {
        b.iter(|| {
            DiffusionSystem::update(black_box(&mut grids), &strat, &config);
        })
    });
}

criterion_group!(benches, bench_relax_single_grid, bench_diffusion_system);
criterion_main!(benches);
