mod common;

use common::{CellBuilder, ContextBuilder};
use ocean_core::config::ExecutionMode;
use ocean_core::reproduction::{meets_requirements, reproduce, ReproductionContext};
use ocean_data::{GovernorStatus, MetabolismPathway, OceanEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Every living cell with any reserves divides as soon as it may.
fn eager_division(config: &mut ocean_core::AppConfig) {
    config.reproduction.threshold = 0.0;
    config.reproduction.phosphorus_threshold = 0.0;
    config.reproduction.luca_nitrogen_threshold = 0.0;
    config.reproduction.chance = 1.0;
    config.reproduction.max_damage = 1e9;
}

#[test]
fn test_threshold_example_admits_and_halves() {
    let builder = ContextBuilder::new().with_config(|c| {
        c.reproduction.threshold = 0.75;
        c.reproduction.phosphorus_threshold = 0.6;
    });
    let config = builder.config().clone();
    let mut parent = CellBuilder::new()
        .with_pathway(MetabolismPathway::Fermentation)
        .with_max_resources(200.0)
        .with_pools(160.0, 160.0, 160.0, 130.0)
        .build(&config);
    assert!(meets_requirements(&parent, &config));

    let ctx = builder.build();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut repro = ReproductionContext {
        frame: 0,
        config: &config,
        strat: &ctx.strat,
        stability: 0.5,
        rng: &mut rng,
    };
    let (_, event) = reproduce(&mut parent, &mut repro);
    assert_eq!(parent.pools.energy, 80.0);
    assert_eq!(parent.pools.oxygen, 80.0);
    assert_eq!(parent.pools.nitrogen, 80.0);
    assert_eq!(parent.pools.phosphorus, 65.0);
    assert_eq!(event.frame(), 0);
}

#[test]
fn test_below_threshold_is_rejected() {
    let config = ContextBuilder::new()
        .with_config(|c| {
            c.reproduction.threshold = 0.75;
            c.reproduction.phosphorus_threshold = 0.6;
        })
        .config()
        .clone();
    let cell = CellBuilder::new()
        .with_pathway(MetabolismPathway::Fermentation)
        .with_max_resources(200.0)
        .with_pools(150.0, 160.0, 160.0, 130.0)
        .build(&config);
    assert!(!meets_requirements(&cell, &config));
}

#[test]
fn test_population_cap_blocks_division_until_next_check() {
    let mut ctx = ContextBuilder::new()
        .with_population(6)
        .with_config(|c| {
            eager_division(c);
            c.governor.dev_population_cap = 6;
        })
        .build();

    let events = ctx.tick().expect("tick");
    assert!(events.iter().any(|e| matches!(
        e,
        OceanEvent::GovernorChange {
            status: GovernorStatus::PopulationLimitReached,
            ..
        }
    )));
    for _ in 1..ctx.config.governor.fps_check_interval {
        let events = ctx.tick().expect("tick");
        assert!(!events
            .iter()
            .any(|e| matches!(e, OceanEvent::Reproduction { .. })));
    }
    assert!(ctx.population() <= 6);
}

#[test]
fn test_offspring_do_not_count_toward_same_tick_cap() {
    let mut ctx = ContextBuilder::new()
        .with_population(4)
        .with_config(|c| {
            eager_division(c);
            c.reproduction.cooldown = 0;
            c.governor.dev_population_cap = 5;
            c.governor.fps_check_interval = 1;
        })
        .build();

    let events = ctx.tick().expect("tick");
    let births = events
        .iter()
        .filter(|e| matches!(e, OceanEvent::Reproduction { .. }))
        .count();
    assert_eq!(births, 4, "every founder divides past the cap");
    assert_population!(ctx, 8);
    assert_eq!(ctx.governor.status(), GovernorStatus::Stable);

    let events = ctx.tick().expect("tick");
    assert!(events.iter().any(|e| matches!(
        e,
        OceanEvent::GovernorChange {
            status: GovernorStatus::PopulationLimitReached,
            ..
        }
    )));
    assert!(!events
        .iter()
        .any(|e| matches!(e, OceanEvent::Reproduction { .. })));
    assert_population!(ctx, 8);
}

#[test]
fn test_single_vent_divisions_are_phantom() {
    let mut ctx = ContextBuilder::new()
        .with_mode(ExecutionMode::SingleVent)
        .with_config(eager_division)
        .build();
    assert_population!(ctx, 1);
    for _ in 0..20 {
        let events = ctx.tick().expect("tick");
        for event in &events {
            if let OceanEvent::Reproduction { phantom, .. } = event {
                assert!(phantom);
            }
        }
        assert!(ctx.population() <= 1);
    }
}

#[test]
fn test_children_are_next_generation() {
    let mut ctx = ContextBuilder::new()
        .with_population(10)
        .with_config(eager_division)
        .build();
    for _ in 0..5 {
        for event in ctx.tick().expect("tick") {
            if let OceanEvent::Reproduction {
                parent_generation,
                child_dna,
                phantom,
                ..
            } = event
            {
                assert!(!phantom);
                assert_eq!(child_dna.generation, parent_generation + 1);
            }
        }
    }
    assert_pools_sane!(ctx);
}

#[test]
fn test_wrecked_cell_dies_and_is_reported() {
    let builder = ContextBuilder::new();
    let config = builder.config().clone();
    let mut doomed = CellBuilder::new().build(&config);
    doomed.structural_damage = 1e9;
    let id = doomed.id;
    let mut ctx = builder.build();
    ctx.add_cell(doomed);

    let events = ctx.tick().expect("tick");
    assert!(events
        .iter()
        .any(|e| matches!(e, OceanEvent::Death { id: dead, .. } if *dead == id)));
    assert_cell_dead!(ctx, id);
}

#[test]
fn test_injected_cells_join_population() {
    let ctx = ContextBuilder::new()
        .with_cell(CellBuilder::new().with_seed(1))
        .with_cell(CellBuilder::new().with_seed(2).at(120.0, 100.0))
        .build();
    assert_population!(ctx, 2);
    assert_ne!(ctx.cells[0].id, ctx.cells[1].id);
}
