/// Asserts that a cell with the given ID is no longer in the population.
#[macro_export]
macro_rules! assert_cell_dead {
    ($ctx:expr, $id:expr) => {
        let exists = $ctx.cells.iter().any(|c| c.id == $id);
        assert!(!exists, "Cell {} should be dead but was found alive", $id);
    };
}

/// Asserts that the population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($ctx:expr, $count:expr) => {
        assert_eq!($ctx.population(), $count, "Population count mismatch");
    };
}

/// Asserts that every cell pool is finite and non-negative.
#[macro_export]
macro_rules! assert_pools_sane {
    ($ctx:expr) => {
        for cell in &$ctx.cells {
            for (name, value) in [
                ("energy", cell.pools.energy),
                ("oxygen", cell.pools.oxygen),
                ("nitrogen", cell.pools.nitrogen),
                ("phosphorus", cell.pools.phosphorus),
            ] {
                assert!(
                    value.is_finite() && value >= 0.0,
                    "Cell {} has {} = {}",
                    cell.id,
                    name,
                    value
                );
            }
        }
    };
}
