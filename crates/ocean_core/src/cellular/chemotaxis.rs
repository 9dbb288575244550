use crate::grid::GridSystem;
use ocean_data::{GridChannel, MetabolismPathway};

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Pathways that steer up the H₂ gradient.
#[must_use]
pub fn follows_h2(pathway: MetabolismPathway) -> bool {
    matches!(
        pathway,
        MetabolismPathway::Luca | MetabolismPathway::Chemosynthesis
    )
}

/// Unit direction toward the richest H₂ neighbour scaled by `strength`.
///
/// Returns zero when no neighbour beats the current cell by more than
/// `sensitivity`.
#[must_use]
pub fn h2_steering(
    grids: &GridSystem,
    col: usize,
    row: usize,
    strength: f64,
    sensitivity: f64,
) -> (f64, f64) {
    let here = grids.get_cell(GridChannel::H2, col, row);
    let mut best = here + sensitivity;
    let mut direction = None;

    for (dc, dr) in NEIGHBOURS {
        let c = col as i64 + dc;
        let r = row as i64 + dr;
        if c < 0 || r < 0 || c as usize >= grids.cols || r as usize >= grids.rows {
            continue;
        }
        let value = grids.get_cell(GridChannel::H2, c as usize, r as usize);
        if value > best {
            best = value;
            direction = Some((dc as f64, dr as f64));
        }
    }

    match direction {
        Some((dx, dy)) => {
            let norm = (dx * dx + dy * dy).sqrt();
            (dx / norm * strength, dy / norm * strength)
        }
        None => (0.0, 0.0),
    }
}
