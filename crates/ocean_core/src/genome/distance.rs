use ocean_data::Genome;

const TRAIT_COUNT: f64 = 7.0;

/// Normalised trait divergence between two genomes, in `[0, 100]`.
///
/// Each of the seven compared traits contributes at most 1 before averaging.
#[must_use]
pub fn genetic_distance(a: &Genome, b: &Genome) -> f64 {
    let color: f64 = a
        .color
        .iter()
        .zip(b.color.iter())
        .map(|(x, y)| (x - y).abs() / 255.0)
        .sum::<f64>()
        / 3.0;

    let total = (a.metabolic_efficiency - b.metabolic_efficiency).abs() / 2.0
        + (a.storage_capacity - b.storage_capacity).abs() / 300.0
        + (a.mutation_rate - b.mutation_rate).abs() / 0.3
        + (a.size - b.size).abs() / 40.0
        + (a.flagella_level - b.flagella_level).abs() / 6.0
        + if a.metabolism_type == b.metabolism_type { 0.0 } else { 1.0 }
        + color;

    total / TRAIT_COUNT * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::genome::DnaFactory;
    use ocean_data::MetabolismPathway;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn founder() -> Genome {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        DnaFactory::create_founder(&AppConfig::default(), &mut rng)
    }

    #[test]
    fn test_identical_genomes_have_zero_distance() {
        let g = founder();
        assert_eq!(genetic_distance(&g, &g), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = founder();
        let mut b = a.clone();
        b.size += 8.0;
        b.color[1] = 0.0;
        assert!((genetic_distance(&a, &b) - genetic_distance(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn test_metabolism_switch_counts_one_trait() {
        let a = founder();
        let mut b = a.clone();
        b.metabolism_type = MetabolismPathway::Fermentation;
        assert!((genetic_distance(&a, &b) - 100.0 / 7.0).abs() < 1e-9);
    }
}
