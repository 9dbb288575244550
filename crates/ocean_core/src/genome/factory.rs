use crate::config::{AppConfig, VariabilityLevel};
use ocean_data::{
    EvolutionaryEra, Genome, MetabolismPathway, OrganelleFlags, PathwayTrait, Substrate,
};
use rand::Rng;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Trait ranges for one variability level.
struct FounderRanges {
    mutation_rate: RangeInclusive<f64>,
    metabolic_efficiency: RangeInclusive<f64>,
    storage_capacity: RangeInclusive<f64>,
    size: RangeInclusive<f64>,
}

fn founder_ranges(level: VariabilityLevel) -> FounderRanges {
    match level {
        VariabilityLevel::None => FounderRanges {
            mutation_rate: 0.2..=0.2,
            metabolic_efficiency: 1.0..=1.0,
            storage_capacity: 130.0..=130.0,
            size: 11.5..=11.5,
        },
        VariabilityLevel::Medium => FounderRanges {
            mutation_rate: 0.15..=0.25,
            metabolic_efficiency: 0.9..=1.1,
            storage_capacity: 120.0..=140.0,
            size: 10.0..=13.0,
        },
        VariabilityLevel::High => FounderRanges {
            mutation_rate: 0.1..=0.3,
            metabolic_efficiency: 0.7..=1.3,
            storage_capacity: 100.0..=150.0,
            size: 8.0..=15.0,
        },
    }
}

fn founder_color<R: Rng>(level: VariabilityLevel, rng: &mut R) -> [f64; 3] {
    match level {
        VariabilityLevel::None => [200.0, 200.0, 220.0],
        VariabilityLevel::Medium | VariabilityLevel::High => [
            rng.gen_range(100.0..=140.0),
            rng.gen_range(100.0..=140.0),
            rng.gen_range(120.0..=160.0),
        ],
    }
}

fn dormant(substrates: Vec<(Substrate, f64)>, energy_yield: f64) -> PathwayTrait {
    PathwayTrait {
        enabled: false,
        efficiency: 0.0,
        substrates,
        energy_yield,
        requires_o2: false,
        requires_light: false,
        min_light_level: None,
        produces_o2: None,
        geochemical_bonus: false,
    }
}

/// Creates founder genomes.
pub struct DnaFactory;

impl DnaFactory {
    /// Pathway table every founder starts with: luca enabled, the rest latent.
    pub fn founder_metabolisms<R: Rng>(rng: &mut R) -> BTreeMap<MetabolismPathway, PathwayTrait> {
        let mut map = BTreeMap::new();
        map.insert(
            MetabolismPathway::Luca,
            PathwayTrait {
                enabled: true,
                efficiency: rng.gen_range(0.7..=0.9),
                geochemical_bonus: true,
                ..dormant(vec![(Substrate::H2, 0.4), (Substrate::Co2, 0.2)], 1.5)
            },
        );
        map.insert(
            MetabolismPathway::Fermentation,
            dormant(vec![(Substrate::StoredEnergy, 1.0)], 2.0),
        );
        map.insert(
            MetabolismPathway::AnoxigenicPhotosynthesis,
            PathwayTrait {
                requires_light: true,
                min_light_level: Some(30.0),
                ..dormant(
                    vec![
                        (Substrate::H2, 0.3),
                        (Substrate::Co2, 0.2),
                        (Substrate::Light, 50.0),
                    ],
                    6.0,
                )
            },
        );
        map.insert(
            MetabolismPathway::OxigenicPhotosynthesis,
            PathwayTrait {
                requires_light: true,
                min_light_level: Some(50.0),
                produces_o2: Some(0.6),
                ..dormant(vec![(Substrate::Co2, 0.6), (Substrate::Light, 80.0)], 12.0)
            },
        );
        map.insert(
            MetabolismPathway::AerobicRespiration,
            PathwayTrait {
                requires_o2: true,
                ..dormant(vec![(Substrate::StoredEnergy, 1.0), (Substrate::O2, 0.6)], 36.0)
            },
        );
        map
    }

    /// A generation-0 luca genome drawn from the configured variability levels.
    pub fn create_founder<R: Rng>(config: &AppConfig, rng: &mut R) -> Genome {
        let ranges = founder_ranges(config.world.variability_level);
        Genome {
            size: rng.gen_range(ranges.size),
            color: founder_color(config.world.color_variability_level, rng),
            mutation_rate: rng.gen_range(ranges.mutation_rate),
            metabolic_efficiency: rng.gen_range(ranges.metabolic_efficiency),
            storage_capacity: rng.gen_range(ranges.storage_capacity),
            dna_repair_efficiency: rng.gen_range(0.3..=0.7),
            sod_efficiency: rng.gen_range(0.3..=0.7),
            flagella_level: 0.0,
            max_force: 0.1,
            thermal_optimum: rng.gen_range(58.0..=62.0),
            thermal_tolerance: rng.gen_range(8.0..=12.0),
            metabolism_type: MetabolismPathway::Luca,
            metabolisms: Self::founder_metabolisms(rng),
            organelles: OrganelleFlags::default(),
            generation: 0,
            evolutionary_era: EvolutionaryEra::Primordial,
            species_id: None,
            lethal: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(level: VariabilityLevel) -> AppConfig {
        AppConfig {
            world: WorldConfig {
                variability_level: level,
                color_variability_level: level,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_founder_is_plain_luca() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let genome = DnaFactory::create_founder(&config(VariabilityLevel::High), &mut rng);
        assert_eq!(genome.metabolism_type, MetabolismPathway::Luca);
        assert_eq!(genome.generation, 0);
        assert_eq!(genome.flagella_level, 0.0);
        assert!(genome.organelles.ribosomes);
        assert!(!genome.organelles.hydrogenosomes);
        assert!(!genome.organelles.chemosynthetic_enzymes);
        let enabled: Vec<_> = genome
            .metabolisms
            .iter()
            .filter(|(_, t)| t.enabled)
            .map(|(p, _)| *p)
            .collect();
        assert_eq!(enabled, vec![MetabolismPathway::Luca]);
    }

    #[test]
    fn test_founder_traits_within_level_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let g = DnaFactory::create_founder(&config(VariabilityLevel::Medium), &mut rng);
            assert!((0.15..=0.25).contains(&g.mutation_rate));
            assert!((0.9..=1.1).contains(&g.metabolic_efficiency));
            assert!((120.0..=140.0).contains(&g.storage_capacity));
            assert!((10.0..=13.0).contains(&g.size));
            assert!((120.0..=160.0).contains(&g.color[2]));
            assert!((0.7..=0.9).contains(&g.pathway_efficiency(MetabolismPathway::Luca)));
        }
    }

    #[test]
    fn test_no_variability_is_fixed() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let g = DnaFactory::create_founder(&config(VariabilityLevel::None), &mut rng);
        assert_eq!(g.mutation_rate, 0.2);
        assert_eq!(g.size, 11.5);
        assert_eq!(g.color, [200.0, 200.0, 220.0]);
    }
}
