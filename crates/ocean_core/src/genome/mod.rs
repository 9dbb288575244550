//! Genome behaviour: founders, mutation, divergence and phenotype.

pub mod distance;
pub mod factory;
pub mod mutation;

pub use distance::genetic_distance;
pub use factory::DnaFactory;

use ocean_data::{Enzyme, Genome, MetabolismPathway};

const EXPRESSION_THRESHOLD: f64 = 0.5;
const COPIES_PER_EFFICIENCY: f64 = 20.0;
const NEUTRAL_GREY: [f64; 3] = [200.0, 200.0, 200.0];
const TINT_WEIGHT: f64 = 0.3;

/// Display pigment contributed by each pathway.
#[must_use]
pub fn pathway_base_color(pathway: MetabolismPathway) -> [f64; 3] {
    match pathway {
        MetabolismPathway::Luca => [200.0, 200.0, 220.0],
        MetabolismPathway::Fermentation => [180.0, 100.0, 150.0],
        MetabolismPathway::Chemosynthesis => [240.0, 200.0, 60.0],
        MetabolismPathway::AnoxigenicPhotosynthesis => [200.0, 0.0, 200.0],
        MetabolismPathway::OxigenicPhotosynthesis => [0.0, 150.0, 255.0],
        MetabolismPathway::AerobicRespiration => [220.0, 80.0, 80.0],
        MetabolismPathway::Methanogenesis | MetabolismPathway::SulfurOxidation => {
            [180.0, 180.0, 180.0]
        }
    }
}

/// Derived views of a [`Genome`].
pub trait GenomeLogic {
    /// `<pathway initial><floor(eff*10)><floor(storage/50)>`, e.g. `L82`.
    fn species_id(&self) -> String;

    /// Enzymes the genome expresses and their target copy numbers.
    fn expressed_enzymes(&self) -> Vec<(Enzyme, u32)>;

    /// Efficiency-weighted pathway pigment, tinted 70/30 by the genome colour.
    fn phenotypic_color(&self) -> [f64; 3];

    /// Organelle presence follows pathway enablement.
    fn sync_organelle_flags(&mut self);
}

impl GenomeLogic for Genome {
    fn species_id(&self) -> String {
        let initial = self
            .metabolism_type
            .as_str()
            .chars()
            .next()
            .map_or('?', |c| c.to_ascii_uppercase());
        format!(
            "{}{}{}",
            initial,
            (self.metabolic_efficiency * 10.0).floor() as i64,
            (self.storage_capacity / 50.0).floor() as i64
        )
    }

    fn expressed_enzymes(&self) -> Vec<(Enzyme, u32)> {
        self.metabolisms
            .iter()
            .filter(|(_, t)| t.enabled && t.efficiency > EXPRESSION_THRESHOLD)
            .filter_map(|(pathway, t)| {
                pathway
                    .enzyme()
                    .map(|e| (e, (t.efficiency * COPIES_PER_EFFICIENCY).floor() as u32))
            })
            .collect()
    }

    fn phenotypic_color(&self) -> [f64; 3] {
        let mut blend = [0.0; 3];
        let mut total = 0.0;
        for (pathway, t) in &self.metabolisms {
            if t.efficiency > 0.0 {
                let base = pathway_base_color(*pathway);
                for (acc, channel) in blend.iter_mut().zip(base) {
                    *acc += channel * t.efficiency;
                }
                total += t.efficiency;
            }
        }
        if total > 0.0 {
            blend.iter_mut().for_each(|c| *c /= total);
        } else {
            blend = NEUTRAL_GREY;
        }

        std::array::from_fn(|i| {
            (blend[i] * (1.0 - TINT_WEIGHT) + self.color[i] * TINT_WEIGHT).clamp(0.0, 255.0)
        })
    }

    fn sync_organelle_flags(&mut self) {
        let enabled = |p: MetabolismPathway| self.metabolisms.get(&p).is_some_and(|t| t.enabled);
        let fermentation = enabled(MetabolismPathway::Fermentation);
        let chemosynthesis = enabled(MetabolismPathway::Chemosynthesis);
        self.organelles.ribosomes = true;
        self.organelles.hydrogenosomes = fermentation;
        self.organelles.chemosynthetic_enzymes = chemosynthesis;
    }
}
