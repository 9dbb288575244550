use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of metabolic pathways a genome can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetabolismPathway {
    /// Ancestral chemolithoautotrophy (H₂ + CO₂).
    Luca,
    Fermentation,
    Chemosynthesis,
    AnoxigenicPhotosynthesis,
    OxigenicPhotosynthesis,
    AerobicRespiration,
    Methanogenesis,
    SulfurOxidation,
}

/// Catalysing enzyme expressed for a pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enzyme {
    Hydrogenase,
    Rubisco,
    CytochromeOxidase,
}

impl MetabolismPathway {
    pub const ALL: [MetabolismPathway; 8] = [
        MetabolismPathway::Luca,
        MetabolismPathway::Fermentation,
        MetabolismPathway::Chemosynthesis,
        MetabolismPathway::AnoxigenicPhotosynthesis,
        MetabolismPathway::OxigenicPhotosynthesis,
        MetabolismPathway::AerobicRespiration,
        MetabolismPathway::Methanogenesis,
        MetabolismPathway::SulfurOxidation,
    ];

    /// Pathway to enzyme mapping. Exhaustive, so adding a pathway forces a decision here.
    #[must_use]
    pub const fn enzyme(self) -> Option<Enzyme> {
        match self {
            MetabolismPathway::Luca
            | MetabolismPathway::Methanogenesis
            | MetabolismPathway::SulfurOxidation => Some(Enzyme::Hydrogenase),
            MetabolismPathway::OxigenicPhotosynthesis => Some(Enzyme::Rubisco),
            MetabolismPathway::AerobicRespiration => Some(Enzyme::CytochromeOxidase),
            MetabolismPathway::Fermentation
            | MetabolismPathway::Chemosynthesis
            | MetabolismPathway::AnoxigenicPhotosynthesis => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetabolismPathway::Luca => "luca",
            MetabolismPathway::Fermentation => "fermentation",
            MetabolismPathway::Chemosynthesis => "chemosynthesis",
            MetabolismPathway::AnoxigenicPhotosynthesis => "anoxigenicPhotosynthesis",
            MetabolismPathway::OxigenicPhotosynthesis => "oxigenicPhotosynthesis",
            MetabolismPathway::AerobicRespiration => "aerobicRespiration",
            MetabolismPathway::Methanogenesis => "methanogenesis",
            MetabolismPathway::SulfurOxidation => "sulfurOxidation",
        }
    }

    /// Anaerobic pathways survive with an empty internal oxygen pool.
    #[must_use]
    pub fn is_anaerobic(self) -> bool {
        matches!(self, MetabolismPathway::Luca | MetabolismPathway::Fermentation)
    }
}

/// Substrate consumed by a pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substrate {
    H2,
    Co2,
    O2,
    Light,
    StoredEnergy,
}

/// Heritable parameters of one metabolic pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayTrait {
    pub enabled: bool,
    pub efficiency: f64,
    pub substrates: Vec<(Substrate, f64)>,
    pub energy_yield: f64,
    pub requires_o2: bool,
    pub requires_light: bool,
    #[serde(default)]
    pub min_light_level: Option<f64>,
    #[serde(default)]
    pub produces_o2: Option<f64>,
    #[serde(default)]
    pub geochemical_bonus: bool,
}

/// Which optional organelles the genome encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganelleFlags {
    pub ribosomes: bool,
    pub hydrogenosomes: bool,
    pub chemosynthetic_enzymes: bool,
}

impl Default for OrganelleFlags {
    fn default() -> Self {
        Self {
            ribosomes: true,
            hydrogenosomes: false,
            chemosynthetic_enzymes: false,
        }
    }
}

/// Coarse era derived from the mutation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvolutionaryEra {
    #[default]
    Primordial,
    Transition,
    Modern,
}

/// Value-typed genome of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub size: f64,
    /// RGB in `[0, 255]`.
    pub color: [f64; 3],
    pub mutation_rate: f64,
    pub metabolic_efficiency: f64,
    pub storage_capacity: f64,
    pub dna_repair_efficiency: f64,
    pub sod_efficiency: f64,
    pub flagella_level: f64,
    pub max_force: f64,
    pub thermal_optimum: f64,
    pub thermal_tolerance: f64,
    pub metabolism_type: MetabolismPathway,
    pub metabolisms: BTreeMap<MetabolismPathway, PathwayTrait>,
    pub organelles: OrganelleFlags,
    pub generation: u32,
    pub evolutionary_era: EvolutionaryEra,
    pub species_id: Option<String>,
    /// Set by the mutation operator when the offspring is not viable.
    #[serde(default)]
    pub lethal: bool,
}

impl Genome {
    #[must_use]
    pub fn pathway(&self, pathway: MetabolismPathway) -> Option<&PathwayTrait> {
        self.metabolisms.get(&pathway)
    }

    #[must_use]
    pub fn pathway_efficiency(&self, pathway: MetabolismPathway) -> f64 {
        self.metabolisms.get(&pathway).map_or(0.0, |p| p.efficiency)
    }

    #[must_use]
    pub fn is_luca(&self) -> bool {
        self.metabolism_type == MetabolismPathway::Luca
    }
}
