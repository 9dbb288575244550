//! Static vent archetypes.

use ocean_data::{Chemical, ChemicalTable, VentTypeId};

/// Periodic active/dormant schedule, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityCycle {
    pub active: u64,
    pub dormant: u64,
}

impl ActivityCycle {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.active + self.dormant
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlumeProfile {
    pub decay_rate: f64,
    pub buoyancy: f64,
}

/// Immutable chemical and thermal signature of a vent family.
#[derive(Debug, Clone, PartialEq)]
pub struct VentType {
    pub id: VentTypeId,
    pub name: &'static str,
    pub ratios: ChemicalTable,
    pub temperature: f64,
    pub ph: f64,
    /// mV
    pub redox: f64,
    pub color: [u8; 3],
    pub cycle: Option<ActivityCycle>,
    pub max_age: u64,
    pub plume: PlumeProfile,
    pub trace_elements: &'static [(&'static str, f64)],
}

static ALKALINE: VentType = VentType {
    id: VentTypeId::Alkaline,
    name: "Alkaline Vent (Lost City)",
    ratios: ChemicalTable::new(1.0, 0.5, 0.1, 0.3, 0.0, 0.2),
    temperature: 70.0,
    ph: 10.0,
    redox: -400.0,
    color: [200, 255, 200],
    cycle: Some(ActivityCycle {
        active: 2000,
        dormant: 800,
    }),
    max_age: 100_000,
    plume: PlumeProfile {
        decay_rate: 0.12,
        buoyancy: 0.9,
    },
    trace_elements: &[("Ni", 0.5), ("Mg", 1.0)],
};

static BLACK_SMOKER: VentType = VentType {
    id: VentTypeId::BlackSmoker,
    name: "Black Smoker",
    ratios: ChemicalTable::new(0.5, 0.8, 2.0, 0.1, 1.5, 0.1),
    temperature: 300.0,
    ph: 3.5,
    redox: -200.0,
    color: [50, 50, 50],
    cycle: Some(ActivityCycle {
        active: 1500,
        dormant: 500,
    }),
    max_age: 80_000,
    plume: PlumeProfile {
        decay_rate: 0.18,
        buoyancy: 1.2,
    },
    trace_elements: &[("Fe", 2.0), ("Cu", 0.8), ("Zn", 0.5)],
};

static DIFFUSE: VentType = VentType {
    id: VentTypeId::Diffuse,
    name: "Diffuse Flow",
    ratios: ChemicalTable::new(0.2, 0.2, 0.3, 0.1, 0.2, 0.1),
    temperature: 40.0,
    ph: 6.5,
    redox: -100.0,
    color: [200, 200, 255],
    cycle: None,
    max_age: 150_000,
    plume: PlumeProfile {
        decay_rate: 0.25,
        buoyancy: 0.5,
    },
    trace_elements: &[],
};

static COLD_SEEP: VentType = VentType {
    id: VentTypeId::ColdSeep,
    name: "Cold Seep",
    ratios: ChemicalTable::new(0.1, 0.3, 0.2, 2.0, 0.5, 0.2),
    temperature: 10.0,
    ph: 7.0,
    redox: -300.0,
    color: [100, 100, 150],
    cycle: None,
    max_age: 200_000,
    plume: PlumeProfile {
        decay_rate: 0.20,
        buoyancy: 0.3,
    },
    trace_elements: &[],
};

impl VentType {
    #[must_use]
    pub fn get(id: VentTypeId) -> &'static VentType {
        match id {
            VentTypeId::Alkaline => &ALKALINE,
            VentTypeId::BlackSmoker => &BLACK_SMOKER,
            VentTypeId::Diffuse => &DIFFUSE,
            VentTypeId::ColdSeep => &COLD_SEEP,
        }
    }

    #[must_use]
    pub fn is_alkaline(&self) -> bool {
        self.ph > 9.0
    }

    #[must_use]
    pub fn is_acidic(&self) -> bool {
        self.ph < 6.0
    }

    /// Significant emitter of `chemical` for mixing purposes.
    #[must_use]
    pub fn emits(&self, chemical: Chemical) -> bool {
        self.ratios.get(chemical) > 0.5
    }

    #[must_use]
    pub fn trace_element(&self, symbol: &str) -> Option<f64> {
        self.trace_elements
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_lookup() {
        let smoker = VentType::get(VentTypeId::BlackSmoker);
        assert!(smoker.is_acidic());
        assert!(smoker.emits(Chemical::H2s));
        assert_eq!(smoker.trace_element("Cu"), Some(0.8));
        assert_eq!(smoker.cycle.map(|c| c.total()), Some(2000));
    }

    #[test]
    fn test_alkaline_has_no_sulfide() {
        let alkaline = VentType::get(VentTypeId::Alkaline);
        assert!(alkaline.is_alkaline());
        assert!(!alkaline.emits(Chemical::H2s));
        assert_eq!(alkaline.trace_element("Fe"), None);
    }

    #[test]
    fn test_seeps_have_no_cycle() {
        assert!(VentType::get(VentTypeId::ColdSeep).cycle.is_none());
        assert!(VentType::get(VentTypeId::ColdSeep).emits(Chemical::Ch4));
    }
}
