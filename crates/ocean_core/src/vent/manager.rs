use super::chemistry::{self, FluxFactors};
use super::events::{GeologicalEvents, GeologicalRecord};
use super::{Vent, VentFactory, VentLifecycle};
use crate::config::{AppConfig, VentConfig, VentSystemConfig};
use crate::error::{OceanError, Result};
use crate::grid::GridSystem;
use crate::stratification::Stratification;
use ocean_data::{
    Chemical, ChemicalTable, GeologicalEventKind, GridChannel, OceanEvent, PositionMode,
    VentContext, VentPhase, VentSnapshot, VentTypeId,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

const OCEAN_PH: f64 = 8.1;
const SEAWATER_REDOX: f64 = 0.0;
const TRACE_REACH: f64 = 400.0;
const PH_RADIUS_PER_WIDTH: f64 = 5.0;
const REDOX_RADIUS_PER_WIDTH: f64 = 8.0;
const VENT_WEIGHT: f64 = 5.0;
const MIXING_RADIUS: i64 = 2;
const SUBAERIAL_HEAT_FRACTION: f64 = 0.8;
const SURGE_FACTOR: f64 = 2.0;
const COOLING_FACTOR: f64 = 0.7;
const COOLING_WANING_BELOW: f64 = 0.3;

/// Owns the vent field and drives its per-tick injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentManager {
    pub vents: Vec<Vent>,
    events: GeologicalEvents,
}

impl VentManager {
    #[must_use]
    pub fn new(configs: &[VentConfig], strat: &Stratification, system: &VentSystemConfig) -> Self {
        Self {
            vents: VentFactory::create_all(configs, strat),
            events: GeologicalEvents::new(system.event_history),
        }
    }

    /// Geological events, ageing, injection, heating, then mixing.
    pub fn update<R: Rng>(
        &mut self,
        grids: &mut GridSystem,
        strat: &Stratification,
        config: &AppConfig,
        rng: &mut R,
        frame: u64,
    ) -> Vec<OceanEvent> {
        let mut out = Vec::new();
        let system = &config.vent_system;

        if system.events_enabled {
            for kind in self.events.roll(rng) {
                let vent = self.apply_geological_event(kind, strat, system, rng);
                tracing::info!(frame, kind = ?kind, vent = ?vent, "Geological event");
                self.events.record(GeologicalRecord { kind, frame, vent });
                out.push(OceanEvent::Geological {
                    frame,
                    kind,
                    vent,
                    timestamp: chrono::Utc::now().to_rfc3339(),
                });
            }
        }

        let (cols, rows) = (grids.cols, grids.rows);
        let max_accumulation = system.max_accumulation.to_table();
        for (index, vent) in self.vents.iter_mut().enumerate() {
            vent.tick_surge();
            if let Some((from, to)) = vent.lifecycle.as_mut().and_then(|lc| lc.update()) {
                vent.invalidate_plume();
                tracing::debug!(frame, vent = index, from = ?from, to = ?to, "Vent phase change");
                out.push(OceanEvent::VentPhaseChange {
                    frame,
                    vent: index,
                    from,
                    to,
                });
            }
            if !vent.is_active() {
                continue;
            }
            let flux = Self::vent_output(vent, config);
            Self::inject(
                vent,
                grids,
                &flux,
                &max_accumulation,
                system.plume_dispersal,
                cols,
                rows,
            );
            Self::apply_thermal(vent, grids, cols, rows);
        }

        if system.mixing_enabled {
            self.apply_mixing(grids);
        }
        out
    }

    /// Current per-chemical flux of one vent.
    #[must_use]
    pub fn vent_output(vent: &Vent, config: &AppConfig) -> ChemicalTable {
        let base = config.vent_system.base_flux.to_table();
        let mut out = ChemicalTable::default();
        for chemical in Chemical::ALL {
            let flux = chemistry::chemical_flux(
                vent.ty(),
                chemical,
                FluxFactors {
                    base_flux: base.get(chemical),
                    intensity: vent.intensity(),
                    global_multiplier: config.vent_system.global_multiplier,
                    env_multiplier: config.flux.chemical(chemical),
                    lifecycle_multiplier: vent.lifecycle_multiplier(),
                },
            );
            out.set(chemical, flux);
        }
        out
    }

    fn inject(
        vent: &mut Vent,
        grids: &mut GridSystem,
        flux: &ChemicalTable,
        max: &ChemicalTable,
        plume_dispersal: bool,
        cols: usize,
        rows: usize,
    ) {
        if plume_dispersal {
            let cells = vent.plume_cells(cols, rows);
            for (chemical, amount) in flux.iter().filter(|(_, a)| *a > 0.0) {
                for cell in cells {
                    chemistry::inject_clamped(
                        grids,
                        chemical.channel(),
                        cell.col,
                        cell.row,
                        amount * cell.decay,
                        max.get(chemical),
                    );
                }
            }
        } else {
            let row = vent.row;
            for (chemical, amount) in flux.iter().filter(|(_, a)| *a > 0.0) {
                for col in vent.injection_cols(cols) {
                    chemistry::inject_clamped(
                        grids,
                        chemical.channel(),
                        col,
                        row,
                        amount,
                        max.get(chemical),
                    );
                }
            }
        }
    }

    /// Source cells never cool below the archetype temperature.
    fn apply_thermal(vent: &Vent, grids: &mut GridSystem, cols: usize, rows: usize) {
        let temperature = vent.ty().temperature;
        for col in vent.thermal_cols(cols) {
            let current = grids.get_cell(GridChannel::Temperature, col, vent.row);
            grids.set_cell(
                GridChannel::Temperature,
                col,
                vent.row,
                current.max(temperature),
            );
            if vent.context == VentContext::Subaerial && vent.row + 1 < rows {
                let below = grids.get_cell(GridChannel::Temperature, col, vent.row + 1);
                grids.set_cell(
                    GridChannel::Temperature,
                    col,
                    vent.row + 1,
                    below.max(temperature * SUBAERIAL_HEAT_FRACTION),
                );
            }
        }
    }

    /// Vent pairs closer than `(w1 + w2) * 2` columns react in a 5x5 block at their midpoint.
    fn apply_mixing(&self, grids: &mut GridSystem) {
        for (i, a) in self.vents.iter().enumerate() {
            for b in self.vents.iter().skip(i + 1) {
                if a.col.abs_diff(b.col) >= (a.width + b.width) * 2 {
                    continue;
                }
                let cells = Self::mixing_cells(a, b, grids.cols, grids.rows);
                chemistry::apply_mixing_reactions(a.ty(), b.ty(), &cells, grids);
            }
        }
    }

    fn mixing_cells(a: &Vent, b: &Vent, cols: usize, rows: usize) -> Vec<(usize, usize)> {
        let mid_col = ((a.col + b.col) / 2) as i64;
        let mid_row = ((a.row + b.row) / 2) as i64;
        let mut cells = Vec::new();
        for dc in -MIXING_RADIUS..=MIXING_RADIUS {
            for dr in -MIXING_RADIUS..=MIXING_RADIUS {
                let (c, r) = (mid_col + dc, mid_row + dr);
                if c >= 0 && r >= 0 && (c as usize) < cols && (r as usize) < rows {
                    cells.push((c as usize, r as usize));
                }
            }
        }
        cells
    }

    fn apply_geological_event<R: Rng>(
        &mut self,
        kind: GeologicalEventKind,
        strat: &Stratification,
        system: &VentSystemConfig,
        rng: &mut R,
    ) -> Option<usize> {
        match kind {
            GeologicalEventKind::Earthquake => {
                let types = [
                    VentTypeId::Alkaline,
                    VentTypeId::BlackSmoker,
                    VentTypeId::Diffuse,
                ];
                let config = VentConfig {
                    x: Some(rng.gen_range(0..strat.cols.max(1))),
                    y: None,
                    width: rng.gen_range(3..6),
                    intensity: rng.gen_range(0.5..1.0),
                    vent_type: types[rng.gen_range(0..types.len())].as_str().to_string(),
                    position_mode: PositionMode::Explicit,
                    ..Default::default()
                };
                Some(self.add_vent(&config, strat))
            }
            GeologicalEventKind::VolcanicSurge => {
                let surging = self
                    .vents
                    .iter_mut()
                    .filter(|v| v.lifecycle.as_ref().is_some_and(VentLifecycle::is_active));
                for vent in surging {
                    vent.begin_surge(SURGE_FACTOR, system.surge_duration);
                }
                None
            }
            GeologicalEventKind::Reactivation => {
                let dormant = self.indices_in_phase(VentPhase::Dormant);
                let &index = dormant.get(rng.gen_range(0..dormant.len().max(1)))?;
                if let Some(lc) = self.vents[index].lifecycle.as_mut() {
                    lc.reactivate();
                }
                self.vents[index].invalidate_plume();
                Some(index)
            }
            GeologicalEventKind::Cooling => {
                let active = self.indices_in_phase(VentPhase::Active);
                let &index = active.get(rng.gen_range(0..active.len().max(1)))?;
                let vent = &mut self.vents[index];
                vent.scale_intensity(COOLING_FACTOR);
                if vent.intensity() < COOLING_WANING_BELOW {
                    if let Some(lc) = vent.lifecycle.as_mut() {
                        lc.set_phase(VentPhase::Waning);
                    }
                }
                Some(index)
            }
        }
    }

    fn indices_in_phase(&self, phase: VentPhase) -> Vec<usize> {
        self.vents
            .iter()
            .enumerate()
            .filter(|(_, v)| v.lifecycle.as_ref().is_some_and(|lc| lc.phase == phase))
            .map(|(i, _)| i)
            .collect()
    }

    /// Adds a vent at runtime and returns its index.
    pub fn add_vent(&mut self, config: &VentConfig, strat: &Stratification) -> usize {
        self.vents.push(VentFactory::create(config, strat));
        self.vents.len() - 1
    }

    pub fn remove_vent(&mut self, index: usize) -> Result<Vent> {
        self.check_index(index)?;
        Ok(self.vents.remove(index))
    }

    pub fn set_intensity(&mut self, index: usize, intensity: f64) -> Result<()> {
        self.check_index(index)?;
        self.vents[index].set_intensity(intensity);
        Ok(())
    }

    /// Forces a lifecycle phase. Vents without a lifecycle get one.
    pub fn set_phase(&mut self, index: usize, phase: VentPhase) -> Result<()> {
        self.check_index(index)?;
        let vent = &mut self.vents[index];
        let ty = vent.ty();
        vent.lifecycle
            .get_or_insert_with(|| VentLifecycle::for_type(ty))
            .set_phase(phase);
        vent.invalidate_plume();
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.vents.len() {
            Ok(())
        } else {
            Err(OceanError::VentIndex {
                index,
                count: self.vents.len(),
            })
        }
    }

    #[must_use]
    pub fn recent_events(&self, count: usize) -> Vec<GeologicalRecord> {
        self.events.recent(count)
    }

    /// Sum of trace element contributions, quadratic falloff in world units.
    #[must_use]
    pub fn trace_element_at(&self, x: f64, y: f64, symbol: &str, resolution: f64) -> f64 {
        self.vents
            .iter()
            .filter_map(|vent| {
                let level = vent.ty().trace_element(symbol)?;
                let (vx, vy) = vent.world_position(resolution);
                let d = ((x - vx).powi(2) + (y - vy).powi(2)).sqrt();
                let reach = TRACE_REACH * vent.intensity();
                (d < reach).then(|| {
                    let falloff = 1.0 - d / reach;
                    level * vent.intensity() * falloff * falloff
                })
            })
            .sum()
    }

    #[must_use]
    pub fn ph_at(&self, x: f64, y: f64, resolution: f64) -> f64 {
        self.weighted_at(x, y, resolution, OCEAN_PH, PH_RADIUS_PER_WIDTH, |v| v.ty().ph)
    }

    #[must_use]
    pub fn redox_at(&self, x: f64, y: f64, resolution: f64) -> f64 {
        self.weighted_at(x, y, resolution, SEAWATER_REDOX, REDOX_RADIUS_PER_WIDTH, |v| {
            v.ty().redox
        })
    }

    /// Running weighted mean starting from the open-ocean value, distances in cells.
    fn weighted_at(
        &self,
        x: f64,
        y: f64,
        resolution: f64,
        ambient: f64,
        radius_per_width: f64,
        value: impl Fn(&Vent) -> f64,
    ) -> f64 {
        let (col, row) = (x / resolution, y / resolution);
        let mut mean = ambient;
        let mut total_weight = 1.0;
        for vent in &self.vents {
            let d = ((col - vent.col as f64).powi(2) + (row - vent.row as f64).powi(2)).sqrt();
            let influence = vent.width as f64 * radius_per_width * vent.intensity();
            if d < influence {
                let weight = (1.0 - d / influence) * VENT_WEIGHT;
                mean = (mean * total_weight + value(vent) * weight) / (total_weight + weight);
                total_weight += weight;
            }
        }
        mean
    }

    /// Read-only state of every vent for rendering and logging.
    #[must_use]
    pub fn snapshots(&self, config: &AppConfig) -> Vec<VentSnapshot> {
        self.vents
            .iter()
            .map(|vent| VentSnapshot {
                vent_type: vent.vent_type,
                x: vent.col,
                y: vent.row,
                width: vent.width,
                intensity: vent.intensity(),
                lifecycle: vent.lifecycle.as_ref().map(|lc| lc.snapshot()),
                output: if vent.is_active() {
                    Self::vent_output(vent, config)
                } else {
                    ChemicalTable::default()
                },
                ph: vent.ty().ph,
                redox: vent.ty().redox,
                color: vent.ty().color,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(vents: Vec<VentConfig>) -> (AppConfig, Stratification, GridSystem, VentManager) {
        let mut config = AppConfig {
            world: WorldConfig {
                cols: 40,
                rows: 40,
                ..Default::default()
            },
            vents,
            ..Default::default()
        };
        config.vent_system.events_enabled = false;
        let strat = Stratification::new(&config);
        let grids = GridSystem::new(40, 40);
        let manager = VentManager::new(&config.vents, &strat, &config.vent_system);
        (config, strat, grids, manager)
    }

    fn explicit(x: usize, vent_type: &str) -> VentConfig {
        VentConfig {
            x: Some(x),
            vent_type: vent_type.into(),
            position_mode: PositionMode::Explicit,
            ..Default::default()
        }
    }

    #[test]
    fn test_injection_at_source_row() {
        let (config, strat, mut grids, mut manager) = setup(vec![explicit(20, "ALKALINE")]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        manager.update(&mut grids, &strat, &config, &mut rng, 1);
        let row = manager.vents[0].row;
        assert_eq!(grids.get_cell(GridChannel::H2, 20, row), 5.0);
        assert_eq!(grids.get_cell(GridChannel::H2, 19, row), 5.0);
        assert_eq!(grids.get_cell(GridChannel::H2, 22, row), 0.0);
        assert_eq!(grids.get_cell(GridChannel::H2s, 20, row), 0.0);
        assert_eq!(grids.get_cell(GridChannel::Temperature, 21, row), 70.0);
    }

    #[test]
    fn test_injection_respects_accumulation_cap() {
        let (config, strat, mut grids, mut manager) = setup(vec![explicit(20, "ALKALINE")]);
        let row = manager.vents[0].row;
        grids.set_cell(GridChannel::H2, 20, row, 248.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        manager.update(&mut grids, &strat, &config, &mut rng, 1);
        assert_eq!(grids.get_cell(GridChannel::H2, 20, row), 250.0);
    }

    #[test]
    fn test_temperature_never_lowered() {
        let (config, strat, mut grids, mut manager) = setup(vec![explicit(20, "COLD_SEEP")]);
        let row = manager.vents[0].row;
        grids.set_cell(GridChannel::Temperature, 20, row, 60.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        manager.update(&mut grids, &strat, &config, &mut rng, 1);
        assert_eq!(grids.get_cell(GridChannel::Temperature, 20, row), 60.0);
    }

    #[test]
    fn test_dormant_vent_injects_nothing() {
        let (config, strat, mut grids, mut manager) = setup(vec![explicit(20, "ALKALINE")]);
        manager.set_phase(0, VentPhase::Dormant).expect("vent exists");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        manager.update(&mut grids, &strat, &config, &mut rng, 1);
        assert_eq!(grids.grid(GridChannel::H2).total(), 0.0);
    }

    #[test]
    fn test_vent_control_rejects_bad_index() {
        let (_, _, _, mut manager) = setup(vec![explicit(20, "ALKALINE")]);
        assert!(matches!(
            manager.set_intensity(3, 1.0),
            Err(OceanError::VentIndex { index: 3, count: 1 })
        ));
        assert!(manager.remove_vent(0).is_ok());
        assert!(manager.vents.is_empty());
    }

    #[test]
    fn test_ph_near_alkaline_vent() {
        let (_, _, _, manager) = setup(vec![explicit(20, "ALKALINE")]);
        let row = manager.vents[0].row as f64;
        let near = manager.ph_at(200.0, row * 10.0, 10.0);
        let far = manager.ph_at(0.0, 0.0, 10.0);
        assert!(near > 9.0);
        assert_eq!(far, OCEAN_PH);
        assert!(manager.trace_element_at(200.0, row * 10.0, "Ni", 10.0) > 0.0);
    }

    #[test]
    fn test_snapshot_reports_output() {
        let (config, _, _, manager) = setup(vec![explicit(20, "BLACK_SMOKER")]);
        let snaps = manager.snapshots(&config);
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].output.get(Chemical::Fe2), 2.0);
        assert_eq!(snaps[0].lifecycle.map(|l| l.phase), Some(VentPhase::Active));
    }

    #[test]
    fn test_mixing_uses_column_distance_only() {
        let mut smoker = explicit(18, "BLACK_SMOKER");
        smoker.y = Some(10);
        let mut alkaline = explicit(22, "ALKALINE");
        alkaline.y = Some(30);
        let (_, _, mut grids, manager) = setup(vec![smoker, alkaline]);
        grids.set_cell(GridChannel::Fe2, 20, 20, 100.0);
        manager.apply_mixing(&mut grids);
        assert!(grids.get_cell(GridChannel::Fe2, 20, 20) < 100.0);
    }

    #[test]
    fn test_volcanic_surge_skips_vents_without_lifecycle() {
        let mut steady = explicit(10, "ALKALINE");
        steady.lifecycle = false;
        let ageing = explicit(30, "ALKALINE");
        let (config, strat, _, mut manager) = setup(vec![steady, ageing]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        manager.apply_geological_event(
            GeologicalEventKind::VolcanicSurge,
            &strat,
            &config.vent_system,
            &mut rng,
        );
        assert!(!manager.vents[0].is_surging());
        assert!(manager.vents[1].is_surging());
    }
}
