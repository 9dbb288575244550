use super::lifecycle::VentLifecycle;
use super::types::VentType;
use super::Vent;
use crate::config::VentConfig;
use crate::stratification::Stratification;
use ocean_data::{PositionMode, VentTypeId};

/// Resolves vent placement and archetype from scenario entries.
pub struct VentFactory;

impl VentFactory {
    #[must_use]
    pub fn create_all(configs: &[VentConfig], strat: &Stratification) -> Vec<Vent> {
        configs.iter().map(|c| Self::create(c, strat)).collect()
    }

    /// Column is explicit or centred; row is explicit or the sediment row.
    #[must_use]
    pub fn create(config: &VentConfig, strat: &Stratification) -> Vent {
        let cols = strat.cols.max(1);
        let rows = strat.rows.max(1);
        let col = match config.position_mode {
            PositionMode::Center => cols / 2,
            PositionMode::Explicit => config.x.unwrap_or(cols / 2),
        }
        .min(cols - 1);
        let row = config.y.unwrap_or(strat.sediment_row).min(rows - 1);

        let type_id = VentTypeId::from_id(&config.vent_type);
        let ty = VentType::get(type_id);
        let lifecycle = config.lifecycle.then(|| VentLifecycle::for_type(ty));

        Vent::new(
            type_id,
            col,
            row,
            config.width.max(1),
            config.intensity.max(0.0),
            config.context,
            lifecycle,
        )
    }
}
