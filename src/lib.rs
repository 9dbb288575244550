//! Headless runner for the primordial ocean simulation.

pub mod app;

pub mod model {
    pub use ocean_core::{AppConfig, GenomeLogic, OrganelleLogic, SimulationContext};
    pub use ocean_data::*;
}
