//! Independent physiological modifiers of a cell.
//!
//! Each module is a pure function of genome traits and the local
//! environment. The cell tick composes them; none replaces another.

pub mod chemotaxis;
pub mod color;
pub mod membrane;
pub mod metabolic;
pub mod oxidative;
pub mod thermal;
pub mod transport;
pub mod uv;

pub use color::{pigmentation, Pigmentation};
pub use metabolic::{metabolic_cost, MetabolicCost, Surroundings};
pub use thermal::{stress_category, thermal_stress, StressCategory};
