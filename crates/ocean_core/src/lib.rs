//! # Ocean Core
//!
//! The simulation engine for a primordial ocean: a stratified 2-D water
//! column fed by hydrothermal vents, populated by single cells that
//! metabolise dissolved chemicals, divide, mutate and die.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Thirteen scalar field grids and the stratification that frames them
//! - Vent archetypes with lifecycles, plumes and geological events
//! - Resource regeneration, sinks, boundary reservoirs and diffusion
//! - Genome mutation, the cellular physiology of one tick, and fission
//! - The population governor, environmental stability and structured logging
//!
//! ## Example
//!
//! ```
//! use ocean_core::{AppConfig, SimulationContext};
//!
//! let mut config = AppConfig::default();
//! config.world.cols = 40;
//! config.world.rows = 30;
//! config.world.seed = Some(42);
//!
//! let mut ctx = SimulationContext::new(config).unwrap();
//! let events = ctx.tick().unwrap();
//! assert_eq!(ctx.frame(), 1);
//! assert!(events.iter().all(|e| e.frame() == 0));
//! ```

/// Per-cell physiology: membrane, metabolism, stress and repair
pub mod cellular;
/// The per-tick update of a single cell
pub mod cell;
/// Configuration management for simulation parameters
pub mod config;
/// The simulation instance and tick pipeline
pub mod context;
/// Explicit relaxation of dissolved chemicals
pub mod diffusion;
/// Regeneration, sinks and boundary reservoirs
pub mod dynamics;
/// Error types for configuration and grid lookup
pub mod error;
/// Genome mutation, distance and founder construction
pub mod genome;
/// Population and frame-rate throttle
pub mod governor;
/// Scalar field grids
pub mod grid;
/// Performance metrics collection and logging
pub mod metrics;
/// Organelle costs and bonuses
pub mod organelle;
/// Binary fission with mutation
pub mod reproduction;
/// Environmental stability estimate
pub mod stability;
/// Atmosphere, water and sediment bands
pub mod stratification;
/// Hydrothermal vents
pub mod vent;

pub use config::AppConfig;
pub use context::SimulationContext;
pub use genome::GenomeLogic;
pub use metrics::{init_logging, Metrics};
pub use organelle::OrganelleLogic;
