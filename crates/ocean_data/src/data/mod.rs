//! Core data structures for the primordial ocean simulation.

pub mod cell;
pub mod chemistry;
pub mod environment;
pub mod genome;
pub mod vent;
