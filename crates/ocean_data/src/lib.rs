//! Plain data types shared by the primordial ocean engine and its runner.

pub mod data;

pub use data::cell::*;
pub use data::chemistry::*;
pub use data::environment::*;
pub use data::genome::*;
pub use data::vent::*;
