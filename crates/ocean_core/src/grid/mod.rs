pub mod init;
pub mod noise;
pub mod system;

pub use system::{Grid, GridSystem};
