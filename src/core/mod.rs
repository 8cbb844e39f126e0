//! Constants and configuration shared by the simulation and the front end.

pub mod config;
pub mod constants;

pub use config::GameConfig;
pub use constants::*;
