//! Flappy Heads simulation.
//!
//! A real-time arcade loop: the player taps to push a head upward against
//! growing gravity while obstacle heads drift in from the right. Touching an
//! obstacle or dropping off the bottom of the world ends the run.

pub mod logic;
pub mod physics;
pub mod spawner;
pub mod types;

pub use logic::*;
pub use types::*;
