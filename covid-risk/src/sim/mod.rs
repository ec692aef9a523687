//! Simulation driver: integrates the SEIR model for a transmission rate and
//! turns its final state into an infection probability.
mod calculator;
mod refresher;
mod simulation;

pub use calculator::*;
pub use refresher::*;
pub use simulation::*;
