//! Compartmental epidemic models integrated by the solver.
pub mod seir;
pub use seir::*;
