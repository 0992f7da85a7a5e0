//! Arithmetic challenges
//!
//! Problems, the score-indexed difficulty schedule, and the seeded generator
//! that builds a problem for a tier.

pub mod generator;
pub mod problem;
pub mod tier;

pub use generator::ProblemGenerator;
pub use problem::{MathProblem, Operator};
pub use tier::DifficultyTier;
