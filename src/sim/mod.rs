//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, geometry, and call
//! sequence, a run replays exactly:
//! - Caller-supplied timestep, clamped to a maximum
//! - Seeded RNG only, one stream per consumer
//! - Obstacles kept in spawn order
//! - No rendering, input, or platform dependencies

pub mod collision;
pub mod engine;
pub mod physics;
pub mod rect;
pub mod spawner;
pub mod state;

pub use collision::{CollisionOutcome, check_collision, count_newly_passed, mark_passed};
pub use engine::SimulationEngine;
pub use physics::PhysicsIntegrator;
pub use rect::Rect;
pub use spawner::ObstacleSpawner;
pub use state::{
    Avatar, Obstacle, ObstacleTint, RngState, RunState, SimulationState, Snapshot, Viewport,
};
