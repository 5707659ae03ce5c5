//! Simulation engine for NIGHTSWARM.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces WorldSnapshots for display/audio collaborators.

pub mod engine;
pub mod systems;
pub mod weapons;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use nightswarm_core as core;

#[cfg(test)]
mod tests;
