//! Per-tick simulation systems, run in a fixed order by the engine.

pub mod ai;
pub mod cleanup;
pub mod combat;
pub mod movement;
pub mod player;
pub mod progression;
pub mod snapshot;
pub mod spawner;
