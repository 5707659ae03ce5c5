//! NIGHTSWARM headless runner.
//!
//! Wires the simulation crates into a fixed-rate game loop thread and
//! exposes it through a line-oriented command surface plus JSON save
//! files on disk.

pub mod cli;
pub mod game_loop;
pub mod persistence;
pub mod state;

pub use nightswarm_core as core;
