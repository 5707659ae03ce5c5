//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in world space (continuous coordinates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Squared Euclidean distance (cheaper for nearest/ordering checks).
    pub fn distance_sq_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// A tick-denominated action timer.
///
/// The gated action may run whenever `is_ready` returns true; running it
/// must call `trigger` to push the ready time out by `duration` ticks.
/// A duration of 0 means the gate is ready again immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownGate {
    /// Tick at which the gated action becomes available again.
    pub ready_at: u64,
    /// Ticks added to `ready_at` on each trigger.
    pub duration: u64,
}

impl CooldownGate {
    /// A gate that is ready immediately and re-arms after `duration` ticks.
    pub fn new(duration: u64) -> Self {
        Self {
            ready_at: 0,
            duration,
        }
    }

    /// True iff the gated action may run at tick `now`.
    pub fn is_ready(&self, now: u64) -> bool {
        now >= self.ready_at
    }

    /// Record that the gated action ran at tick `now`.
    pub fn trigger(&mut self, now: u64) {
        self.ready_at = now + self.duration;
    }
}
