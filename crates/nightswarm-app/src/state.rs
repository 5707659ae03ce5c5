//! State shared between the frontend thread and the game loop thread.

use std::sync::{Arc, Mutex};

use nightswarm_core::commands::SessionCommand;
use nightswarm_core::state::WorldSnapshot;

/// Commands sent from the frontend to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A session command to forward to the simulation engine.
    Session(SessionCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot slot, updated by the game loop thread after each
/// tick and read synchronously by the frontend. `None` until the first
/// tick has run.
pub type SharedSnapshot = Arc<Mutex<Option<WorldSnapshot>>>;

/// A fresh, empty snapshot slot.
pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
