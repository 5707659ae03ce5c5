//! Commands sent from external collaborators to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::records::{GemRecord, PlayerRecord};

/// All actions an input/UI collaborator may request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Start a fresh session with a newly constructed player.
    NewSession,
    /// Start a session from persisted records.
    LoadSession {
        player: PlayerRecord,
        #[serde(default)]
        gems: Vec<GemRecord>,
    },
    /// Directional movement intent for the next tick. Each axis is
    /// -1, 0 or +1; diagonal intents are speed-normalized on apply.
    Move { dx: i8, dy: i8 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
