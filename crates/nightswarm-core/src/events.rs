//! Events emitted by the simulation for UI and audio feedback.
//!
//! Events carry no further logic; they are drained into each snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;

/// Feedback events for the frontend collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A monster's health reached zero this tick.
    MonsterSlain { x: f64, y: f64 },
    /// The player took damage after defense mitigation.
    PlayerHit { amount: i32 },
    /// The player collected an experience gem.
    GemCollected { amount: u32 },
    /// The player reached a new level.
    LevelUp { level: u32 },
    /// A level perk swapped the equipped weapon.
    WeaponEquipped { kind: WeaponKind },
    /// Player health reached zero; the session is over.
    PlayerDied,
}
