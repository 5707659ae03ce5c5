//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Weapon tier carried by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Single aimed bullet, moderate cooldown.
    #[default]
    Pistol,
    /// Five-bullet angular spread, slowest bullets.
    Shotgun,
    /// Single fast low-damage bullet, shortest cooldown.
    Minigun,
}

impl WeaponKind {
    /// Wire name used in save records.
    pub fn as_name(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Minigun => "minigun",
        }
    }

    /// Parse a wire name. Unknown names return None so a loader can
    /// keep its constructor default instead of failing.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pistol" => Some(WeaponKind::Pistol),
            "shotgun" => Some(WeaponKind::Shotgun),
            "minigun" => Some(WeaponKind::Minigun),
            _ => None,
        }
    }
}

/// Stat affected by a boosted experience gem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemBoostKind {
    Speed,
    Damage,
    Defence,
    /// Applied as an immediate heal rather than a timed modifier.
    Health,
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Active,
    Paused,
    /// Player health reached zero; the tick loop stops after this tick.
    GameOver,
}
