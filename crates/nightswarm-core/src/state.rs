//! World snapshot — the complete visible state emitted after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, WeaponKind};
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete world state handed to display/audio collaborators per tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub monsters: Vec<MonsterView>,
    pub bullets: Vec<BulletView>,
    pub gems: Vec<GemView>,
    /// Events raised during this tick, drained on emission.
    pub events: Vec<GameEvent>,
}

/// Player status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub experience: u32,
    /// Threshold the current experience counts toward.
    pub xp_to_next_level: u32,
    pub weapon: WeaponKind,
}

/// A live monster for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterView {
    pub position: Position,
    pub health: i32,
}

/// A bullet in flight for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub weapon: WeaponKind,
}

/// A gem lying in the world for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GemView {
    pub position: Position,
    pub amount: u32,
    pub boosted: bool,
}
