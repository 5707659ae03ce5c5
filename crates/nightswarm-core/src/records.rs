//! Persisted save records.
//!
//! The wire format keeps the field names of the original save files
//! (`velocidad`, `defensa`, ...). Every field defaults to the value a
//! freshly constructed player would have, so partial or outdated save
//! data loads without error.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::GemBoostKind;

fn default_health() -> i32 {
    PLAYER_MAX_HEALTH
}

fn default_max_health() -> i32 {
    PLAYER_MAX_HEALTH
}

fn default_level() -> u32 {
    1
}

fn default_xp_multiplier() -> u32 {
    1
}

fn default_speed() -> f64 {
    PLAYER_SPEED
}

fn default_damage() -> i32 {
    PLAYER_BASE_DAMAGE
}

fn default_pos_x() -> f64 {
    WORLD_WIDTH / 2.0
}

fn default_pos_y() -> f64 {
    WORLD_HEIGHT / 2.0
}

fn default_weapon_type() -> String {
    "pistol".to_string()
}

/// Persisted player state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default = "default_health")]
    pub health: i32,
    #[serde(default = "default_max_health")]
    pub max_health: i32,
    /// Tick at which the equipped weapon's gate re-arms.
    #[serde(default)]
    pub last_shot_time: u64,
    #[serde(default)]
    pub experience: u32,
    #[serde(rename = "multexperience", default = "default_xp_multiplier")]
    pub xp_multiplier: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(rename = "velocidad", default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_damage")]
    pub damage: i32,
    #[serde(rename = "defensa", default)]
    pub defense: i32,
    #[serde(rename = "autocuracion", default)]
    pub autoheal: i32,
    #[serde(rename = "probabilidad_critico", default)]
    pub crit_chance: u32,
    #[serde(rename = "velocidad_ataque", default)]
    pub attack_speed: u64,
    #[serde(default = "default_pos_x")]
    pub pos_x: f64,
    #[serde(default = "default_pos_y")]
    pub pos_y: f64,
    /// One of "pistol", "shotgun", "minigun". An unknown name keeps the
    /// constructor default rather than failing the load.
    #[serde(default = "default_weapon_type")]
    pub weapon_type: String,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            health: default_health(),
            max_health: default_max_health(),
            last_shot_time: 0,
            experience: 0,
            xp_multiplier: default_xp_multiplier(),
            level: default_level(),
            speed: default_speed(),
            damage: default_damage(),
            defense: 0,
            autoheal: 0,
            crit_chance: 0,
            attack_speed: 0,
            pos_x: default_pos_x(),
            pos_y: default_pos_y(),
            weapon_type: default_weapon_type(),
        }
    }
}

/// Persisted experience gem. Plain gems carry only position and amount;
/// boosted gems additionally carry `boost`, `duration` and `kind`
/// (missing `kind` on a boosted gem falls back to Speed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemRecord {
    pub pos_x: f64,
    pub pos_y: f64,
    pub amount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<GemBoostKind>,
}

/// Full save data written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub player: PlayerRecord,
    #[serde(default)]
    pub gems: Vec<GemRecord>,
}
