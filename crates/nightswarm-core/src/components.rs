//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Systems own the behavior; the engine owns insertion and removal.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{GemBoostKind, WeaponKind};
use crate::types::CooldownGate;

/// Marks the single player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a monster entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Monster;

/// Current and maximum hit points. Invariant: 0 <= current <= max.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// Axis-aligned square bounding extent used for overlap tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub half_extent: f64,
}

/// Player base stats. Temporary gem boosts are layered on top via
/// `ActiveBoosts`; read combat-relevant values through the effective
/// stats computation, never from here directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Movement speed in world units per tick.
    pub speed: f64,
    /// Base damage stat. Bullets deal their weapon's damage; only the
    /// temporary damage boosts on top of this stat reach the bullet.
    pub damage: i32,
    /// Flat damage reduction on incoming hits.
    pub defense: i32,
    /// Health restored per autoheal interval.
    pub autoheal: i32,
    /// Percent chance (0-100) a bullet hit deals double damage.
    pub crit_chance: u32,
    /// Ticks shaved off the equipped weapon's cooldown per shot.
    pub attack_speed: u64,
    /// Multiplier applied to gem experience on pickup.
    pub xp_multiplier: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            damage: PLAYER_BASE_DAMAGE,
            defense: PLAYER_BASE_DEFENSE,
            autoheal: 0,
            crit_chance: 0,
            attack_speed: 0,
            xp_multiplier: 1,
        }
    }
}

/// Experience and level. Invariant after every progression update:
/// `amount` is strictly below the current level's threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Experience {
    pub amount: u32,
    pub level: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            amount: 0,
            level: 1,
        }
    }
}

/// A temporary stat modifier granted by a boosted gem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boost {
    pub kind: GemBoostKind,
    pub amount: i32,
    /// Tick at which the modifier stops applying.
    pub expires_at_tick: u64,
}

/// Expiring modifier list on the player. Swept every tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveBoosts {
    pub boosts: Vec<Boost>,
}

/// Gate for the player's periodic self-heal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AutoHealGate(pub CooldownGate);

impl Default for AutoHealGate {
    fn default() -> Self {
        Self(CooldownGate::new(AUTOHEAL_INTERVAL_TICKS))
    }
}

/// The equipped weapon. Exclusively owned by the player; equipping a
/// new weapon replaces the whole value, discarding the old gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub bullet_speed: f64,
    pub bullet_damage: i32,
    pub gate: CooldownGate,
}

impl Weapon {
    pub fn pistol() -> Self {
        Self {
            kind: WeaponKind::Pistol,
            bullet_speed: PISTOL_BULLET_SPEED,
            bullet_damage: PISTOL_BULLET_DAMAGE,
            gate: CooldownGate::new(PISTOL_COOLDOWN_TICKS),
        }
    }

    pub fn shotgun() -> Self {
        Self {
            kind: WeaponKind::Shotgun,
            bullet_speed: SHOTGUN_BULLET_SPEED,
            bullet_damage: SHOTGUN_BULLET_DAMAGE,
            gate: CooldownGate::new(SHOTGUN_COOLDOWN_TICKS),
        }
    }

    pub fn minigun() -> Self {
        Self {
            kind: WeaponKind::Minigun,
            bullet_speed: MINIGUN_BULLET_SPEED,
            bullet_damage: MINIGUN_BULLET_DAMAGE,
            gate: CooldownGate::new(MINIGUN_COOLDOWN_TICKS),
        }
    }

    pub fn of_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Pistol => Self::pistol(),
            WeaponKind::Shotgun => Self::shotgun(),
            WeaponKind::Minigun => Self::minigun(),
        }
    }
}

/// Monster combat profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonsterProfile {
    /// Movement speed in world units per tick.
    pub speed: f64,
    /// Contact damage per attack.
    pub damage: i32,
    /// Attacks land only strictly inside this range.
    pub attack_range: f64,
    pub attack_gate: CooldownGate,
}

impl Default for MonsterProfile {
    fn default() -> Self {
        Self {
            speed: MONSTER_SPEED,
            damage: MONSTER_DAMAGE,
            attack_range: MONSTER_ATTACK_RANGE,
            attack_gate: CooldownGate::new(MONSTER_ATTACK_COOLDOWN_TICKS),
        }
    }
}

/// Projectile state. `consumed` bullets are despawned by the cleanup
/// sweep at the end of the tick that landed them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub damage: i32,
    pub weapon: WeaponKind,
    pub spawned_at_tick: u64,
    pub consumed: bool,
}

/// Optional stat payload on a boosted gem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GemBoost {
    pub kind: GemBoostKind,
    pub amount: i32,
    pub duration_ticks: u64,
}

/// An experience gem lying in the world. `collected` gems have had
/// their effect applied and await the cleanup sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Gem {
    pub amount: u32,
    pub boost: Option<GemBoost>,
    pub collected: bool,
}
