//! Simulation constants and tuning parameters.
//!
//! All durations are denominated in ticks at TICK_RATE.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// World width in world units.
pub const WORLD_WIDTH: f64 = 1600.0;

/// World height in world units.
pub const WORLD_HEIGHT: f64 = 1200.0;

// --- Player ---

/// Starting and default maximum health.
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Base movement speed (world units per tick before normalization).
pub const PLAYER_SPEED: f64 = 5.0;

/// Ticks between autoheal applications (one second).
pub const AUTOHEAL_INTERVAL_TICKS: u64 = 60;

/// Base damage stat.
pub const PLAYER_BASE_DAMAGE: i32 = 10;

/// Base defense stat.
pub const PLAYER_BASE_DEFENSE: i32 = 0;

/// Player hitbox half-extent.
pub const PLAYER_HITBOX: f64 = 16.0;

// --- Monsters ---

/// Monster starting health.
pub const MONSTER_HEALTH: i32 = 10;

/// Monster movement speed (world units per tick).
pub const MONSTER_SPEED: f64 = 2.0;

/// Monster contact damage.
pub const MONSTER_DAMAGE: i32 = 10;

/// Monster attack range (strict upper bound on attack distance).
pub const MONSTER_ATTACK_RANGE: f64 = 50.0;

/// Ticks between monster attacks.
pub const MONSTER_ATTACK_COOLDOWN_TICKS: u64 = 60;

/// Monster hitbox half-extent.
pub const MONSTER_HITBOX: f64 = 16.0;

// --- Spawner ---

/// Ticks between monster spawns.
pub const SPAWN_INTERVAL_TICKS: u64 = 60;

// --- Weapons ---

/// Pistol: cooldown ticks, bullet speed, bullet damage.
pub const PISTOL_COOLDOWN_TICKS: u64 = 30;
pub const PISTOL_BULLET_SPEED: f64 = 5.0;
pub const PISTOL_BULLET_DAMAGE: i32 = 10;

/// Shotgun: cooldown ticks, bullet speed, bullet damage.
pub const SHOTGUN_COOLDOWN_TICKS: u64 = 36;
pub const SHOTGUN_BULLET_SPEED: f64 = 4.0;
pub const SHOTGUN_BULLET_DAMAGE: i32 = 10;

/// Angular offsets of the five shotgun pellets (radians).
pub const SHOTGUN_SPREAD_RADIANS: [f64; 5] = [-0.1, -0.05, 0.0, 0.05, 0.1];

/// Minigun: cooldown ticks, bullet speed, bullet damage.
pub const MINIGUN_COOLDOWN_TICKS: u64 = 6;
pub const MINIGUN_BULLET_SPEED: f64 = 6.0;
pub const MINIGUN_BULLET_DAMAGE: i32 = 8;

// --- Bullets ---

/// Bullet hitbox half-extent.
pub const BULLET_HITBOX: f64 = 8.0;

/// Ticks a bullet lives before despawning if it hits nothing.
pub const BULLET_TTL_TICKS: u64 = 300;

// --- Experience gems ---

/// Gem hitbox half-extent (pickup radius).
pub const GEM_HITBOX: f64 = 12.0;

/// Base experience needed to leave level 1; doubles per level after.
pub const XP_BASE: u32 = 2;

/// Level at which the shotgun is unlocked.
pub const SHOTGUN_UNLOCK_LEVEL: u32 = 4;

/// Level at which the minigun is unlocked.
pub const MINIGUN_UNLOCK_LEVEL: u32 = 6;

// --- Gem drops ---

/// Chance (0.0..1.0) that a slain monster drops a boosted gem
/// instead of a plain one.
pub const BOOSTED_GEM_CHANCE: f64 = 0.1;

/// Plain gem experience amount range (inclusive).
pub const GEM_AMOUNT_MIN: u32 = 1;
pub const GEM_AMOUNT_MAX: u32 = 3;

/// Boost magnitudes per kind.
pub const SPEED_BOOST_AMOUNT: i32 = 2;
pub const DAMAGE_BOOST_AMOUNT: i32 = 5;
pub const DEFENCE_BOOST_AMOUNT: i32 = 5;
pub const HEALTH_BOOST_AMOUNT: i32 = 20;

/// Duration of a temporary boost (five seconds).
pub const BOOST_DURATION_TICKS: u64 = 300;
