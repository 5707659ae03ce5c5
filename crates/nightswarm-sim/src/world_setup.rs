//! Entity spawn factories.
//!
//! Creates the player, monsters, bullets and gems with their component
//! bundles. Only the engine calls these with a live world.

use glam::DVec2;
use hecs::World;

use nightswarm_core::components::*;
use nightswarm_core::constants::*;
use nightswarm_core::enums::{GemBoostKind, WeaponKind};
use nightswarm_core::records::{GemRecord, PlayerRecord};
use nightswarm_core::types::{Position, Velocity};

use crate::weapons::BulletSpawn;

/// Spawn the player from a persisted record. Missing fields were already
/// defaulted at deserialization; an unknown weapon name keeps the
/// constructor default (pistol), and out-of-range health values are
/// clamped rather than rejected.
pub fn spawn_player_from_record(world: &mut World, record: &PlayerRecord) -> hecs::Entity {
    let stats = PlayerStats {
        speed: record.speed,
        damage: record.damage,
        defense: record.defense,
        autoheal: record.autoheal,
        crit_chance: record.crit_chance,
        attack_speed: record.attack_speed,
        xp_multiplier: record.xp_multiplier,
    };

    let mut weapon = match WeaponKind::from_name(&record.weapon_type) {
        Some(kind) => Weapon::of_kind(kind),
        None => {
            log::warn!(
                "Unknown weapon type {:?} in save data, keeping default",
                record.weapon_type
            );
            Weapon::pistol()
        }
    };
    weapon.gate.ready_at = record.last_shot_time;

    // Tampered saves may carry a non-positive maximum.
    let max_health = record.max_health.max(1);

    world.spawn((
        Player,
        Position::new(record.pos_x, record.pos_y),
        Health {
            current: record.health.clamp(0, max_health),
            max: max_health,
        },
        stats,
        Experience {
            amount: record.experience,
            level: record.level,
        },
        weapon,
        AutoHealGate::default(),
        ActiveBoosts::default(),
        Hitbox {
            half_extent: PLAYER_HITBOX,
        },
    ))
}

/// Spawn a monster at the given world coordinate.
pub fn spawn_monster(world: &mut World, x: f64, y: f64) -> hecs::Entity {
    world.spawn((
        Monster,
        Position::new(x, y),
        Health::full(MONSTER_HEALTH),
        MonsterProfile::default(),
        Hitbox {
            half_extent: MONSTER_HITBOX,
        },
    ))
}

/// Spawn a bullet from a weapon's spawn request. The velocity points
/// from source to target at the weapon's bullet speed per tick; an
/// identical source and target yields a zero velocity rather than a
/// division by zero.
pub fn spawn_bullet(world: &mut World, spawn: BulletSpawn, now: u64) -> hecs::Entity {
    let dir = DVec2::new(spawn.target.x - spawn.src.x, spawn.target.y - spawn.src.y);
    let velocity = if dir.length_squared() > 0.0 {
        let v = dir.normalize() * spawn.speed;
        Velocity::new(v.x, v.y)
    } else {
        Velocity::default()
    };

    world.spawn((
        Bullet {
            damage: spawn.damage,
            weapon: spawn.weapon,
            spawned_at_tick: now,
            consumed: false,
        },
        spawn.src,
        velocity,
        Hitbox {
            half_extent: BULLET_HITBOX,
        },
    ))
}

/// Spawn an experience gem, optionally carrying a boost payload.
pub fn spawn_gem(
    world: &mut World,
    x: f64,
    y: f64,
    amount: u32,
    boost: Option<GemBoost>,
) -> hecs::Entity {
    world.spawn((
        Gem {
            amount,
            boost,
            collected: false,
        },
        Position::new(x, y),
        Hitbox {
            half_extent: GEM_HITBOX,
        },
    ))
}

/// Spawn a gem from its persisted record. A boosted record missing a
/// kind falls back to Speed; a missing duration gets the default.
pub fn spawn_gem_from_record(world: &mut World, record: &GemRecord) -> hecs::Entity {
    let boost = record.boost.map(|amount| GemBoost {
        kind: record.kind.unwrap_or(GemBoostKind::Speed),
        amount,
        duration_ticks: record.duration.unwrap_or(BOOST_DURATION_TICKS),
    });
    spawn_gem(world, record.pos_x, record.pos_y, record.amount, boost)
}

/// Build the persisted records for all gems lying in the world.
pub fn gem_records(world: &World) -> Vec<GemRecord> {
    world
        .query::<(&Gem, &Position)>()
        .iter()
        .filter(|(_entity, (gem, _pos))| !gem.collected)
        .map(|(_entity, (gem, pos))| GemRecord {
            pos_x: pos.x,
            pos_y: pos.y,
            amount: gem.amount,
            boost: gem.boost.map(|b| b.amount),
            duration: gem.boost.map(|b| b.duration_ticks),
            kind: gem.boost.map(|b| b.kind),
        })
        .collect()
}

/// Build the persisted record for the current player state.
/// Returns None when no session has spawned a player yet.
pub fn player_record(world: &World) -> Option<PlayerRecord> {
    let mut query = world
        .query::<(&Position, &Health, &PlayerStats, &Experience, &Weapon)>()
        .with::<&Player>();
    let (_entity, (pos, health, stats, exp, weapon)) = query.iter().next()?;

    Some(PlayerRecord {
        health: health.current,
        max_health: health.max,
        last_shot_time: weapon.gate.ready_at,
        experience: exp.amount,
        xp_multiplier: stats.xp_multiplier,
        level: exp.level,
        speed: stats.speed,
        damage: stats.damage,
        defense: stats.defense,
        autoheal: stats.autoheal,
        crit_chance: stats.crit_chance,
        attack_speed: stats.attack_speed,
        pos_x: pos.x,
        pos_y: pos.y,
        weapon_type: weapon.kind.as_name().to_string(),
    })
}
