//! Weapon firing behavior.
//!
//! Weapons never touch the ECS world directly: `fire` appends spawn
//! requests to a buffer and only the engine inserts the resulting
//! bullet entities. A fire attempt while the gate is closed is a no-op;
//! the next ready tick picks it up naturally.

use glam::DVec2;

use nightswarm_core::components::Weapon;
use nightswarm_core::constants::SHOTGUN_SPREAD_RADIANS;
use nightswarm_core::enums::WeaponKind;
use nightswarm_core::types::Position;

/// A bullet the engine should insert into the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpawn {
    pub src: Position,
    pub target: Position,
    pub speed: f64,
    pub damage: i32,
    pub weapon: WeaponKind,
}

/// Fire `weapon` from `src` toward `target` at tick `now`.
///
/// `cooldown_reduction` is the player's attack-speed stat: ticks shaved
/// off the gate's re-arm (the effective cooldown never drops below 1).
/// `damage_bonus` is the live damage modifier from boosts.
pub fn fire(
    weapon: &mut Weapon,
    src: Position,
    target: Position,
    now: u64,
    cooldown_reduction: u64,
    damage_bonus: i32,
    out: &mut Vec<BulletSpawn>,
) {
    if !weapon.gate.is_ready(now) {
        return;
    }

    let damage = weapon.bullet_damage + damage_bonus;
    match weapon.kind {
        WeaponKind::Pistol | WeaponKind::Minigun => {
            out.push(BulletSpawn {
                src,
                target,
                speed: weapon.bullet_speed,
                damage,
                weapon: weapon.kind,
            });
        }
        WeaponKind::Shotgun => {
            spread_fire(weapon, src, target, damage, out);
        }
    }

    let effective = weapon.gate.duration.saturating_sub(cooldown_reduction).max(1);
    weapon.gate.ready_at = now + effective;
}

/// Emit the five shotgun pellets at fixed angular offsets around the
/// source→target direction. Each pellet is aimed one bullet-speed unit
/// along its rotated direction, not teleported to the remote target.
fn spread_fire(
    weapon: &Weapon,
    src: Position,
    target: Position,
    damage: i32,
    out: &mut Vec<BulletSpawn>,
) {
    let base = DVec2::new(target.x - src.x, target.y - src.y);
    // Identical source and target: skip normalization, keep (0, 0).
    let dir = if base.length_squared() > 0.0 {
        base.normalize()
    } else {
        DVec2::ZERO
    };

    for theta in SHOTGUN_SPREAD_RADIANS {
        let (sin, cos) = theta.sin_cos();
        let rotated = DVec2::new(dir.x * cos - dir.y * sin, dir.x * sin + dir.y * cos);
        out.push(BulletSpawn {
            src,
            target: Position::new(
                src.x + rotated.x * weapon.bullet_speed,
                src.y + rotated.y * weapon.bullet_speed,
            ),
            speed: weapon.bullet_speed,
            damage,
            weapon: weapon.kind,
        });
    }
}
