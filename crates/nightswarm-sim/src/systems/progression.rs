//! Progression state machine: experience rollover, level perks,
//! weapon unlocks, and temporary boost expiry.

use hecs::World;

use nightswarm_core::components::{
    ActiveBoosts, Experience, Health, Player, PlayerStats, Weapon,
};
use nightswarm_core::constants::{MINIGUN_UNLOCK_LEVEL, SHOTGUN_UNLOCK_LEVEL, XP_BASE};
use nightswarm_core::enums::GemBoostKind;
use nightswarm_core::events::GameEvent;

/// Experience needed to leave `level`: 2 at level 1, doubling per
/// level after that. Saturates instead of overflowing at high levels.
pub fn xp_to_next_level(level: u32) -> u32 {
    if level <= 1 {
        return XP_BASE;
    }
    XP_BASE.saturating_mul(2u32.saturating_pow(level - 1))
}

/// Base stats with all live boosts applied. Health boosts are applied
/// at pickup, so they never appear here.
pub fn effective_stats(base: &PlayerStats, boosts: &ActiveBoosts, now: u64) -> PlayerStats {
    let mut eff = *base;
    for boost in boosts.boosts.iter().filter(|b| b.expires_at_tick > now) {
        match boost.kind {
            GemBoostKind::Speed => eff.speed += boost.amount as f64,
            GemBoostKind::Damage => eff.damage += boost.amount,
            GemBoostKind::Defence => eff.defense += boost.amount,
            GemBoostKind::Health => {}
        }
    }
    eff
}

/// Consume accumulated experience into level-ups. A single large gain
/// can cross several thresholds, so this loops until the remaining
/// experience is strictly below the current level's threshold.
pub fn apply_level_rollover(
    exp: &mut Experience,
    health: &mut Health,
    weapon: &mut Weapon,
    events: &mut Vec<GameEvent>,
) {
    while exp.amount >= xp_to_next_level(exp.level) {
        exp.amount -= xp_to_next_level(exp.level);
        exp.level += 1;
        events.push(GameEvent::LevelUp { level: exp.level });
        apply_level_perks(exp.level, health, weapon, events);
    }
}

/// Perks on reaching `level`: health compounds multiplicatively, and
/// specific levels swap the weapon. The pistol is the level-1 loadout
/// via the player constructor; equipping replaces the whole weapon,
/// discarding the previous gate.
fn apply_level_perks(
    level: u32,
    health: &mut Health,
    weapon: &mut Weapon,
    events: &mut Vec<GameEvent>,
) {
    health.current = health.current.saturating_mul(level as i32);
    health.max = health.max.saturating_mul(level as i32);

    let unlock = if level == SHOTGUN_UNLOCK_LEVEL {
        Some(Weapon::shotgun())
    } else if level == MINIGUN_UNLOCK_LEVEL {
        Some(Weapon::minigun())
    } else {
        None
    };
    if let Some(new_weapon) = unlock {
        *weapon = new_weapon;
        events.push(GameEvent::WeaponEquipped {
            kind: new_weapon.kind,
        });
        log::info!("Weapon unlocked at level {level}: {:?}", new_weapon.kind);
    }
}

/// Run the progression machine for one tick: resolve any experience
/// overflow left by pickups and drop expired boosts.
pub fn run(world: &mut World, now: u64, events: &mut Vec<GameEvent>) {
    for (_entity, (_player, exp, health, weapon, boosts)) in world.query_mut::<(
        &Player,
        &mut Experience,
        &mut Health,
        &mut Weapon,
        &mut ActiveBoosts,
    )>() {
        apply_level_rollover(exp, health, weapon, events);
        boosts.boosts.retain(|b| b.expires_at_tick > now);
    }
}
