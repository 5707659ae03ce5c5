//! Combat resolution: bullet hits, monster attacks, gem pickup.
//!
//! Overlap decisions read positions as of the start of this system;
//! health and experience mutations are applied afterward so no entity
//! observes a half-resolved tick.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nightswarm_core::components::{
    ActiveBoosts, Boost, Bullet, Experience, Gem, Health, Hitbox, Monster, MonsterProfile, Player,
    PlayerStats,
};
use nightswarm_core::enums::GemBoostKind;
use nightswarm_core::events::GameEvent;
use nightswarm_core::types::Position;

use super::ai::overlaps;
use super::progression::effective_stats;

/// The damage pipeline shared by every damageable entity: incoming
/// damage is reduced by defense (never below zero applied) and health
/// is clamped at zero. Returns the applied amount.
pub fn apply_damage(health: &mut Health, amount: i32, defense: i32) -> i32 {
    let applied = (amount - defense).max(0);
    health.current = (health.current - applied).max(0);
    applied
}

/// Resolve all interaction classes for one tick.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, now: u64, events: &mut Vec<GameEvent>) {
    let Some((player_pos, player_half, eff)) = player_state(world, now) else {
        return;
    };

    resolve_bullet_hits(world, rng, eff.crit_chance);
    resolve_monster_attacks(world, now, player_pos, eff.defense, events);
    resolve_gem_pickups(world, now, player_pos, player_half, eff.xp_multiplier, events);
}

fn player_state(world: &World, now: u64) -> Option<(Position, f64, PlayerStats)> {
    let mut query = world
        .query::<(&Position, &Hitbox, &PlayerStats, &ActiveBoosts)>()
        .with::<&Player>();
    let (_entity, (pos, hitbox, stats, boosts)) = query.iter().next()?;
    Some((*pos, hitbox.half_extent, effective_stats(stats, boosts, now)))
}

/// Each live bullet damages at most one monster: the first overlapping
/// one in stable iteration order. Monsters have no defense stat.
fn resolve_bullet_hits(world: &mut World, rng: &mut ChaCha8Rng, crit_chance: u32) {
    let monsters: Vec<(Entity, Position, f64)> = world
        .query::<(&Position, &Hitbox)>()
        .with::<&Monster>()
        .iter()
        .map(|(entity, (pos, hitbox))| (entity, *pos, hitbox.half_extent))
        .collect();

    let mut hits: Vec<(Entity, i32)> = Vec::new();
    for (_bullet_entity, (bullet, pos, hitbox)) in
        world.query_mut::<(&mut Bullet, &Position, &Hitbox)>()
    {
        if bullet.consumed {
            continue;
        }
        let target = monsters
            .iter()
            .find(|(_, m_pos, m_half)| overlaps(pos, hitbox.half_extent, m_pos, *m_half));
        if let Some(&(monster, _, _)) = target {
            bullet.consumed = true;
            let mut damage = bullet.damage;
            if crit_chance > 0 && rng.gen_range(0..100) < crit_chance {
                damage *= 2;
            }
            hits.push((monster, damage));
        }
    }

    for (monster, damage) in hits {
        if let Ok(mut health) = world.get::<&mut Health>(monster) {
            apply_damage(&mut health, damage, 0);
        }
    }
}

/// A monster whose attack gate is ready and whose distance to the
/// player is strictly inside its attack range lands one attack and
/// re-arms its gate. A closed gate is simply skipped, never retried.
fn resolve_monster_attacks(
    world: &mut World,
    now: u64,
    player_pos: Position,
    defense: i32,
    events: &mut Vec<GameEvent>,
) {
    let mut incoming: Vec<i32> = Vec::new();
    for (_entity, (_monster, pos, profile)) in
        world.query_mut::<(&Monster, &Position, &mut MonsterProfile)>()
    {
        if !profile.attack_gate.is_ready(now) {
            continue;
        }
        if pos.distance_to(&player_pos) < profile.attack_range {
            incoming.push(profile.damage);
            profile.attack_gate.trigger(now);
        }
    }

    if incoming.is_empty() {
        return;
    }

    for (_entity, (_player, health)) in world.query_mut::<(&Player, &mut Health)>() {
        for amount in &incoming {
            let applied = apply_damage(health, *amount, defense);
            if applied > 0 {
                events.push(GameEvent::PlayerHit { amount: applied });
            }
        }
    }
}

/// Overlapping gems are collected exactly once: experience (scaled by
/// the player's multiplier) goes to the progression machine, boost
/// payloads join the expiring modifier list, and health boosts heal
/// immediately.
fn resolve_gem_pickups(
    world: &mut World,
    now: u64,
    player_pos: Position,
    player_half: f64,
    xp_multiplier: u32,
    events: &mut Vec<GameEvent>,
) {
    let mut xp_gain: u32 = 0;
    let mut new_boosts: Vec<Boost> = Vec::new();
    let mut heal: i32 = 0;

    for (_entity, (gem, pos, hitbox)) in world.query_mut::<(&mut Gem, &Position, &Hitbox)>() {
        if gem.collected || !overlaps(&player_pos, player_half, pos, hitbox.half_extent) {
            continue;
        }
        gem.collected = true;

        // Saves can carry arbitrarily large multipliers; saturate
        // instead of overflowing.
        let scaled = gem.amount.saturating_mul(xp_multiplier);
        xp_gain = xp_gain.saturating_add(scaled);
        events.push(GameEvent::GemCollected { amount: scaled });

        if let Some(boost) = gem.boost {
            match boost.kind {
                GemBoostKind::Health => heal += boost.amount,
                _ => new_boosts.push(Boost {
                    kind: boost.kind,
                    amount: boost.amount,
                    expires_at_tick: now + boost.duration_ticks,
                }),
            }
        }
    }

    if xp_gain == 0 && new_boosts.is_empty() && heal == 0 {
        return;
    }

    for (_entity, (_player, exp, health, boosts)) in
        world.query_mut::<(&Player, &mut Experience, &mut Health, &mut ActiveBoosts)>()
    {
        exp.amount = exp.amount.saturating_add(xp_gain);
        boosts.boosts.extend(new_boosts.iter().copied());
        if heal > 0 && health.current > 0 {
            health.current = (health.current + heal).min(health.max);
        }
    }
}
