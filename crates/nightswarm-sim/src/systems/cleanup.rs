//! Cleanup sweep: removes dead monsters (rolling their gem drops),
//! spent or expired bullets, and collected gems.
//!
//! Runs last in the tick so a monster driven to zero health is gone
//! before the next tick's collision pass. Uses a pre-allocated buffer
//! to avoid per-tick allocation.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nightswarm_core::components::{Bullet, Gem, GemBoost, Health, Monster};
use nightswarm_core::constants::*;
use nightswarm_core::enums::GemBoostKind;
use nightswarm_core::events::GameEvent;
use nightswarm_core::types::Position;

use crate::world_setup;

/// Run the sweep for one tick.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    now: u64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    despawn_buffer.clear();
    let mut drop_sites: Vec<Position> = Vec::new();

    for (entity, (_monster, health, pos)) in world.query_mut::<(&Monster, &Health, &Position)>() {
        if health.current == 0 {
            despawn_buffer.push(entity);
            drop_sites.push(*pos);
            events.push(GameEvent::MonsterSlain { x: pos.x, y: pos.y });
        }
    }

    for (entity, (bullet, pos)) in world.query_mut::<(&Bullet, &Position)>() {
        let out_of_bounds =
            pos.x < 0.0 || pos.x > WORLD_WIDTH || pos.y < 0.0 || pos.y > WORLD_HEIGHT;
        let expired = now.saturating_sub(bullet.spawned_at_tick) >= BULLET_TTL_TICKS;
        if bullet.consumed || out_of_bounds || expired {
            despawn_buffer.push(entity);
        }
    }

    for (entity, gem) in world.query_mut::<&Gem>() {
        if gem.collected {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for pos in drop_sites {
        roll_gem_drop(world, rng, pos);
    }
}

/// Every slain monster drops a gem at its death position; a small
/// fraction carry a temporary boost payload.
fn roll_gem_drop(world: &mut World, rng: &mut ChaCha8Rng, pos: Position) {
    let amount = rng.gen_range(GEM_AMOUNT_MIN..=GEM_AMOUNT_MAX);
    let boost = if rng.gen_bool(BOOSTED_GEM_CHANCE) {
        Some(random_boost(rng))
    } else {
        None
    };
    world_setup::spawn_gem(world, pos.x, pos.y, amount, boost);
}

fn random_boost(rng: &mut ChaCha8Rng) -> GemBoost {
    let (kind, amount) = match rng.gen_range(0..4) {
        0 => (GemBoostKind::Speed, SPEED_BOOST_AMOUNT),
        1 => (GemBoostKind::Damage, DAMAGE_BOOST_AMOUNT),
        2 => (GemBoostKind::Defence, DEFENCE_BOOST_AMOUNT),
        _ => (GemBoostKind::Health, HEALTH_BOOST_AMOUNT),
    };
    GemBoost {
        kind,
        amount,
        duration_ticks: BOOST_DURATION_TICKS,
    }
}
