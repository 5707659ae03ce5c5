//! Player update: movement intent, autoheal, autonomous firing.

use glam::DVec2;
use hecs::World;

use nightswarm_core::components::{
    ActiveBoosts, AutoHealGate, Health, Monster, Player, PlayerStats, Weapon,
};
use nightswarm_core::types::Position;

use super::movement::apply_move;
use super::progression::effective_stats;
use crate::weapons::{self, BulletSpawn};

/// Run the player update for one tick.
///
/// `intent` is the per-axis movement intent (-1/0/+1 each axis) from
/// the input collaborator. Bullet spawn requests land in `bullets`;
/// the engine inserts them after this system returns.
pub fn run(world: &mut World, intent: (i8, i8), now: u64, bullets: &mut Vec<BulletSpawn>) {
    let nearest = nearest_monster(world);

    for (_entity, (_player, pos, health, stats, boosts, heal_gate, weapon)) in world.query_mut::<(
        &Player,
        &mut Position,
        &mut Health,
        &PlayerStats,
        &ActiveBoosts,
        &mut AutoHealGate,
        &mut Weapon,
    )>() {
        let eff = effective_stats(stats, boosts, now);

        if intent != (0, 0) {
            let dir = DVec2::new(intent.0 as f64, intent.1 as f64);
            apply_move(pos, dir, eff.speed);
        }

        if heal_gate.0.is_ready(now) {
            if eff.autoheal > 0 && health.current > 0 {
                health.current = (health.current + eff.autoheal).min(health.max);
            }
            heal_gate.0.trigger(now);
        }

        if let Some(target) = nearest {
            let damage_bonus = eff.damage - stats.damage;
            weapons::fire(weapon, *pos, target, now, eff.attack_speed, damage_bonus, bullets);
        }
    }
}

/// Position of the monster nearest to the player by squared distance,
/// or None when the world has no monsters (the player holds fire).
fn nearest_monster(world: &World) -> Option<Position> {
    let player_pos = {
        let mut query = world.query::<&Position>().with::<&Player>();
        let (_entity, pos) = query.iter().next()?;
        *pos
    };

    let mut query = world.query::<(&Monster, &Position)>();
    query
        .iter()
        .map(|(_entity, (_monster, pos))| *pos)
        .min_by(|a, b| {
            a.distance_sq_to(&player_pos)
                .total_cmp(&b.distance_sq_to(&player_pos))
        })
}
