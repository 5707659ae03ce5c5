//! Snapshot builder — flattens the ECS world into the per-tick
//! `WorldSnapshot` handed to display/audio collaborators.

use hecs::World;

use nightswarm_core::components::{
    Bullet, Experience, Gem, Health, Monster, Player, Weapon,
};
use nightswarm_core::enums::GamePhase;
use nightswarm_core::events::GameEvent;
use nightswarm_core::state::*;
use nightswarm_core::types::{Position, SimTime};

use super::progression::xp_to_next_level;

/// Build the snapshot for the tick that just ran. `events` is the
/// drained event buffer; ownership moves into the snapshot.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<GameEvent>,
) -> WorldSnapshot {
    let player = build_player_view(world);

    let monsters = world
        .query::<(&Monster, &Position, &Health)>()
        .iter()
        .map(|(_entity, (_monster, pos, health))| MonsterView {
            position: *pos,
            health: health.current,
        })
        .collect();

    let bullets = world
        .query::<(&Bullet, &Position)>()
        .iter()
        .filter(|(_entity, (bullet, _pos))| !bullet.consumed)
        .map(|(_entity, (bullet, pos))| BulletView {
            position: *pos,
            weapon: bullet.weapon,
        })
        .collect();

    let gems = world
        .query::<(&Gem, &Position)>()
        .iter()
        .filter(|(_entity, (gem, _pos))| !gem.collected)
        .map(|(_entity, (gem, pos))| GemView {
            position: *pos,
            amount: gem.amount,
            boosted: gem.boost.is_some(),
        })
        .collect();

    WorldSnapshot {
        time: *time,
        phase,
        player,
        monsters,
        bullets,
        gems,
        events,
    }
}

/// Flatten the player entity into its display view, or the default
/// view when no session has spawned one.
pub fn build_player_view(world: &World) -> PlayerView {
    let mut query = world
        .query::<(&Position, &Health, &Experience, &Weapon)>()
        .with::<&Player>();
    match query.iter().next() {
        Some((_entity, (pos, health, exp, weapon))) => PlayerView {
            position: *pos,
            health: health.current,
            max_health: health.max,
            level: exp.level,
            experience: exp.amount,
            xp_to_next_level: xp_to_next_level(exp.level),
            weapon: weapon.kind,
        },
        None => PlayerView::default(),
    }
}
