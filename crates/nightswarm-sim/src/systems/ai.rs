//! Monster AI: aggro direction toward the player plus pairwise
//! collision avoidance.
//!
//! All reads come from a snapshot of positions taken at the start of
//! the system; moves are applied only after every decision is made, so
//! no monster observes another's intermediate position.

use std::collections::HashSet;

use glam::DVec2;
use hecs::{Entity, World};

use nightswarm_core::components::{Hitbox, Monster, MonsterProfile, Player};
use nightswarm_core::types::Position;

use super::movement::{apply_move, axis_sign};

/// Axis-aligned overlap test between two square extents.
pub fn overlaps(a: &Position, a_half: f64, b: &Position, b_half: f64) -> bool {
    let reach = a_half + b_half;
    (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
}

/// Run monster AI and avoidance for one tick.
pub fn run(world: &mut World) {
    let player_pos = {
        let mut query = world.query::<&Position>().with::<&Player>();
        match query.iter().next() {
            Some((_entity, pos)) => *pos,
            None => return,
        }
    };

    // Start-of-tick snapshot of the live monster set.
    let monsters: Vec<(Entity, Position, f64, f64)> = world
        .query::<(&Position, &MonsterProfile, &Hitbox)>()
        .with::<&Monster>()
        .iter()
        .map(|(entity, (pos, profile, hitbox))| (entity, *pos, profile.speed, hitbox.half_extent))
        .collect();

    // Pairwise O(n²) overlap scan. In each colliding pair only the
    // member closer to the player moves this tick; ties keep the
    // earlier monster in snapshot order, which is deterministic.
    let mut in_pair: HashSet<Entity> = HashSet::new();
    let mut movers: HashSet<Entity> = HashSet::new();
    for i in 0..monsters.len() {
        for j in (i + 1)..monsters.len() {
            let (a, a_pos, _, a_half) = monsters[i];
            let (b, b_pos, _, b_half) = monsters[j];
            if !overlaps(&a_pos, a_half, &b_pos, b_half) {
                continue;
            }
            in_pair.insert(a);
            in_pair.insert(b);
            if b_pos.distance_sq_to(&player_pos) < a_pos.distance_sq_to(&player_pos) {
                movers.insert(b);
            } else {
                movers.insert(a);
            }
        }
    }

    // Decide every move against the snapshot, then apply.
    let mut moves: Vec<(Entity, DVec2, f64)> = Vec::with_capacity(monsters.len());
    for &(entity, pos, speed, _) in &monsters {
        if in_pair.contains(&entity) && !movers.contains(&entity) {
            continue;
        }
        let dir = DVec2::new(
            axis_sign(player_pos.x - pos.x),
            axis_sign(player_pos.y - pos.y),
        );
        // Monster already at the player's position: no movement call.
        if dir == DVec2::ZERO {
            continue;
        }
        moves.push((entity, dir, speed));
    }

    for (entity, dir, speed) in moves {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            apply_move(&mut pos, dir, speed);
        }
    }
}
