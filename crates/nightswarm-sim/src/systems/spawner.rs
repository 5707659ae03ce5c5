//! Monster spawner — adds one monster per cooldown interval at a
//! uniform random world coordinate.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nightswarm_core::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use nightswarm_core::types::CooldownGate;

use crate::world_setup;

/// Check the spawn gate and spawn a monster when it is ready.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, gate: &mut CooldownGate, now: u64) {
    if !gate.is_ready(now) {
        return;
    }

    let x = rng.gen_range(0.0..WORLD_WIDTH);
    let y = rng.gen_range(0.0..WORLD_HEIGHT);
    world_setup::spawn_monster(world, x, y);
    gate.trigger(now);

    log::debug!("Spawned monster at ({x:.1}, {y:.1})");
}
