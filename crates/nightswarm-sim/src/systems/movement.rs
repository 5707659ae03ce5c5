//! Movement primitives and bullet kinematics.

use glam::DVec2;
use hecs::World;

use nightswarm_core::components::Bullet;
use nightswarm_core::types::{Position, Velocity};

/// Displace `pos` by `speed` along `dir`. Any non-zero direction is
/// rescaled to unit length first, so diagonal input moves no faster
/// than axis-aligned input. A zero direction leaves the position as is.
pub fn apply_move(pos: &mut Position, dir: DVec2, speed: f64) {
    if dir.length_squared() == 0.0 {
        return;
    }
    let unit = dir.normalize();
    pos.x += unit.x * speed;
    pos.y += unit.y * speed;
}

/// Advance every bullet by its per-tick velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel, _bullet)) in world.query_mut::<(&mut Position, &Velocity, &Bullet)>() {
        pos.x += vel.x;
        pos.y += vel.y;
    }
}

/// Per-axis sign of a delta: -1, 0 or +1.
pub fn axis_sign(delta: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}
