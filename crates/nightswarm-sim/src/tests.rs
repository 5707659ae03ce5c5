//! Tests for the simulation engine, combat resolution, avoidance,
//! weapons and progression.

use glam::DVec2;

use nightswarm_core::commands::SessionCommand;
use nightswarm_core::components::*;
use nightswarm_core::constants::*;
use nightswarm_core::enums::*;
use nightswarm_core::events::GameEvent;
use nightswarm_core::records::PlayerRecord;
use nightswarm_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::combat::apply_damage;
use crate::systems::movement::{apply_move, axis_sign};
use crate::systems::progression::{apply_level_rollover, effective_stats, xp_to_next_level};
use crate::weapons::{self, BulletSpawn};

const CENTER_X: f64 = WORLD_WIDTH / 2.0;
const CENTER_Y: f64 = WORLD_HEIGHT / 2.0;

fn quiet_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        spawning: false,
    });
    engine.queue_command(SessionCommand::NewSession);
    engine.tick();
    engine
}

fn monster_pos(engine: &SimulationEngine, entity: hecs::Entity) -> Position {
    *engine.world().get::<&Position>(entity).unwrap()
}

/// Bulk up a monster so return fire cannot kill it mid-test.
fn fortify_monster(engine: &mut SimulationEngine, entity: hecs::Entity) {
    let mut health = engine.world_mut().get::<&mut Health>(entity).unwrap();
    health.max = 1000;
    health.current = 1000;
}

fn player_snapshot(engine: &SimulationEngine) -> (Experience, Health, WeaponKind) {
    let mut query = engine
        .world()
        .query::<(&Player, &Experience, &Health, &Weapon)>();
    let (_entity, (_player, exp, health, weapon)) = query.iter().next().unwrap();
    (*exp, *health, weapon.kind)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(SessionCommand::NewSession);
    engine_b.queue_command(SessionCommand::NewSession);

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(SessionCommand::NewSession);
    engine_b.queue_command(SessionCommand::NewSession);

    let mut diverged = false;
    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Spawning ----

#[test]
fn test_spawner_cadence() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(SessionCommand::NewSession);

    // Spawns happen at ticks 0, 60, 120, 180. Every spawned monster is
    // either still alive or was reported slain.
    let mut slain = 0u32;
    for i in 0..200 {
        let snap = engine.tick();
        slain += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::MonsterSlain { .. }))
            .count() as u32;
        if i == 0 {
            // Keep the player alive for the full run so the session
            // never ends early.
            for (_entity, (_player, health)) in
                engine.world_mut().query_mut::<(&Player, &mut Health)>()
            {
                health.max = i32::MAX / 2;
                health.current = health.max;
            }
        }
    }

    let live = {
        let mut query = engine.world().query::<&Monster>();
        query.iter().count() as u32
    };
    assert_eq!(live + slain, 4, "expected 4 spawns over 200 ticks");
}

// ---- Movement primitives ----

#[test]
fn test_apply_move_normalizes_diagonals() {
    let mut pos = Position::new(0.0, 0.0);
    apply_move(&mut pos, DVec2::new(1.0, 1.0), 5.0);
    let travelled = (pos.x * pos.x + pos.y * pos.y).sqrt();
    assert!((travelled - 5.0).abs() < 1e-9, "diagonal not normalized");

    let before = pos;
    apply_move(&mut pos, DVec2::ZERO, 5.0);
    assert_eq!(pos, before, "zero direction must not move");
}

#[test]
fn test_axis_sign() {
    assert_eq!(axis_sign(3.2), 1.0);
    assert_eq!(axis_sign(-0.1), -1.0);
    assert_eq!(axis_sign(0.0), 0.0);
}

// ---- Avoidance ----

#[test]
fn test_overlapping_pair_only_closer_monster_moves() {
    let mut engine = quiet_engine(1);
    // Player sits at the world center. A is closer to the player.
    let a = engine.add_monster(CENTER_X + 100.0, CENTER_Y);
    let b = engine.add_monster(CENTER_X + 116.0, CENTER_Y);
    engine.tick();

    let a_pos = monster_pos(&engine, a);
    let b_pos = monster_pos(&engine, b);
    assert_eq!(
        a_pos.x,
        CENTER_X + 100.0 - MONSTER_SPEED,
        "closer monster should move toward the player"
    );
    assert_eq!(a_pos.y, CENTER_Y);
    assert_eq!(b_pos.x, CENTER_X + 116.0, "farther monster must not move");
}

#[test]
fn test_equidistant_pair_moves_exactly_one() {
    let mut engine = quiet_engine(1);
    let a = engine.add_monster(CENTER_X - 10.0, CENTER_Y);
    let b = engine.add_monster(CENTER_X + 10.0, CENTER_Y);
    // Both sit inside pistol reach; keep them alive through the tick.
    fortify_monster(&mut engine, a);
    fortify_monster(&mut engine, b);
    engine.tick();

    let a_moved = monster_pos(&engine, a).x != CENTER_X - 10.0;
    let b_moved = monster_pos(&engine, b).x != CENTER_X + 10.0;
    assert!(
        a_moved ^ b_moved,
        "exactly one of an equidistant pair moves per tick"
    );
}

#[test]
fn test_free_monster_moves_toward_player() {
    let mut engine = quiet_engine(1);
    let m = engine.add_monster(CENTER_X + 300.0, CENTER_Y + 300.0);
    engine.tick();

    let pos = monster_pos(&engine, m);
    // Diagonal sign vector, normalized to unit length by the move
    // primitive: each axis advances by speed / sqrt(2).
    let step = MONSTER_SPEED / 2.0_f64.sqrt();
    assert!((pos.x - (CENTER_X + 300.0 - step)).abs() < 1e-9);
    assert!((pos.y - (CENTER_Y + 300.0 - step)).abs() < 1e-9);
}

#[test]
fn test_monster_at_player_position_does_not_move() {
    let mut engine = quiet_engine(1);
    let m = engine.add_monster(CENTER_X, CENTER_Y);
    fortify_monster(&mut engine, m);
    engine.tick();

    let pos = monster_pos(&engine, m);
    assert_eq!(pos.x, CENTER_X);
    assert_eq!(pos.y, CENTER_Y);
}

// ---- Damage pipeline ----

#[test]
fn test_apply_damage_defense_mitigation() {
    let mut health = Health::full(100);
    assert_eq!(apply_damage(&mut health, 30, 10), 20);
    assert_eq!(health.current, 80);

    // Defense at or above the amount blocks everything.
    assert_eq!(apply_damage(&mut health, 10, 10), 0);
    assert_eq!(apply_damage(&mut health, 5, 10), 0);
    assert_eq!(health.current, 80);
}

#[test]
fn test_apply_damage_clamps_at_zero() {
    let mut health = Health::full(10);
    assert_eq!(apply_damage(&mut health, 500, 0), 500);
    assert_eq!(health.current, 0, "health never goes negative");
}

// ---- Weapons ----

#[test]
fn test_pistol_fires_one_bullet_and_gates() {
    let mut weapon = Weapon::pistol();
    let mut out = Vec::new();

    weapons::fire(
        &mut weapon,
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
        0,
        0,
        0,
        &mut out,
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].target, Position::new(10.0, 0.0));

    // Gate is closed now: a second fire in the same window is a no-op.
    weapons::fire(
        &mut weapon,
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
        1,
        0,
        0,
        &mut out,
    );
    assert_eq!(out.len(), 1, "closed gate must skip the fire");

    weapons::fire(
        &mut weapon,
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
        PISTOL_COOLDOWN_TICKS,
        0,
        0,
        &mut out,
    );
    assert_eq!(out.len(), 2, "gate reopens after its duration");
}

#[test]
fn test_shotgun_spread_geometry() {
    let mut weapon = Weapon::shotgun();
    let mut out = Vec::new();
    weapons::fire(
        &mut weapon,
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
        0,
        0,
        0,
        &mut out,
    );
    assert_eq!(out.len(), 5);

    // Middle pellet aims along the source→target ray, one bullet-speed
    // unit out.
    let middle = out[2];
    assert!((middle.target.x - SHOTGUN_BULLET_SPEED).abs() < 1e-9);
    assert!(middle.target.y.abs() < 1e-9);

    // Outermost pellets are rotated ±0.1 radians off that ray.
    for (pellet, expected) in [(out[0], -0.1), (out[4], 0.1)] {
        let angle = pellet.target.y.atan2(pellet.target.x);
        assert!(
            (angle - expected).abs() < 1e-9,
            "pellet angle {angle} != {expected}"
        );
    }
}

#[test]
fn test_shotgun_zero_length_direction() {
    let mut weapon = Weapon::shotgun();
    let mut out = Vec::new();
    let src = Position::new(5.0, 5.0);
    weapons::fire(&mut weapon, src, src, 0, 0, 0, &mut out);

    assert_eq!(out.len(), 5);
    for pellet in &out {
        assert_eq!(pellet.target, src, "zero direction must stay in place");
    }
}

#[test]
fn test_attack_speed_shortens_cooldown() {
    let mut weapon = Weapon::pistol();
    let mut out = Vec::new();
    weapons::fire(
        &mut weapon,
        Position::new(0.0, 0.0),
        Position::new(1.0, 0.0),
        0,
        10,
        0,
        &mut out,
    );
    assert_eq!(weapon.gate.ready_at, PISTOL_COOLDOWN_TICKS - 10);

    // The reduction saturates: the effective cooldown never hits zero.
    let mut rapid = Weapon::pistol();
    weapons::fire(
        &mut rapid,
        Position::new(0.0, 0.0),
        Position::new(1.0, 0.0),
        0,
        10_000,
        0,
        &mut out,
    );
    assert_eq!(rapid.gate.ready_at, 1);
}

// ---- Progression ----

#[test]
fn test_xp_thresholds_double_per_level() {
    assert_eq!(xp_to_next_level(1), 2);
    assert_eq!(xp_to_next_level(2), 4);
    assert_eq!(xp_to_next_level(3), 8);
    assert_eq!(xp_to_next_level(4), 16);
    // High levels saturate instead of panicking.
    assert_eq!(xp_to_next_level(60), u32::MAX);
}

#[test]
fn test_multi_level_rollover_in_one_update() {
    let mut exp = Experience {
        amount: 7,
        level: 1,
    };
    let mut health = Health::full(100);
    let mut weapon = Weapon::pistol();
    let mut events = Vec::new();

    apply_level_rollover(&mut exp, &mut health, &mut weapon, &mut events);

    // 7 → level 2 (5 left, needs 4) → level 3 (1 left, needs 8) → stop.
    assert_eq!(exp.level, 3);
    assert_eq!(exp.amount, 1);
    // Health compounds multiplicatively: 100 × 2 × 3.
    assert_eq!(health.max, 600);
    assert_eq!(health.current, 600);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count(),
        2
    );
}

#[test]
fn test_weapon_unlocks_at_level_thresholds() {
    let mut exp = Experience {
        amount: 14,
        level: 1,
    };
    let mut health = Health::full(100);
    let mut weapon = Weapon::pistol();
    let mut events = Vec::new();

    // 2 + 4 + 8 = 14 lands exactly on level 4.
    apply_level_rollover(&mut exp, &mut health, &mut weapon, &mut events);
    assert_eq!(exp.level, 4);
    assert_eq!(weapon.kind, WeaponKind::Shotgun);

    // 16 + 32 = 48 more reaches level 6.
    exp.amount += 48;
    apply_level_rollover(&mut exp, &mut health, &mut weapon, &mut events);
    assert_eq!(exp.level, 6);
    assert_eq!(weapon.kind, WeaponKind::Minigun);

    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::WeaponEquipped { kind: WeaponKind::Shotgun })));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::WeaponEquipped { kind: WeaponKind::Minigun })));
}

#[test]
fn test_effective_stats_boost_expiry() {
    let base = PlayerStats::default();
    let boosts = ActiveBoosts {
        boosts: vec![
            Boost {
                kind: GemBoostKind::Speed,
                amount: 2,
                expires_at_tick: 100,
            },
            Boost {
                kind: GemBoostKind::Defence,
                amount: 5,
                expires_at_tick: 200,
            },
        ],
    };

    let live = effective_stats(&base, &boosts, 50);
    assert_eq!(live.speed, base.speed + 2.0);
    assert_eq!(live.defense, base.defense + 5);

    // At the expiry tick the speed boost no longer applies.
    let partial = effective_stats(&base, &boosts, 100);
    assert_eq!(partial.speed, base.speed);
    assert_eq!(partial.defense, base.defense + 5);
}

// ---- Combat through the engine ----

#[test]
fn test_monster_attack_gated_by_cooldown() {
    let mut engine = quiet_engine(1);
    let m = engine.add_monster(CENTER_X + 10.0, CENTER_Y);
    fortify_monster(&mut engine, m);

    engine.tick();
    let (_, health, _) = player_snapshot(&engine);
    assert_eq!(health.current, 100 - MONSTER_DAMAGE);

    // Gate closed for a full cooldown: no further hits.
    engine.tick();
    engine.tick();
    let (_, health, _) = player_snapshot(&engine);
    assert_eq!(health.current, 100 - MONSTER_DAMAGE);
}

#[test]
fn test_full_crit_chance_doubles_bullet_damage() {
    let mut engine = quiet_engine(1);
    for (_entity, (_player, stats)) in engine
        .world_mut()
        .query_mut::<(&Player, &mut PlayerStats)>()
    {
        stats.crit_chance = 100;
    }
    let m = engine.add_monster(CENTER_X + 100.0, CENTER_Y);
    fortify_monster(&mut engine, m);

    // Run until the first bullet lands and check the applied damage.
    let mut first_hit = None;
    for _ in 0..30 {
        engine.tick();
        let health = engine.world().get::<&Health>(m).unwrap().current;
        if health < 1000 {
            first_hit = Some(1000 - health);
            break;
        }
    }
    assert_eq!(first_hit, Some(2 * PISTOL_BULLET_DAMAGE));
}

#[test]
fn test_autoheal_restores_on_interval_clamped_at_max() {
    let mut engine = quiet_engine(1);
    for (_entity, (_player, stats, health)) in engine
        .world_mut()
        .query_mut::<(&Player, &mut PlayerStats, &mut Health)>()
    {
        stats.autoheal = 5;
        health.current = 50;
    }

    // The gate re-armed on the first tick; the next application lands
    // a full interval later.
    for _ in 0..59 {
        engine.tick();
    }
    let (_, health, _) = player_snapshot(&engine);
    assert_eq!(health.current, 50, "no heal before the interval elapses");

    engine.tick();
    let (_, health, _) = player_snapshot(&engine);
    assert_eq!(health.current, 55);

    // Healing never exceeds max health.
    for (_entity, (_player, health)) in engine.world_mut().query_mut::<(&Player, &mut Health)>() {
        health.current = 98;
    }
    for _ in 0..60 {
        engine.tick();
    }
    let (_, health, _) = player_snapshot(&engine);
    assert_eq!(health.current, 100, "autoheal clamps at max health");
}

#[test]
fn test_gem_pickup_scales_by_multiplier_then_rolls_over() {
    let mut engine = quiet_engine(1);
    for (_entity, (_player, stats)) in engine
        .world_mut()
        .query_mut::<(&Player, &mut PlayerStats)>()
    {
        stats.xp_multiplier = 2;
    }
    crate::world_setup::spawn_gem(engine.world_mut(), CENTER_X, CENTER_Y, 10, None);

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GemCollected { amount: 20 })));

    // 20 XP from level 1: 2 + 4 + 8 consumed, 6 left at level 4.
    let (exp, _, weapon) = player_snapshot(&engine);
    assert_eq!(exp.level, 4);
    assert_eq!(exp.amount, 6);
    assert_eq!(weapon, WeaponKind::Shotgun, "level 4 equips the shotgun");

    let gems_left = {
        let mut query = engine.world().query::<&Gem>();
        query.iter().count()
    };
    assert_eq!(gems_left, 0, "picked-up gem must be removed");
}

#[test]
fn test_two_gems_collected_same_tick_roll_over_together() {
    let mut engine = quiet_engine(1);
    crate::world_setup::spawn_gem(engine.world_mut(), CENTER_X, CENTER_Y, 3, None);
    crate::world_setup::spawn_gem(engine.world_mut(), CENTER_X, CENTER_Y, 4, None);

    engine.tick();
    let (exp, _, _) = player_snapshot(&engine);
    assert_eq!(exp.level, 3);
    assert_eq!(exp.amount, 1);
}

#[test]
fn test_boosted_gem_grants_expiring_modifier() {
    let mut engine = quiet_engine(1);
    crate::world_setup::spawn_gem(
        engine.world_mut(),
        CENTER_X,
        CENTER_Y,
        1,
        Some(GemBoost {
            kind: GemBoostKind::Defence,
            amount: 5,
            duration_ticks: BOOST_DURATION_TICKS,
        }),
    );

    engine.tick();
    let mut query = engine.world().query::<(&Player, &ActiveBoosts)>();
    let (_entity, (_player, boosts)) = query.iter().next().unwrap();
    assert_eq!(boosts.boosts.len(), 1);
    assert_eq!(boosts.boosts[0].kind, GemBoostKind::Defence);
    assert_eq!(boosts.boosts[0].amount, 5);
}

#[test]
fn test_health_gem_heals_immediately() {
    let mut engine = quiet_engine(1);
    for (_entity, (_player, health)) in engine.world_mut().query_mut::<(&Player, &mut Health)>() {
        health.current = 50;
    }
    crate::world_setup::spawn_gem(
        engine.world_mut(),
        CENTER_X,
        CENTER_Y,
        1,
        Some(GemBoost {
            kind: GemBoostKind::Health,
            amount: HEALTH_BOOST_AMOUNT,
            duration_ticks: BOOST_DURATION_TICKS,
        }),
    );

    engine.tick();
    let (_, health, _) = player_snapshot(&engine);
    assert_eq!(health.current, 50 + HEALTH_BOOST_AMOUNT);

    let mut query = engine.world().query::<(&Player, &ActiveBoosts)>();
    let (_entity, (_player, boosts)) = query.iter().next().unwrap();
    assert!(boosts.boosts.is_empty(), "health boosts never linger");
}

#[test]
fn test_huge_xp_multiplier_saturates_instead_of_overflowing() {
    let mut engine = quiet_engine(1);
    for (_entity, (_player, stats)) in engine
        .world_mut()
        .query_mut::<(&Player, &mut PlayerStats)>()
    {
        stats.xp_multiplier = u32::MAX;
    }
    crate::world_setup::spawn_gem(engine.world_mut(), CENTER_X, CENTER_Y, 3, None);

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GemCollected { amount: u32::MAX })));

    // The rollover consumes the saturated gain and terminates.
    let (exp, _, weapon) = player_snapshot(&engine);
    assert!(exp.level >= MINIGUN_UNLOCK_LEVEL);
    assert_eq!(weapon, WeaponKind::Minigun);
}

// ---- Death handling ----

#[test]
fn test_zero_health_monster_swept_before_next_tick() {
    let mut engine = quiet_engine(1);
    let m = engine.add_monster(CENTER_X + 400.0, CENTER_Y);
    for (_entity, health) in engine.world_mut().query_mut::<&mut Health>().with::<&Monster>() {
        health.current = 0;
    }

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::MonsterSlain { .. })));
    assert!(!engine.world().contains(m), "dead monster must be gone");

    // Death drops a gem at the death site.
    let gems = {
        let mut query = engine.world().query::<&Gem>();
        query.iter().count()
    };
    assert_eq!(gems, 1);
}

#[test]
fn test_player_death_ends_session_after_tick() {
    let mut engine = quiet_engine(1);
    for (_entity, (_player, health)) in engine.world_mut().query_mut::<(&Player, &mut Health)>() {
        health.current = 10;
    }
    engine.add_monster(CENTER_X + 5.0, CENTER_Y);

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(snap.events.iter().any(|e| matches!(e, GameEvent::PlayerDied)));

    // The loop stops cleanly: time no longer advances.
    let frozen = engine.time().tick;
    engine.tick();
    assert_eq!(engine.time().tick, frozen);
}

// ---- Bullets ----

#[test]
fn test_bullet_kills_monster() {
    let mut engine = quiet_engine(1);
    // One monster well inside pistol reach but outside attack range.
    engine.add_monster(CENTER_X + 100.0, CENTER_Y);

    // Pistol damage 10 kills a 10 hp monster with one hit; the bullet
    // closes at 5/tick against a monster approaching at 2/tick.
    let mut slain = false;
    for _ in 0..60 {
        let snap = engine.tick();
        if snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::MonsterSlain { .. }))
        {
            slain = true;
            break;
        }
    }
    assert!(slain, "pistol fire should kill the monster");
}

#[test]
fn test_stationary_bullet_expires_by_ttl() {
    let mut engine = quiet_engine(1);
    let center = Position::new(CENTER_X, CENTER_Y + 200.0);
    engine.add_bullet(BulletSpawn {
        src: center,
        target: center,
        speed: PISTOL_BULLET_SPEED,
        damage: PISTOL_BULLET_DAMAGE,
        weapon: WeaponKind::Pistol,
    });

    for _ in 0..(BULLET_TTL_TICKS + 10) {
        engine.tick();
    }
    let bullets = {
        let mut query = engine.world().query::<&Bullet>();
        query.iter().count()
    };
    assert_eq!(bullets, 0, "zero-velocity bullet must expire via TTL");
}

// ---- Pause / resume ----

#[test]
fn test_pause_stops_simulation() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(SessionCommand::NewSession);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10);
    assert_eq!(engine.phase(), GamePhase::Active);

    engine.queue_command(SessionCommand::Pause);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10, "time must not advance while paused");
    assert_eq!(engine.phase(), GamePhase::Paused);

    engine.queue_command(SessionCommand::Resume);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 20);
    assert_eq!(engine.phase(), GamePhase::Active);
}

// ---- Player movement intent ----

#[test]
fn test_move_intent_applies_once() {
    let mut engine = quiet_engine(1);
    engine.queue_command(SessionCommand::Move { dx: 1, dy: 0 });
    engine.tick();

    let mut query = engine.world().query::<&Position>().with::<&Player>();
    let (_entity, pos) = query.iter().next().unwrap();
    assert_eq!(pos.x, CENTER_X + PLAYER_SPEED);
    assert_eq!(pos.y, CENTER_Y);
    drop(query);

    // Intent is consumed; the next tick without input stays put.
    engine.tick();
    let mut query = engine.world().query::<&Position>().with::<&Player>();
    let (_entity, pos) = query.iter().next().unwrap();
    assert_eq!(pos.x, CENTER_X + PLAYER_SPEED);
}

// ---- Save / load ----

#[test]
fn test_session_from_record_round_trips() {
    let record = PlayerRecord {
        health: 250,
        max_health: 400,
        experience: 3,
        level: 4,
        xp_multiplier: 2,
        defense: 5,
        weapon_type: "minigun".to_string(),
        pos_x: 100.0,
        pos_y: 100.0,
        ..PlayerRecord::default()
    };

    let mut engine = SimulationEngine::new(SimConfig {
        seed: 1,
        spawning: false,
    });
    engine.queue_command(SessionCommand::LoadSession {
        player: record.clone(),
        gems: Vec::new(),
    });
    engine.tick();

    let restored = engine.player_record().unwrap();
    assert_eq!(restored.health, 250);
    assert_eq!(restored.max_health, 400);
    assert_eq!(restored.level, 4);
    assert_eq!(restored.experience, 3);
    assert_eq!(restored.xp_multiplier, 2);
    assert_eq!(restored.defense, 5);
    assert_eq!(restored.weapon_type, "minigun");
}

#[test]
fn test_tampered_record_health_is_clamped_not_fatal() {
    // A non-positive maximum is raised to 1 and current health clamped
    // into it.
    let record = PlayerRecord {
        max_health: -1,
        ..PlayerRecord::default()
    };
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 1,
        spawning: false,
    });
    engine.queue_command(SessionCommand::LoadSession {
        player: record,
        gems: Vec::new(),
    });
    engine.tick();

    let (_, health, _) = player_snapshot(&engine);
    assert_eq!(health.max, 1);
    assert_eq!(health.current, 1);

    // Negative current health loads as an already-over session rather
    // than an error.
    let record = PlayerRecord {
        health: -50,
        ..PlayerRecord::default()
    };
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 1,
        spawning: false,
    });
    engine.queue_command(SessionCommand::LoadSession {
        player: record,
        gems: Vec::new(),
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
}

#[test]
fn test_unknown_weapon_type_keeps_default() {
    let record = PlayerRecord {
        weapon_type: "railgun".to_string(),
        ..PlayerRecord::default()
    };

    let mut engine = SimulationEngine::new(SimConfig {
        seed: 1,
        spawning: false,
    });
    engine.queue_command(SessionCommand::LoadSession {
        player: record,
        gems: Vec::new(),
    });
    engine.tick();

    let (_, _, weapon) = player_snapshot(&engine);
    assert_eq!(weapon, WeaponKind::Pistol);
}

#[test]
fn test_save_data_includes_world_gems() {
    let mut engine = quiet_engine(1);
    crate::world_setup::spawn_gem(engine.world_mut(), 10.0, 20.0, 7, None);

    let data = engine.save_data().unwrap();
    assert_eq!(data.gems.len(), 1);
    assert_eq!(data.gems[0].amount, 7);
    assert_eq!(data.gems[0].pos_x, 10.0);
    assert!(data.gems[0].boost.is_none());
}
