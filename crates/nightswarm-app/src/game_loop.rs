//! Game loop thread. Runs the simulation engine at the fixed tick rate
//! and publishes snapshots.
//!
//! The engine is created inside the thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel; the latest snapshot
//! is stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use nightswarm_core::constants::TICK_RATE;
use nightswarm_core::enums::GamePhase;
use nightswarm_core::records::SaveData;
use nightswarm_core::state::WorldSnapshot;
use nightswarm_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawn the game loop in a new thread.
///
/// Returns the command sender for the frontend plus the join handle.
/// Joining yields the final save data when the loop was shut down with
/// a live session, and `None` when the session ended in player death.
pub fn spawn_game_loop(
    latest_snapshot: SharedSnapshot,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<Option<SaveData>>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("nightswarm-game-loop".into())
        .spawn(move || run_game_loop(cmd_rx, &latest_snapshot))
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until player death, a Shutdown command, or
/// channel disconnect.
fn run_game_loop(
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
) -> Option<SaveData> {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Session(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return engine.save_data(),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return engine.save_data(),
            }
        }

        // 2. Advance one tick (the engine handles pause internally)
        let snapshot = engine.tick();
        let game_over = snapshot.phase == GamePhase::GameOver;

        // 3. Store the latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // Player death ends the session; there is nothing to save.
        if game_over {
            log::info!("Session over, stopping game loop");
            return None;
        }

        // 4. Sleep until the next tick boundary
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
