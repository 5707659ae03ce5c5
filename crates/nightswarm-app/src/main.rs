use std::io::{self, BufRead};
use std::path::PathBuf;

use nightswarm_core::commands::SessionCommand;
use nightswarm_core::state::WorldSnapshot;

use nightswarm_app::cli::{self, CliAction};
use nightswarm_app::game_loop;
use nightswarm_app::persistence;
use nightswarm_app::state::{shared_snapshot, GameLoopCommand};

fn main() {
    env_logger::init();

    let save_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("nightswarm_save.json"));

    let latest_snapshot = shared_snapshot();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(latest_snapshot.clone());

    // Resume from the save file when one exists, otherwise start fresh.
    let opening = match persistence::load_from_file(&save_path) {
        Ok(data) => {
            log::info!("Resuming session from {}", save_path.display());
            SessionCommand::LoadSession {
                player: data.player,
                gems: data.gems,
            }
        }
        Err(reason) => {
            log::info!("Starting fresh session ({reason})");
            SessionCommand::NewSession
        }
    };
    let _ = cmd_tx.send(GameLoopCommand::Session(opening));

    println!("{}", cli::HELP_TEXT);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match cli::parse_line(&line) {
            Ok(CliAction::Command(cmd)) => {
                if cmd_tx.send(GameLoopCommand::Session(cmd)).is_err() {
                    break;
                }
            }
            Ok(CliAction::Status) => {
                let snap = latest_snapshot.lock().ok().and_then(|s| s.clone());
                print_status(&snap);
            }
            Ok(CliAction::Help) => println!("{}", cli::HELP_TEXT),
            Ok(CliAction::Quit) => break,
            Err(reason) => eprintln!("{reason}"),
        }
        if handle.is_finished() {
            break;
        }
    }

    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
    match handle.join() {
        Ok(Some(data)) => match persistence::save_to_file(&save_path, &data) {
            Ok(()) => log::info!("Session saved to {}", save_path.display()),
            Err(reason) => log::error!("{reason}"),
        },
        Ok(None) => log::info!("Session ended with no survivor, nothing saved"),
        Err(_) => log::error!("Game loop thread panicked"),
    }
}

fn print_status(snapshot: &Option<WorldSnapshot>) {
    let Some(snap) = snapshot else {
        println!("no snapshot yet");
        return;
    };
    println!(
        "tick {} [{:?}] hp {}/{} level {} xp {}/{} weapon {:?} | {} monsters, {} bullets, {} gems",
        snap.time.tick,
        snap.phase,
        snap.player.health,
        snap.player.max_health,
        snap.player.level,
        snap.player.experience,
        snap.player.xp_to_next_level,
        snap.player.weapon,
        snap.monsters.len(),
        snap.bullets.len(),
        snap.gems.len(),
    );
}
