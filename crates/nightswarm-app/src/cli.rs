//! Line-oriented command surface for the headless runner.
//!
//! Each stdin line parses into either a session command forwarded to
//! the game loop or a local frontend action.

use nightswarm_core::commands::SessionCommand;

/// A parsed input line.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Forward a session command to the game loop.
    Command(SessionCommand),
    /// Print the latest snapshot.
    Status,
    /// Print the command list.
    Help,
    /// Shut down the loop and save.
    Quit,
}

pub const HELP_TEXT: &str = "\
commands:
  new                start a fresh session
  move <dx> <dy>     movement intent, each axis -1, 0 or 1
  pause              pause the simulation
  resume             resume the simulation
  status             print the latest snapshot
  quit               save and exit";

/// Parse one input line. Empty lines parse to Help.
pub fn parse_line(line: &str) -> Result<CliAction, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(CliAction::Help);
    };

    let action = match word {
        "new" => CliAction::Command(SessionCommand::NewSession),
        "move" => {
            let dx = parse_axis(parts.next())?;
            let dy = parse_axis(parts.next())?;
            CliAction::Command(SessionCommand::Move { dx, dy })
        }
        "pause" => CliAction::Command(SessionCommand::Pause),
        "resume" => CliAction::Command(SessionCommand::Resume),
        "status" => CliAction::Status,
        "help" => CliAction::Help,
        "quit" | "exit" => CliAction::Quit,
        other => return Err(format!("unknown command {other:?} (try: help)")),
    };

    if parts.next().is_some() {
        return Err(format!("trailing input after {word:?}"));
    }
    Ok(action)
}

fn parse_axis(part: Option<&str>) -> Result<i8, String> {
    let part = part.ok_or_else(|| "move takes two axis values, e.g. move 1 0".to_string())?;
    let value: i8 = part
        .parse()
        .map_err(|_| format!("bad axis value {part:?}"))?;
    if !(-1..=1).contains(&value) {
        return Err(format!("axis value {value} out of range -1..=1"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(
            parse_line("new").unwrap(),
            CliAction::Command(SessionCommand::NewSession)
        );
        assert_eq!(
            parse_line("pause").unwrap(),
            CliAction::Command(SessionCommand::Pause)
        );
        assert_eq!(
            parse_line("resume").unwrap(),
            CliAction::Command(SessionCommand::Resume)
        );
        assert_eq!(parse_line("status").unwrap(), CliAction::Status);
        assert_eq!(parse_line("quit").unwrap(), CliAction::Quit);
        assert_eq!(parse_line("exit").unwrap(), CliAction::Quit);
        assert_eq!(parse_line("").unwrap(), CliAction::Help);
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_line("move 1 -1").unwrap(),
            CliAction::Command(SessionCommand::Move { dx: 1, dy: -1 })
        );
        assert_eq!(
            parse_line("  move 0 0  ").unwrap(),
            CliAction::Command(SessionCommand::Move { dx: 0, dy: 0 })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_line("move").is_err());
        assert!(parse_line("move 1").is_err());
        assert!(parse_line("move 2 0").is_err());
        assert!(parse_line("move a b").is_err());
        assert!(parse_line("move 1 0 extra").is_err());
        assert!(parse_line("teleport").is_err());
    }
}
