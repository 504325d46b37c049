use crate::config::CliConfig;
use crate::display::{self, TerminalFrontend};
use fairmove_game::{new_game, run, verify_hex, MoveSet, Result, SessionOutcome};

/// Play one game. Validation errors surface before anything is printed.
pub fn play(moves: Vec<String>, config: &CliConfig) -> Result<()> {
    let session = new_game(moves, config.game_config())?;
    let mut frontend = TerminalFrontend::new(config.color);

    let outcome = run(session, &mut frontend)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let lines = match &outcome {
        SessionOutcome::Resolved(outcome) => {
            display::outcome_lines(outcome, config.show_verify_hint)
        }
        SessionOutcome::Exited { reveal, .. } => display::exit_lines(reveal.as_ref()),
    };
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

pub fn show_rules(moves: Vec<String>, config: &CliConfig) -> Result<()> {
    let moves = MoveSet::new(moves)?;
    println!("{}", display::rules_table(&moves, config.color));
    Ok(())
}

/// Returns whether the HMAC matches.
pub fn verify(key: &str, move_name: &str, hmac: &str) -> Result<bool> {
    let valid = verify_hex(key, move_name, hmac)?;
    if valid {
        println!("HMAC verified: '{}' was committed with this key.", move_name);
    } else {
        println!("HMAC mismatch: the key and move do not produce this HMAC.");
    }
    Ok(valid)
}
