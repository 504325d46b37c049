mod commands;
mod config;
mod display;

use clap::{Parser, Subcommand};
use config::CliConfig;
use fairmove_game::{ExitPolicy, GameError};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fairmove")]
#[command(about = "Provably fair rock-paper-scissors with any odd number of moves")]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/fairmove/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Plain help table without colours
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game against the computer
    Play {
        /// Moves in circular order, e.g. rock paper scissors
        #[arg(required = true, num_args = 1..)]
        moves: Vec<String>,
        /// Disclose the key and computer move if you exit without playing
        #[arg(long)]
        reveal_on_exit: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show who beats whom for a move list
    Rules {
        #[arg(required = true, num_args = 1..)]
        moves: Vec<String>,
    },
    /// Check a revealed key and move against a published HMAC
    Verify {
        /// Secret key (hex encoded)
        #[arg(long)]
        key: String,
        /// Move name exactly as revealed
        #[arg(long = "move")]
        move_name: String,
        /// HMAC shown before the game (hex encoded)
        #[arg(long)]
        hmac: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "fairmove={},fairmove_game={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if cli.no_color {
        config.color = false;
    }

    // Execute command
    let result = match cli.command {
        Commands::Play {
            moves,
            reveal_on_exit,
            json,
        } => {
            if reveal_on_exit {
                config.exit_policy = ExitPolicy::Reveal;
            }
            config.json |= json;
            commands::play(moves, &config)
        }
        Commands::Rules { moves } => commands::show_rules(moves, &config),
        Commands::Verify {
            key,
            move_name,
            hmac,
        } => match commands::verify(&key, &move_name, &hmac) {
            Ok(false) => std::process::exit(1),
            other => other.map(|_| ()),
        },
    };

    if let Err(e) = result {
        match e {
            e if e.is_validation() => {
                eprintln!("Invalid input: {}", e);
                eprintln!("Example: fairmove play rock paper scissors");
            }
            GameError::SecureRandomUnavailable(reason) => {
                eprintln!("Error: no secure random source available ({})", reason);
            }
            GameError::InvalidHex(_) | GameError::InvalidKeyLength { .. } => {
                eprintln!("Error: {}", e);
                eprintln!("Key and HMAC must be the hex strings printed by 'fairmove play'");
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
