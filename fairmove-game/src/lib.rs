//! Provably fair rock-paper-scissors over any odd number of moves.
//!
//! The computer picks its move first and publishes an HMAC-SHA256 commitment
//! to it. Once the user has chosen, the key and move are revealed so the
//! commitment can be checked. Winners are decided by position on a circle of
//! moves, see [`rules`].

pub mod commitment;
pub mod config;
pub mod error;
pub mod input;
pub mod moves;
pub mod random;
pub mod rules;
pub mod session;

pub use commitment::{
    commit, reveal, verify_hex, Commitment, CommitmentScheme, HmacCommitment, Reveal,
};
pub use config::{ExitPolicy, GameConfig};
pub use error::{GameError, Result};
pub use input::MenuChoice;
pub use moves::{validate, MoveSet};
pub use random::{select_opponent_move, SecretKey, KEY_LEN};
pub use rules::{resolve, rules_matrix, Verdict};
pub use session::{run, Frontend, GameOutcome, GameSession, SessionOutcome, SessionState};

/// Start a session for the given moves with the OS random source.
pub fn new_game<I, S>(moves: I, config: GameConfig) -> Result<GameSession>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    GameSession::new(moves, config)
}
