use crate::commitment::{self, Commitment, Reveal};
use crate::input::MenuChoice;
use crate::random::{secure_rng, select_opponent_move, SecretKey};
use crate::rules::{resolve, Verdict};
use crate::{GameConfig, GameError, MoveSet, Result};
use chrono::{DateTime, Utc};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Committed,
    AwaitingChoice,
    Resolved,
    Exited,
}

/// Result of a played game, including everything needed to audit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOutcome {
    pub session_id: Uuid,
    pub user_move: String,
    pub opponent_move: String,
    pub verdict: Verdict,
    pub commitment: Commitment,
    pub committed_at: DateTime<Utc>,
    pub reveal: Reveal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionOutcome {
    Resolved(GameOutcome),
    Exited {
        session_id: Uuid,
        commitment: Commitment,
        reveal: Option<Reveal>,
    },
}

/// One single-use game against the computer.
///
/// The opponent's move is drawn when the session is created and bound by
/// [`GameSession::commit`] before the user is asked for anything.
pub struct GameSession {
    id: Uuid,
    moves: MoveSet,
    key: SecretKey,
    opponent: usize,
    config: GameConfig,
    state: SessionState,
    commitment: Option<Commitment>,
    committed_at: Option<DateTime<Utc>>,
}

impl GameSession {
    /// Validate the moves, then draw the key and the opponent's move from
    /// the OS random source. Nothing random happens for an invalid list.
    pub fn new<I, S>(moves: I, config: GameConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let moves = MoveSet::new(moves)?;
        let mut rng = secure_rng()?;
        Self::with_rng(moves, config, &mut rng)
    }

    pub fn with_rng<R: RngCore + CryptoRng>(
        moves: MoveSet,
        config: GameConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let key = SecretKey::generate_with(rng)?;
        let opponent = select_opponent_move(moves.len(), rng)?;
        let id = Uuid::new_v4();

        tracing::info!("Session {} created with {} moves", id, moves.len());

        Ok(Self {
            id,
            moves,
            key,
            opponent,
            config,
            state: SessionState::Created,
            commitment: None,
            committed_at: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn commitment(&self) -> Option<&Commitment> {
        self.commitment.as_ref()
    }

    /// Bind the opponent's move. Can only happen once.
    pub fn commit(&mut self) -> Result<Commitment> {
        if self.state != SessionState::Created {
            return Err(GameError::invalid_state(format!(
                "cannot commit from {:?}",
                self.state
            )));
        }

        let commitment = commitment::commit(&self.key, self.opponent_move())?;
        self.commitment = Some(commitment);
        self.committed_at = Some(Utc::now());
        self.state = SessionState::Committed;

        tracing::info!("Session {} committed: {}", self.id, commitment);
        Ok(commitment)
    }

    pub fn await_choice(&mut self) -> Result<()> {
        if self.state != SessionState::Committed {
            return Err(GameError::invalid_state(format!(
                "cannot wait for a choice from {:?}",
                self.state
            )));
        }
        self.state = SessionState::AwaitingChoice;
        Ok(())
    }

    /// Judge the user's move and reveal key and opponent move.
    pub fn resolve(&mut self, user_index: usize) -> Result<GameOutcome> {
        if self.state != SessionState::AwaitingChoice {
            return Err(GameError::invalid_state(format!(
                "cannot resolve from {:?}",
                self.state
            )));
        }

        let n = self.moves.len();
        let user_move = self
            .moves
            .get(user_index)
            .ok_or(GameError::InvalidMoveIndex {
                index: user_index,
                count: n,
            })?
            .to_string();

        let (commitment, committed_at) = self.published()?;
        let verdict = resolve(n, user_index, self.opponent);
        let opponent_move = self.opponent_move().to_string();
        self.state = SessionState::Resolved;

        tracing::info!("Session {} resolved: {}", self.id, verdict);
        tracing::debug!(
            "Session {}: user '{}' vs opponent '{}'",
            self.id,
            user_move,
            opponent_move
        );

        Ok(GameOutcome {
            session_id: self.id,
            user_move,
            reveal: commitment::reveal(&self.key, &opponent_move),
            opponent_move,
            verdict,
            commitment,
            committed_at,
        })
    }

    /// Leave without playing. Whether the key and move are disclosed
    /// depends on [`GameConfig::exit_policy`].
    pub fn exit(&mut self) -> Result<Option<Reveal>> {
        if !matches!(
            self.state,
            SessionState::Committed | SessionState::AwaitingChoice
        ) {
            return Err(GameError::invalid_state(format!(
                "cannot exit from {:?}",
                self.state
            )));
        }

        self.state = SessionState::Exited;
        tracing::info!(
            "Session {} exited by user ({:?})",
            self.id,
            self.config.exit_policy
        );

        let reveal = self
            .config
            .reveals_on_exit()
            .then(|| commitment::reveal(&self.key, self.opponent_move()));
        Ok(reveal)
    }

    fn opponent_move(&self) -> &str {
        &self.moves.names()[self.opponent]
    }

    fn published(&self) -> Result<(Commitment, DateTime<Utc>)> {
        match (self.commitment, self.committed_at) {
            (Some(c), Some(at)) => Ok((c, at)),
            _ => Err(GameError::invalid_state("no commitment published")),
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("moves", &self.moves.len())
            .field("state", &self.state)
            .field("commitment", &self.commitment)
            .finish()
    }
}

/// Display and input collaborators for one game.
pub trait Frontend {
    fn show_commitment(&mut self, commitment: &Commitment) -> Result<()>;
    fn show_menu(&mut self, moves: &MoveSet) -> Result<()>;
    fn show_help(&mut self, moves: &MoveSet) -> Result<()>;
    /// Blocks until a line is available.
    fn read_choice(&mut self) -> Result<String>;
    fn reject_input(&mut self, input: &str) -> Result<()>;
}

/// Play one session to completion: commit, show the menu, read until a move
/// or exit is chosen, then resolve.
pub fn run<F: Frontend>(mut session: GameSession, frontend: &mut F) -> Result<SessionOutcome> {
    let commitment = session.commit()?;
    frontend.show_commitment(&commitment)?;

    session.await_choice()?;
    frontend.show_menu(session.moves())?;

    loop {
        let line = frontend.read_choice()?;
        match MenuChoice::classify(&line, session.moves().len()) {
            MenuChoice::Move(index) => {
                return session.resolve(index).map(SessionOutcome::Resolved);
            }
            MenuChoice::Exit => {
                let reveal = session.exit()?;
                return Ok(SessionOutcome::Exited {
                    session_id: session.id(),
                    commitment,
                    reveal,
                });
            }
            MenuChoice::Help => frontend.show_help(session.moves())?,
            MenuChoice::Invalid => frontend.reject_input(&line)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExitPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classic() -> MoveSet {
        MoveSet::new(["rock", "paper", "scissors"]).unwrap()
    }

    fn seeded(seed: u64, config: GameConfig) -> GameSession {
        GameSession::with_rng(classic(), config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_invalid_moves_create_no_session() {
        assert!(matches!(
            GameSession::new(["a", "b"], GameConfig::default()),
            Err(GameError::TooFewMoves { count: 2 })
        ));
        assert!(matches!(
            GameSession::new(["a", "b", "a"], GameConfig::default()),
            Err(GameError::DuplicateMoves { .. })
        ));
    }

    #[test]
    fn test_full_lifecycle() {
        let mut session = seeded(1, GameConfig::default());
        assert_eq!(session.state(), SessionState::Created);
        assert!(session.commitment().is_none());

        let commitment = session.commit().unwrap();
        assert_eq!(session.state(), SessionState::Committed);

        session.await_choice().unwrap();
        let outcome = session.resolve(1).unwrap();
        assert_eq!(session.state(), SessionState::Resolved);

        assert_eq!(outcome.user_move, "paper");
        assert_eq!(outcome.commitment, commitment);
        assert_eq!(outcome.reveal.move_name, outcome.opponent_move);
        assert!(outcome.reveal.verify(&commitment));

        let opponent = classic().position(&outcome.opponent_move).unwrap();
        assert_eq!(outcome.verdict, resolve(3, 1, opponent));
    }

    #[test]
    fn test_commit_only_once() {
        let mut session = seeded(2, GameConfig::default());
        session.commit().unwrap();
        assert!(matches!(session.commit(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_resolve_requires_awaiting_choice() {
        let mut session = seeded(3, GameConfig::default());
        assert!(session.resolve(0).is_err());
        session.commit().unwrap();
        assert!(session.resolve(0).is_err());
        session.await_choice().unwrap();
        session.resolve(0).unwrap();
        assert!(session.resolve(0).is_err());
    }

    #[test]
    fn test_resolve_rejects_out_of_range_index() {
        let mut session = seeded(4, GameConfig::default());
        session.commit().unwrap();
        session.await_choice().unwrap();
        assert!(matches!(
            session.resolve(3),
            Err(GameError::InvalidMoveIndex { index: 3, count: 3 })
        ));
        assert_eq!(session.state(), SessionState::AwaitingChoice);
    }

    #[test]
    fn test_exit_abstains_by_default() {
        let mut session = seeded(5, GameConfig::default());
        assert!(session.exit().is_err());
        session.commit().unwrap();
        assert_eq!(session.exit().unwrap(), None);
        assert_eq!(session.state(), SessionState::Exited);
        assert!(session.await_choice().is_err());
    }

    #[test]
    fn test_exit_reveals_when_configured() {
        let mut session = seeded(6, GameConfig::new(ExitPolicy::Reveal));
        let commitment = session.commit().unwrap();
        session.await_choice().unwrap();

        let reveal = session.exit().unwrap().unwrap();
        assert!(reveal.verify(&commitment));
    }

    #[test]
    fn test_opponent_fixed_at_creation() {
        let mut session = seeded(7, GameConfig::default());
        let before = session.opponent;
        session.commit().unwrap();
        session.await_choice().unwrap();
        let outcome = session.resolve(0).unwrap();
        assert_eq!(classic().position(&outcome.opponent_move), Some(before));
    }

    #[test]
    fn test_sessions_use_distinct_keys() {
        let a = GameSession::new(["rock", "paper", "scissors"], GameConfig::default()).unwrap();
        let b = GameSession::new(["rock", "paper", "scissors"], GameConfig::default()).unwrap();
        assert_ne!(a.key, b.key);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let session = seeded(8, GameConfig::default());
        let debug = format!("{:?}", session);
        assert!(!debug.contains(&session.key.to_hex()));
        assert!(!debug.contains("opponent"));
    }
}
