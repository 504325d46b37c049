use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("There must be at least three moves, got {count}. For example: rock paper scissors")]
    TooFewMoves { count: usize },

    #[error("The number of moves must be odd. You provided {count} moves")]
    EvenCount { count: usize },

    #[error("All moves must be unique, '{name}' appears more than once")]
    DuplicateMoves { name: String },

    #[error("Move #{position} is empty")]
    EmptyMove { position: usize },

    #[error("Secure random source unavailable: {0}")]
    SecureRandomUnavailable(String),

    #[error("Invalid session state: {0}")]
    InvalidState(String),

    #[error("Move index {index} out of range for {count} moves")]
    InvalidMoveIndex { index: usize, count: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Secret key must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }

    /// True for the move-list errors raised before a session exists.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::TooFewMoves { .. }
                | Self::EvenCount { .. }
                | Self::DuplicateMoves { .. }
                | Self::EmptyMove { .. }
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_error_message() {
        let err = GameError::dialog("terminal closed");
        assert!(matches!(err, GameError::Dialog(ref m) if m == "terminal closed"));
        assert_eq!(err.to_string(), "Dialog error: terminal closed");
        assert!(!err.is_validation());
    }
}
