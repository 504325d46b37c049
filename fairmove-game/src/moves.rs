//! Move list validation.
//!
//! The comparison in [`crate::rules`] needs an odd cycle of at least three
//! distinct positions, so every list is checked here before a session is
//! allowed to touch the random source.

use crate::{GameError, Result};
use serde::Serialize;
use std::collections::HashSet;

pub const MIN_MOVES: usize = 3;

/// Check the structural preconditions on a move list.
///
/// Order of checks: count, parity, uniqueness, then empty names.
pub fn validate<S: AsRef<str>>(moves: &[S]) -> Result<()> {
    let count = moves.len();
    if count < MIN_MOVES {
        return Err(GameError::TooFewMoves { count });
    }
    if count % 2 == 0 {
        return Err(GameError::EvenCount { count });
    }

    let mut seen = HashSet::with_capacity(count);
    for name in moves {
        if !seen.insert(name.as_ref()) {
            return Err(GameError::DuplicateMoves {
                name: name.as_ref().to_string(),
            });
        }
    }

    if let Some(position) = moves.iter().position(|m| m.as_ref().trim().is_empty()) {
        return Err(GameError::EmptyMove {
            position: position + 1,
        });
    }

    Ok(())
}

/// Validated, immutable, ordered list of move names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoveSet(Vec<String>);

impl MoveSet {
    pub fn new<I, S>(moves: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let moves: Vec<String> = moves.into_iter().map(Into::into).collect();
        validate(&moves)?;
        Ok(Self(moves))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|m| m == name)
    }
}
