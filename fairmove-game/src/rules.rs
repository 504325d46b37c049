//! Winner determination over a circular ordering of N moves.
//!
//! Moves sit on a cycle of odd length `n`. Each move beats the `n / 2` moves
//! immediately behind it and loses to the `n / 2` immediately ahead, so with
//! `[rock, paper, scissors]` paper beats rock, scissors beats paper and rock
//! beats scissors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result from the user's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Win,
    Lose,
    Draw,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Win => "Win",
            Verdict::Lose => "Lose",
            Verdict::Draw => "Draw",
        }
    }

    /// Same game seen from the other side.
    pub fn opposite(&self) -> Verdict {
        match self {
            Verdict::Win => Verdict::Lose,
            Verdict::Lose => Verdict::Win,
            Verdict::Draw => Verdict::Draw,
        }
    }

    /// Line shown after a game
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Win => "You win!",
            Verdict::Lose => "You lose!",
            Verdict::Draw => "Draw!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signed circular distance from `opponent` to `user`, recentred into
/// `[-half, half]`. Positive means the opponent is behind the user.
fn signed_distance(n: usize, user: usize, opponent: usize) -> isize {
    let half = n / 2;
    let shifted = (user + n - opponent + half) % n;
    shifted as isize - half as isize
}

/// Decide the game for odd `n >= 3` with both indices in `[0, n)`.
///
/// Each move beats the ones behind it: list `[rock, paper, scissors]`, not
/// the reversed order where rock would beat paper.
///
/// Never looks at the key: the verdict is a function of the two positions
/// and the cycle length alone.
pub fn resolve(n: usize, user: usize, opponent: usize) -> Verdict {
    debug_assert!(n >= 3 && n % 2 == 1, "n must be odd and at least 3");
    debug_assert!(user < n && opponent < n, "indices must be below n");

    match signed_distance(n, user, opponent) {
        0 => Verdict::Draw,
        d if d > 0 => Verdict::Win,
        _ => Verdict::Lose,
    }
}

/// Full table, `matrix[user][opponent]`.
pub fn rules_matrix(n: usize) -> Vec<Vec<Verdict>> {
    (0..n)
        .map(|user| (0..n).map(|opponent| resolve(n, user, opponent)).collect())
        .collect()
}
