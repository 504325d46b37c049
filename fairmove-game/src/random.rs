//! Secret key generation and opponent move selection.
//!
//! Both draw from the operating system CSPRNG. The selector only accepts
//! generators that implement [`CryptoRng`], so the opponent's move can never
//! come from a weaker source than the key that commits to it.

use crate::{GameError, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use std::fmt;

/// Secret key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// HMAC key committing the opponent to its move.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Fresh key from the OS random source
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; KEY_LEN];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| GameError::SecureRandomUnavailable(e.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())?;
        let actual = bytes.len();
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| GameError::InvalidKeyLength {
            expected: KEY_LEN,
            actual,
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// never print key material through Debug
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// CSPRNG seeded from the OS source, failing instead of panicking when the
/// OS source is unavailable.
pub fn secure_rng() -> Result<StdRng> {
    StdRng::from_rng(OsRng).map_err(|e| GameError::SecureRandomUnavailable(e.to_string()))
}

/// Uniform index in `[0, size)`.
pub fn select_opponent_move<R: RngCore + CryptoRng>(size: usize, rng: &mut R) -> Result<usize> {
    if size == 0 {
        return Err(GameError::invalid_state(
            "cannot select a move from an empty move set",
        ));
    }
    Ok(rng.gen_range(0..size))
}
