pub mod scheme;

pub use scheme::CommitmentScheme;

use crate::random::SecretKey;
use crate::{GameError, Result};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Commitment = HMAC-SHA256(key, move)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Commitment {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| GameError::crypto("commitment must be 32 bytes"))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// HMAC based commitment impl
pub struct HmacCommitment;

impl HmacCommitment {
    fn mac(key: &SecretKey, message: &[u8]) -> Result<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| GameError::crypto(e.to_string()))?;
        mac.update(message);
        Ok(mac)
    }
}

impl CommitmentScheme for HmacCommitment {
    type Key = SecretKey;
    type Commitment = Commitment;

    fn commit(key: &SecretKey, message: &[u8]) -> Result<Commitment> {
        let tag = Self::mac(key, message)?.finalize().into_bytes();
        Ok(Commitment(tag.into()))
    }

    // constant-time comparison
    fn verify(commitment: &Commitment, key: &SecretKey, message: &[u8]) -> bool {
        Self::mac(key, message)
            .map(|mac| mac.verify_slice(commitment.as_bytes()).is_ok())
            .unwrap_or(false)
    }
}

/// Commit to a move name's exact UTF-8 bytes.
pub fn commit(key: &SecretKey, move_name: &str) -> Result<Commitment> {
    HmacCommitment::commit(key, move_name.as_bytes())
}

/// Key and move disclosed after the user has chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    /// hex encoded HMAC key
    pub key: String,
    #[serde(rename = "move")]
    pub move_name: String,
}

impl Reveal {
    pub fn new(key: &SecretKey, move_name: &str) -> Self {
        Self {
            key: key.to_hex(),
            move_name: move_name.to_string(),
        }
    }

    /// Recompute the HMAC from the disclosed key and move and compare it with
    /// the commitment published before the user chose.
    pub fn verify(&self, commitment: &Commitment) -> bool {
        match SecretKey::from_hex(&self.key) {
            Ok(key) => HmacCommitment::verify(commitment, &key, self.move_name.as_bytes()),
            Err(_) => false,
        }
    }
}

pub fn reveal(key: &SecretKey, move_name: &str) -> Reveal {
    Reveal::new(key, move_name)
}

/// Check a published HMAC against a hex key and a move name.
pub fn verify_hex(key_hex: &str, move_name: &str, hmac_hex: &str) -> Result<bool> {
    let key = SecretKey::from_hex(key_hex)?;
    let commitment: Commitment = hmac_hex.parse()?;
    Ok(HmacCommitment::verify(&commitment, &key, move_name.as_bytes()))
}
