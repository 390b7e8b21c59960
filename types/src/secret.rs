//! Secret numbers and their commitments.
//!
//! Each participant picks a random [`SecretNumber`] and submits only its
//! [`SecretNumberHash`] while the session is being assembled. The hashes of
//! all participants, together with a chain-tip anchor, are folded into the
//! [`VoterLotteryCommitment`] carried by output 0 of the split transaction.
//! The numbers themselves are revealed after the ticket is published.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant's secret lottery number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretNumber(u64);

impl SecretNumber {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Draw a fresh number from the operating system's CSPRNG.
    pub fn generate() -> Result<Self, getrandom::Error> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf)?;
        Ok(Self(u64::from_le_bytes(buf)))
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Little-endian encoding used by every hash over secret numbers.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

/// The committed (hashed) form of a [`SecretNumber`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretNumberHash([u8; 32]);

impl SecretNumberHash {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SecretNumberHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretNumberHash({}\u{2026})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for SecretNumberHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The 32-byte voter lottery commitment digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterLotteryCommitment([u8; 32]);

impl VoterLotteryCommitment {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for VoterLotteryCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoterLotteryCommitment({})", hex::encode(self.0))
    }
}

impl fmt::Display for VoterLotteryCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
