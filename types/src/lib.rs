//! Fundamental types for the split ticket pool.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! amounts, hashes, secret numbers, chain parameters and the shared error vocabulary.

pub mod amount;
pub mod error;
pub mod hash;
pub mod network;
pub mod params;
pub mod secret;

pub use amount::{Amount, ATOMS_PER_COIN, MAX_AMOUNT};
pub use error::{SanityFailure, ScriptFault, SplitTicketError};
pub use hash::{ChainHash, HashParseError, TxHash};
pub use network::NetworkId;
pub use params::ChainParams;
pub use secret::{SecretNumber, SecretNumberHash, VoterLotteryCommitment};
