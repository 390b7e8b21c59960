//! Coordinator side of a split ticket purchase.
//!
//! A [`Session`] collects participants (amount, secret number hash, funding
//! UTXO) in admission order plus an optional pool contribution.
//! [`build_split_tx`] turns it into the unsigned split transaction whose
//! output 0 carries the voter lottery commitment. [`MatcherConfig`] loads
//! network, fee and logging settings from TOML.

pub mod builder;
pub mod config;
pub mod error;
pub mod session;

pub use builder::{build_split_tx, split_fee_share, SIGNATURE_SCRIPT_ESTIMATE};
pub use config::MatcherConfig;
pub use error::SessionError;
pub use session::{Contribution, Participant, PoolContribution, Session};
