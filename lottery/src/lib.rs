//! Voter lottery for pooled tickets.
//!
//! Decides which participant's address votes with the ticket, without letting
//! anyone (the coordinator included) predict or steer the outcome:
//!
//! 1. **Commit**: each participant submits `hash(secret number ‖ anchor)`.
//! 2. **Bind**: the split transaction carries a digest over the anchor and
//!    every participant's hash ([`commitment`]).
//! 3. **Reveal**: participants reveal their numbers, everyone checks them
//!    against the hashes and draws the voter weighted by contribution
//!    ([`selection`]).
//!
//! The anchor is a recent main-chain tip hash, unknown to anyone before the
//! block was found.

pub mod commitment;
pub mod selection;

pub use commitment::{hash_secret_number, secret_number_hashes_hash};
pub use selection::{check_secret_numbers, choose_voter, lottery_digest, LotteryResult};
