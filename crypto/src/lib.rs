//! Cryptographic hash primitives for the split ticket pool.
//!
//! Everything that is hashed (secret numbers, the voter lottery commitment,
//! transaction prefixes) goes through Blake2b with a 256-bit output.

pub mod hash;

pub use hash::{blake2b_256, blake2b_256_multi, hash_tx_prefix};
