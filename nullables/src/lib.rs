//! Nullable infrastructure for deterministic testing.
//!
//! The validators consume the chain node's sanity checker and script engine
//! through traits. This crate provides test-friendly implementations that:
//! - Return deterministic results
//! - Can be told to fail on demand
//! - Record how they were called
//! - Never talk to a node
//!
//! Usage: swap real implementations for nullables in tests.

pub mod sanity;
pub mod script;
pub mod signer;

pub use sanity::NullSanityChecker;
pub use script::{NullScriptEngine, RecordedExecution};
pub use signer::{null_signature, sign_input, sign_split, NULL_SIGNATURE_SIZE};
