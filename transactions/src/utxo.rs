//! Previous outputs spent by a split transaction.
//!
//! The map is a read-only snapshot supplied by the caller's chain-state
//! provider; it must hold an entry for every input under validation.

use crate::split::OutPoint;
use serde::{Deserialize, Serialize};
use splitticket_types::Amount;
use std::collections::HashMap;

/// A spendable output as seen by the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub value: Amount,
    pub pk_script: Vec<u8>,
    /// Script version of `pk_script`.
    pub version: u16,
}

impl UtxoEntry {
    pub fn new(value: Amount, pk_script: Vec<u8>) -> Self {
        Self {
            value,
            pk_script,
            version: 0,
        }
    }
}

/// UTXO snapshot keyed by outpoint.
pub type UtxoMap = HashMap<OutPoint, UtxoEntry>;
