//! The split transaction: gathers every contributor's coins into the exact
//! outputs the pooled ticket purchase will spend.
//!
//! Layout built by the coordinator:
//! - output 0: voter lottery commitment (zero value, null-data script)
//! - one split output per contributor, funding that contributor's ticket input
//! - change outputs
//!
//! Inputs are the contributors' coins, each referencing a UTXO.

use crate::codec;
use serde::{Deserialize, Serialize};
use splitticket_types::{Amount, TxHash};
use std::fmt;

/// Which transaction tree an outpoint lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxTree {
    #[default]
    Regular,
    Stake,
}

impl TxTree {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Regular => 0,
            Self::Stake => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Regular),
            1 => Some(Self::Stake),
            _ => None,
        }
    }
}

/// Reference to a previous transaction output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: TxHash,
    pub index: u32,
    pub tree: TxTree,
}

impl OutPoint {
    pub fn new(hash: TxHash, index: u32, tree: TxTree) -> Self {
        Self { hash, index, tree }
    }

    /// An outpoint in the regular transaction tree.
    pub fn regular(hash: TxHash, index: u32) -> Self {
        Self::new(hash, index, TxTree::Regular)
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hash, self.index)
    }
}

/// A transaction input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub previous_out_point: OutPoint,
    pub sequence: u32,
    /// Value of the spent output, committed to by the signature.
    pub value_in: Amount,
    pub block_height: u32,
    pub block_index: u32,
    /// Unlocking script; empty until the owner signs.
    pub signature_script: Vec<u8>,
}

impl TxIn {
    pub const MAX_SEQUENCE: u32 = u32::MAX;
    pub const NULL_BLOCK_HEIGHT: u32 = 0;
    pub const NULL_BLOCK_INDEX: u32 = u32::MAX;

    /// An unsigned input spending `previous_out_point` worth `value_in`.
    pub fn new(previous_out_point: OutPoint, value_in: Amount) -> Self {
        Self {
            previous_out_point,
            sequence: Self::MAX_SEQUENCE,
            value_in,
            block_height: Self::NULL_BLOCK_HEIGHT,
            block_index: Self::NULL_BLOCK_INDEX,
            signature_script: Vec::new(),
        }
    }

    pub fn is_signed(&self) -> bool {
        !self.signature_script.is_empty()
    }
}

/// A transaction output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub value: Amount,
    pub version: u16,
    pub pk_script: Vec<u8>,
}

impl TxOut {
    pub fn new(value: Amount, pk_script: Vec<u8>) -> Self {
        Self {
            value,
            version: 0,
            pk_script,
        }
    }
}

/// A split transaction, unsigned or signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTx {
    pub version: u16,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
    pub expiry: u32,
}

impl SplitTx {
    pub const CURRENT_VERSION: u16 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
            expiry: 0,
        }
    }

    /// Hash of the transaction prefix; signatures do not change it.
    pub fn hash(&self) -> TxHash {
        splitticket_crypto::hash_tx_prefix(&codec::serialize_prefix_only(self))
    }

    /// Size in bytes of the full (prefix + witness) serialization.
    pub fn serialize_size(&self) -> usize {
        codec::serialize_size(self)
    }

    /// Full wire serialization.
    pub fn serialize(&self) -> Vec<u8> {
        codec::serialize(self)
    }

    /// True when every input carries an unlocking script.
    pub fn is_signed(&self) -> bool {
        !self.inputs.is_empty() && self.inputs.iter().all(TxIn::is_signed)
    }

    /// Drop every signature script, returning the transaction to its
    /// unsigned form.
    pub fn strip_signatures(&mut self) {
        for input in &mut self.inputs {
            input.signature_script.clear();
        }
    }
}

impl Default for SplitTx {
    fn default() -> Self {
        Self::new()
    }
}
