//! The split transaction and everything needed to reason about it.
//!
//! - **split**: `SplitTx`, its inputs, outputs and outpoints
//! - **script**: the handful of opcodes and script templates the pool needs
//! - **utxo**: previous outputs spent by a split transaction
//! - **codec**: wire serialization, serialized size and prefix hash

pub mod codec;
pub mod error;
pub mod script;
pub mod split;
pub mod utxo;

pub use error::TransactionError;
pub use script::{
    pay_to_pubkey_hash_script, voter_lottery_payload, voter_lottery_script, OP_DATA_32,
    OP_RETURN, VOTER_LOTTERY_PK_SCRIPT_SIZE,
};
pub use split::{OutPoint, SplitTx, TxIn, TxOut, TxTree};
pub use utxo::{UtxoEntry, UtxoMap};
