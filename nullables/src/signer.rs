//! Nullable signer.
//!
//! Produces deterministic stand-in signature scripts that
//! [`NullScriptEngine`](crate::NullScriptEngine) accepts. A stand-in signature
//! commits to the locking script it spends, the transaction prefix hash and
//! the input index, so changing any output after signing invalidates it just
//! like a real signature would.

use splitticket_crypto::blake2b_256_multi;
use splitticket_transactions::{SplitTx, UtxoMap};
use splitticket_types::{SplitTicketError, TxHash};

/// Length of a stand-in signature script; the size a typical
/// pay-to-pubkey-hash signature script has on chain.
pub const NULL_SIGNATURE_SIZE: usize = 106;

/// The stand-in signature script for one input.
pub fn null_signature(pk_script: &[u8], tx_hash: &TxHash, input_index: usize) -> Vec<u8> {
    let digest = blake2b_256_multi(&[
        pk_script,
        tx_hash.as_bytes(),
        &(input_index as u64).to_le_bytes(),
    ]);
    digest.iter().copied().cycle().take(NULL_SIGNATURE_SIZE).collect()
}

/// Sign input `index` of `tx`, which spends an output locked by `pk_script`.
///
/// Does nothing if `index` is out of range.
pub fn sign_input(tx: &mut SplitTx, index: usize, pk_script: &[u8]) {
    let hash = tx.hash();
    if let Some(input) = tx.inputs.get_mut(index) {
        input.signature_script = null_signature(pk_script, &hash, index);
    }
}

/// Sign every input of `tx` with the locking scripts found in `utxos`.
pub fn sign_split(tx: &mut SplitTx, utxos: &UtxoMap) -> Result<(), SplitTicketError> {
    let hash = tx.hash();
    for (index, input) in tx.inputs.iter_mut().enumerate() {
        let prev = input.previous_out_point;
        let utxo = utxos.get(&prev).ok_or(SplitTicketError::UtxoNotFound {
            index,
            prev_hash: prev.hash,
            prev_index: prev.index,
        })?;
        input.signature_script = null_signature(&utxo.pk_script, &hash, index);
    }
    Ok(())
}
