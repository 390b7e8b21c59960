//! Validation of the signed split transaction.

use crate::script::{InputScriptContext, ScriptEngine, ScriptFlags};
use splitticket_transactions::{SplitTx, UtxoMap};
use splitticket_types::{Amount, ChainParams, SplitTicketError};

/// Validate a signed split transaction against the UTXOs it spends.
///
/// Only meaningful for transactions that already passed
/// [`check_split`](crate::check_split). For each input, in order: its UTXO
/// must be in `utxos`, its scripts must execute with
/// [`ScriptFlags::SPLIT_INPUT`], and the running input total must stay within
/// `0..=params.max_amount`. Then the fee (`inputs - outputs`) must be at least
/// `floor(serialized size × min relay fee rate / 1000)`.
///
/// Whether a UTXO is still unspent on chain is not checked here: `utxos` is
/// taken to be a snapshot of unspent outputs, and double spends against the
/// live chain are caught by the node when the transaction is broadcast.
pub fn check_signed_split(
    engine: &dyn ScriptEngine,
    split: &SplitTx,
    utxos: &UtxoMap,
    params: &ChainParams,
) -> Result<(), SplitTicketError> {
    let in_range = |total: &Amount| !total.is_negative() && *total <= params.max_amount;

    let mut total_in = Amount::ZERO;
    for (index, input) in split.inputs.iter().enumerate() {
        let prev = &input.previous_out_point;
        let utxo = utxos
            .get(prev)
            .ok_or(SplitTicketError::UtxoNotFound {
                index,
                prev_hash: prev.hash,
                prev_index: prev.index,
            })?;

        let ctx = InputScriptContext {
            pk_script: &utxo.pk_script,
            script_version: utxo.version,
            output_value: utxo.value,
            tx: split,
            input_index: index,
            flags: ScriptFlags::SPLIT_INPUT,
        };
        engine
            .execute(&ctx)
            .map_err(|source| SplitTicketError::ScriptExecutionFailed { index, source })?;

        total_in = total_in
            .checked_add(utxo.value)
            .filter(in_range)
            .ok_or(SplitTicketError::InputAmountOverflow { index })?;
    }

    let mut total_out = Amount::ZERO;
    for (index, output) in split.outputs.iter().enumerate() {
        total_out = total_out
            .checked_add(output.value)
            .filter(in_range)
            .ok_or(SplitTicketError::OutputAmountOverflow { index })?;
    }

    // Both totals are within 0..=max_amount, so this cannot overflow.
    let fee = total_in - total_out;

    let size = split.serialize_size();
    let min_fee = params.min_relay_fee(size).ok_or_else(|| {
        SplitTicketError::invalid_parameters(format!(
            "minimum relay fee overflows for a {size} byte transaction"
        ))
    })?;
    if fee < min_fee {
        return Err(SplitTicketError::FeeTooLow { fee, min_fee });
    }

    tracing::debug!(
        inputs = split.inputs.len(),
        size,
        fee = %fee,
        min_fee = %min_fee,
        "signed split tx passed script and fee checks"
    );
    Ok(())
}
