//! Both validation phases bundled with their ports and chain parameters.

use crate::sanity::TransactionSanity;
use crate::script::ScriptEngine;
use crate::{check_signed_split, check_split};
use splitticket_transactions::{SplitTx, UtxoMap};
use splitticket_types::{ChainHash, ChainParams, SecretNumberHash, SplitTicketError};

/// Split transaction validator for one chain.
///
/// Holds no mutable state; share it freely between sessions and threads.
pub struct SplitValidator<S, E> {
    sanity: S,
    engine: E,
    params: ChainParams,
}

impl<S: TransactionSanity, E: ScriptEngine> SplitValidator<S, E> {
    pub fn new(sanity: S, engine: E, params: ChainParams) -> Self {
        Self {
            sanity,
            engine,
            params,
        }
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn sanity(&self) -> &S {
        &self.sanity
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Structural phase; see [`check_split`].
    pub fn check_split(
        &self,
        split: &SplitTx,
        secret_hashes: &[SecretNumberHash],
        anchor: &ChainHash,
    ) -> Result<(), SplitTicketError> {
        check_split(&self.sanity, split, secret_hashes, anchor, &self.params).inspect_err(|e| {
            tracing::warn!(tx = %split.hash(), error = %e, "split tx rejected");
        })
    }

    /// Signed phase; see [`check_signed_split`].
    pub fn check_signed_split(
        &self,
        split: &SplitTx,
        utxos: &UtxoMap,
    ) -> Result<(), SplitTicketError> {
        check_signed_split(&self.engine, split, utxos, &self.params).inspect_err(|e| {
            tracing::warn!(
                tx = %split.hash(),
                input = ?e.input_index(),
                error = %e,
                "signed split tx rejected"
            );
        })
    }
}
