//! Nullable sanity checker.

use splitticket_transactions::SplitTx;
use splitticket_types::{ChainParams, SanityFailure};
use splitticket_verification::TransactionSanity;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A sanity checker enforcing only the chain's size limit, optionally
/// rejecting everything with a fixed diagnostic.
pub struct NullSanityChecker {
    failure: Option<String>,
    calls: AtomicUsize,
}

impl NullSanityChecker {
    /// Accept every transaction within `ChainParams::max_tx_size`.
    pub fn accepting() -> Self {
        Self {
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Reject every transaction with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of sanity checks performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for NullSanityChecker {
    fn default() -> Self {
        Self::accepting()
    }
}

impl TransactionSanity for NullSanityChecker {
    fn check_sanity(&self, tx: &SplitTx, params: &ChainParams) -> Result<(), SanityFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Err(SanityFailure::new(reason.clone()));
        }
        let size = tx.serialize_size();
        if size > params.max_tx_size {
            return Err(SanityFailure::new(format!(
                "serialized transaction is too big - got {size}, max {}",
                params.max_tx_size
            )));
        }
        Ok(())
    }
}
