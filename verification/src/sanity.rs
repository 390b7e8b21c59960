//! Port to the chain's transaction sanity rules.

use splitticket_transactions::SplitTx;
use splitticket_types::{ChainParams, SanityFailure};

/// Consensus-level well-formedness of a transaction: input and output counts,
/// value ranges, script size limits and the like.
///
/// Implementations must not mutate anything and must be callable from several
/// threads at once.
pub trait TransactionSanity: Send + Sync {
    fn check_sanity(&self, tx: &SplitTx, params: &ChainParams) -> Result<(), SanityFailure>;
}
