//! Size and fee-rate constants of the fee model.

use serde::{Deserialize, Serialize};
use splitticket_types::Amount;

/// Constants the fee model is evaluated with.
///
/// Immutable once built and passed to [`FeeModel`](crate::FeeModel)
/// explicitly, so each network can carry its own values. Every field has a
/// serde default, so a TOML table only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeParams {
    /// Estimated bytes of the parts of the ticket purchase that do not depend
    /// on the participant count: tx header (serialization type, version,
    /// lock time, expiry, I/O counts) plus the ticket submission output.
    pub initial_size: u64,

    /// Estimated bytes added per participant: one input (outpoint, tree,
    /// sequence, witness data, signature script) plus the stake commitment
    /// output and the stake change output. The pool adds one more of these.
    pub participant_size: u64,

    /// Fee rate in atoms per byte.
    pub fee_rate: Amount,

    /// Fixed amount added on top of the size-based fee to improve the odds of
    /// the ticket being mined quickly.
    pub safety_margin: Amount,

    /// Extra funds each participant should hold beyond the strictly
    /// required amount.
    pub participant_fee_overhead: Amount,
}

impl FeeParams {
    /// SerType + Version + LockTime + Expiry + I/O count, then
    /// amount + version + script of the ticket submission output.
    pub const TICKET_INITIAL_SIZE: u64 = 2 + 2 + 4 + 4 + 2 + 8 + 2 + 24;

    /// Outpoint hash + index + tree + sequence, witness amount + block height
    /// + block index, signature script, commitment output, change output.
    pub const TICKET_PARTICIPANT_SIZE: u64 =
        32 + 4 + 1 + 4 + 8 + 4 + 4 + 106 + 8 + 2 + 32 + 8 + 2 + 26 + 8;

    /// 0.001 coin per kB.
    pub const DEFAULT_FEE_RATE: Amount = Amount::from_atoms(100);

    pub const DEFAULT_SAFETY_MARGIN: Amount = Amount::from_atoms(50_001);

    pub const DEFAULT_PARTICIPANT_FEE_OVERHEAD: Amount = Amount::from_atoms(200_000);
}

impl Default for FeeParams {
    fn default() -> Self {
        Self {
            initial_size: Self::TICKET_INITIAL_SIZE,
            participant_size: Self::TICKET_PARTICIPANT_SIZE,
            fee_rate: Self::DEFAULT_FEE_RATE,
            safety_margin: Self::DEFAULT_SAFETY_MARGIN,
            participant_fee_overhead: Self::DEFAULT_PARTICIPANT_FEE_OVERHEAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_constants() {
        assert_eq!(FeeParams::TICKET_INITIAL_SIZE, 48);
        assert_eq!(FeeParams::TICKET_PARTICIPANT_SIZE, 249);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let params: FeeParams = toml::from_str("fee_rate = 200").unwrap();
        assert_eq!(params.fee_rate, Amount::from_atoms(200));
        assert_eq!(params.safety_margin, FeeParams::DEFAULT_SAFETY_MARGIN);
        assert_eq!(params.initial_size, FeeParams::TICKET_INITIAL_SIZE);
    }
}
