//! Chain parameters consumed by the split transaction validators.

use crate::amount::{Amount, MAX_AMOUNT};
use crate::network::NetworkId;
use serde::{Deserialize, Serialize};

/// Consensus and relay-policy values of the chain the tickets are bought on.
///
/// Passed explicitly to every validation call; nothing in the workspace reads
/// chain constants from globals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Which network these parameters describe.
    pub network: NetworkId,

    /// Largest amount an output or a running input total may hold.
    pub max_amount: Amount,

    /// Minimum relay fee rate, in atoms per 1000 bytes of serialized transaction.
    pub min_relay_fee_rate: Amount,

    /// Maximum serialized transaction size in bytes.
    pub max_tx_size: usize,
}

impl ChainParams {
    /// Default minimum relay fee rate: 0.0001 coin/kB.
    pub const DEFAULT_MIN_RELAY_FEE_RATE: Amount = Amount::from_atoms(10_000);

    /// Default maximum transaction size.
    pub const DEFAULT_MAX_TX_SIZE: usize = 393_216;

    /// Parameters for the given network.
    pub fn for_network(network: NetworkId) -> Self {
        Self {
            network,
            max_amount: Amount::from_atoms(MAX_AMOUNT),
            min_relay_fee_rate: Self::DEFAULT_MIN_RELAY_FEE_RATE,
            max_tx_size: Self::DEFAULT_MAX_TX_SIZE,
        }
    }

    pub fn mainnet() -> Self {
        Self::for_network(NetworkId::Main)
    }

    pub fn testnet() -> Self {
        Self::for_network(NetworkId::Test)
    }

    pub fn simnet() -> Self {
        Self::for_network(NetworkId::Sim)
    }

    /// Minimum fee a transaction of `serialized_size` bytes must pay to relay.
    ///
    /// `floor(size × rate / 1000)`; `None` if the product overflows.
    pub fn min_relay_fee(&self, serialized_size: usize) -> Option<Amount> {
        let size = i64::try_from(serialized_size).ok()?;
        size.checked_mul(self.min_relay_fee_rate.atoms())
            .map(|product| Amount::from_atoms(product / 1000))
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_relay_fee_rounds_down() {
        let params = ChainParams::mainnet();
        // 1234 bytes at 10_000 atoms/kB = 12_340 atoms exactly.
        assert_eq!(params.min_relay_fee(1234), Some(Amount::from_atoms(12_340)));

        let params = ChainParams {
            min_relay_fee_rate: Amount::from_atoms(1_001),
            ..ChainParams::mainnet()
        };
        // 999 × 1001 / 1000 = 999.999 -> 999
        assert_eq!(params.min_relay_fee(999), Some(Amount::from_atoms(999)));
    }

    #[test]
    fn min_relay_fee_overflow() {
        let params = ChainParams {
            min_relay_fee_rate: Amount::from_atoms(i64::MAX),
            ..ChainParams::mainnet()
        };
        assert_eq!(params.min_relay_fee(2), None);
    }

    #[test]
    fn networks_share_policy_defaults() {
        assert_eq!(
            ChainParams::testnet().min_relay_fee_rate,
            ChainParams::mainnet().min_relay_fee_rate
        );
        assert_eq!(ChainParams::simnet().network, NetworkId::Sim);
    }
}
