//! Reveal side of the voter lottery.

use crate::commitment::hash_secret_number;
use serde::{Deserialize, Serialize};
use splitticket_crypto::blake2b_256_multi;
use splitticket_types::{Amount, ChainHash, SecretNumber, SecretNumberHash, SplitTicketError};

/// Outcome of the voter draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryResult {
    /// Atom drawn out of the total pooled commitment.
    pub coin_index: u64,
    /// Participant owning that atom; their address votes.
    pub voter_index: usize,
}

/// Check revealed secret numbers against the hashes committed earlier.
///
/// Fails at the first participant whose number does not hash to their
/// commitment.
pub fn check_secret_numbers(
    numbers: &[SecretNumber],
    hashes: &[SecretNumberHash],
    anchor: &ChainHash,
) -> Result<(), SplitTicketError> {
    if numbers.len() != hashes.len() {
        return Err(SplitTicketError::invalid_parameters(format!(
            "{} secret numbers revealed for {} committed hashes",
            numbers.len(),
            hashes.len()
        )));
    }
    for (index, (number, expected)) in numbers.iter().zip(hashes).enumerate() {
        if hash_secret_number(number, anchor) != *expected {
            return Err(SplitTicketError::SecretNumberMismatch { index });
        }
    }
    Ok(())
}

/// Digest the draw is taken from: `Blake2b-256(anchor ‖ le_u64(n_0) ‖ …)`.
pub fn lottery_digest(numbers: &[SecretNumber], anchor: &ChainHash) -> [u8; 32] {
    let encoded: Vec<[u8; 8]> = numbers.iter().map(SecretNumber::to_le_bytes).collect();
    let mut parts: Vec<&[u8]> = Vec::with_capacity(encoded.len() + 1);
    parts.push(anchor.as_bytes());
    parts.extend(encoded.iter().map(|bytes| bytes.as_slice()));
    blake2b_256_multi(&parts)
}

/// Draw the voter, weighting each participant by their committed amount.
///
/// The first eight digest bytes (little-endian) modulo the total commitment
/// select one atom; the participant whose cumulative range contains it wins.
pub fn choose_voter(
    numbers: &[SecretNumber],
    amounts: &[Amount],
    anchor: &ChainHash,
) -> Result<LotteryResult, SplitTicketError> {
    if numbers.is_empty() {
        return Err(SplitTicketError::invalid_parameters(
            "voter draw needs at least one participant",
        ));
    }
    if numbers.len() != amounts.len() {
        return Err(SplitTicketError::invalid_parameters(format!(
            "{} secret numbers for {} committed amounts",
            numbers.len(),
            amounts.len()
        )));
    }

    let mut total: u64 = 0;
    for (index, amount) in amounts.iter().enumerate() {
        let atoms = u64::try_from(amount.atoms()).map_err(|_| {
            SplitTicketError::invalid_parameters(format!(
                "negative amount {amount} for participant {index}"
            ))
        })?;
        total = total.checked_add(atoms).ok_or_else(|| {
            SplitTicketError::invalid_parameters("total committed amount overflows")
        })?;
    }
    if total == 0 {
        return Err(SplitTicketError::invalid_parameters(
            "total committed amount is zero",
        ));
    }

    let digest = lottery_digest(numbers, anchor);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let coin_index = u64::from_le_bytes(head) % total;

    let mut cumulative: u64 = 0;
    for (voter_index, amount) in amounts.iter().enumerate() {
        // Checked above: non-negative and the sum fits.
        cumulative += amount.atoms() as u64;
        if coin_index < cumulative {
            return Ok(LotteryResult {
                coin_index,
                voter_index,
            });
        }
    }
    unreachable!("coin index {coin_index} is below the total {total}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> ChainHash {
        ChainHash::new([0x5a; 32])
    }

    #[test]
    fn reveals_matching_commitments_pass() {
        let numbers = [SecretNumber::new(1), SecretNumber::new(u64::MAX)];
        let hashes: Vec<_> = numbers
            .iter()
            .map(|nb| hash_secret_number(nb, &anchor()))
            .collect();
        check_secret_numbers(&numbers, &hashes, &anchor()).unwrap();
    }

    #[test]
    fn wrong_reveal_is_attributed() {
        let numbers = [SecretNumber::new(1), SecretNumber::new(2)];
        let hashes = [
            hash_secret_number(&numbers[0], &anchor()),
            hash_secret_number(&SecretNumber::new(3), &anchor()),
        ];
        assert_eq!(
            check_secret_numbers(&numbers, &hashes, &anchor()),
            Err(SplitTicketError::SecretNumberMismatch { index: 1 })
        );
    }

    #[test]
    fn reveal_count_must_match() {
        let numbers = [SecretNumber::new(1)];
        assert!(matches!(
            check_secret_numbers(&numbers, &[], &anchor()),
            Err(SplitTicketError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn sole_contributor_always_wins() {
        let numbers = [SecretNumber::new(1), SecretNumber::new(2)];
        let amounts = [Amount::ZERO, Amount::from_atoms(1_000)];
        let result = choose_voter(&numbers, &amounts, &anchor()).unwrap();
        assert_eq!(result.voter_index, 1);
        assert!(result.coin_index < 1_000);
    }

    #[test]
    fn draw_is_deterministic() {
        let numbers = [SecretNumber::new(7), SecretNumber::new(8), SecretNumber::new(9)];
        let amounts = [Amount::from_atoms(10); 3];
        assert_eq!(
            choose_voter(&numbers, &amounts, &anchor()).unwrap(),
            choose_voter(&numbers, &amounts, &anchor()).unwrap()
        );
    }

    #[test]
    fn invalid_draws_are_rejected() {
        let numbers = [SecretNumber::new(1)];
        assert!(choose_voter(&[], &[], &anchor()).is_err());
        assert!(choose_voter(&numbers, &[], &anchor()).is_err());
        assert!(choose_voter(&numbers, &[Amount::ZERO], &anchor()).is_err());
        assert!(choose_voter(&numbers, &[Amount::from_atoms(-1)], &anchor()).is_err());
    }
}
