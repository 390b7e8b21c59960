//! Commitment side of the voter lottery.

use splitticket_crypto::blake2b_256_multi;
use splitticket_types::{ChainHash, SecretNumber, SecretNumberHash, VoterLotteryCommitment};

/// Hash a participant's secret number against the lottery anchor.
///
/// `Blake2b-256(le_u64(number) ‖ anchor)`
pub fn hash_secret_number(number: &SecretNumber, anchor: &ChainHash) -> SecretNumberHash {
    SecretNumberHash::new(blake2b_256_multi(&[
        &number.to_le_bytes(),
        anchor.as_bytes(),
    ]))
}

/// The voter lottery commitment of a session.
///
/// `Blake2b-256(anchor ‖ hashes[0] ‖ … ‖ hashes[n-1])`, with the hashes in
/// the order participants were admitted to the session. The coordinator and
/// every validator must pass the same order; any change to the order, to a
/// hash or to the anchor yields a different digest.
pub fn secret_number_hashes_hash(
    hashes: &[SecretNumberHash],
    anchor: &ChainHash,
) -> VoterLotteryCommitment {
    let mut parts: Vec<&[u8]> = Vec::with_capacity(hashes.len() + 1);
    parts.push(anchor.as_bytes());
    parts.extend(hashes.iter().map(|hash| hash.as_bytes().as_slice()));
    VoterLotteryCommitment::new(blake2b_256_multi(&parts))
}
