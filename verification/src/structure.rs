//! Structural validation of the unsigned split transaction.

use crate::sanity::TransactionSanity;
use splitticket_lottery::secret_number_hashes_hash;
use splitticket_transactions::{
    voter_lottery_payload, SplitTx, OP_RETURN, VOTER_LOTTERY_PK_SCRIPT_SIZE,
};
use splitticket_types::{
    ChainHash, ChainParams, SecretNumberHash, SplitTicketError, VoterLotteryCommitment,
};

/// Validate that `split` respects the split ticket rules that can be checked
/// before signing.
///
/// In order:
/// 1. the chain's sanity rules,
/// 2. output 0 exists and its script is exactly
///    [`VOTER_LOTTERY_PK_SCRIPT_SIZE`] bytes,
/// 3. output 0 starts with `OP_RETURN`,
/// 4. the pushed 32 bytes equal the commitment recomputed from
///    `secret_hashes` (in admission order) and `anchor`.
///
/// Signatures, input ownership and fees are not looked at. Calling this
/// repeatedly on the same transaction always gives the same answer.
pub fn check_split(
    sanity: &dyn TransactionSanity,
    split: &SplitTx,
    secret_hashes: &[SecretNumberHash],
    anchor: &ChainHash,
    params: &ChainParams,
) -> Result<(), SplitTicketError> {
    sanity
        .check_sanity(split, params)
        .map_err(SplitTicketError::SanityCheckFailed)?;

    let lottery_output = split
        .outputs
        .first()
        .ok_or(SplitTicketError::MissingLotteryOutput)?;
    let script = &lottery_output.pk_script;

    if script.len() != VOTER_LOTTERY_PK_SCRIPT_SIZE {
        return Err(SplitTicketError::OutputSizeMismatch {
            actual: script.len(),
            expected: VOTER_LOTTERY_PK_SCRIPT_SIZE,
        });
    }

    if script[0] != OP_RETURN {
        return Err(SplitTicketError::NotNullDataOutput { opcode: script[0] });
    }

    let expected = secret_number_hashes_hash(secret_hashes, anchor);

    // Skip the OP_RETURN and the push opcode; the length check above
    // guarantees exactly 32 bytes remain.
    let mut payload = [0u8; 32];
    payload.copy_from_slice(voter_lottery_payload(script));
    let actual = VoterLotteryCommitment::new(payload);

    if actual != expected {
        return Err(SplitTicketError::CommitmentMismatch { expected, actual });
    }

    tracing::debug!(
        inputs = split.inputs.len(),
        outputs = split.outputs.len(),
        participants = secret_hashes.len(),
        commitment = %expected,
        "split tx passed structural checks"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitticket_transactions::{voter_lottery_script, OutPoint, TxIn, TxOut, OP_DATA_32};
    use splitticket_types::{Amount, SanityFailure, TxHash};

    struct Sane;

    impl TransactionSanity for Sane {
        fn check_sanity(&self, _: &SplitTx, _: &ChainParams) -> Result<(), SanityFailure> {
            Ok(())
        }
    }

    struct Insane;

    impl TransactionSanity for Insane {
        fn check_sanity(&self, _: &SplitTx, _: &ChainParams) -> Result<(), SanityFailure> {
            Err(SanityFailure::new("transaction has no inputs"))
        }
    }

    fn anchor() -> ChainHash {
        ChainHash::new([0x33; 32])
    }

    fn hashes() -> Vec<SecretNumberHash> {
        vec![
            SecretNumberHash::new([1u8; 32]),
            SecretNumberHash::new([2u8; 32]),
        ]
    }

    fn split_with_script(script: Vec<u8>) -> SplitTx {
        let mut tx = SplitTx::new();
        tx.inputs.push(TxIn::new(
            OutPoint::regular(TxHash::new([9u8; 32]), 0),
            Amount::from_atoms(10_000),
        ));
        tx.outputs.push(TxOut::new(Amount::ZERO, script));
        tx.outputs.push(TxOut::new(Amount::from_atoms(9_000), vec![0x51]));
        tx
    }

    fn valid_split() -> SplitTx {
        let commitment = secret_number_hashes_hash(&hashes(), &anchor());
        split_with_script(voter_lottery_script(&commitment))
    }

    fn check(sanity: &dyn TransactionSanity, tx: &SplitTx) -> Result<(), SplitTicketError> {
        check_split(sanity, tx, &hashes(), &anchor(), &ChainParams::mainnet())
    }

    #[test]
    fn accepts_matching_commitment() {
        check(&Sane, &valid_split()).unwrap();
        // Idempotent.
        check(&Sane, &valid_split()).unwrap();
    }

    #[test]
    fn sanity_failure_is_wrapped() {
        let err = check(&Insane, &valid_split()).unwrap_err();
        assert_eq!(
            err,
            SplitTicketError::SanityCheckFailed(SanityFailure::new("transaction has no inputs"))
        );
    }

    #[test]
    fn rejects_off_by_one_script() {
        let mut script = voter_lottery_script(&secret_number_hashes_hash(&hashes(), &anchor()));
        script.pop();
        let err = check(&Sane, &split_with_script(script)).unwrap_err();
        assert_eq!(
            err,
            SplitTicketError::OutputSizeMismatch {
                actual: 33,
                expected: 34
            }
        );
    }

    #[test]
    fn rejects_other_opcode() {
        let mut script = voter_lottery_script(&secret_number_hashes_hash(&hashes(), &anchor()));
        script[0] = OP_DATA_32;
        let err = check(&Sane, &split_with_script(script)).unwrap_err();
        assert_eq!(err, SplitTicketError::NotNullDataOutput { opcode: OP_DATA_32 });
    }

    #[test]
    fn rejects_commitment_to_other_hashes() {
        let wrong = [SecretNumberHash::new([1u8; 32]), SecretNumberHash::new([3u8; 32])];
        let wrong_commitment = secret_number_hashes_hash(&wrong, &anchor());
        let tx = split_with_script(voter_lottery_script(&wrong_commitment));
        let err = check(&Sane, &tx).unwrap_err();
        assert_eq!(
            err,
            SplitTicketError::CommitmentMismatch {
                expected: secret_number_hashes_hash(&hashes(), &anchor()),
                actual: wrong_commitment,
            }
        );
    }

    #[test]
    fn rejects_missing_output() {
        let mut tx = valid_split();
        tx.outputs.clear();
        assert_eq!(
            check(&Sane, &tx).unwrap_err(),
            SplitTicketError::MissingLotteryOutput
        );
    }

    #[test]
    fn sanity_runs_before_shape_checks() {
        let tx = split_with_script(vec![0x00]);
        assert!(matches!(
            check(&Insane, &tx),
            Err(SplitTicketError::SanityCheckFailed(_))
        ));
    }
}
