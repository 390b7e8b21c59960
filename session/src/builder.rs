//! Assembly of the unsigned split transaction.
//!
//! Layout:
//!
//! | output | value |
//! |---|---|
//! | 0 | voter lottery commitment, zero value |
//! | 1 + 2i | participant i split output: amount + ticket fee share |
//! | 2 + 2i | participant i change |
//! | last two | pool split output (pool fee) and pool change |
//!
//! Inputs follow the same order. Change outputs that would be empty are
//! left out. The split transaction's own relay fee is shared equally among
//! the contributors, rounded up.

use crate::{Contribution, Session, SessionError};
use splitticket_transactions::{voter_lottery_script, SplitTx, TxIn, TxOut};
use splitticket_types::{Amount, ChainParams, SplitTicketError};

/// Signature script size assumed for every input when estimating the size
/// of the signed transaction.
pub const SIGNATURE_SCRIPT_ESTIMATE: usize = 106;

/// Share of the split transaction's minimum relay fee paid by each of
/// `contributors`, for a signed transaction of `signed_size` bytes.
pub fn split_fee_share(
    params: &ChainParams,
    signed_size: usize,
    contributors: usize,
) -> Result<Amount, SplitTicketError> {
    if contributors == 0 {
        return Err(SplitTicketError::invalid_parameters(
            "split tx needs at least one contributor",
        ));
    }
    let fee = params.min_relay_fee(signed_size).ok_or_else(|| {
        SplitTicketError::invalid_parameters(format!(
            "minimum relay fee overflows for a {signed_size} byte transaction"
        ))
    })?;
    let n = contributors as i64;
    Ok(Amount::from_atoms((fee.atoms() + n - 1) / n))
}

/// Build the unsigned split transaction of `session`.
pub fn build_split_tx(session: &Session, params: &ChainParams) -> Result<SplitTx, SessionError> {
    let ticket_fee = session.participant_fee()?;

    // (contribution, split output value) in input order.
    let mut funded: Vec<(&Contribution, Amount)> = Vec::new();
    for (index, participant) in session.participants().iter().enumerate() {
        let value = participant
            .amount
            .checked_add(ticket_fee)
            .filter(Amount::is_valid)
            .ok_or_else(|| {
                SplitTicketError::invalid_parameters(format!(
                    "split output of participant {index} overflows"
                ))
            })?;
        funded.push((&participant.contribution, value));
    }
    if let Some(pool) = session.pool() {
        funded.push((&pool.contribution, pool.fee));
    }

    let mut tx = SplitTx::new();
    tx.outputs.push(TxOut::new(
        Amount::ZERO,
        voter_lottery_script(&session.voter_commitment()),
    ));
    for (contribution, split_value) in &funded {
        tx.inputs.push(TxIn::new(contribution.outpoint, contribution.utxo.value));
        tx.outputs.push(TxOut::new(*split_value, contribution.split_pk_script.clone()));
        tx.outputs.push(TxOut::new(Amount::ZERO, contribution.change_pk_script.clone()));
    }

    let signed_size = estimate_signed_size(&tx);
    let share = split_fee_share(params, signed_size, funded.len())?;

    for (index, (contribution, split_value)) in funded.iter().enumerate() {
        let available = contribution.utxo.value;
        let needed = split_value
            .checked_add(share)
            .ok_or(SessionError::InsufficientFunds {
                index,
                needed: Amount::MAX,
                available,
            })?;
        let change = available
            .checked_sub(needed)
            .filter(|change| !change.is_negative())
            .ok_or(SessionError::InsufficientFunds {
                index,
                needed,
                available,
            })?;
        tx.outputs[2 + 2 * index].value = change;
    }

    // Dropping outputs only shrinks the transaction, so the fee stays enough.
    let mut position = 0usize;
    tx.outputs.retain(|output| {
        let is_change = position > 0 && position % 2 == 0;
        position += 1;
        !(is_change && output.value.is_zero())
    });

    tracing::info!(
        tx = %tx.hash(),
        network = %params.network,
        participants = session.participant_count(),
        pool = session.pool().is_some(),
        inputs = tx.inputs.len(),
        outputs = tx.outputs.len(),
        ticket_fee = %ticket_fee,
        split_fee_share = %share,
        "built split tx"
    );
    Ok(tx)
}

fn estimate_signed_size(tx: &SplitTx) -> usize {
    let mut signed = tx.clone();
    for input in &mut signed.inputs {
        input.signature_script = vec![0u8; SIGNATURE_SCRIPT_ESTIMATE];
    }
    signed.serialize_size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Participant, PoolContribution};
    use splitticket_fees::FeeModel;
    use splitticket_transactions::{pay_to_pubkey_hash_script, OutPoint, UtxoEntry};
    use splitticket_types::{ChainHash, SecretNumberHash, TxHash};

    fn contribution(i: u8, value: i64) -> Contribution {
        Contribution {
            outpoint: OutPoint::regular(TxHash::new([i; 32]), u32::from(i)),
            utxo: UtxoEntry::new(
                Amount::from_atoms(value),
                pay_to_pubkey_hash_script(&[i; 20]),
            ),
            split_pk_script: vec![0xa0 + i; 25],
            change_pk_script: vec![0xb0 + i; 25],
        }
    }

    fn session(values: &[i64]) -> Session {
        let mut s = Session::new(ChainHash::new([1u8; 32]), FeeModel::default(), 16);
        for (i, value) in values.iter().enumerate() {
            let i = i as u8 + 1;
            s.add_participant(Participant {
                amount: Amount::from_atoms(100_000_000),
                secret_hash: SecretNumberHash::new([i; 32]),
                contribution: contribution(i, *value),
            })
            .unwrap();
        }
        s
    }

    #[test]
    fn fee_share_rounds_up() {
        let params = ChainParams::mainnet();
        // 1000 bytes at 10_000 atoms/kB is 10_000 atoms.
        assert_eq!(split_fee_share(&params, 1000, 3).unwrap(), Amount::from_atoms(3_334));
        assert_eq!(split_fee_share(&params, 1000, 4).unwrap(), Amount::from_atoms(2_500));
        assert!(split_fee_share(&params, 1000, 0).is_err());
    }

    #[test]
    fn layout_follows_admission_order() {
        let s = session(&[200_000_000, 300_000_000]);
        let tx = build_split_tx(&s, &ChainParams::mainnet()).unwrap();
        let fee = s.participant_fee().unwrap();

        assert_eq!(tx.inputs.len(), 2);
        assert_eq!(tx.outputs.len(), 5);
        assert_eq!(tx.outputs[0].value, Amount::ZERO);
        assert_eq!(
            tx.outputs[0].pk_script,
            voter_lottery_script(&s.voter_commitment())
        );
        assert_eq!(tx.outputs[1].value, Amount::from_atoms(100_000_000) + fee);
        assert_eq!(tx.outputs[3].pk_script, vec![0xa2; 25]);
        assert_eq!(tx.inputs[1].previous_out_point, contribution(2, 0).outpoint);
        assert!(!tx.is_signed());
    }

    #[test]
    fn pool_pair_comes_last() {
        let mut s = session(&[200_000_000]);
        s.set_pool(PoolContribution {
            fee: Amount::from_atoms(1_000_000),
            contribution: contribution(9, 5_000_000),
        })
        .unwrap();
        let tx = build_split_tx(&s, &ChainParams::mainnet()).unwrap();
        assert_eq!(tx.inputs.len(), 2);
        assert_eq!(tx.outputs[3].value, Amount::from_atoms(1_000_000));
        assert_eq!(tx.outputs[3].pk_script, vec![0xa9; 25]);
    }

    fn with_pool(utxo_value: i64) -> Session {
        let mut s = session(&[200_000_000]);
        s.set_pool(PoolContribution {
            fee: Amount::from_atoms(1_000_000),
            contribution: contribution(9, utxo_value),
        })
        .unwrap();
        s
    }

    #[test]
    fn exact_funding_drops_change() {
        let funded = build_split_tx(&with_pool(5_000_000), &ChainParams::mainnet()).unwrap();
        let change = funded.outputs[4].value;
        let exact = 5_000_000 - change.atoms();

        let tx = build_split_tx(&with_pool(exact), &ChainParams::mainnet()).unwrap();
        assert_eq!(tx.outputs.len(), 4);
        assert_eq!(tx.outputs[3].value, Amount::from_atoms(1_000_000));
    }

    #[test]
    fn underfunded_contributor_is_named() {
        let err = build_split_tx(&with_pool(1_000_000), &ChainParams::mainnet()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InsufficientFunds { index: 1, available, .. }
                if available == Amount::from_atoms(1_000_000)
        ));
    }

    #[test]
    fn empty_session_is_rejected() {
        let s = Session::new(ChainHash::ZERO, FeeModel::default(), 4);
        assert!(matches!(
            build_split_tx(&s, &ChainParams::mainnet()),
            Err(SessionError::SplitTicket(SplitTicketError::InvalidParameters { .. }))
        ));
    }
}
