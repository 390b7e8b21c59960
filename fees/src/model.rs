//! Per-participant and total session fees.
//!
//! ```text
//! size    = initial_size + n × participant_size + participant_size   (pool pair)
//! nominal = size × fee_rate + safety_margin
//! per     = ceil(nominal / n)
//! total   = per × n
//! ```
//!
//! `total - nominal` lies in `0..n`: rounding up may overcharge by at most
//! `n - 1` atoms but never leaves the ticket paying less than the estimate.

use crate::params::FeeParams;
use serde::{Deserialize, Serialize};
use splitticket_types::{Amount, SplitTicketError};

/// Fees of a session with a given participant count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFees {
    pub participants: u32,
    /// Size-based fee plus safety margin, before rounding.
    pub nominal: Amount,
    /// What each participant pays.
    pub per_participant: Amount,
    /// `per_participant × participants`.
    pub total: Amount,
}

/// Pure fee calculator over a fixed set of [`FeeParams`].
#[derive(Clone, Debug, Default)]
pub struct FeeModel {
    params: FeeParams,
}

impl FeeModel {
    pub fn new(params: FeeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FeeParams {
        &self.params
    }

    /// Estimated serialized size of the ticket purchase for `n` participants
    /// plus the pool.
    pub fn estimated_size(&self, participants: u32) -> Result<u64, SplitTicketError> {
        let n = nonzero(participants)?;
        n.checked_add(1)
            .and_then(|pairs| pairs.checked_mul(self.params.participant_size))
            .and_then(|pairs_size| pairs_size.checked_add(self.params.initial_size))
            .ok_or_else(|| overflow("estimated size", participants))
    }

    /// Size-based fee plus the safety margin, before splitting.
    pub fn nominal_fee(&self, participants: u32) -> Result<Amount, SplitTicketError> {
        let size = self.estimated_size(participants)?;
        i64::try_from(size)
            .ok()
            .and_then(|size| self.params.fee_rate.checked_mul(size))
            .and_then(|fee| fee.checked_add(self.params.safety_margin))
            .ok_or_else(|| overflow("nominal fee", participants))
    }

    /// Fee each of `participants` pays: the nominal fee divided by the
    /// participant count, rounded up to the next atom.
    pub fn participant_fee(&self, participants: u32) -> Result<Amount, SplitTicketError> {
        let nominal = self.nominal_fee(participants)?;
        if nominal.is_negative() {
            return Err(SplitTicketError::invalid_parameters(format!(
                "negative nominal fee {nominal}"
            )));
        }
        let n = i64::from(participants);
        let per = nominal.atoms() / n + i64::from(nominal.atoms() % n != 0);
        Ok(Amount::from_atoms(per))
    }

    /// Total fee actually charged for the session: exactly
    /// `participant_fee(n) × n`.
    pub fn session_fee(&self, participants: u32) -> Result<Amount, SplitTicketError> {
        self.session_fees(participants).map(|fees| fees.total)
    }

    /// Nominal, per-participant and total fee in one go.
    pub fn session_fees(&self, participants: u32) -> Result<SessionFees, SplitTicketError> {
        let nominal = self.nominal_fee(participants)?;
        let per_participant = self.participant_fee(participants)?;
        let total = per_participant
            .checked_mul(i64::from(participants))
            .ok_or_else(|| overflow("session fee", participants))?;
        Ok(SessionFees {
            participants,
            nominal,
            per_participant,
            total,
        })
    }

    /// Funds a participant committing `commitment` atoms should hold to take
    /// part in a session of `participants`: commitment, fee share and the
    /// configured overhead.
    pub fn required_funds(
        &self,
        commitment: Amount,
        participants: u32,
    ) -> Result<Amount, SplitTicketError> {
        let fee = self.participant_fee(participants)?;
        commitment
            .checked_add(fee)
            .and_then(|amount| amount.checked_add(self.params.participant_fee_overhead))
            .ok_or_else(|| overflow("required funds", participants))
    }
}

fn nonzero(participants: u32) -> Result<u64, SplitTicketError> {
    if participants == 0 {
        return Err(SplitTicketError::invalid_parameters(
            "participant count must be at least 1",
        ));
    }
    Ok(u64::from(participants))
}

fn overflow(what: &str, participants: u32) -> SplitTicketError {
    SplitTicketError::invalid_parameters(format!(
        "{what} overflows for {participants} participants"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_participants_is_invalid() {
        let model = FeeModel::default();
        assert!(matches!(
            model.participant_fee(0),
            Err(SplitTicketError::InvalidParameters { .. })
        ));
        assert!(matches!(
            model.session_fee(0),
            Err(SplitTicketError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn three_participants_divide_evenly() {
        let model = FeeModel::default();
        // 48 + 4 × 249 = 1044 bytes; 1044 × 100 + 50_001 = 154_401.
        assert_eq!(model.estimated_size(3).unwrap(), 1044);
        let fees = model.session_fees(3).unwrap();
        assert_eq!(fees.nominal, Amount::from_atoms(154_401));
        assert_eq!(fees.per_participant, Amount::from_atoms(51_467));
        assert_eq!(fees.total, Amount::from_atoms(154_401));
    }

    #[test]
    fn two_participants_round_up() {
        let model = FeeModel::default();
        // 48 + 3 × 249 = 795 bytes; 79_500 + 50_001 = 129_501 -> 64_750.5.
        let fees = model.session_fees(2).unwrap();
        assert_eq!(fees.nominal, Amount::from_atoms(129_501));
        assert_eq!(fees.per_participant, Amount::from_atoms(64_751));
        assert_eq!(fees.total, Amount::from_atoms(129_502));
    }

    #[test]
    fn single_participant_pays_everything() {
        let model = FeeModel::default();
        let fees = model.session_fees(1).unwrap();
        assert_eq!(fees.per_participant, fees.nominal);
        assert_eq!(fees.total, fees.nominal);
    }

    #[test]
    fn required_funds_adds_fee_and_overhead() {
        let model = FeeModel::default();
        let commitment = Amount::from_atoms(1_000_000_000);
        let required = model.required_funds(commitment, 3).unwrap();
        assert_eq!(
            required,
            commitment + Amount::from_atoms(51_467) + FeeParams::DEFAULT_PARTICIPANT_FEE_OVERHEAD
        );
    }

    #[test]
    fn huge_sizes_report_overflow() {
        let model = FeeModel::new(FeeParams {
            participant_size: u64::MAX / 2,
            ..FeeParams::default()
        });
        assert!(matches!(
            model.session_fee(4),
            Err(SplitTicketError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn custom_rate_is_used() {
        let model = FeeModel::new(FeeParams {
            fee_rate: Amount::from_atoms(10),
            safety_margin: Amount::ZERO,
            ..FeeParams::default()
        });
        assert_eq!(model.nominal_fee(1).unwrap(), Amount::from_atoms(5_460));
    }
}
