//! In-memory state of one split ticket session.

use crate::SessionError;
use splitticket_fees::FeeModel;
use splitticket_lottery::secret_number_hashes_hash;
use splitticket_transactions::{OutPoint, UtxoEntry, UtxoMap};
use splitticket_types::{
    Amount, ChainHash, SecretNumberHash, SplitTicketError, VoterLotteryCommitment,
};

/// A UTXO funding the split transaction, and where its funds go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub outpoint: OutPoint,
    pub utxo: UtxoEntry,
    /// Script of the split output later spent by the ticket purchase.
    pub split_pk_script: Vec<u8>,
    /// Script receiving whatever the input holds beyond its share.
    pub change_pk_script: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    /// Amount committed to the ticket price.
    pub amount: Amount,
    pub secret_hash: SecretNumberHash,
    pub contribution: Contribution,
}

/// The pool's own input and the fee its split output carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolContribution {
    pub fee: Amount,
    pub contribution: Contribution,
}

/// Participants in admission order, an optional pool contribution and the
/// chain tip anchoring the voter lottery.
#[derive(Clone, Debug)]
pub struct Session {
    anchor: ChainHash,
    fee_model: FeeModel,
    max_participants: usize,
    participants: Vec<Participant>,
    pool: Option<PoolContribution>,
}

impl Session {
    pub fn new(anchor: ChainHash, fee_model: FeeModel, max_participants: usize) -> Self {
        Self {
            anchor,
            fee_model,
            max_participants,
            participants: Vec::new(),
            pool: None,
        }
    }

    pub fn anchor(&self) -> &ChainHash {
        &self.anchor
    }

    pub fn fee_model(&self) -> &FeeModel {
        &self.fee_model
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn pool(&self) -> Option<&PoolContribution> {
        self.pool.as_ref()
    }

    /// Admit a participant at the end of the list; returns its index.
    ///
    /// The committed amount must be positive, and the funding UTXO must hold
    /// at least [`FeeModel::required_funds`] for the session size after
    /// admission.
    pub fn add_participant(&mut self, participant: Participant) -> Result<usize, SessionError> {
        if self.participants.len() >= self.max_participants {
            return Err(SessionError::TooManyParticipants {
                max: self.max_participants,
            });
        }
        self.ensure_unused(&participant.contribution.outpoint)?;

        let index = self.participants.len();
        let amount = participant.amount;
        if amount.is_zero() || !amount.is_valid() {
            return Err(SplitTicketError::invalid_parameters(format!(
                "participant {index} commits {amount}, outside the valid range"
            ))
            .into());
        }
        let n = u32::try_from(index + 1).map_err(|_| {
            SplitTicketError::invalid_parameters("participant count does not fit in u32")
        })?;
        let needed = self.fee_model.required_funds(amount, n)?;
        let available = participant.contribution.utxo.value;
        if available < needed {
            return Err(SessionError::LowAmount {
                index,
                needed,
                available,
            });
        }

        self.participants.push(participant);
        tracing::debug!(index, participants = self.participants.len(), "participant joined");
        Ok(index)
    }

    /// Remove the participant at `index`. Everyone after it moves up one
    /// place; relative order is kept.
    pub fn remove_participant(&mut self, index: usize) -> Result<Participant, SessionError> {
        if index >= self.participants.len() {
            return Err(SessionError::UnknownParticipant { index });
        }
        let participant = self.participants.remove(index);
        tracing::debug!(index, participants = self.participants.len(), "participant left");
        Ok(participant)
    }

    /// Set or replace the pool's contribution.
    pub fn set_pool(&mut self, pool: PoolContribution) -> Result<(), SessionError> {
        if !pool.fee.is_valid() {
            return Err(SplitTicketError::invalid_parameters(format!(
                "pool fee {} is negative or exceeds the maximum",
                pool.fee
            ))
            .into());
        }
        if self
            .participants
            .iter()
            .any(|p| p.contribution.outpoint == pool.contribution.outpoint)
        {
            let outpoint = pool.contribution.outpoint;
            return Err(SessionError::DuplicateInput {
                hash: outpoint.hash,
                index: outpoint.index,
            });
        }
        self.pool = Some(pool);
        Ok(())
    }

    /// Secret number hashes in admission order.
    pub fn secret_hashes(&self) -> Vec<SecretNumberHash> {
        self.participants.iter().map(|p| p.secret_hash).collect()
    }

    pub fn amounts(&self) -> Vec<Amount> {
        self.participants.iter().map(|p| p.amount).collect()
    }

    /// Commitment that output 0 of the split transaction must carry.
    pub fn voter_commitment(&self) -> VoterLotteryCommitment {
        secret_number_hashes_hash(&self.secret_hashes(), &self.anchor)
    }

    /// Ticket fee each participant pays at the current size.
    pub fn participant_fee(&self) -> Result<Amount, SplitTicketError> {
        let n = u32::try_from(self.participants.len()).map_err(|_| {
            SplitTicketError::invalid_parameters("participant count does not fit in u32")
        })?;
        self.fee_model.participant_fee(n)
    }

    /// Participant contributions in admission order, then the pool's.
    pub fn contributions(&self) -> impl Iterator<Item = &Contribution> {
        self.participants
            .iter()
            .map(|p| &p.contribution)
            .chain(self.pool.iter().map(|pool| &pool.contribution))
    }

    /// Every UTXO spent by the split transaction.
    pub fn utxo_map(&self) -> UtxoMap {
        self.contributions()
            .map(|c| (c.outpoint, c.utxo.clone()))
            .collect()
    }

    fn ensure_unused(&self, outpoint: &OutPoint) -> Result<(), SessionError> {
        if self.contributions().any(|c| c.outpoint == *outpoint) {
            return Err(SessionError::DuplicateInput {
                hash: outpoint.hash,
                index: outpoint.index,
            });
        }
        Ok(())
    }
}
