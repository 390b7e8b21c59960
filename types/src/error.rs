//! Shared error vocabulary of the split ticket core.
//!
//! Every failure is a distinct variant carrying enough context (input index,
//! expected vs. actual) to be logged or reported to the affected participant
//! without re-deriving it. Validation never recovers internally: the first
//! failing check is returned.

use crate::amount::Amount;
use crate::hash::TxHash;
use crate::secret::VoterLotteryCommitment;
use thiserror::Error;

/// Diagnostic returned by the external transaction sanity checker.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct SanityFailure {
    pub reason: String,
}

impl SanityFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Fault reported by the external script engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScriptFault {
    /// The engine could not be set up for the input (bad script, bad index...).
    #[error("engine setup failed: {0}")]
    Setup(String),

    /// The script ran and failed or left a false value on the stack.
    #[error("execution failed: {0}")]
    Execution(String),
}

/// Common error type for fee computation, commitment checks and split
/// transaction validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SplitTicketError {
    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("split tx failed sanity check: {0}")]
    SanityCheckFailed(#[source] SanityFailure),

    #[error("split tx has no outputs, expected the voter lottery commitment at output 0")]
    MissingLotteryOutput,

    #[error(
        "size of pkscript of output 0 ({actual}) of split tx doesn't have expected length ({expected})"
    )]
    OutputSizeMismatch { actual: usize, expected: usize },

    #[error("output 0 of split tx is not a null-data output (first opcode {opcode:#04x})")]
    NotNullDataOutput { opcode: u8 },

    #[error("voter lottery commitment ({actual}) does not equal the expected value ({expected})")]
    CommitmentMismatch {
        expected: VoterLotteryCommitment,
        actual: VoterLotteryCommitment,
    },

    #[error("utxo {prev_hash}:{prev_index} for input {index} of split tx not provided")]
    UtxoNotFound {
        index: usize,
        prev_hash: TxHash,
        prev_index: u32,
    },

    #[error("error executing script of input {index} of split tx: {source}")]
    ScriptExecutionFailed {
        index: usize,
        #[source]
        source: ScriptFault,
    },

    #[error("overflow of total input amount of split tx at input {index}")]
    InputAmountOverflow { index: usize },

    #[error("overflow of total output amount of split tx at output {index}")]
    OutputAmountOverflow { index: usize },

    #[error("split tx fee ({fee}) less than minimum required amount ({min_fee})")]
    FeeTooLow { fee: Amount, min_fee: Amount },

    #[error("secret number {index} does not hash to the previously sent hash")]
    SecretNumberMismatch { index: usize },
}

impl SplitTicketError {
    pub fn invalid_parameters(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }

    /// Index of the input the failure is attributed to, if any.
    ///
    /// Lets the session layer single out the participant responsible.
    pub fn input_index(&self) -> Option<usize> {
        match self {
            Self::UtxoNotFound { index, .. }
            | Self::ScriptExecutionFailed { index, .. }
            | Self::InputAmountOverflow { index } => Some(*index),
            _ => None,
        }
    }
}
