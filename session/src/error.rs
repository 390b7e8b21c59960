use splitticket_types::{Amount, SplitTicketError, TxHash};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    SplitTicket(#[from] SplitTicketError),

    #[error("session is full ({max} participants)")]
    TooManyParticipants { max: usize },

    #[error("outpoint {hash}:{index} already funds this session")]
    DuplicateInput { hash: TxHash, index: u32 },

    #[error("participant {index} must hold at least {needed} to join, its input holds {available}")]
    LowAmount {
        index: usize,
        needed: Amount,
        available: Amount,
    },

    #[error("contributor {index} needs {needed} but its input holds {available}")]
    InsufficientFunds {
        index: usize,
        needed: Amount,
        available: Amount,
    },

    #[error("no participant at index {index}")]
    UnknownParticipant { index: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(#[from] splitticket_utils::LoggingError),
}
