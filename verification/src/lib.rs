//! Split transaction validation.
//!
//! Two phases, each a list of ordered checks that stop at the first failure:
//! 1. **Structure** ([`check_split`]): chain sanity, then output 0 must be the
//!    voter lottery commitment recomputed from the session's secret number
//!    hashes. Runs on the unsigned transaction.
//! 2. **Signed** ([`check_signed_split`]): every input's script must execute
//!    against the UTXO it spends, input totals must stay in range and the fee
//!    must meet the minimum relay fee. Runs once everyone has signed.
//!
//! General transaction and script validity belong to the chain node; they are
//! consumed through the [`TransactionSanity`] and [`ScriptEngine`] ports.

pub mod sanity;
pub mod script;
pub mod signed;
pub mod structure;
pub mod validator;

pub use sanity::TransactionSanity;
pub use script::{InputScriptContext, ScriptEngine, ScriptFlags};
pub use signed::check_signed_split;
pub use splitticket_types::SplitTicketError;
pub use structure::check_split;
pub use validator::SplitValidator;
