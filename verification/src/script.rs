//! Port to the chain's script engine.

use serde::{Deserialize, Serialize};
use splitticket_transactions::SplitTx;
use splitticket_types::{Amount, ScriptFault};

bitflags::bitflags! {
    /// Script validation flags handed to the engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ScriptFlags: u32 {
        /// Enforce pay-to-script-hash rules.
        const BIP16 = 1 << 0;
        /// Require minimal encodings for data pushes.
        const VERIFY_MINIMAL_DATA = 1 << 1;
        /// Signature scripts may only contain push operations.
        const VERIFY_SIG_PUSH_ONLY = 1 << 2;
        /// Enable the SHA-256 opcode.
        const VERIFY_SHA256 = 1 << 3;
    }
}

impl ScriptFlags {
    /// Flags every split transaction input is executed with.
    pub const SPLIT_INPUT: Self = Self::BIP16
        .union(Self::VERIFY_MINIMAL_DATA)
        .union(Self::VERIFY_SIG_PUSH_ONLY)
        .union(Self::VERIFY_SHA256);
}

/// Everything the engine needs to run one input's scripts.
#[derive(Clone, Copy, Debug)]
pub struct InputScriptContext<'a> {
    /// Locking script of the output being spent.
    pub pk_script: &'a [u8],
    /// Version of `pk_script`.
    pub script_version: u16,
    /// Value of the output being spent.
    pub output_value: Amount,
    pub tx: &'a SplitTx,
    pub input_index: usize,
    pub flags: ScriptFlags,
}

impl InputScriptContext<'_> {
    /// The unlocking script under test.
    pub fn signature_script(&self) -> &[u8] {
        self.tx
            .inputs
            .get(self.input_index)
            .map(|input| input.signature_script.as_slice())
            .unwrap_or(&[])
    }
}

/// Runs an input's signature script against the locking script it spends.
///
/// Covers both engine setup and execution: a failure in either is reported
/// as a [`ScriptFault`]. Implementations must be side-effect free on their
/// inputs and callable from several threads at once.
pub trait ScriptEngine: Send + Sync {
    fn execute(&self, ctx: &InputScriptContext<'_>) -> Result<(), ScriptFault>;
}
