//! Nullable script engine.

use crate::signer::null_signature;
use splitticket_types::{Amount, ScriptFault};
use splitticket_verification::{InputScriptContext, ScriptEngine, ScriptFlags};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// What the engine was asked to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedExecution {
    pub input_index: usize,
    pub flags: ScriptFlags,
    pub output_value: Amount,
    pub script_version: u16,
}

/// A script engine that accepts exactly the stand-in signatures produced by
/// [`sign_split`](crate::sign_split).
///
/// Inputs can additionally be forced to fail, and every execution is
/// recorded for assertions.
#[derive(Default)]
pub struct NullScriptEngine {
    forced_failures: HashSet<usize>,
    executions: Mutex<Vec<RecordedExecution>>,
}

impl NullScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make input `index` fail regardless of its signature.
    pub fn fail_input(mut self, index: usize) -> Self {
        self.forced_failures.insert(index);
        self
    }

    /// All executions so far, in call order.
    pub fn executions(&self) -> Vec<RecordedExecution> {
        self.executions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScriptEngine for NullScriptEngine {
    fn execute(&self, ctx: &InputScriptContext<'_>) -> Result<(), ScriptFault> {
        self.executions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedExecution {
                input_index: ctx.input_index,
                flags: ctx.flags,
                output_value: ctx.output_value,
                script_version: ctx.script_version,
            });

        if ctx.input_index >= ctx.tx.inputs.len() {
            return Err(ScriptFault::Setup(format!(
                "input index {} out of range for {} inputs",
                ctx.input_index,
                ctx.tx.inputs.len()
            )));
        }
        if self.forced_failures.contains(&ctx.input_index) {
            return Err(ScriptFault::Execution("forced failure".into()));
        }

        let sig_script = ctx.signature_script();
        if sig_script.is_empty() {
            return Err(ScriptFault::Execution("empty signature script".into()));
        }
        let expected = null_signature(ctx.pk_script, &ctx.tx.hash(), ctx.input_index);
        if sig_script != expected.as_slice() {
            return Err(ScriptFault::Execution(
                "signature does not satisfy the output script".into(),
            ));
        }
        Ok(())
    }
}
