//! Wire serialization of split transactions.
//!
//! Full serialization layout (all integers little-endian):
//!
//! ```text
//! u32   version | (ser_type << 16)
//! prefix:
//!   compact  input count
//!     [32] prev hash, u32 prev index, u8 tree, u32 sequence
//!   compact  output count
//!     i64 value, u16 script version, compact len, script
//!   u32 lock_time, u32 expiry
//! witness:
//!   compact  input count
//!     i64 value_in, u32 block height, u32 block index, compact len, sig script
//! ```
//!
//! The transaction hash covers only the prefix (serialized with the
//! no-witness type), so signing does not change it.

use crate::error::TransactionError;
use crate::split::{OutPoint, SplitTx, TxIn, TxOut, TxTree};
use splitticket_types::{Amount, TxHash};

/// Prefix and witness.
pub const SER_TYPE_FULL: u16 = 0;
/// Prefix only.
pub const SER_TYPE_NO_WITNESS: u16 = 1;

const PREFIX_INPUT_SIZE: usize = 32 + 4 + 1 + 4;
const MIN_OUTPUT_SIZE: usize = 8 + 2 + 1;
const MIN_WITNESS_SIZE: usize = 8 + 4 + 4 + 1;

/// Number of bytes `compact_size_encode(n)` produces.
pub fn compact_size_len(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Append the compact-size encoding of `n`.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

fn var_bytes_len(bytes: &[u8]) -> usize {
    compact_size_len(bytes.len() as u64) + bytes.len()
}

fn prefix_size(tx: &SplitTx) -> usize {
    let outputs: usize = tx
        .outputs
        .iter()
        .map(|out| 8 + 2 + var_bytes_len(&out.pk_script))
        .sum();
    compact_size_len(tx.inputs.len() as u64)
        + tx.inputs.len() * PREFIX_INPUT_SIZE
        + compact_size_len(tx.outputs.len() as u64)
        + outputs
        + 4
        + 4
}

fn witness_size(tx: &SplitTx) -> usize {
    let inputs: usize = tx
        .inputs
        .iter()
        .map(|input| 8 + 4 + 4 + var_bytes_len(&input.signature_script))
        .sum();
    compact_size_len(tx.inputs.len() as u64) + inputs
}

/// Size in bytes of the full serialization, computed without serializing.
pub fn serialize_size(tx: &SplitTx) -> usize {
    4 + prefix_size(tx) + witness_size(tx)
}

fn version_word(tx: &SplitTx, ser_type: u16) -> u32 {
    u32::from(tx.version) | (u32::from(ser_type) << 16)
}

fn write_prefix(out: &mut Vec<u8>, tx: &SplitTx) {
    write_compact_size(out, tx.inputs.len() as u64);
    for input in &tx.inputs {
        let prev = &input.previous_out_point;
        out.extend_from_slice(prev.hash.as_bytes());
        out.extend_from_slice(&prev.index.to_le_bytes());
        out.push(prev.tree.as_u8());
        out.extend_from_slice(&input.sequence.to_le_bytes());
    }
    write_compact_size(out, tx.outputs.len() as u64);
    for output in &tx.outputs {
        out.extend_from_slice(&output.value.atoms().to_le_bytes());
        out.extend_from_slice(&output.version.to_le_bytes());
        write_compact_size(out, output.pk_script.len() as u64);
        out.extend_from_slice(&output.pk_script);
    }
    out.extend_from_slice(&tx.lock_time.to_le_bytes());
    out.extend_from_slice(&tx.expiry.to_le_bytes());
}

fn write_witness(out: &mut Vec<u8>, tx: &SplitTx) {
    write_compact_size(out, tx.inputs.len() as u64);
    for input in &tx.inputs {
        out.extend_from_slice(&input.value_in.atoms().to_le_bytes());
        out.extend_from_slice(&input.block_height.to_le_bytes());
        out.extend_from_slice(&input.block_index.to_le_bytes());
        write_compact_size(out, input.signature_script.len() as u64);
        out.extend_from_slice(&input.signature_script);
    }
}

/// Full serialization (prefix and witness).
pub fn serialize(tx: &SplitTx) -> Vec<u8> {
    let mut out = Vec::with_capacity(serialize_size(tx));
    out.extend_from_slice(&version_word(tx, SER_TYPE_FULL).to_le_bytes());
    write_prefix(&mut out, tx);
    write_witness(&mut out, tx);
    out
}

/// Prefix-only serialization, the preimage of the transaction hash.
pub fn serialize_prefix_only(tx: &SplitTx) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + prefix_size(tx));
    out.extend_from_slice(&version_word(tx, SER_TYPE_NO_WITNESS).to_le_bytes());
    write_prefix(&mut out, tx);
    out
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn read_exact(
        &mut self,
        len: usize,
        field: &'static str,
    ) -> Result<&'a [u8], TransactionError> {
        if self.remaining() < len {
            return Err(TransactionError::Truncated { field });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.bytes[start..start + len])
    }

    fn read_array<const N: usize>(
        &mut self,
        field: &'static str,
    ) -> Result<[u8; N], TransactionError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_exact(N, field)?);
        Ok(buf)
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8, TransactionError> {
        Ok(self.read_exact(1, field)?[0])
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16, TransactionError> {
        self.read_array(field).map(u16::from_le_bytes)
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32, TransactionError> {
        self.read_array(field).map(u32::from_le_bytes)
    }

    fn read_i64(&mut self, field: &'static str) -> Result<i64, TransactionError> {
        self.read_array(field).map(i64::from_le_bytes)
    }

    fn read_compact_size(&mut self, field: &'static str) -> Result<u64, TransactionError> {
        let (value, min) = match self.read_u8(field)? {
            tag @ 0..=0xfc => return Ok(u64::from(tag)),
            0xfd => (u64::from(self.read_u16(field)?), 0xfd),
            0xfe => (u64::from(self.read_u32(field)?), 0x1_0000),
            _ => (u64::from_le_bytes(self.read_array(field)?), 0x1_0000_0000),
        };
        if value < min {
            return Err(TransactionError::NonMinimalCompactSize { value });
        }
        Ok(value)
    }

    /// Read an element count, rejecting counts that cannot possibly fit in
    /// the remaining bytes so a hostile prefix cannot force a huge allocation.
    fn read_count(
        &mut self,
        field: &'static str,
        min_element_size: usize,
    ) -> Result<usize, TransactionError> {
        let count = self.read_compact_size(field)?;
        let max = (self.remaining() / min_element_size) as u64;
        if count > max {
            return Err(TransactionError::TooManyElements { field, count, max });
        }
        Ok(count as usize)
    }

    fn read_var_bytes(&mut self, field: &'static str) -> Result<Vec<u8>, TransactionError> {
        let len = self.read_count(field, 1)?;
        Ok(self.read_exact(len, field)?.to_vec())
    }
}

/// Decode a fully serialized split transaction.
pub fn deserialize(bytes: &[u8]) -> Result<SplitTx, TransactionError> {
    let mut cursor = Cursor::new(bytes);

    let word = cursor.read_u32("version")?;
    let ser_type = (word >> 16) as u16;
    if ser_type != SER_TYPE_FULL {
        return Err(TransactionError::UnsupportedSerType(ser_type));
    }
    let version = (word & 0xffff) as u16;

    let input_count = cursor.read_count("input", PREFIX_INPUT_SIZE)?;
    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        let hash = TxHash::new(cursor.read_array("prev hash")?);
        let index = cursor.read_u32("prev index")?;
        let tree_byte = cursor.read_u8("tree")?;
        let tree = TxTree::from_u8(tree_byte).ok_or(TransactionError::UnknownTree(tree_byte))?;
        let sequence = cursor.read_u32("sequence")?;
        let mut input = TxIn::new(OutPoint::new(hash, index, tree), Amount::ZERO);
        input.sequence = sequence;
        inputs.push(input);
    }

    let output_count = cursor.read_count("output", MIN_OUTPUT_SIZE)?;
    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        let value = Amount::from_atoms(cursor.read_i64("output value")?);
        let version = cursor.read_u16("script version")?;
        let pk_script = cursor.read_var_bytes("pk script")?;
        outputs.push(TxOut {
            value,
            version,
            pk_script,
        });
    }

    let lock_time = cursor.read_u32("lock time")?;
    let expiry = cursor.read_u32("expiry")?;

    let witness_count = cursor.read_count("witness", MIN_WITNESS_SIZE)?;
    if witness_count != inputs.len() {
        return Err(TransactionError::WitnessCountMismatch {
            prefix: inputs.len(),
            witness: witness_count,
        });
    }
    for input in &mut inputs {
        input.value_in = Amount::from_atoms(cursor.read_i64("value in")?);
        input.block_height = cursor.read_u32("block height")?;
        input.block_index = cursor.read_u32("block index")?;
        input.signature_script = cursor.read_var_bytes("signature script")?;
    }

    if cursor.remaining() != 0 {
        return Err(TransactionError::TrailingBytes(cursor.remaining()));
    }

    Ok(SplitTx {
        version,
        inputs,
        outputs,
        lock_time,
        expiry,
    })
}
