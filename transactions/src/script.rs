//! Script opcodes and templates used by split transactions.

use splitticket_types::VoterLotteryCommitment;

pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Size of the pk script of the voter lottery commitment output
/// (output 0 of the split tx): `OP_RETURN OP_DATA_32 <32-byte digest>`.
pub const VOTER_LOTTERY_PK_SCRIPT_SIZE: usize = 1 + 1 + 32;

/// Null-data script embedding the voter lottery commitment.
pub fn voter_lottery_script(commitment: &VoterLotteryCommitment) -> Vec<u8> {
    let mut script = Vec::with_capacity(VOTER_LOTTERY_PK_SCRIPT_SIZE);
    script.push(OP_RETURN);
    script.push(OP_DATA_32);
    script.extend_from_slice(commitment.as_bytes());
    script
}

/// The data pushed by a voter lottery script: everything after the
/// `OP_RETURN` and the push opcode. Empty if the script is shorter than two
/// bytes.
pub fn voter_lottery_payload(pk_script: &[u8]) -> &[u8] {
    pk_script.get(2..).unwrap_or(&[])
}

/// Standard pay-to-pubkey-hash script for a 20-byte key hash.
pub fn pay_to_pubkey_hash_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
    script.extend_from_slice(pubkey_hash);
    script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
    script
}
