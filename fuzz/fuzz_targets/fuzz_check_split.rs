#![no_main]

use libfuzzer_sys::fuzz_target;
use splitticket_nullables::NullSanityChecker;
use splitticket_transactions::codec;
use splitticket_types::{ChainHash, ChainParams, SecretNumberHash};
use splitticket_verification::check_split;

// Structural validation of any decodable transaction returns an error or
// success, never a panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (head, rest) = data.split_at(32);
    let mut anchor = [0u8; 32];
    anchor.copy_from_slice(head);

    if let Ok(tx) = codec::deserialize(rest) {
        let hashes: Vec<SecretNumberHash> = tx
            .inputs
            .iter()
            .map(|input| SecretNumberHash::new(*input.previous_out_point.hash.as_bytes()))
            .collect();
        let _ = check_split(
            &NullSanityChecker::accepting(),
            &tx,
            &hashes,
            &ChainHash::new(anchor),
            &ChainParams::mainnet(),
        );
    }
});
