#![no_main]

use libfuzzer_sys::fuzz_target;
use splitticket_transactions::codec;

// Decoding arbitrary bytes never panics, and whatever decodes re-encodes to
// the same bytes.
fuzz_target!(|data: &[u8]| {
    if let Ok(tx) = codec::deserialize(data) {
        let encoded = codec::serialize(&tx);
        assert_eq!(encoded.len(), codec::serialize_size(&tx));
        assert_eq!(encoded, data);
    }
});
