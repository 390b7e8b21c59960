use proptest::prelude::*;

use splitticket_lottery::{
    check_secret_numbers, choose_voter, hash_secret_number, secret_number_hashes_hash,
};
use splitticket_types::{Amount, ChainHash, SecretNumber, SecretNumberHash};

fn arb_hashes() -> impl Strategy<Value = Vec<SecretNumberHash>> {
    prop::collection::vec(prop::array::uniform32(0u8..), 1..16)
        .prop_map(|all| all.into_iter().map(SecretNumberHash::new).collect())
}

proptest! {
    /// Flipping any single bit of any committed hash changes the digest.
    #[test]
    fn any_hash_change_changes_digest(
        hashes in arb_hashes(),
        anchor in prop::array::uniform32(0u8..),
        pick in any::<prop::sample::Index>(),
        byte in 0usize..32,
        bit in 0u8..8,
    ) {
        let anchor = ChainHash::new(anchor);
        let original = secret_number_hashes_hash(&hashes, &anchor);

        let mut tampered = hashes.clone();
        let i = pick.index(tampered.len());
        let mut bytes = *tampered[i].as_bytes();
        bytes[byte] ^= 1 << bit;
        tampered[i] = SecretNumberHash::new(bytes);

        prop_assert_ne!(original, secret_number_hashes_hash(&tampered, &anchor));
    }

    /// Any anchor change changes the digest.
    #[test]
    fn anchor_change_changes_digest(
        hashes in arb_hashes(),
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(
            secret_number_hashes_hash(&hashes, &ChainHash::new(a)),
            secret_number_hashes_hash(&hashes, &ChainHash::new(b))
        );
    }

    /// Honest reveals always pass the commitment check.
    #[test]
    fn honest_reveals_pass(
        values in prop::collection::vec(any::<u64>(), 1..16),
        anchor in prop::array::uniform32(0u8..),
    ) {
        let anchor = ChainHash::new(anchor);
        let numbers: Vec<_> = values.into_iter().map(SecretNumber::new).collect();
        let hashes: Vec<_> = numbers.iter().map(|nb| hash_secret_number(nb, &anchor)).collect();
        prop_assert!(check_secret_numbers(&numbers, &hashes, &anchor).is_ok());
    }

    /// The drawn voter always holds a non-zero share and the coin falls in
    /// their range.
    #[test]
    fn voter_owns_the_drawn_coin(
        entries in prop::collection::vec((any::<u64>(), 0i64..1_000_000_000), 1..16),
        anchor in prop::array::uniform32(0u8..),
    ) {
        let total: i64 = entries.iter().map(|(_, amount)| amount).sum();
        prop_assume!(total > 0);
        let numbers: Vec<_> = entries.iter().map(|(nb, _)| SecretNumber::new(*nb)).collect();
        let amounts: Vec<_> = entries.iter().map(|(_, a)| Amount::from_atoms(*a)).collect();

        let result = choose_voter(&numbers, &amounts, &ChainHash::new(anchor)).unwrap();
        let before: i64 = amounts[..result.voter_index].iter().map(Amount::atoms).sum();
        let own = amounts[result.voter_index].atoms();
        prop_assert!(own > 0);
        prop_assert!(result.coin_index >= before as u64);
        prop_assert!(result.coin_index < (before + own) as u64);
    }
}
