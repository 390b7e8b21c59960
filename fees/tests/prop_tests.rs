use proptest::prelude::*;

use splitticket_fees::{FeeModel, FeeParams};
use splitticket_types::Amount;

fn arb_params() -> impl Strategy<Value = FeeParams> {
    (0u64..10_000, 1u64..10_000, 0i64..100_000, 0i64..10_000_000).prop_map(
        |(initial_size, participant_size, rate, margin)| FeeParams {
            initial_size,
            participant_size,
            fee_rate: Amount::from_atoms(rate),
            safety_margin: Amount::from_atoms(margin),
            ..FeeParams::default()
        },
    )
}

proptest! {
    /// The total is exactly n × per-participant fee.
    #[test]
    fn total_is_exact_multiple(n in 1u32..500) {
        let model = FeeModel::default();
        let per = model.participant_fee(n).unwrap();
        let total = model.session_fee(n).unwrap();
        prop_assert_eq!(total, per * i64::from(n));
    }

    /// Rounding never undershoots the nominal estimate and overshoots by less
    /// than one atom per participant.
    #[test]
    fn rounding_bounds(params in arb_params(), n in 1u32..500) {
        let model = FeeModel::new(params);
        let fees = model.session_fees(n).unwrap();
        prop_assert!(fees.total >= fees.nominal);
        prop_assert!(fees.total.atoms() - fees.nominal.atoms() < i64::from(n));
    }

    /// With the default parameters every participant pays something.
    #[test]
    fn participant_fee_is_positive(n in 1u32..1_000) {
        let per = FeeModel::default().participant_fee(n).unwrap();
        prop_assert!(per > Amount::ZERO);
    }

    /// Same inputs, same fees.
    #[test]
    fn deterministic(params in arb_params(), n in 1u32..500) {
        let a = FeeModel::new(params.clone()).session_fees(n).unwrap();
        let b = FeeModel::new(params).session_fees(n).unwrap();
        prop_assert_eq!(a, b);
    }
}
