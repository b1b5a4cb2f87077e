use proptest::prelude::*;

use crispy_types::{frac_mul, Address, GovernorParams, Hash256, Timestamp, SCALE, TOKEN_UNIT};

proptest! {
    /// The treasury leg and the finish reward always sum to the total tax.
    #[test]
    fn tax_split_conserves_total(
        threshold in 0u128..(1u128 << 100),
        tax in 0u128..=SCALE,
        share in 0u128..=SCALE,
    ) {
        let params = GovernorParams {
            activation_threshold: threshold,
            activation_tax: tax,
            finish_reward_share: share,
            vote_period_secs: 60,
        };
        let split = params.tax_split().expect("fractions <= 1 cannot overflow");
        prop_assert_eq!(split.tax + split.finish_reward, split.total_tax);
        prop_assert!(split.total_tax <= threshold);
        prop_assert!(split.finish_reward <= split.total_tax);
    }

    /// frac_mul agrees with the naive product whenever the naive product fits.
    #[test]
    fn frac_mul_matches_naive(x in 0u128..(1u128 << 64), y in 0u128..(1u128 << 63)) {
        prop_assert_eq!(frac_mul(x, y), Some(x * y / SCALE));
    }

    /// Multiplying by one is the identity.
    #[test]
    fn frac_mul_by_one_is_identity(x in 0u128..u128::MAX) {
        prop_assert_eq!(frac_mul(x, SCALE), Some(x));
    }

    /// Address display/parse is lossless.
    #[test]
    fn address_text_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        prop_assert_eq!(addr.to_string().parse::<Address>().unwrap(), addr);
    }

    /// Hash256::is_zero is true only for all-zero bytes.
    #[test]
    fn hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        prop_assert_eq!(Hash256::new(bytes).is_zero(), bytes == [0u8; 32]);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        prop_assert_eq!(Timestamp::new(a) <= Timestamp::new(b), a <= b);
    }
}

#[test]
fn token_unit_and_scale_share_precision() {
    assert_eq!(TOKEN_UNIT, SCALE);
}
