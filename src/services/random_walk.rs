//! Bounded percentage drift shared by the balance and price walks.

use rand::Rng;
use rust_decimal::Decimal;

use crate::error::{GeneratorError, Result};

/// Perturb `value` by a whole-percent factor drawn uniformly from
/// `[-bound_pct, bound_pct]`.
///
/// The result always lies in `[value * (1 - bound_pct/100), value * (1 + bound_pct/100)]`.
/// A result outside `Decimal`'s range is an `ArithmeticOverflow` error.
pub fn perturb<R: Rng + ?Sized>(value: Decimal, bound_pct: u32, rng: &mut R) -> Result<Decimal> {
    let bound = bound_pct as i64;
    let drift = rng.gen_range(-bound..=bound);

    // (100 + drift) / 100 has scale 2, so building it never rounds
    let factor = Decimal::new(100 + drift, 2);

    value
        .checked_mul(factor)
        .ok_or(GeneratorError::ArithmeticOverflow { value, factor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rust_decimal_macros::dec;

    #[test]
    fn test_perturb_stays_within_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let value = dec!(200);

        for _ in 0..1_000 {
            let next = perturb(value, 15, &mut rng).unwrap();
            assert!(next >= dec!(170), "{} below lower bound", next);
            assert!(next <= dec!(230), "{} above upper bound", next);
        }
    }

    #[test]
    fn test_perturb_zero_bound_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(perturb(dec!(123.45), 0, &mut rng).unwrap(), dec!(123.45));
    }

    #[test]
    fn test_perturb_is_reproducible_under_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);

        let walk_a: Vec<_> = (0..20).map(|_| perturb(dec!(100), 15, &mut a).unwrap()).collect();
        let walk_b: Vec<_> = (0..20).map(|_| perturb(dec!(100), 15, &mut b).unwrap()).collect();
        assert_eq!(walk_a, walk_b);
    }

    #[test]
    fn test_perturb_uses_whole_percent_steps() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let next = perturb(dec!(100), 15, &mut rng).unwrap();
            assert_eq!(next, next.trunc());
        }
    }

    #[test]
    fn test_perturb_overflow_is_an_error() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut overflowed = 0;

        for _ in 0..200 {
            match perturb(Decimal::MAX, 15, &mut rng) {
                Ok(next) => assert!(next <= Decimal::MAX),
                Err(GeneratorError::ArithmeticOverflow { value, factor }) => {
                    assert_eq!(value, Decimal::MAX);
                    assert!(factor > Decimal::ONE);
                    overflowed += 1;
                }
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert!(overflowed > 0);
    }
}
