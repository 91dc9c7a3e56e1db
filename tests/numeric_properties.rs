use colon_des::discount::{discount_interval, discount_point};
use colon_des::variates::{Gompertz, LogLogistic, LogLogisticCure};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_distr::Distribution;
use rand_xoshiro::Xoshiro256StarStar;

fn open_unit() -> impl Strategy<Value = f64> {
    1e-12f64..(1.0 - 1e-12)
}

proptest! {
    #[test]
    fn point_at_time_zero_is_undiscounted(y in -1e6f64..1e6, r in -0.5f64..0.5) {
        prop_assert_eq!(discount_point(y, 0.0, r), y);
    }

    #[test]
    fn empty_interval_is_zero(y in -1e6f64..1e6, t in 0.0f64..100.0, r in -0.5f64..0.5) {
        prop_assert_eq!(discount_interval(y, t, t, r), 0.0);
    }

    #[test]
    fn zero_rate_interval_is_undiscounted(y in -1e3f64..1e3, s in 0.0f64..50.0, d in 0.0f64..50.0) {
        let f = s + d;
        prop_assert_eq!(discount_interval(y, s, f, 0.0), y * (f - s));
    }

    #[test]
    fn discounting_never_increases_value(
        y in 0.0f64..1e5,
        s in 0.0f64..50.0,
        d in 0.01f64..50.0,
        r in 0.001f64..0.2,
    ) {
        prop_assert!(discount_point(y, s, r) <= y);
        let pv = discount_interval(y, s, s + d, r);
        prop_assert!(pv >= 0.0);
        prop_assert!(pv <= y * d * (1.0 + 1e-9));
    }

    #[test]
    fn gompertz_is_non_negative(u in open_unit(), shape in -2.0f64..2.0, rate in 1e-4f64..1.0) {
        prop_assume!(shape.abs() > 1e-6);
        let t = Gompertz::new(shape, rate).unwrap().inverse_transform(u);
        prop_assert!(!t.is_nan());
        prop_assert!(t >= 0.0);
    }

    #[test]
    fn loglogistic_is_non_negative(u in open_unit(), shape in 0.1f64..10.0, scale in 0.01f64..10.0) {
        let t = LogLogistic::new(shape, scale).unwrap().inverse_transform(u);
        prop_assert!(!t.is_nan());
        prop_assert!(t >= 0.0);
    }

    #[test]
    fn cure_model_samples_are_non_negative_or_infinite(
        seed in any::<u64>(),
        cure in 0.0f64..=1.0,
        shape in 0.1f64..10.0,
        scale in 0.01f64..10.0,
    ) {
        let d = LogLogisticCure::new(cure, shape, scale).unwrap();
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        for _ in 0..32 {
            let t = d.sample(&mut rng);
            prop_assert!(t == f64::INFINITY || (t.is_finite() && t >= 0.0));
        }
    }
}
