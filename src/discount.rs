//! Present values under annual compounding at `rate`.

/// Present value of a one-off payment of `amount` at `time`.
pub fn discount_point(amount: f64, time: f64, rate: f64) -> f64 {
    if rate <= 0.0 || time == 0.0 {
        amount
    } else {
        amount / (1.0 + rate).powf(time)
    }
}

/// Present value of a constant flow `flow_rate` per unit time paid
/// continuously over `[start, finish)`.
///
/// Closed-form integral of `flow_rate * (1 + rate)^-t`, written as the
/// discount factor at `start` times the discounted length of the interval.
pub fn discount_interval(flow_rate: f64, start: f64, finish: f64, rate: f64) -> f64 {
    let duration = finish - start;
    if rate <= 0.0 || duration == 0.0 {
        return flow_rate * duration;
    }
    let base = 1.0 + rate;
    flow_rate / base.powf(start) / base.ln() * (1.0 - 1.0 / base.powf(duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_identities() {
        assert_eq!(discount_point(100.0, 0.0, 0.04), 100.0);
        assert_eq!(discount_point(100.0, 10.0, 0.0), 100.0);
        assert_eq!(discount_point(100.0, 10.0, -0.1), 100.0);
        assert!((discount_point(104.0, 1.0, 0.04) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_interval_identities() {
        assert_eq!(discount_interval(0.8, 3.0, 3.0, 0.015), 0.0);
        assert_eq!(discount_interval(0.8, 2.0, 7.0, 0.0), 0.8 * 5.0);
    }

    #[test]
    fn test_interval_matches_numeric_integral() {
        let (y, s, f, r): (f64, f64, f64, f64) = (0.7, 1.25, 4.5, 0.04);
        let steps = 200_000;
        let h = (f - s) / steps as f64;
        let numeric: f64 = (0..steps)
            .map(|i| y * (1.0 + r).powf(-(s + (i as f64 + 0.5) * h)) * h)
            .sum();
        assert!((discount_interval(y, s, f, r) - numeric).abs() < 1e-9);
    }

    #[test]
    fn test_interval_is_additive() {
        let whole = discount_interval(1.0, 0.0, 10.0, 0.015);
        let split = discount_interval(1.0, 0.0, 4.0, 0.015) + discount_interval(1.0, 4.0, 10.0, 0.015);
        assert!((whole - split).abs() < 1e-12);
    }
}
