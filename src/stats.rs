//! Replication statistics and incremental cost-effectiveness ratios.

use statrs::statistics::Statistics;

use crate::error::StatsError;

pub fn mean(sample: &[f64]) -> Result<f64, StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    Ok(sample.iter().mean())
}

/// Sample standard deviation (n - 1 divisor).
pub fn sd(sample: &[f64]) -> Result<f64, StatsError> {
    match sample.len() {
        0 => Err(StatsError::EmptySample),
        1 => Err(StatsError::InsufficientSample { required: 2, actual: 1 }),
        _ => Ok(sample.iter().std_dev()),
    }
}

/// Standard error of the mean, `sd / sqrt(n)`.
pub fn se(sample: &[f64]) -> Result<f64, StatsError> {
    Ok(sd(sample)? / (sample.len() as f64).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    pub sd: f64,
    pub se: f64,
}

impl Summary {
    pub fn of(sample: &[f64]) -> Result<Self, StatsError> {
        Ok(Summary {
            n: sample.len(),
            mean: mean(sample)?,
            sd: sd(sample)?,
            se: se(sample)?,
        })
    }
}

/// `(mean(cost_a) - mean(cost_b)) / (mean(effect_a) - mean(effect_b))`.
///
/// Identical mean effects give `StatsError::DegenerateIcer` carrying the
/// non-finite quotient.
pub fn icer(
    cost_a: &[f64],
    effect_a: &[f64],
    cost_b: &[f64],
    effect_b: &[f64],
) -> Result<f64, StatsError> {
    let incremental_cost = mean(cost_a)? - mean(cost_b)?;
    let incremental_effect = mean(effect_a)? - mean(effect_b)?;
    let value = incremental_cost / incremental_effect;
    if incremental_effect == 0.0 {
        return Err(StatsError::DegenerateIcer { incremental_cost, value });
    }
    Ok(value)
}
