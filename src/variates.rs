//! Time-to-event samplers.
//!
//! Each sampler is a closed-form inverse transform of a single `Open01`
//! draw (two for the cure mixture), so a seeded generator fixes every
//! sample. Results are non-negative or `f64::INFINITY` for subjects the
//! event never reaches.

use rand::Rng;
use rand_distr::{Distribution, Open01};

use crate::error::ModelError;

fn check(name: &'static str, value: f64, ok: bool) -> Result<(), ModelError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { name, value })
    }
}

/// Gompertz with hazard `rate * exp(shape * t)`.
///
/// A negative shape gives a plateauing survivor curve; draws that land in
/// the plateau never experience the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gompertz {
    shape: f64,
    rate: f64,
}

impl Gompertz {
    pub fn new(shape: f64, rate: f64) -> Result<Self, ModelError> {
        check("gompertz.shape", shape, shape != 0.0)?;
        check("gompertz.rate", rate, rate > 0.0)?;
        Ok(Gompertz { shape, rate })
    }

    pub fn inverse_transform(&self, u: f64) -> f64 {
        if self.shape < 0.0 && u < (self.rate / self.shape).exp() {
            return f64::INFINITY;
        }
        // clamp rounding just past the plateau edge to 0, i.e. never
        (1.0 - self.shape * u.ln() / self.rate).max(0.0).ln() / self.shape
    }
}

impl Distribution<f64> for Gompertz {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inverse_transform(rng.sample(Open01))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLogistic {
    shape: f64,
    scale: f64,
}

impl LogLogistic {
    pub fn new(shape: f64, scale: f64) -> Result<Self, ModelError> {
        check("loglogistic.shape", shape, shape > 0.0)?;
        check("loglogistic.scale", scale, scale > 0.0)?;
        Ok(LogLogistic { shape, scale })
    }

    pub fn inverse_transform(&self, u: f64) -> f64 {
        self.scale * (-(1.0 / u - 1.0).ln() / self.shape).exp()
    }
}

impl Distribution<f64> for LogLogistic {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inverse_transform(rng.sample(Open01))
    }
}

/// Mixture cure model: a `cure_fraction` share of subjects never has the
/// event, the rest follow `LogLogistic`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLogisticCure {
    cure_fraction: f64,
    uncured: LogLogistic,
}

impl LogLogisticCure {
    pub fn new(cure_fraction: f64, shape: f64, scale: f64) -> Result<Self, ModelError> {
        check(
            "loglogistic_cure.cure_fraction",
            cure_fraction,
            (0.0..=1.0).contains(&cure_fraction),
        )?;
        Ok(LogLogisticCure {
            cure_fraction,
            uncured: LogLogistic::new(shape, scale)?,
        })
    }
}

impl Distribution<f64> for LogLogisticCure {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        if u < self.cure_fraction {
            f64::INFINITY
        } else {
            self.uncured.sample(rng)
        }
    }
}
