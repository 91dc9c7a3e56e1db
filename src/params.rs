use lazy_static::lazy_static;

use crate::colon::Arm;
use crate::error::ModelError;

lazy_static! {
    pub static ref DEFAULT_PARAMETERS: Parameters = Parameters::default();
}

/// Model constants. Per-arm arrays are indexed by `Arm::index()`
/// (Observation, Lev, Lev+5FU).
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub discount_rate_costs: f64,
    pub discount_rate_health: f64,

    // Gompertz distribution for death due to other causes
    pub other_death_shape: f64,
    pub other_death_rate: f64,

    // log-logistic cure distribution for recurrence-free survival
    pub recurrence_cure: [f64; 3],
    pub recurrence_shape: [f64; 3],
    pub recurrence_scale: [f64; 3],

    pub adjuvant_cycle_cost: [f64; 3],
    pub adjuvant_utility: f64,
    /// years
    pub adjuvant_cycle_length: f64,
    pub max_adjuvant_cycles: u32,

    pub toxicity_probability: [f64; 3],
    pub toxicity_cost: f64,
    pub toxicity_disutility: f64,

    pub disease_free_utility: f64,

    // log-logistic distribution for cancer-specific survival after recurrence
    pub survival_shape: [f64; 3],
    pub survival_scale: [f64; 3],

    pub advanced_cost: f64,
    pub advanced_utility: f64,

    pub horizon: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            discount_rate_costs: 0.04,
            discount_rate_health: 0.015,
            other_death_shape: 0.08845719,
            other_death_rate: 0.008098087,
            recurrence_cure: [0.397233983474699, 0.405557830617764, 0.57245177440411],
            recurrence_shape: [1.65402431099951, 1.65402431099951, 1.65402431099951],
            recurrence_scale: [1.12846223420542, 1.11939525018453, 1.31649151798288],
            adjuvant_cycle_cost: [0.0, 5000.0, 10000.0],
            adjuvant_utility: 0.70,
            adjuvant_cycle_length: 3.0 / 52.0,
            max_adjuvant_cycles: 10,
            toxicity_probability: [0.0, 0.20, 0.40],
            toxicity_cost: 2000.0,
            toxicity_disutility: 0.10,
            disease_free_utility: 0.80,
            survival_shape: [1.52146766208046, 1.48534146614485, 1.4483150121553],
            survival_scale: [1.15749303118087, 1.00945645458403, 0.811007356583923],
            advanced_cost: 40000.0,
            advanced_utility: 0.60,
            horizon: 55.0,
        }
    }
}

impl Parameters {
    /// Checks the scalars that no sampler constructor covers. Distribution
    /// parameters are checked when the samplers are built.
    pub fn validate(&self, arm: Arm) -> Result<(), ModelError> {
        let i = arm.index();
        let finite = [
            ("discount_rate_costs", self.discount_rate_costs),
            ("discount_rate_health", self.discount_rate_health),
            ("adjuvant_cycle_cost", self.adjuvant_cycle_cost[i]),
            ("adjuvant_utility", self.adjuvant_utility),
            ("toxicity_cost", self.toxicity_cost),
            ("toxicity_disutility", self.toxicity_disutility),
            ("disease_free_utility", self.disease_free_utility),
            ("advanced_cost", self.advanced_cost),
            ("advanced_utility", self.advanced_utility),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ModelError::InvalidParameter { name, value });
            }
        }

        let p = self.toxicity_probability[i];
        if !(0.0..=1.0).contains(&p) {
            return Err(ModelError::InvalidParameter { name: "toxicity_probability", value: p });
        }
        if !(self.adjuvant_cycle_length.is_finite() && self.adjuvant_cycle_length > 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "adjuvant_cycle_length",
                value: self.adjuvant_cycle_length,
            });
        }
        if self.max_adjuvant_cycles == 0 {
            return Err(ModelError::InvalidParameter { name: "max_adjuvant_cycles", value: 0.0 });
        }
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(ModelError::InvalidParameter { name: "horizon", value: self.horizon });
        }
        Ok(())
    }
}
