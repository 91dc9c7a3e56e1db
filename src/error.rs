use thiserror::Error;

/// Errors raised while building or decoding parts of the disease model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid kind of event: {0}")]
    InvalidEventKind(u8),
}

/// Errors raised by the replication statistics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("statistic requested on an empty sample")]
    EmptySample,

    #[error("statistic needs at least {required} replications, got {actual}")]
    InsufficientSample { required: usize, actual: usize },

    /// The arms have identical mean effects, so the ratio is not finite.
    /// `value` is the raw quotient (infinite or NaN).
    #[error("degenerate ICER: incremental cost {incremental_cost} over zero incremental effect")]
    DegenerateIcer { incremental_cost: f64, value: f64 },
}
