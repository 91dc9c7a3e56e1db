//! Semi-Markov model of adjuvant therapy after colon-cancer surgery.
//!
//! Each run of the simulation is one patient. Costs and QALYs are
//! accumulated with continuous discounting between events and point
//! discounting for one-off costs; at the terminal event the two totals are
//! appended to the model's report series.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Open01};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, info, warn};

use crate::discount::{discount_interval, discount_point};
use crate::error::{ModelError, StatsError};
use crate::event::Event;
use crate::params::{Parameters, DEFAULT_PARAMETERS};
use crate::scheduler::Scheduler;
use crate::simulation::{Simulation, SimulationMetrics};
use crate::stats::{self, Summary};
use crate::variates::{Gompertz, LogLogistic, LogLogisticCure};

pub const DEFAULT_SEED: u64 = 12345;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    Observation,
    /// levamisole
    Levamisole,
    /// levamisole plus fluorouracil
    LevamisoleFluorouracil,
}

impl Arm {
    pub const ALL: [Arm; 3] = [Arm::Observation, Arm::Levamisole, Arm::LevamisoleFluorouracil];

    pub fn index(self) -> usize {
        match self {
            Arm::Observation => 0,
            Arm::Levamisole => 1,
            Arm::LevamisoleFluorouracil => 2,
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::Observation => write!(f, "Observation"),
            Arm::Levamisole => write!(f, "Lev"),
            Arm::LevamisoleFluorouracil => write!(f, "Lev+5FU"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthState {
    RecurrenceFree,
    AdjuvantTreatment,
    Recurrence,
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColonEvent {
    EnterRecurrenceFree = 1,
    EnterAdjuvantTreatment = 2,
    Toxicity = 3,
    EnterRecurrence = 4,
    Death = 5,
    EndOfFollowUp = 6,
}

impl ColonEvent {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, ModelError> {
        match code {
            1 => Ok(ColonEvent::EnterRecurrenceFree),
            2 => Ok(ColonEvent::EnterAdjuvantTreatment),
            3 => Ok(ColonEvent::Toxicity),
            4 => Ok(ColonEvent::EnterRecurrence),
            5 => Ok(ColonEvent::Death),
            6 => Ok(ColonEvent::EndOfFollowUp),
            other => Err(ModelError::InvalidEventKind(other)),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ColonEvent::Death | ColonEvent::EndOfFollowUp)
    }
}

/// Emits the verbose per-dispatch line for an event-kind ordinal.
///
/// An ordinal that names no kind is logged as a warning and returned as
/// `ModelError::InvalidEventKind`; the run carries on either way.
pub fn log_dispatch(replication: u64, time: f64, code: u8) -> Result<ColonEvent, ModelError> {
    match ColonEvent::from_code(code) {
        Ok(kind) => {
            info!(replication, time, kind = code, "{:?}", kind);
            Ok(kind)
        }
        Err(e) => {
            warn!(replication, time, kind = code, "{e}");
            Err(e)
        }
    }
}

/// Samplers for one arm, built once from the parameter set.
#[derive(Debug, Clone, Copy)]
struct Samplers {
    other_death: Gompertz,
    recurrence: LogLogisticCure,
    cancer_survival: LogLogistic,
}

impl Samplers {
    fn new(params: &Parameters, arm: Arm) -> Result<Self, ModelError> {
        let i = arm.index();
        Ok(Samplers {
            other_death: Gompertz::new(params.other_death_shape, params.other_death_rate)?,
            recurrence: LogLogisticCure::new(
                params.recurrence_cure[i],
                params.recurrence_shape[i],
                params.recurrence_scale[i],
            )?,
            cancer_survival: LogLogistic::new(params.survival_shape[i], params.survival_scale[i])?,
        })
    }
}

/// Per-replication discounted totals, one entry per finished run.
#[derive(Debug, Clone, Default, PartialEq)]
struct ReportSeries {
    costs: Vec<f64>,
    utilities: Vec<f64>,
}

impl ReportSeries {
    fn push(&mut self, cost: f64, utility: f64) {
        self.costs.push(cost);
        self.utilities.push(utility);
    }

    fn costs(&self) -> &[f64] {
        &self.costs
    }

    fn utilities(&self) -> &[f64] {
        &self.utilities
    }
}

/// Summary of one arm after its replications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub arm: Arm,
    pub costs: Summary,
    pub qalys: Summary,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "n           = {}", self.costs.n)?;
        writeln!(
            f,
            "Mean(costs) = {}; se(costs) = {}",
            self.costs.mean, self.costs.se
        )?;
        write!(
            f,
            "Mean(QALYs) = {}; se(QALYs) = {}",
            self.qalys.mean, self.qalys.se
        )
    }
}

pub struct ColonModel {
    scheduler: Scheduler<ColonEvent>,
    metrics: SimulationMetrics,
    params: Parameters,
    samplers: Samplers,
    arm: Arm,
    rng: Xoshiro256StarStar,
    verbose: bool,

    replication: u64,
    next_replication: u64,
    state: HealthState,
    adjuvant_cycles: u32,
    toxicities: u32,
    cost_rate: f64,
    utility_rate: f64,
    discounted_cost: f64,
    discounted_utility: f64,

    report: ReportSeries,
}

impl ColonModel {
    pub fn new(arm: Arm, seed: u64) -> Result<Self, ModelError> {
        Self::with_parameters(arm, seed, DEFAULT_PARAMETERS.clone())
    }

    pub fn with_parameters(arm: Arm, seed: u64, params: Parameters) -> Result<Self, ModelError> {
        params.validate(arm)?;
        let samplers = Samplers::new(&params, arm)?;
        Ok(ColonModel {
            scheduler: Scheduler::new(),
            metrics: SimulationMetrics::default(),
            samplers,
            arm,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            verbose: false,
            replication: 0,
            next_replication: 0,
            state: HealthState::RecurrenceFree,
            adjuvant_cycles: 0,
            toxicities: 0,
            cost_rate: 0.0,
            utility_rate: params.disease_free_utility,
            discounted_cost: 0.0,
            discounted_utility: 0.0,
            report: ReportSeries::default(),
            params,
        })
    }

    /// Log every dispatched event at info level.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn arm(&self) -> Arm {
        self.arm
    }

    /// Zero-based id of the current (or last) replication.
    pub fn replication(&self) -> u64 {
        self.replication
    }

    pub fn state(&self) -> HealthState {
        self.state
    }

    pub fn adjuvant_cycles(&self) -> u32 {
        self.adjuvant_cycles
    }

    pub fn toxicities(&self) -> u32 {
        self.toxicities
    }

    pub fn discounted_cost(&self) -> f64 {
        self.discounted_cost
    }

    pub fn discounted_utility(&self) -> f64 {
        self.discounted_utility
    }

    pub fn run_replications(&mut self, n: usize) {
        self.run_many(n);
    }

    pub fn get_cost_series(&self) -> &[f64] {
        self.report.costs()
    }

    pub fn get_utility_series(&self) -> &[f64] {
        self.report.utilities()
    }

    pub fn mean_cost(&self) -> Result<f64, StatsError> {
        stats::mean(self.report.costs())
    }

    pub fn mean_utility(&self) -> Result<f64, StatsError> {
        stats::mean(self.report.utilities())
    }

    /// ICER of this arm against `comparator`.
    pub fn icer(&self, comparator: &ColonModel) -> Result<f64, StatsError> {
        stats::icer(
            self.report.costs(),
            self.report.utilities(),
            comparator.report.costs(),
            comparator.report.utilities(),
        )
    }

    pub fn report(&self) -> Result<Report, StatsError> {
        Ok(Report {
            arm: self.arm,
            costs: Summary::of(self.report.costs())?,
            qalys: Summary::of(self.report.utilities())?,
        })
    }

    fn add_point_cost(&mut self, cost: f64) {
        self.discounted_cost += discount_point(cost, self.now(), self.params.discount_rate_costs);
    }

    fn enter_adjuvant_treatment(&mut self) {
        let now = self.now();
        let i = self.arm.index();
        self.state = HealthState::AdjuvantTreatment;
        self.adjuvant_cycles += 1;

        // toxicity fires when the draw exceeds p, i.e. with probability 1 - p
        let u: f64 = self.rng.sample(Open01);
        if self.params.toxicity_probability[i] < u {
            self.scheduler.schedule_at(now, ColonEvent::Toxicity);
        }

        self.utility_rate = self.params.adjuvant_utility;
        self.add_point_cost(self.params.adjuvant_cycle_cost[i]);

        let next = if self.adjuvant_cycles < self.params.max_adjuvant_cycles {
            ColonEvent::EnterAdjuvantTreatment
        } else {
            ColonEvent::EnterRecurrenceFree
        };
        self.scheduler
            .schedule_at(now + self.params.adjuvant_cycle_length, next);
    }

    fn enter_recurrence(&mut self) {
        self.state = HealthState::Recurrence;
        self.scheduler.cancel_kind(&ColonEvent::EnterAdjuvantTreatment);
        self.scheduler.cancel_kind(&ColonEvent::EnterRecurrenceFree);
        // other-cause death stays queued; whichever death comes first ends the run

        self.utility_rate = self.params.advanced_utility;
        self.add_point_cost(self.params.advanced_cost);

        let survival = self.samplers.cancer_survival.sample(&mut self.rng);
        let now = self.now();
        self.scheduler.schedule_at(now + survival, ColonEvent::Death);
    }

    fn finish_replication(&mut self, kind: ColonEvent) {
        if kind == ColonEvent::Death {
            self.state = HealthState::Death;
        }
        self.report.push(self.discounted_cost, self.discounted_utility);
        debug!(
            replication = self.replication,
            arm = %self.arm,
            cost = self.discounted_cost,
            qalys = self.discounted_utility,
            "replication finished"
        );
        self.scheduler.clear();
    }
}

impl Simulation for ColonModel {
    type Kind = ColonEvent;

    fn get_scheduler(&self) -> &Scheduler<ColonEvent> {
        &self.scheduler
    }

    fn get_scheduler_mut(&mut self) -> &mut Scheduler<ColonEvent> {
        &mut self.scheduler
    }

    fn get_metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    fn init(&mut self) {
        self.replication = self.next_replication;
        self.next_replication += 1;

        self.state = HealthState::RecurrenceFree;
        self.adjuvant_cycles = 0;
        self.toxicities = 0;
        self.discounted_cost = 0.0;
        self.discounted_utility = 0.0;
        self.utility_rate = self.params.disease_free_utility;
        self.cost_rate = 0.0;

        let now = self.now();
        let other_death = self.samplers.other_death.sample(&mut self.rng);
        self.scheduler.schedule_at(other_death, ColonEvent::Death);

        if self.arm != Arm::Observation {
            self.scheduler
                .schedule_at(now, ColonEvent::EnterAdjuvantTreatment);
        }

        let recurrence = self.samplers.recurrence.sample(&mut self.rng);
        if recurrence.is_finite() {
            self.scheduler
                .schedule_at(recurrence, ColonEvent::EnterRecurrence);
        }

        self.scheduler
            .schedule_at(self.params.horizon, ColonEvent::EndOfFollowUp);
    }

    fn handle_message(&mut self, event: &Event<ColonEvent>) {
        let start = self.scheduler.previous_event_time();
        let now = self.now();
        self.discounted_cost +=
            discount_interval(self.cost_rate, start, now, self.params.discount_rate_costs);
        self.discounted_utility +=
            discount_interval(self.utility_rate, start, now, self.params.discount_rate_health);

        if self.verbose {
            // unknown ordinals are reported by log_dispatch and otherwise ignored
            let _ = log_dispatch(self.replication, event.scheduled_time(), event.kind().code());
        }

        match *event.kind() {
            ColonEvent::EnterRecurrenceFree => {
                self.state = HealthState::RecurrenceFree;
                self.utility_rate = self.params.disease_free_utility;
            }
            ColonEvent::EnterAdjuvantTreatment => self.enter_adjuvant_treatment(),
            ColonEvent::Toxicity => {
                self.toxicities += 1;
                self.add_point_cost(self.params.toxicity_cost);
                self.utility_rate = self.params.adjuvant_utility - self.params.toxicity_disutility;
            }
            ColonEvent::EnterRecurrence => self.enter_recurrence(),
            kind @ (ColonEvent::Death | ColonEvent::EndOfFollowUp) => self.finish_replication(kind),
        }
    }
}
