//! Patient-level discrete-event simulation of adjuvant therapy for colon
//! cancer, reporting discounted costs and QALYs per treatment arm.
//!
//! The engine (`Scheduler`, `Simulation`, `main_loop`) is generic over the
//! event kind; `colon::ColonModel` is the disease model that runs on it.

pub mod colon;
pub mod discount;
pub mod error;
pub mod event;
pub mod main_loop;
pub mod params;
pub mod scheduler;
pub mod simulation;
pub mod stats;
pub mod variates;

pub use colon::{Arm, ColonEvent, ColonModel, HealthState, Report, DEFAULT_SEED};
pub use error::{ModelError, StatsError};
pub use event::{Event, EventId};
pub use params::{Parameters, DEFAULT_PARAMETERS};
pub use scheduler::Scheduler;
pub use simulation::{Simulation, SimulationMetrics};
