use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::registry::Registry;

use crate::event::Event;
use crate::main_loop::main_loop;
use crate::scheduler::Scheduler;

/// A model driven by the event loop. The engine knows nothing about the
/// model beyond its event kind and the two hooks.
pub trait Simulation {
    type Kind;

    fn get_scheduler(&self) -> &Scheduler<Self::Kind>;
    fn get_scheduler_mut(&mut self) -> &mut Scheduler<Self::Kind>;

    fn get_metrics(&self) -> &SimulationMetrics;

    /// Called at the start of every run with the clock at zero; seeds the
    /// first events.
    fn init(&mut self);

    /// Called for every live event, after the clock has moved to its time.
    /// Must not panic; a handler that wants to halt calls `stop()`.
    fn handle_message(&mut self, event: &Event<Self::Kind>);

    fn now(&self) -> f64 {
        self.get_scheduler().now()
    }

    fn stop(&mut self) {
        self.get_scheduler_mut().stop()
    }

    fn run(&mut self)
    where
        Self: Sized,
    {
        main_loop(self)
    }

    /// `n` independent runs, back to back.
    fn run_many(&mut self, n: usize)
    where
        Self: Sized,
    {
        for _ in 0..n {
            self.run();
        }
    }
}

/// Engine counters, registered in a per-simulation registry.
pub struct SimulationMetrics {
    events_dispatched: Counter,
    events_discarded: Counter,
    runs_completed: Counter,
    registry: Registry,
}

impl SimulationMetrics {
    pub fn new(mut registry: Registry) -> Self {
        let events_dispatched = Counter::default();
        let events_discarded = Counter::default();
        let runs_completed = Counter::default();
        registry.register(
            "events_dispatched",
            "Number of events dispatched in simulation",
            events_dispatched.clone(),
        );
        registry.register(
            "events_discarded",
            "Number of cancelled events popped without dispatch",
            events_discarded.clone(),
        );
        registry.register(
            "runs_completed",
            "Number of completed simulation runs",
            runs_completed.clone(),
        );

        SimulationMetrics {
            events_dispatched,
            events_discarded,
            runs_completed,
            registry,
        }
    }

    pub fn get_events_dispatched_metric(&self) -> &Counter {
        &self.events_dispatched
    }

    pub fn get_events_discarded_metric(&self) -> &Counter {
        &self.events_discarded
    }

    pub fn get_runs_completed_metric(&self) -> &Counter {
        &self.runs_completed
    }

    /// OpenMetrics text exposition of the registry.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}

impl Default for SimulationMetrics {
    fn default() -> Self {
        Self::new(Registry::default())
    }
}
