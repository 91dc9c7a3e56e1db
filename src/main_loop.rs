use tracing::debug;

use crate::simulation::Simulation;

/// One run: reset the clock, let the model seed its events, then dispatch
/// live events in `(time, id)` order until the queue empties or the model
/// calls `stop()`. Whatever is left in the queue is dropped.
pub fn main_loop<S: Simulation>(simulation: &mut S) {
    simulation.get_scheduler_mut().begin_run();
    simulation.init();

    let mut dispatched = 0u64;
    loop {
        let scheduler = simulation.get_scheduler_mut();
        if !scheduler.is_running() {
            break;
        }
        let Some(event) = scheduler.pop_next() else {
            break;
        };

        if !event.is_active() {
            simulation.get_metrics().get_events_discarded_metric().inc();
            continue;
        }

        scheduler.advance_to(event.scheduled_time());
        simulation.handle_message(&event);
        simulation.get_scheduler_mut().finish_dispatch();

        simulation.get_metrics().get_events_dispatched_metric().inc();
        dispatched += 1;
    }

    let scheduler = simulation.get_scheduler_mut();
    scheduler.clear();
    debug!(dispatched, end_time = scheduler.now(), "run finished");

    simulation.get_metrics().get_runs_completed_metric().inc();
}
