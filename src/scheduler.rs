use std::collections::BinaryHeap;

use tracing::trace;

use crate::event::{Event, EventId};

/// Event queue plus virtual clock for one simulation.
///
/// Cancellation is lazy: cancelled events stay in the heap with their
/// liveness flag cleared and are thrown away when they reach the top.
#[derive(Debug)]
pub struct Scheduler<K> {
    queue: BinaryHeap<Event<K>>,
    time: f64,
    previous_event_time: f64,
    running: bool,
    next_id: u64,
}

impl<K> Scheduler<K> {
    pub fn new() -> Self {
        Scheduler {
            queue: BinaryHeap::new(),
            time: 0.0,
            previous_event_time: 0.0,
            running: false,
            next_id: 0,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> f64 {
        self.time
    }

    /// Time of the last dispatched event of this run (0 before the first).
    pub fn previous_event_time(&self) -> f64 {
        self.previous_event_time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Schedule `kind` at absolute time `time`. The caller is responsible
    /// for `time >= now()`.
    pub fn schedule_at(&mut self, time: f64, kind: K) -> EventId {
        let id = EventId::new(self.next_id);
        self.next_id += 1;
        self.queue.push(Event::new(id, time, self.time, kind));
        id
    }

    pub fn schedule_after(&mut self, delay: f64, kind: K) -> EventId {
        self.schedule_at(self.time + delay, kind)
    }

    /// Clear the liveness flag of every queued event matching `predicate`.
    /// Returns how many events were newly cancelled.
    pub fn cancel_if(&mut self, mut predicate: impl FnMut(&Event<K>) -> bool) -> usize {
        let mut cancelled = 0;
        for event in self.queue.iter() {
            if predicate(event) {
                if event.is_active() {
                    cancelled += 1;
                }
                event.cancel();
            }
        }
        cancelled
    }

    pub fn cancel_kind(&mut self, kind: &K) -> usize
    where
        K: PartialEq,
    {
        self.cancel_if(|event| event.kind() == kind)
    }

    /// Ask the run loop to return before the next dispatch. A handler in
    /// flight always finishes.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Drop every queued event, live or not.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn peek(&self) -> Option<&Event<K>> {
        self.queue.peek()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn next_event_id(&self) -> EventId {
        EventId::new(self.next_id)
    }

    /// Pop everything in dispatch order, cancelled events included.
    pub fn drain_ordered(&mut self) -> Vec<Event<K>> {
        let mut events = Vec::with_capacity(self.queue.len());
        while let Some(event) = self.queue.pop() {
            events.push(event);
        }
        events
    }

    pub(crate) fn begin_run(&mut self) {
        self.running = true;
        self.time = 0.0;
        self.previous_event_time = 0.0;
    }

    pub(crate) fn pop_next(&mut self) -> Option<Event<K>> {
        let event = self.queue.pop()?;
        trace!(
            id = event.id().raw(),
            time = event.scheduled_time(),
            active = event.is_active(),
            "pop"
        );
        Some(event)
    }

    pub(crate) fn advance_to(&mut self, time: f64) {
        self.time = time;
    }

    pub(crate) fn finish_dispatch(&mut self) {
        self.previous_event_time = self.time;
    }
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
