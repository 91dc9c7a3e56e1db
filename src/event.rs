use std::cell::Cell;
use std::cmp::{Eq, Ordering, PartialEq};
use std::fmt;

/// Strictly increasing sequence number assigned by a `Scheduler`. Breaks
/// ties between events scheduled for the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(u64);

impl EventId {
    pub fn new(raw: u64) -> Self {
        EventId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E#{}", self.0)
    }
}

/// A scheduled message. Everything but the liveness flag is fixed at
/// creation; the flag is a `Cell` so events can be cancelled in place while
/// they sit inside the heap.
#[derive(Debug, Clone)]
pub struct Event<K> {
    scheduled_time: f64,
    origin_time: f64,
    kind: K,
    id: EventId,
    active: Cell<bool>,
}

impl<K> Event<K> {
    pub fn new(id: EventId, scheduled_time: f64, origin_time: f64, kind: K) -> Self {
        Event {
            scheduled_time,
            origin_time,
            kind,
            id,
            active: Cell::new(true),
        }
    }

    pub fn scheduled_time(&self) -> f64 {
        self.scheduled_time
    }

    /// Clock reading when the event was scheduled.
    pub fn origin_time(&self) -> f64 {
        self.origin_time
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn cancel(&self) {
        self.active.set(false)
    }
}

// reversed so that BinaryHeap pops the smallest (scheduled_time, id) first.
// ids are unique per scheduler, so no two events compare equal
impl<K> Ord for Event<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scheduled_time
            .total_cmp(&other.scheduled_time)
            .then_with(|| self.id.cmp(&other.id))
            .reverse()
    }
}

impl<K> PartialOrd for Event<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> PartialEq for Event<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for Event<K> {}
