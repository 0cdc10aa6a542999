use std::{cmp::Ordering, collections::BinaryHeap, fmt};

use tokio::time::Instant;

/// Registration sequence number of a timer. Later registrations get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Entry<T> {
    deadline: Instant,
    id: TimerId,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap yields the earliest deadline, then the lowest id.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Pending items ordered by eligible time, ties broken by registration order.
pub(crate) struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        TimerQueue {
            heap: BinaryHeap::new(),
            next_id: 0,
        }
    }

    pub fn push(&mut self, deadline: Instant, item: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Entry { deadline, id, item });
        id
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.deadline)
    }

    /// Remove the earliest entry, but only if it is eligible at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerId, T)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|entry| (entry.id, entry.item))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
