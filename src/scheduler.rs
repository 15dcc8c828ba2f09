use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use crate::error::SimResult;
use crate::simulation::Simulation;
use crate::time::SimTime;

/// A unit of work the scheduler executes at its scheduled time.
///
/// `execute` returns `Ok(())` whether it did something or "soft skipped"
/// because a guard no longer held — only the three variants of
/// [`crate::error::SimError`] are hard failures that halt the run.
pub trait SimEvent: fmt::Debug {
    fn name(&self) -> &'static str;
    fn execute(&self, sim: &mut Simulation) -> SimResult<()>;
}

struct QueueEntry {
    time: SimTime,
    sequence: u64,
    event: Box<dyn SimEvent>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // `BinaryHeap` is a max-heap; reverse both fields so the earliest time
    // (ties broken by lowest insertion sequence) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-heap event queue keyed by `(time, insertion_sequence)` (`spec.md`
/// §4.5). The sequence counter is a field on the scheduler instance, not
/// a process-global, so independent simulations don't share tie-break
/// state (`spec.md` §9).
#[derive(Default)]
pub struct Scheduler {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, time: SimTime, event: Box<dyn SimEvent>) {
        self.heap.push(QueueEntry {
            time,
            sequence: self.next_sequence,
            event,
        });
        self.next_sequence += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Simulation {
    /// Convenience forward to `self.scheduler.schedule` so event bodies
    /// can write `sim.schedule(...)` without reaching into the field.
    pub fn schedule(&mut self, time: SimTime, event: Box<dyn SimEvent>) {
        self.scheduler.schedule(time, event);
    }

    /// Drain the scheduler until it empties or the next event's time is
    /// `≥ max_time` (`spec.md` §4.5). The simulation clock advances only
    /// when an event actually executes; events popped with a time
    /// strictly less than the current clock are discarded silently —
    /// defensive against stale reschedules, never expected in a correct
    /// run. Halts immediately on the first hard failure.
    pub fn run(&mut self, max_time: SimTime) -> SimResult<()> {
        loop {
            let Some(next_time) = self.scheduler.heap.peek().map(|e| e.time) else {
                break;
            };
            if next_time >= max_time {
                break;
            }
            let entry = self.scheduler.heap.pop().expect("peek just confirmed an entry");
            if entry.time < self.current_time {
                tracing::debug!(
                    event = entry.event.name(),
                    time = %entry.time,
                    current = %self.current_time,
                    "discarding stale event"
                );
                continue;
            }
            self.current_time = entry.time;
            let name = entry.event.name();
            if let Err(err) = entry.event.execute(self) {
                tracing::error!(event = name, time = %entry.time, error = %err, "event execution failed");
                return Err(crate::error::SimError::EventExecutionFailure {
                    time: entry.time,
                    event: name.to_string(),
                    cause: err.to_string(),
                });
            }
        }
        Ok(())
    }
}
