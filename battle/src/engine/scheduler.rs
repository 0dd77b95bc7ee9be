//! Deferred-task queue driven by a virtual clock
//!
//! Nothing here uses real timers. Callers advance the clock explicitly and
//! receive every task that came due, in due-time order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::{AnimKind, Side};

/// Work the battle defers for presentation purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Clear an animation marker if it is still the one that was raised
    ClearAnim { side: Side, kind: AnimKind, ts: u64 },
    /// Bring in the next bench member for a side whose active fainted
    PromoteBench { side: Side },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Scheduled {
    due: u64,
    seq: u64,
    task: DeferredTask,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on (due, seq)
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual clock plus pending deferred tasks
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler whose clock starts at `now`
    pub fn starting_at(now: u64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Current clock, in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `task` to run `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, task: DeferredTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay_ms,
            seq,
            task,
        });
    }

    /// Move the clock forward and return every task now due
    pub fn advance(&mut self, ms: u64) -> Vec<DeferredTask> {
        self.now += ms;
        let mut due = Vec::new();
        while let Some(next) = self.queue.peek() {
            if next.due > self.now {
                break;
            }
            if let Some(next) = self.queue.pop() {
                due.push(next.task);
            }
        }
        due
    }

    /// Check if a task is still waiting
    pub fn is_pending(&self, task: &DeferredTask) -> bool {
        self.queue.iter().any(|s| &s.task == task)
    }

    /// Time until the next task comes due
    pub fn next_due_in(&self) -> Option<u64> {
        self.queue.peek().map(|s| s.due.saturating_sub(self.now))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
