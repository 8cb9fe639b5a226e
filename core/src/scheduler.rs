use alloc::collections::BTreeMap;
use core::time::Duration;

use crate::*;

/// Runs cascade steps after their delay.
///
/// Implementations must eventually hand each scheduled update back to [`FlipOrchestrator::fire`], unless the
/// handle was cancelled first.
pub trait Scheduler {
    type Handle;

    fn schedule(&mut self, delay: Duration, update: CellUpdate) -> Self::Handle;

    /// Cancelling a handle that already fired must be harmless.
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct VirtualHandle {
    due: Duration,
    seq: u64,
}

/// Scheduler on a clock that only moves when told to.
///
/// Updates due at the same instant come out in the order they were scheduled.
#[derive(Clone, Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<VirtualHandle, CellUpdate>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|handle| handle.due)
    }

    /// Takes the earliest update due no later than `deadline`, moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(Duration, CellUpdate)> {
        let handle = *self.queue.keys().next()?;
        if handle.due > deadline {
            return None;
        }
        let update = self.queue.remove(&handle)?;
        self.now = self.now.max(handle.due);
        Some((handle.due, update))
    }

    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = VirtualHandle;

    fn schedule(&mut self, delay: Duration, update: CellUpdate) -> VirtualHandle {
        let handle = VirtualHandle {
            due: self.now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(handle, update);
        handle
    }

    fn cancel(&mut self, handle: VirtualHandle) {
        self.queue.remove(&handle);
    }
}
