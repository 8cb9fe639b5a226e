use alloc::vec::Vec;
use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Inclusive range of per-cell delays, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayWindow {
    min_ms: u32,
    max_ms: u32,
}

impl DelayWindow {
    pub const fn new_unchecked(min_ms: u32, max_ms: u32) -> Self {
        Self { min_ms, max_ms }
    }

    pub const fn new(min_ms: u32, max_ms: u32) -> Result<Self> {
        if min_ms > max_ms {
            return Err(FlipError::InvalidDelayWindow { min_ms, max_ms });
        }
        Ok(Self::new_unchecked(min_ms, max_ms))
    }

    pub const fn min(self) -> Duration {
        Duration::from_millis(self.min_ms as u64)
    }

    pub const fn max(self) -> Duration {
        Duration::from_millis(self.max_ms as u64)
    }

    pub fn contains(self, delay: Duration) -> bool {
        self.min() <= delay && delay <= self.max()
    }

    fn sample<R: Rng>(self, rng: &mut R) -> Duration {
        let millis: u32 = rng.random_range(self.min_ms..=self.max_ms);
        Duration::from_millis(millis.into())
    }
}

/// How a fresh cascade treats updates still pending from an older one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapPolicy {
    /// Pending updates are cancelled and late ones are ignored, so every cell
    /// converges to the latest requested value.
    CancelPending,
    /// Older updates keep running and whichever fires last wins, even when it
    /// carries a stale value.
    LastFireWins,
}

impl Default for OverlapPolicy {
    fn default() -> Self {
        Self::CancelPending
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Delays used when turning cells to their back face.
    pub flip_in: DelayWindow,
    /// Delays used when turning cells back to their front face.
    pub flip_out: DelayWindow,
    pub overlap: OverlapPolicy,
}

impl CascadeConfig {
    pub const FLIP_IN: DelayWindow = DelayWindow::new_unchecked(50, 450);
    pub const FLIP_OUT: DelayWindow = DelayWindow::new_unchecked(50, 350);

    pub const fn new(flip_in: DelayWindow, flip_out: DelayWindow, overlap: OverlapPolicy) -> Self {
        Self {
            flip_in,
            flip_out,
            overlap,
        }
    }

    pub const fn with_overlap(self, overlap: OverlapPolicy) -> Self {
        Self { overlap, ..self }
    }

    pub const fn window_for(&self, target: bool) -> DelayWindow {
        if target { self.flip_in } else { self.flip_out }
    }

    /// Longest time any single cascade step may wait before firing.
    pub fn max_latency(&self) -> Duration {
        self.flip_in.max().max(self.flip_out.max())
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self::new(Self::FLIP_IN, Self::FLIP_OUT, OverlapPolicy::default())
    }
}

/// One deferred write of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellUpdate {
    pub cell: CellIndex,
    pub flipped: bool,
    /// Cascade this update was planned by.
    pub generation: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CascadeStep {
    pub delay: Duration,
    pub update: CellUpdate,
}

/// Planned cascade for a single change of the global flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadePlan {
    pub target: bool,
    pub generation: u64,
    /// Whether every cell snaps to the front face before the steps run.
    pub reset_first: bool,
    /// Steps in shuffled order.
    pub steps: Vec<CascadeStep>,
}

impl CascadePlan {
    /// Plans a cascade towards `target`: a uniformly shuffled order of all cells, each with its own delay
    /// drawn from the window for that direction.
    pub fn new<R: Rng>(config: &CascadeConfig, target: bool, generation: u64, rng: &mut R) -> Self {
        let mut order: Vec<CellIndex> = CellIndex::all().collect();
        order.shuffle(rng);

        let window = config.window_for(target);
        let mut steps = Vec::with_capacity(order.len());
        for cell in order {
            steps.push(CascadeStep {
                delay: window.sample(rng),
                update: CellUpdate {
                    cell,
                    flipped: target,
                    generation,
                },
            });
        }

        Self {
            target,
            generation,
            reset_first: target,
            steps,
        }
    }

    pub fn order(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.steps.iter().map(|step| step.update.cell)
    }

    pub fn longest_delay(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| step.delay)
            .max()
            .unwrap_or_default()
    }
}
