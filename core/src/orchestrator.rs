use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::time::Duration;
use rand::Rng;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    /// The cell turned to the other face.
    Applied,
    /// The cell already showed that face.
    Unchanged,
    /// A newer cascade has started since this update was planned.
    Superseded,
}

impl FireOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Applied => true,
            Self::Unchanged | Self::Superseded => false,
        }
    }
}

/// Outcome of one update fired by [`FlipOrchestrator::advance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FiredUpdate {
    pub at: Duration,
    pub update: CellUpdate,
    pub outcome: FireOutcome,
}

#[derive(Debug)]
struct Pending<H> {
    update: CellUpdate,
    fired: bool,
    handle: H,
}

/// Owns the [`FlipState`] and drives the staggered cascade of per-cell updates every time the global flag is
/// set.
pub struct FlipOrchestrator<S: Scheduler, R> {
    state: FlipState,
    config: CascadeConfig,
    scheduler: S,
    rng: R,
    pending: Vec<Pending<S::Handle>>,
    last_cascade: Option<CascadePlan>,
}

impl<S: Scheduler, R: Rng> FlipOrchestrator<S, R> {
    pub fn new(config: CascadeConfig, scheduler: S, rng: R) -> Self {
        Self {
            state: FlipState::new(),
            config,
            scheduler,
            rng,
            pending: Vec::new(),
            last_cascade: None,
        }
    }

    pub fn state(&self) -> &FlipState {
        &self.state
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_flipped(&self) -> bool {
        self.state.is_flipped()
    }

    pub fn cell_flip_states(&self) -> &BTreeMap<CellIndex, bool> {
        self.state.cell_flip_states()
    }

    pub fn borders_visible(&self) -> bool {
        self.state.borders_visible()
    }

    pub fn resolve(&self, cell: CellIndex) -> bool {
        self.state.resolve(cell)
    }

    pub fn snapshot(&self) -> FlipSnapshot {
        self.state.snapshot()
    }

    /// Most recently planned cascade.
    pub fn last_cascade(&self) -> Option<&CascadePlan> {
        self.last_cascade.as_ref()
    }

    /// Scheduled updates that have neither fired nor been cancelled.
    pub fn pending_updates(&self) -> usize {
        self.pending.iter().filter(|pending| !pending.fired).count()
    }

    pub fn toggle_flip(&mut self) {
        let flipped = !self.state.is_flipped();
        log::debug!("toggle flip to {}", flipped);
        self.set_flipped(flipped);
    }

    /// Sets the global flag and starts a cascade, even when the flag already had that value.
    pub fn set_flipped(&mut self, flipped: bool) {
        let generation = self.state.begin_cascade(flipped);
        let plan = CascadePlan::new(&self.config, flipped, generation, &mut self.rng);

        self.release_pending();
        if plan.reset_first {
            self.state.reset_cells();
        }

        log::debug!(
            "cascade #{} to {}: order {:?}, longest delay {:?}",
            generation,
            Face::from_flipped(flipped).name(),
            plan.order().map(CellIndex::get).collect::<Vec<_>>(),
            plan.longest_delay()
        );

        for step in &plan.steps {
            let handle = self.scheduler.schedule(step.delay, step.update);
            self.pending.push(Pending {
                update: step.update,
                fired: false,
                handle,
            });
        }
        self.last_cascade = Some(plan);
    }

    /// Applies one scheduled update.
    pub fn fire(&mut self, update: CellUpdate) -> FireOutcome {
        if let Some(pending) = self
            .pending
            .iter_mut()
            .find(|pending| pending.update == update)
        {
            pending.fired = true;
        }

        if self.config.overlap == OverlapPolicy::CancelPending
            && update.generation != self.state.generation()
        {
            log::debug!(
                "dropping cell {} update from cascade #{}, current is #{}",
                update.cell,
                update.generation,
                self.state.generation()
            );
            return FireOutcome::Superseded;
        }

        if self.state.write(update.cell, update.flipped) {
            log::trace!(
                "cell {} now shows {}",
                update.cell,
                Face::from_flipped(update.flipped).name()
            );
            FireOutcome::Applied
        } else {
            FireOutcome::Unchanged
        }
    }

    /// Forgets handles of updates that already fired and, when overlapping cascades are not allowed, cancels
    /// the ones still waiting.
    fn release_pending(&mut self) {
        let cancel_waiting = self.config.overlap == OverlapPolicy::CancelPending;
        let mut kept = Vec::new();
        for pending in self.pending.drain(..) {
            if pending.fired || cancel_waiting {
                if !pending.fired {
                    log::trace!(
                        "cancel cell {} update from cascade #{}",
                        pending.update.cell,
                        pending.update.generation
                    );
                }
                self.scheduler.cancel(pending.handle);
            } else {
                kept.push(pending);
            }
        }
        self.pending = kept;
    }
}

impl<R: Rng> FlipOrchestrator<VirtualScheduler, R> {
    /// Moves the virtual clock forward, firing every update that comes due on the way.
    pub fn advance(&mut self, by: Duration) -> Vec<FiredUpdate> {
        let deadline = self.scheduler.now() + by;
        let mut fired = Vec::new();
        while let Some((at, update)) = self.scheduler.pop_due(deadline) {
            let outcome = self.fire(update);
            fired.push(FiredUpdate {
                at,
                update,
                outcome,
            });
        }
        self.scheduler.advance_to(deadline);
        fired
    }

    /// Fires everything still scheduled.
    pub fn settle(&mut self) -> Vec<FiredUpdate> {
        let remaining = self
            .scheduler
            .next_due()
            .map_or(Duration::ZERO, |due| due.saturating_sub(self.scheduler.now()));
        self.advance(remaining.max(self.config.max_latency()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    type TestOrchestrator = FlipOrchestrator<VirtualScheduler, SmallRng>;

    fn orchestrator(seed: u64) -> TestOrchestrator {
        orchestrator_with(CascadeConfig::default(), seed)
    }

    fn orchestrator_with(config: CascadeConfig, seed: u64) -> TestOrchestrator {
        FlipOrchestrator::new(config, VirtualScheduler::new(), SmallRng::seed_from_u64(seed))
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn all_cells_are(orchestrator: &TestOrchestrator, flipped: bool) -> bool {
        CellIndex::all().all(|cell| orchestrator.cell_flip_states().get(&cell) == Some(&flipped))
    }

    #[test]
    fn before_any_toggle_cells_follow_global_flag() {
        let orchestrator = orchestrator(1);

        assert!(!orchestrator.is_flipped());
        assert!(orchestrator.cell_flip_states().is_empty());
        assert!(orchestrator.borders_visible());
        assert!(CellIndex::all().all(|cell| !orchestrator.resolve(cell)));
    }

    #[test]
    fn toggle_flips_global_flag_and_resets_cells_immediately() {
        let mut orchestrator = orchestrator(2);
        orchestrator.toggle_flip();

        assert!(orchestrator.is_flipped());
        assert!(all_cells_are(&orchestrator, false));
        assert_eq!(orchestrator.pending_updates(), 9);

        orchestrator.advance(ms(500));

        assert!(all_cells_are(&orchestrator, true));
        assert_eq!(orchestrator.pending_updates(), 0);
    }

    #[test]
    fn flip_out_does_not_reset_first() {
        let mut orchestrator = orchestrator(3);
        orchestrator.toggle_flip();
        orchestrator.settle();
        orchestrator.toggle_flip();

        assert!(!orchestrator.is_flipped());
        assert!(all_cells_are(&orchestrator, true));

        orchestrator.advance(ms(500));
        assert!(all_cells_are(&orchestrator, false));
    }

    #[test]
    fn any_call_sequence_converges() {
        let mut rng = SmallRng::seed_from_u64(4);
        for seed in 0..50 {
            let mut orchestrator = orchestrator(seed);
            for _ in 0..rng.random_range(1..8) {
                if rng.random_bool(0.5) {
                    orchestrator.toggle_flip();
                } else {
                    orchestrator.set_flipped(rng.random_bool(0.5));
                }
                orchestrator.advance(ms(rng.random_range(0..600)));
            }
            orchestrator.advance(ms(500));

            assert!(orchestrator.state().is_converged(), "seed {}", seed);
            assert_eq!(orchestrator.cell_flip_states().len(), 9);
        }
    }

    #[test]
    fn single_toggle_touches_exactly_nine_cells() {
        let mut orchestrator = orchestrator(5);
        orchestrator.toggle_flip();
        let fired = orchestrator.settle();

        let cells: BTreeSet<u8> = fired.iter().map(|f| f.update.cell.get()).collect();
        assert_eq!(fired.len(), 9);
        assert_eq!(cells, (1..=9).collect::<BTreeSet<_>>());
        assert_eq!(
            orchestrator.cell_flip_states().keys().copied().collect::<Vec<_>>(),
            CellIndex::all().collect::<Vec<_>>()
        );
    }

    #[test]
    fn updates_fire_within_direction_bounds() {
        let mut orchestrator = orchestrator(6);
        for _ in 0..50 {
            let started = orchestrator.scheduler().now();
            orchestrator.toggle_flip();
            let window = orchestrator.config().window_for(orchestrator.is_flipped());

            for fired in orchestrator.advance(ms(600)) {
                let latency = fired.at - started;
                assert!(window.contains(latency), "{:?} outside {:?}", latency, window);
            }
        }
    }

    #[test]
    fn firing_order_varies_between_trials() {
        let mut orchestrator = orchestrator(7);
        let mut orders = BTreeSet::new();
        for _ in 0..100 {
            orchestrator.set_flipped(true);
            let order: Vec<u8> = orchestrator
                .settle()
                .iter()
                .map(|fired| fired.update.cell.get())
                .collect();
            orders.insert(order);
        }

        assert!(orders.len() > 1);
    }

    #[test]
    fn set_flipped_twice_stays_flipped() {
        let mut orchestrator = orchestrator(8);
        orchestrator.set_flipped(true);
        orchestrator.set_flipped(true);

        assert!(orchestrator.is_flipped());
        assert_eq!(orchestrator.state().generation(), 2);
        assert_eq!(orchestrator.pending_updates(), 9);

        orchestrator.settle();
        assert!(all_cells_are(&orchestrator, true));
    }

    #[test]
    fn rapid_reversal_cancels_stale_updates() {
        let config = CascadeConfig::new(
            DelayWindow::new_unchecked(400, 400),
            DelayWindow::new_unchecked(50, 50),
            OverlapPolicy::CancelPending,
        );
        let mut orchestrator = orchestrator_with(config, 9);
        orchestrator.toggle_flip();
        orchestrator.toggle_flip();

        assert_eq!(orchestrator.scheduler().pending(), 9);

        let fired = orchestrator.settle();
        assert!(fired.iter().all(|f| f.update.generation == 2));
        assert!(all_cells_are(&orchestrator, false));
        assert!(orchestrator.state().is_converged());
    }

    #[test]
    fn last_fire_wins_lets_stale_updates_through() {
        let config = CascadeConfig::new(
            DelayWindow::new_unchecked(400, 400),
            DelayWindow::new_unchecked(50, 50),
            OverlapPolicy::LastFireWins,
        );
        let mut orchestrator = orchestrator_with(config, 10);
        orchestrator.toggle_flip();
        orchestrator.toggle_flip();

        assert_eq!(orchestrator.scheduler().pending(), 18);

        orchestrator.advance(ms(100));
        assert!(all_cells_are(&orchestrator, false));

        orchestrator.advance(ms(400));
        assert!(!orchestrator.is_flipped());
        assert!(all_cells_are(&orchestrator, true));
        assert!(!orchestrator.state().is_converged());
    }

    #[test]
    fn late_update_from_older_cascade_is_superseded() {
        let mut orchestrator = orchestrator(11);
        orchestrator.toggle_flip();
        let stale = orchestrator.last_cascade().unwrap().steps[0].update;
        orchestrator.toggle_flip();

        assert_eq!(orchestrator.fire(stale), FireOutcome::Superseded);
        assert!(!orchestrator.resolve(stale.cell));
    }

    #[test]
    fn nothing_fires_before_minimum_delay() {
        let mut orchestrator = orchestrator(12);
        for _ in 0..20 {
            orchestrator.toggle_flip();

            assert!(orchestrator.advance(Duration::ZERO).is_empty());
            assert!(orchestrator.advance(ms(49)).is_empty());
            assert_eq!(orchestrator.pending_updates(), 9);

            orchestrator.advance(ms(451));
            assert!(orchestrator.state().is_converged());
        }
    }

    #[test]
    fn repeated_fire_reports_no_change() {
        let mut orchestrator = orchestrator(13);
        orchestrator.toggle_flip();
        let update = orchestrator.last_cascade().unwrap().steps[0].update;

        assert_eq!(orchestrator.fire(update), FireOutcome::Applied);
        assert_eq!(orchestrator.fire(update), FireOutcome::Unchanged);
        assert!(!FireOutcome::Unchanged.has_update());
    }
}
