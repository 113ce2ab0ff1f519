//! Per-pane synchronisation coordinator.
//!
//! Wires host events into [`ScrollSyncState`], rate-limits translation
//! recomputation to one per frame, debounces snap decisions and sends the
//! resulting commands to registered surfaces.
//!
//! Event flow:
//!
//! 1. `on_pane_scroll` / `on_horizontal_scroll` update state synchronously,
//!    then (re)schedule a recalculation one frame out.
//! 2. `on_momentum_end` schedules a snap for that pane on its own timer.
//! 3. `on_drag_begin` cancels pending snaps. A pending recalculation is
//!    run immediately so the header does not lag behind the new gesture.
//! 4. `poll` fires whatever is due.

use std::rc::Rc;
use std::time::Instant;

use log::debug;

use crate::config::SyncConfig;
use crate::debounce::Debouncer;
use crate::error::SyncError;
use crate::observable::{Observable, SubscriptionId};
use crate::snap::{HeaderState, SnapCommand, SnapDecider};
use crate::state::ScrollSyncState;
use crate::surface::{ScrollableSurface, SurfaceRegistry};
use crate::translation::TranslationCalculator;

/// A snap command that was sent to a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IssuedSnap {
    pub pane: usize,
    pub command: SnapCommand,
    /// False if the pane had no mounted surface.
    pub delivered: bool,
}

/// Coordinates header translation and snapping for one screen.
#[derive(Debug)]
pub struct SyncCoordinator {
    config: SyncConfig,
    state: ScrollSyncState,
    calculator: TranslationCalculator,
    snap: SnapDecider,
    surfaces: SurfaceRegistry,
    recalc: Debouncer<(), ()>,
    snaps: Debouncer<usize, f32>,
    translation: Observable<f32>,
    recomputations: u64,
}

impl SyncCoordinator {
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        let state = ScrollSyncState::new(config.pane_count, config.pane_width)?;
        let calculator = TranslationCalculator::new(config.header, &state)?;

        Ok(Self {
            snap: SnapDecider::new(
                config.pane_count,
                config.header.header_height,
                config.snap_policy,
            ),
            surfaces: SurfaceRegistry::new(config.pane_count),
            recalc: Debouncer::new(config.frame_duration()),
            snaps: Debouncer::new(config.snap_duration()),
            translation: Observable::new(0.0),
            recomputations: 0,
            calculator,
            state,
            config,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> &ScrollSyncState {
        &self.state
    }

    /// Register the scroll surface for a pane.
    pub fn register_surface(
        &mut self,
        pane: usize,
        surface: &Rc<dyn ScrollableSurface>,
    ) -> Result<(), SyncError> {
        self.surfaces.register(pane, surface)
    }

    pub fn unregister_surface(&mut self, pane: usize) -> Result<(), SyncError> {
        self.surfaces.unregister(pane)
    }

    /// A pane reported a new vertical offset.
    pub fn on_pane_scroll(&mut self, pane: usize, offset: f32, now: Instant) -> Result<(), SyncError> {
        if self.state.set_pane_offset(pane, offset)? {
            self.snap.observe(pane, offset)?;
            self.recalc.schedule((), (), now);
        }
        Ok(())
    }

    /// The pager reported a new horizontal offset.
    pub fn on_horizontal_scroll(&mut self, offset: f32, now: Instant) {
        let previous = self.state.active_index();
        if self.state.set_horizontal_offset(offset) {
            if self.state.active_index() != previous {
                debug!(
                    "active pane {} -> {}",
                    previous,
                    self.state.active_index()
                );
            }
            self.recalc.schedule((), (), now);
        }
    }

    /// A new drag started on a pane or on the pager.
    ///
    /// Cancels every pending snap. The pending recalculation timer is
    /// cancelled as well, but its work is flushed: the translation is
    /// recomputed right away from the last reported offsets.
    pub fn on_drag_begin(&mut self) -> Result<(), SyncError> {
        if self.snaps.has_pending() {
            debug!("drag began: cancelling pending snaps");
            self.snaps.cancel_all();
        }
        if self.recalc.cancel(&()).is_some() {
            self.recompute()?;
        }
        Ok(())
    }

    /// Momentum scrolling stopped on a pane.
    pub fn on_momentum_end(&mut self, pane: usize, now: Instant) -> Result<(), SyncError> {
        let offset = self.state.pane_offset(pane)?;
        if self.config.snap_enabled {
            self.snaps.schedule(pane, offset, now);
        }
        Ok(())
    }

    /// Fire every task due at `now`. Returns the snap commands issued.
    pub fn poll(&mut self, now: Instant) -> Result<Vec<IssuedSnap>, SyncError> {
        if !self.recalc.poll(now).is_empty() {
            self.recompute()?;
        }

        let mut issued = Vec::new();
        for (pane, offset) in self.snaps.poll(now) {
            if let Some(command) = self.snap.decide(pane, offset)? {
                let delivered = self
                    .surfaces
                    .scroll_to(pane, command.offset, command.animated);
                issued.push(IssuedSnap {
                    pane,
                    command,
                    delivered,
                });
            }
        }
        Ok(issued)
    }

    /// When the host loop should next call [`poll`](Self::poll).
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.recalc.next_deadline(), self.snaps.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.recalc.has_pending() || self.snaps.has_pending()
    }

    /// Recompute the translation now, bypassing the frame limit.
    pub fn recompute(&mut self) -> Result<f32, SyncError> {
        let value = self.calculator.compute(&self.state)?;
        self.recomputations += 1;
        self.translation.set(value);
        Ok(value)
    }

    /// Last computed header translation.
    pub fn translation(&self) -> f32 {
        *self.translation.get()
    }

    /// Top edge of the sticky tab bar for the last computed translation.
    pub fn tab_bar_top(&self) -> f32 {
        self.calculator.tab_bar_top(self.translation())
    }

    /// Number of recomputations performed so far.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Observe translation changes.
    pub fn subscribe(&mut self, observer: impl FnMut(&f32) + 'static) -> SubscriptionId {
        self.translation.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.translation.unsubscribe(id)
    }

    pub fn header_state(&self, pane: usize) -> Result<HeaderState, SyncError> {
        self.snap.state(pane)
    }

    /// Detach observers and surfaces and drop pending timers.
    pub fn teardown(&mut self) {
        self.recalc.cancel_all();
        self.snaps.cancel_all();
        self.translation.clear();
        self.surfaces.clear();
    }
}
