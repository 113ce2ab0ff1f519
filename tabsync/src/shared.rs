//! Shared-pager variant.
//!
//! Here a single outer vertical scroll view contains the header, the tab bar
//! and the horizontal pager, so its offset drives the header directly and no
//! carry-over is needed. Panes stay locked until the header is fully
//! collapsed, which keeps a half-scrolled pane from dragging the header away
//! from the outer view's position.

use std::rc::Rc;
use std::time::Instant;

use log::{debug, warn};

use crate::config::SyncConfig;
use crate::debounce::Debouncer;
use crate::error::SyncError;
use crate::observable::{Observable, SubscriptionId};
use crate::snap::{GateTransition, HeaderState, ScrollGate, SnapCommand, SnapDecider};
use crate::surface::{ScrollableSurface, SurfaceRegistry, SurfaceSlot};
use crate::translation::vertical_component;

/// Coordinates one outer scroll view and its gated panes.
#[derive(Debug)]
pub struct SharedPagerSync {
    header_height: f32,
    snap_enabled: bool,
    outer: SurfaceSlot,
    panes: SurfaceRegistry,
    gate: ScrollGate,
    snap: SnapDecider,
    snaps: Debouncer<(), f32>,
    offset: Observable<f32>,
}

impl SharedPagerSync {
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        let h = config.header.header_height;
        Ok(Self {
            header_height: h,
            snap_enabled: config.snap_enabled,
            outer: SurfaceSlot::new(),
            panes: SurfaceRegistry::new(config.pane_count),
            gate: ScrollGate::new(h),
            snap: SnapDecider::new(1, h, config.snap_policy),
            snaps: Debouncer::new(config.snap_duration()),
            offset: Observable::new(0.0),
        })
    }

    /// Attach the outer scroll view.
    pub fn attach_outer(&mut self, surface: &Rc<dyn ScrollableSurface>) {
        self.outer.attach(surface);
    }

    /// Register a pane. It starts locked or unlocked to match the gate.
    pub fn register_pane(
        &mut self,
        pane: usize,
        surface: &Rc<dyn ScrollableSurface>,
    ) -> Result<(), SyncError> {
        self.panes.register(pane, surface)?;
        surface.set_scroll_enabled(self.gate.is_enabled());
        Ok(())
    }

    /// The outer view reported a new offset. Non-finite offsets are ignored.
    pub fn on_scroll(&mut self, offset: f32) -> Option<GateTransition> {
        if !offset.is_finite() {
            warn!("ignoring non-finite outer offset {offset}");
            return None;
        }
        self.offset.set(offset);
        // Single-pane decider: index 0 always exists.
        let _ = self.snap.observe(0, offset);

        let transition = self.gate.update(offset)?;
        debug!("pane gate: {transition:?} at offset {offset}");
        match transition {
            GateTransition::Enable => self.panes.set_scroll_enabled_all(true),
            GateTransition::DisableAndReset => {
                self.panes.scroll_all_to(0.0, false);
                self.panes.set_scroll_enabled_all(false);
            }
        }
        Some(transition)
    }

    pub fn on_drag_begin(&mut self) {
        if self.snaps.cancel(&()).is_some() {
            debug!("drag began: pending snap cancelled");
        }
    }

    pub fn on_momentum_end(&mut self, now: Instant) {
        if self.snap_enabled {
            self.snaps.schedule((), *self.offset.get(), now);
        }
    }

    /// Fire a due snap, if any, against the outer view.
    pub fn poll(&mut self, now: Instant) -> Result<Option<SnapCommand>, SyncError> {
        let Some(((), offset)) = self.snaps.poll(now).pop() else {
            return Ok(None);
        };
        let command = self.snap.decide(0, offset)?;
        if let Some(command) = command {
            self.outer.scroll_to(command.offset, command.animated);
        }
        Ok(command)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.snaps.next_deadline()
    }

    pub fn offset(&self) -> f32 {
        *self.offset.get()
    }

    /// Header translation implied by the outer offset.
    pub fn header_translation(&self) -> f32 {
        vertical_component(self.offset(), self.header_height)
    }

    pub fn header_state(&self) -> HeaderState {
        self.snap.state(0).unwrap_or_default()
    }

    pub fn panes_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Observe the outer offset.
    pub fn subscribe(&mut self, observer: impl FnMut(&f32) + 'static) -> SubscriptionId {
        self.offset.subscribe(observer)
    }

    pub fn teardown(&mut self) {
        self.snaps.cancel_all();
        self.offset.clear();
        self.outer.detach();
        self.panes.clear();
    }
}
