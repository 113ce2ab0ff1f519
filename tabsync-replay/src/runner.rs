//! Drives a synchroniser through a scenario over virtual time.
//!
//! Each millisecond the runner polls the synchroniser first, then applies
//! the scenario events scheduled for that instant, then (on frame
//! boundaries) advances the simulated surfaces and feeds their movement back
//! as scroll events.

use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;
use tabsync::{
    GateTransition, ScrollSyncState, ScrollableSurface, SharedPagerSync, SyncCoordinator, SyncError,
};

use crate::error::ReplayError;
use crate::scenario::{GestureEvent, Scenario, TimedEvent, Variant};
use crate::surface::SimulatedSurface;

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRow {
    pub at_ms: u64,
    pub translation: f32,
    pub active_index: usize,
    pub offsets: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

enum Driver {
    PerPane(SyncCoordinator),
    Shared {
        sync: SharedPagerSync,
        pager: ScrollSyncState,
    },
}

/// A prepared replay.
pub struct Replay {
    scenario: Scenario,
    t0: Instant,
    driver: Driver,
    panes: Vec<Rc<SimulatedSurface>>,
    outer: Rc<SimulatedSurface>,
    notes: Vec<String>,
    trace: Vec<TraceRow>,
}

impl Replay {
    pub fn new(scenario: Scenario) -> Result<Self, ReplayError> {
        let config = &scenario.config;
        let make = |name: String| {
            Rc::new(SimulatedSurface::new(
                name,
                scenario.animation_ms,
                scenario.easing,
            ))
        };
        let panes: Vec<_> = (0..config.pane_count)
            .map(|i| make(format!("pane{i}")))
            .collect();
        let outer = make("outer".to_string());

        let driver = match scenario.variant {
            Variant::PerPane => {
                let mut sync = SyncCoordinator::new(config.clone())?;
                for (i, pane) in panes.iter().enumerate() {
                    let handle: Rc<dyn ScrollableSurface> = pane.clone();
                    sync.register_surface(i, &handle)?;
                }
                Driver::PerPane(sync)
            }
            Variant::SharedPager => {
                let mut sync = SharedPagerSync::new(config)?;
                let handle: Rc<dyn ScrollableSurface> = outer.clone();
                sync.attach_outer(&handle);
                for (i, pane) in panes.iter().enumerate() {
                    let handle: Rc<dyn ScrollableSurface> = pane.clone();
                    sync.register_pane(i, &handle)?;
                }
                let pager = ScrollSyncState::new(config.pane_count, config.pane_width)?;
                Driver::Shared { sync, pager }
            }
        };

        info!(
            "replaying '{}' ({} variant, {} events)",
            scenario.name,
            scenario.variant,
            scenario.events.len()
        );

        Ok(Self {
            scenario,
            t0: Instant::now(),
            driver,
            panes,
            outer,
            notes: Vec::new(),
            trace: Vec::new(),
        })
    }

    fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    /// Run to completion and return the trace.
    pub fn run(mut self) -> Result<Vec<TraceRow>, ReplayError> {
        let end = self.scenario.end_ms();
        let events = std::mem::take(&mut self.scenario.events);
        let frame = self.scenario.config.frame_ms.max(1);
        let mut next = 0;

        for now in 0..=end {
            self.set_clock(now);
            self.poll(now)?;

            while let Some(event) = events.get(next).filter(|e| e.at <= now) {
                self.apply(event)?;
                next += 1;
            }

            if now % frame == 0 {
                self.tick_surfaces(now)?;
            }

            self.record(now);
        }

        if let Driver::PerPane(sync) = &mut self.driver {
            sync.teardown();
        }
        Ok(self.trace)
    }

    fn surfaces(&self) -> impl Iterator<Item = &Rc<SimulatedSurface>> {
        self.panes.iter().chain(std::iter::once(&self.outer))
    }

    fn set_clock(&self, now: u64) {
        for surface in self.surfaces() {
            surface.set_clock(now);
        }
    }

    fn poll(&mut self, now: u64) -> Result<(), ReplayError> {
        let instant = self.at(now);
        match &mut self.driver {
            Driver::PerPane(sync) => {
                for snap in sync.poll(instant)? {
                    let mut note = format!("snap pane{} -> {}", snap.pane, snap.command.offset);
                    if !snap.delivered {
                        note.push_str(" (not mounted)");
                    }
                    self.notes.push(note);
                }
            }
            Driver::Shared { sync, .. } => {
                if let Some(command) = sync.poll(instant)? {
                    self.notes.push(format!("snap outer -> {}", command.offset));
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, timed: &TimedEvent) -> Result<(), ReplayError> {
        let instant = self.at(timed.at);
        debug!("t={}ms {:?}", timed.at, timed.event);

        match (&timed.event, &mut self.driver) {
            (GestureEvent::PaneScroll { pane, offset }, Driver::PerPane(sync)) => {
                sync.on_pane_scroll(*pane, *offset, instant)?;
                pane_at(&self.panes, *pane)?.set_offset(*offset);
            }
            (GestureEvent::PaneScroll { pane, offset }, Driver::Shared { .. }) => {
                let surface = pane_at(&self.panes, *pane)?;
                if surface.is_enabled() {
                    surface.set_offset(*offset);
                } else {
                    self.notes.push(format!("pane{pane} locked, scroll ignored"));
                }
            }
            (GestureEvent::PagerScroll { offset }, Driver::PerPane(sync)) => {
                sync.on_horizontal_scroll(*offset, instant);
            }
            (GestureEvent::PagerScroll { offset }, Driver::Shared { pager, .. }) => {
                pager.set_horizontal_offset(*offset);
            }
            (GestureEvent::Scroll { .. }, Driver::PerPane(_)) => {
                return Err(ReplayError::UnsupportedEvent {
                    event: "scroll",
                    at: timed.at,
                    variant: Variant::PerPane,
                });
            }
            (GestureEvent::Scroll { offset }, Driver::Shared { sync, .. }) => {
                self.outer.set_offset(*offset);
                if let Some(transition) = sync.on_scroll(*offset) {
                    self.notes.push(gate_note(transition));
                }
            }
            (GestureEvent::DragBegin, driver) => {
                for surface in self.panes.iter().chain([&self.outer]) {
                    surface.interrupt();
                }
                match driver {
                    Driver::PerPane(sync) => sync.on_drag_begin()?,
                    Driver::Shared { sync, .. } => sync.on_drag_begin(),
                }
            }
            (GestureEvent::MomentumEnd { pane }, Driver::PerPane(sync)) => {
                let pane = pane.ok_or(ReplayError::MissingPane(timed.at))?;
                sync.on_momentum_end(pane, instant)?;
            }
            (GestureEvent::MomentumEnd { .. }, Driver::Shared { sync, .. }) => {
                sync.on_momentum_end(instant);
            }
        }
        Ok(())
    }

    fn tick_surfaces(&mut self, now: u64) -> Result<(), ReplayError> {
        let instant = self.at(now);
        match &mut self.driver {
            Driver::PerPane(sync) => {
                for (i, pane) in self.panes.iter().enumerate() {
                    if let Some(offset) = pane.tick(now) {
                        sync.on_pane_scroll(i, offset, instant)?;
                    }
                }
            }
            Driver::Shared { sync, .. } => {
                // Outer first: a gate reset lands on the panes in the same frame.
                if let Some(offset) = self.outer.tick(now) {
                    if let Some(transition) = sync.on_scroll(offset) {
                        self.notes.push(gate_note(transition));
                    }
                }
                for pane in &self.panes {
                    pane.tick(now);
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, now: u64) {
        let (translation, active_index) = match &self.driver {
            Driver::PerPane(sync) => (sync.translation(), sync.state().active_index()),
            Driver::Shared { sync, pager } => (sync.header_translation(), pager.active_index()),
        };

        let changed = self.trace.last().is_none_or(|row| {
            row.translation != translation || row.active_index != active_index
        });
        if !changed && self.notes.is_empty() {
            return;
        }

        self.trace.push(TraceRow {
            at_ms: now,
            translation,
            active_index,
            offsets: self.panes.iter().map(|p| p.offset()).collect(),
            notes: std::mem::take(&mut self.notes),
        });
    }
}

fn pane_at(
    panes: &[Rc<SimulatedSurface>],
    index: usize,
) -> Result<&Rc<SimulatedSurface>, SyncError> {
    panes.get(index).ok_or(SyncError::PaneOutOfRange {
        index,
        count: panes.len(),
    })
}

fn gate_note(transition: GateTransition) -> String {
    match transition {
        GateTransition::Enable => "panes unlocked".to_string(),
        GateTransition::DisableAndReset => "panes reset and locked".to_string(),
    }
}
