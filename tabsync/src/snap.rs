//! Snap decisions after scroll momentum ends, and the pane scroll gate.

use log::debug;

use crate::config::SnapPolicy;
use crate::error::{SyncError, check_pane};

/// Stable header positions a pane can rest in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderState {
    #[default]
    Expanded,
    Collapsed,
}

/// An animated scroll command produced by a snap decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCommand {
    pub offset: f32,
    pub animated: bool,
}

impl SnapCommand {
    fn animated(offset: f32) -> Self {
        Self {
            offset,
            animated: true,
        }
    }
}

/// Offset a pane resting at `offset` should snap to, if any.
///
/// - `v <= h/2`: back to 0 (expanded).
/// - `v < h` (`Exclusive`) or `v <= h` (`Inclusive`): on to `h` (collapsed).
/// - beyond that: no action.
///
/// `Stepped` applies the half-way rule within the header step `v` is in and
/// always snaps to a step boundary.
pub fn snap_target(offset: f32, header_height: f32, policy: SnapPolicy) -> Option<f32> {
    if header_height <= 0.0 || offset.is_nan() {
        return None;
    }
    let h = header_height;
    let v = offset.max(0.0);

    match policy {
        SnapPolicy::Exclusive | SnapPolicy::Inclusive => {
            let collapses = match policy {
                SnapPolicy::Inclusive => v <= h,
                _ => v < h,
            };
            if v <= h / 2.0 {
                Some(0.0)
            } else if collapses {
                Some(h)
            } else {
                None
            }
        }
        SnapPolicy::Stepped => {
            let step = (v / h).floor();
            let within = v - step * h;
            if within <= h / 2.0 {
                Some(step * h)
            } else {
                Some((step + 1.0) * h)
            }
        }
    }
}

/// Per-pane snap state machine over {expanded, collapsed}.
#[derive(Debug, Clone)]
pub struct SnapDecider {
    header_height: f32,
    policy: SnapPolicy,
    states: Vec<HeaderState>,
}

impl SnapDecider {
    pub fn new(pane_count: usize, header_height: f32, policy: SnapPolicy) -> Self {
        Self {
            header_height,
            policy,
            states: vec![HeaderState::Expanded; pane_count],
        }
    }

    pub fn policy(&self) -> SnapPolicy {
        self.policy
    }

    pub fn state(&self, pane: usize) -> Result<HeaderState, SyncError> {
        check_pane(pane, self.states.len())?;
        Ok(self.states[pane])
    }

    /// Track a pane reaching a boundary on its own.
    pub fn observe(&mut self, pane: usize, offset: f32) -> Result<(), SyncError> {
        check_pane(pane, self.states.len())?;
        if offset <= 0.0 {
            self.states[pane] = HeaderState::Expanded;
        } else if offset >= self.header_height {
            self.states[pane] = HeaderState::Collapsed;
        }
        Ok(())
    }

    /// Decide the snap for a pane whose momentum ended at `offset`.
    ///
    /// Moves the pane to the resulting state and returns the command to
    /// issue, if any.
    pub fn decide(&mut self, pane: usize, offset: f32) -> Result<Option<SnapCommand>, SyncError> {
        check_pane(pane, self.states.len())?;
        let target = snap_target(offset, self.header_height, self.policy);

        self.states[pane] = match target {
            Some(t) if t <= 0.0 => HeaderState::Expanded,
            Some(_) => HeaderState::Collapsed,
            None if offset >= self.header_height => HeaderState::Collapsed,
            None => self.states[pane],
        };

        debug!(
            "snap pane {pane}: offset={offset} target={target:?} state={:?}",
            self.states[pane]
        );
        Ok(target.map(SnapCommand::animated))
    }
}

/// Change in pane scrollability produced by [`ScrollGate::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    /// The header is fully collapsed; panes may scroll on their own.
    Enable,
    /// The header is fully expanded again; reset panes to 0 and lock them.
    DisableAndReset,
}

/// Locks pane scrolling while a shared pager drives the header.
///
/// Panes start locked. They unlock once the driving offset reaches the
/// header height and lock again (after a reset to 0) once it returns to 0.
#[derive(Debug, Clone)]
pub struct ScrollGate {
    header_height: f32,
    enabled: bool,
}

impl ScrollGate {
    pub fn new(header_height: f32) -> Self {
        Self {
            header_height,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Feed the driving offset and report any transition.
    pub fn update(&mut self, offset: f32) -> Option<GateTransition> {
        if !self.enabled && offset >= self.header_height {
            self.enabled = true;
            Some(GateTransition::Enable)
        } else if self.enabled && offset <= 0.0 {
            self.enabled = false;
            Some(GateTransition::DisableAndReset)
        } else {
            None
        }
    }
}
