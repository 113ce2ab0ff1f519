//! Header translation.
//!
//! The header translation is the sum of two parts:
//!
//! - a vertical part driven by the active pane's offset, mapping
//!   `[0, h]` onto `[0, -h]` and holding at `-h` beyond that;
//! - a horizontal carry-over part that interpolates, across the pager's
//!   horizontal offset, the difference between the active pane's clamped
//!   offset and every other pane's.
//!
//! Together they make the header follow whichever pane is on screen during
//! a swipe without jumping when the active index flips at the half-way
//! point.

use log::trace;

use crate::config::HeaderConfig;
use crate::error::SyncError;
use crate::interpolate::{Interpolation, map_clamped};
use crate::state::ScrollSyncState;

/// Vertical part of the translation for a pane scrolled by `offset`.
pub fn vertical_component(offset: f32, header_height: f32) -> f32 {
    if !is_positive(header_height) {
        return 0.0;
    }
    map_clamped(offset, (0.0, header_height), (0.0, -header_height))
}

/// How far each pane has scrolled the header, clamped to `[0, h]`.
pub fn tab_offsets(pane_offsets: &[f32], header_height: f32) -> Vec<f32> {
    let h = if is_positive(header_height) { header_height } else { 0.0 };
    pane_offsets.iter().map(|&v| v.clamp(0.0, h)).collect()
}

/// Signed differences between the active pane's tab offset and each pane's.
///
/// The active pane's own delta is always zero and every delta lies in
/// `[-h, h]`. A non-positive or NaN height gives all zeros.
pub fn carry_over_deltas(pane_offsets: &[f32], active: usize, header_height: f32) -> Vec<f32> {
    if !is_positive(header_height) {
        return vec![0.0; pane_offsets.len()];
    }
    let tabs = tab_offsets(pane_offsets, header_height);
    let focused = tabs.get(active).copied().unwrap_or(0.0);
    tabs.iter()
        .enumerate()
        .map(|(i, &tab)| {
            if i == active {
                0.0
            } else {
                (focused - tab).clamp(-header_height, header_height)
            }
        })
        .collect()
}

/// Horizontal carry-over part for the current pager position.
pub fn carry_over_component(state: &ScrollSyncState, header_height: f32) -> Result<f32, SyncError> {
    let deltas = carry_over_deltas(state.pane_offsets(), state.active_index(), header_height);
    let carry = Interpolation::new(breakpoints(state), deltas)?;
    Ok(carry.evaluate(state.horizontal_offset()))
}

/// Full header translation. Always within `[-h, 0]`; 0 when `h` is not a
/// positive number.
pub fn header_translation(state: &ScrollSyncState, header_height: f32) -> Result<f32, SyncError> {
    if !is_positive(header_height) {
        return Ok(0.0);
    }
    Ok(vertical_component(state.active_offset(), header_height)
        + carry_over_component(state, header_height)?)
}

// False for NaN.
fn is_positive(header_height: f32) -> bool {
    header_height > 0.0
}

/// Pager offsets at which each pane is fully aligned.
fn breakpoints(state: &ScrollSyncState) -> Vec<f32> {
    (0..state.pane_count()).map(|i| state.aligned_offset(i)).collect()
}

/// Reusable calculator holding the carry-over interpolation.
///
/// The breakpoints depend only on pane count and width; only the outputs are
/// recomputed on each call.
#[derive(Debug, Clone)]
pub struct TranslationCalculator {
    header: HeaderConfig,
    carry: Interpolation,
}

impl TranslationCalculator {
    /// Build a calculator for panes laid out like `state`.
    ///
    /// Fails if `header` is invalid.
    pub fn new(header: HeaderConfig, state: &ScrollSyncState) -> Result<Self, SyncError> {
        header.validate()?;
        let points = breakpoints(state);
        let zeros = vec![0.0; points.len()];
        let carry = Interpolation::new(points, zeros)?;
        Ok(Self { header, carry })
    }

    pub fn header(&self) -> &HeaderConfig {
        &self.header
    }

    /// Compute the header translation for `state`.
    ///
    /// Fails with [`SyncError::MismatchedRange`] if `state` has a different
    /// pane count than the one the calculator was built for.
    pub fn compute(&mut self, state: &ScrollSyncState) -> Result<f32, SyncError> {
        let h = self.header.header_height;
        let deltas = carry_over_deltas(state.pane_offsets(), state.active_index(), h);
        self.carry.set_output(deltas)?;
        let carry = self.carry.evaluate(state.horizontal_offset());
        let vertical = vertical_component(state.active_offset(), h);

        trace!(
            "translation: active={} vertical={} carry={}",
            state.active_index(),
            vertical,
            carry
        );
        Ok(vertical + carry)
    }

    /// Position of the sticky tab bar's top edge for a given translation.
    pub fn tab_bar_top(&self, translation: f32) -> f32 {
        self.header.header_height + translation
    }
}
