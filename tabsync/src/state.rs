//! Scroll state shared by every pane of one screen.

use log::warn;

use crate::error::{SyncError, check_pane};

/// Per-pane vertical offsets plus horizontal pager progress.
///
/// This is the single source of truth read by the translation calculator.
/// Each pane offset is written only by that pane's own scroll events and
/// the horizontal offset only by the pager.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSyncState {
    pane_offsets: Vec<f32>,
    horizontal_offset: f32,
    pane_width: f32,
    active_index: usize,
}

impl ScrollSyncState {
    /// Create state for `pane_count` panes of `pane_width` each, all at rest.
    pub fn new(pane_count: usize, pane_width: f32) -> Result<Self, SyncError> {
        if pane_count == 0 {
            return Err(SyncError::NoPanes);
        }
        if pane_width.is_nan() || pane_width <= 0.0 {
            return Err(SyncError::InvalidPaneWidth(pane_width));
        }
        Ok(Self {
            pane_offsets: vec![0.0; pane_count],
            horizontal_offset: 0.0,
            pane_width,
            active_index: 0,
        })
    }

    /// Record a vertical offset for one pane.
    ///
    /// Returns `Ok(true)` if the stored offset changed. Non-finite values
    /// are ignored.
    pub fn set_pane_offset(&mut self, index: usize, value: f32) -> Result<bool, SyncError> {
        check_pane(index, self.pane_offsets.len())?;
        if !value.is_finite() {
            warn!("ignoring non-finite offset {value} for pane {index}");
            return Ok(false);
        }
        let slot = &mut self.pane_offsets[index];
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    /// Record horizontal pager progress and re-derive the active pane.
    ///
    /// Returns true if the stored offset changed. Non-finite values are
    /// ignored.
    pub fn set_horizontal_offset(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            warn!("ignoring non-finite pager offset {value}");
            return false;
        }
        if self.horizontal_offset == value {
            return false;
        }
        self.horizontal_offset = value;
        self.active_index = self.index_at(value);
        true
    }

    pub fn pane_offset(&self, index: usize) -> Result<f32, SyncError> {
        check_pane(index, self.pane_offsets.len())?;
        Ok(self.pane_offsets[index])
    }

    /// Offset of the pane currently driving the header.
    pub fn active_offset(&self) -> f32 {
        self.pane_offsets[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn pane_offsets(&self) -> &[f32] {
        &self.pane_offsets
    }

    pub fn horizontal_offset(&self) -> f32 {
        self.horizontal_offset
    }

    pub fn pane_width(&self) -> f32 {
        self.pane_width
    }

    pub fn pane_count(&self) -> usize {
        self.pane_offsets.len()
    }

    /// Horizontal offset at which `index` is fully aligned.
    pub fn aligned_offset(&self, index: usize) -> f32 {
        index as f32 * self.pane_width
    }

    fn index_at(&self, horizontal_offset: f32) -> usize {
        let last = self.pane_offsets.len() - 1;
        let page = (horizontal_offset / self.pane_width).round();
        if page.is_nan() || page <= 0.0 {
            0
        } else {
            (page as usize).min(last)
        }
    }
}
