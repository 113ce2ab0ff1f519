//! Configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Default collapsible header height.
pub const DEFAULT_HEADER_HEIGHT: f32 = 250.0;
/// Default sticky tab bar height.
pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 48.0;
/// One animation frame.
pub const FRAME_MS: u64 = 16;

/// Header geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Collapsible distance.
    pub header_height: f32,
    /// Height of the sticky tab bar below the header. Never collapses.
    #[serde(default)]
    pub tab_bar_height: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            tab_bar_height: DEFAULT_TAB_BAR_HEIGHT,
        }
    }
}

impl HeaderConfig {
    /// Create a validated header config.
    pub fn new(header_height: f32, tab_bar_height: f32) -> Result<Self, SyncError> {
        let config = Self {
            header_height,
            tab_bar_height,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if self.header_height.is_nan() || self.header_height <= 0.0 {
            return Err(SyncError::InvalidHeaderHeight(self.header_height));
        }
        if self.tab_bar_height.is_nan() || self.tab_bar_height < 0.0 {
            return Err(SyncError::InvalidTabBarHeight(self.tab_bar_height));
        }
        Ok(())
    }

    /// Top padding a pane needs so its first row sits below header and tab bar.
    pub fn content_inset(&self) -> f32 {
        self.header_height + self.tab_bar_height
    }
}

/// Threshold rule used when snapping after momentum ends.
///
/// The demo screens disagree on the upper bound, so the rule is explicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapPolicy {
    /// Collapse when `h/2 < v < h`. A pane resting exactly at `h` is left alone.
    #[default]
    Exclusive,
    /// Collapse when `h/2 < v <= h`.
    Inclusive,
    /// Treat the header as a sequence of `h`-sized steps and snap to the
    /// nearest step boundary.
    Stepped,
}

/// Per-screen synchronisation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub header: HeaderConfig,
    /// Number of panes in the pager.
    pub pane_count: usize,
    /// Width of one pane (the horizontal paging step).
    pub pane_width: f32,
    /// Quiet window before the translation is recomputed.
    pub frame_ms: u64,
    /// Quiet window before a snap decision fires.
    pub snap_delay_ms: u64,
    pub snap_policy: SnapPolicy,
    /// Disable to leave panes wherever momentum stops.
    pub snap_enabled: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            header: HeaderConfig::default(),
            pane_count: 3,
            pane_width: 360.0,
            frame_ms: FRAME_MS,
            snap_delay_ms: FRAME_MS,
            snap_policy: SnapPolicy::default(),
            snap_enabled: true,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header and tab bar heights.
    pub fn header(mut self, header_height: f32, tab_bar_height: f32) -> Self {
        self.header = HeaderConfig {
            header_height,
            tab_bar_height,
        };
        self
    }

    /// Set the number of panes.
    pub fn panes(mut self, count: usize) -> Self {
        self.pane_count = count;
        self
    }

    /// Set the pane width.
    pub fn pane_width(mut self, width: f32) -> Self {
        self.pane_width = width;
        self
    }

    /// Set the recomputation window. Rounded up to whole milliseconds.
    pub fn frame(mut self, frame: Duration) -> Self {
        self.frame_ms = whole_millis(frame);
        self
    }

    /// Set the snap debounce window. Rounded up to whole milliseconds.
    pub fn snap_delay(mut self, delay: Duration) -> Self {
        self.snap_delay_ms = whole_millis(delay);
        self
    }

    /// Set the snap threshold rule.
    pub fn snap_policy(mut self, policy: SnapPolicy) -> Self {
        self.snap_policy = policy;
        self
    }

    /// Turn snapping off.
    pub fn without_snap(mut self) -> Self {
        self.snap_enabled = false;
        self
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_delay_ms)
    }

    /// Reject configurations the calculator cannot work with.
    pub fn validate(&self) -> Result<(), SyncError> {
        self.header.validate()?;
        if self.pane_count == 0 {
            return Err(SyncError::NoPanes);
        }
        if self.pane_width.is_nan() || self.pane_width <= 0.0 {
            return Err(SyncError::InvalidPaneWidth(self.pane_width));
        }
        Ok(())
    }
}

/// Milliseconds in `duration`, rounded up so a non-zero window never
/// collapses to zero.
fn whole_millis(duration: Duration) -> u64 {
    let millis = duration.as_millis();
    let rounded = if duration.subsec_nanos() % 1_000_000 == 0 {
        millis
    } else {
        millis + 1
    };
    u64::try_from(rounded).unwrap_or(u64::MAX)
}
