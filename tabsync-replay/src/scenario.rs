//! Scripted gesture traces.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tabsync::SyncConfig;

use crate::easing::Easing;
use crate::error::ReplayError;

/// Which screen layout the scenario drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Every pane scrolls on its own; the header is translated.
    #[default]
    PerPane,
    /// One outer scroll view holds header, tab bar and pager.
    SharedPager,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::PerPane => write!(f, "per_pane"),
            Variant::SharedPager => write!(f, "shared_pager"),
        }
    }
}

/// A host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    /// A pane's vertical offset changed.
    PaneScroll { pane: usize, offset: f32 },
    /// The horizontal pager moved.
    PagerScroll { offset: f32 },
    /// The outer scroll view moved (shared pager only).
    Scroll { offset: f32 },
    /// The user started a drag.
    DragBegin,
    /// Momentum stopped. `pane` is required for the per-pane variant.
    MomentumEnd {
        #[serde(default)]
        pane: Option<usize>,
    },
}

/// An event at a point in virtual time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since the scenario started.
    pub at: u64,
    #[serde(flatten)]
    pub event: GestureEvent,
}

fn default_animation_ms() -> u64 {
    200
}

fn default_settle_ms() -> u64 {
    500
}

/// A complete replay scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub config: SyncConfig,
    /// Duration of animated `scroll_to` commands.
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    #[serde(default)]
    pub easing: Easing,
    /// Extra time simulated after the last event.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    pub events: Vec<TimedEvent>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let mut scenario: Scenario = serde_json::from_str(json)?;
        scenario.config.validate()?;
        // Stable sort keeps same-time events in file order.
        scenario.events.sort_by_key(|e| e.at);
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Virtual time at which the replay stops.
    pub fn end_ms(&self) -> u64 {
        self.events.last().map_or(0, |e| e.at) + self.settle_ms
    }
}
