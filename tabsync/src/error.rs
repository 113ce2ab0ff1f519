//! Error types for scroll synchronisation.

use thiserror::Error;

/// Misuse of the synchronisation API.
///
/// Every variant is a programming error reported at the call site. There is
/// no transient failure mode: all operations are local state computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// A pane index outside `0..count` was used.
    #[error("pane index {index} out of range (pane count {count})")]
    PaneOutOfRange { index: usize, count: usize },

    /// A screen was configured without any panes.
    #[error("at least one pane is required")]
    NoPanes,

    /// Header height must be strictly positive.
    #[error("header height must be positive, got {0}")]
    InvalidHeaderHeight(f32),

    /// Tab bar height must be non-negative.
    #[error("tab bar height must not be negative, got {0}")]
    InvalidTabBarHeight(f32),

    /// Pane width must be strictly positive.
    #[error("pane width must be positive, got {0}")]
    InvalidPaneWidth(f32),

    /// Interpolation breakpoints and outputs differ in length.
    #[error("interpolation needs matching breakpoints and outputs ({inputs} vs {outputs})")]
    MismatchedRange { inputs: usize, outputs: usize },

    /// Interpolation has no breakpoints at all.
    #[error("interpolation needs at least one breakpoint")]
    EmptyRange,

    /// Interpolation breakpoints must be non-decreasing.
    #[error("interpolation breakpoints must be non-decreasing (at position {0})")]
    UnorderedRange(usize),
}

/// Check that `index` addresses one of `count` panes.
pub(crate) fn check_pane(index: usize, count: usize) -> Result<(), SyncError> {
    if index < count {
        Ok(())
    } else {
        Err(SyncError::PaneOutOfRange { index, count })
    }
}
