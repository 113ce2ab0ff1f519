use std::path::PathBuf;

use tabsync::SyncError;
use thiserror::Error;

use crate::scenario::Variant;

/// Errors raised while loading or replaying a scenario.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("event '{event}' at {at}ms is not supported by the {variant} variant")]
    UnsupportedEvent {
        event: &'static str,
        at: u64,
        variant: Variant,
    },

    #[error("momentum_end at {0}ms needs a pane index")]
    MissingPane(u64),

    #[error("failed to write trace: {0}")]
    Output(#[from] std::io::Error),
}
