//! Scroll synchronisation for collapsible headers over paged, independently
//! scrolling panes.
//!
//! The crate does no rendering or gesture handling. Hosts forward scroll
//! events, poll the coordinator from their event loop and apply the
//! resulting header translation and scroll commands.

pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod interpolate;
pub mod observable;
pub mod shared;
pub mod snap;
pub mod state;
pub mod surface;
pub mod translation;

pub use config::{HeaderConfig, SnapPolicy, SyncConfig};
pub use coordinator::{IssuedSnap, SyncCoordinator};
pub use debounce::Debouncer;
pub use error::SyncError;
pub use interpolate::{Extrapolate, Interpolation};
pub use observable::{Observable, SubscriptionId};
pub use shared::SharedPagerSync;
pub use snap::{GateTransition, HeaderState, ScrollGate, SnapCommand, SnapDecider, snap_target};
pub use state::ScrollSyncState;
pub use surface::{ScrollableSurface, SurfaceRegistry, SurfaceSlot};
pub use translation::{TranslationCalculator, header_translation};
