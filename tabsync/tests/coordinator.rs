use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tabsync::{HeaderState, ScrollableSurface, SnapPolicy, SyncConfig, SyncCoordinator, SyncError};

/// Scroll surface that records every command it receives.
#[derive(Default)]
struct RecordingSurface {
    commands: RefCell<Vec<(f32, bool)>>,
}

impl ScrollableSurface for RecordingSurface {
    fn scroll_to(&self, offset: f32, animated: bool) {
        self.commands.borrow_mut().push((offset, animated));
    }
}

impl RecordingSurface {
    fn commands(&self) -> Vec<(f32, bool)> {
        self.commands.borrow().clone()
    }
}

fn clock() -> impl Fn(u64) -> Instant {
    let t0 = Instant::now();
    move |ms| t0 + Duration::from_millis(ms)
}

fn config() -> SyncConfig {
    SyncConfig::new().header(250.0, 48.0).panes(3).pane_width(100.0)
}

fn mount(sync: &mut SyncCoordinator, pane: usize) -> Rc<RecordingSurface> {
    let surface = Rc::new(RecordingSurface::default());
    let handle: Rc<dyn ScrollableSurface> = surface.clone();
    sync.register_surface(pane, &handle).unwrap();
    surface
}

// =============================================================================
// Recalculation Tests
// =============================================================================

#[test]
fn test_first_update_waits_for_quiet_window() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();

    sync.on_pane_scroll(0, 100.0, at(0)).unwrap();
    sync.poll(at(0)).unwrap();
    assert_eq!(sync.recomputations(), 0);
    assert_eq!(sync.translation(), 0.0);

    sync.poll(at(16)).unwrap();
    assert_eq!(sync.recomputations(), 1);
    assert_eq!(sync.translation(), -100.0);
}

#[test]
fn test_rapid_updates_recompute_once_with_last_value() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    sync.subscribe(move |v| sink.borrow_mut().push(*v));

    for i in 0..10u64 {
        sync.on_pane_scroll(0, 10.0 * (i + 1) as f32, at(i)).unwrap();
        sync.poll(at(i)).unwrap();
    }
    assert_eq!(sync.next_deadline(), Some(at(25)));

    sync.poll(at(25)).unwrap();
    assert_eq!(sync.recomputations(), 1);
    assert_eq!(*seen.borrow(), vec![-100.0]);
}

#[test]
fn test_unchanged_offsets_schedule_nothing() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();

    sync.on_pane_scroll(1, 0.0, at(0)).unwrap();
    sync.on_horizontal_scroll(0.0, at(0));
    assert!(!sync.has_pending());
    assert_eq!(sync.next_deadline(), None);
}

#[test]
fn test_non_finite_offsets_are_ignored() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    sync.on_pane_scroll(0, 100.0, at(0)).unwrap();
    sync.poll(at(16)).unwrap();
    assert_eq!(sync.translation(), -100.0);

    sync.on_pane_scroll(0, f32::NAN, at(20)).unwrap();
    sync.on_pane_scroll(0, f32::INFINITY, at(20)).unwrap();
    sync.on_horizontal_scroll(f32::NAN, at(20));
    assert!(!sync.has_pending());

    sync.poll(at(100)).unwrap();
    assert_eq!(sync.recomputations(), 1);
    assert_eq!(sync.translation(), -100.0);
    assert_eq!(sync.state().pane_offset(0).unwrap(), 100.0);
}

#[test]
fn test_recompute_is_idempotent() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    sync.on_pane_scroll(0, 60.0, at(0)).unwrap();
    sync.on_horizontal_scroll(30.0, at(0));

    let first = sync.recompute().unwrap();
    let second = sync.recompute().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_swipe_carries_header_over() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    sync.on_pane_scroll(0, 250.0, at(0)).unwrap();
    sync.poll(at(16)).unwrap();
    assert_eq!(sync.translation(), -250.0);
    assert_eq!(sync.tab_bar_top(), 0.0);

    let mut now = 16;
    let mut previous = sync.translation();
    for x in (10..=100).step_by(10) {
        now += 16;
        sync.on_horizontal_scroll(x as f32, at(now));
        now += 16;
        sync.poll(at(now)).unwrap();
        let value = sync.translation();
        assert!((value - previous).abs() <= 25.001, "jump at x={x}");
        previous = value;
    }
    assert_eq!(sync.state().active_index(), 1);
    assert!(previous.abs() < 0.001);
}

// =============================================================================
// Snap Tests
// =============================================================================

#[test]
fn test_momentum_end_past_half_collapses() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let pane = mount(&mut sync, 0);

    sync.on_pane_scroll(0, 100.0, at(0)).unwrap();
    sync.on_pane_scroll(0, 130.0, at(8)).unwrap();
    sync.on_momentum_end(0, at(10)).unwrap();

    assert!(sync.poll(at(25)).unwrap().is_empty());
    let issued = sync.poll(at(26)).unwrap();
    assert_eq!(issued.len(), 1);
    assert!(issued[0].delivered);
    assert_eq!(pane.commands(), vec![(250.0, true)]);
    assert_eq!(sync.header_state(0), Ok(HeaderState::Collapsed));
}

#[test]
fn test_momentum_end_before_half_expands() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let pane = mount(&mut sync, 0);

    sync.on_pane_scroll(0, 80.0, at(0)).unwrap();
    sync.on_momentum_end(0, at(0)).unwrap();
    sync.poll(at(16)).unwrap();

    assert_eq!(pane.commands(), vec![(0.0, true)]);
    assert_eq!(sync.header_state(0), Ok(HeaderState::Expanded));
}

#[test]
fn test_momentum_end_beyond_header_does_not_snap() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let pane = mount(&mut sync, 0);

    sync.on_pane_scroll(0, 260.0, at(0)).unwrap();
    sync.on_momentum_end(0, at(0)).unwrap();
    assert!(sync.poll(at(16)).unwrap().is_empty());
    assert!(pane.commands().is_empty());
}

#[test]
fn test_drag_begin_cancels_pending_snap() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let pane = mount(&mut sync, 0);

    sync.on_pane_scroll(0, 130.0, at(0)).unwrap();
    sync.on_momentum_end(0, at(0)).unwrap();
    sync.on_drag_begin().unwrap();

    sync.poll(at(100)).unwrap();
    assert!(pane.commands().is_empty());
}

#[test]
fn test_drag_begin_flushes_pending_recalculation() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();

    sync.on_pane_scroll(0, 125.0, at(0)).unwrap();
    sync.on_drag_begin().unwrap();
    assert_eq!(sync.recomputations(), 1);
    assert_eq!(sync.translation(), -125.0);
    assert!(!sync.has_pending());
}

#[test]
fn test_snap_uses_configured_policy() {
    let at = clock();
    let mut sync =
        SyncCoordinator::new(config().snap_policy(SnapPolicy::Inclusive)).unwrap();
    let pane = mount(&mut sync, 0);

    sync.on_pane_scroll(0, 250.0, at(0)).unwrap();
    sync.on_momentum_end(0, at(0)).unwrap();
    sync.poll(at(16)).unwrap();
    assert_eq!(pane.commands(), vec![(250.0, true)]);
}

#[test]
fn test_snap_can_be_disabled() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config().without_snap()).unwrap();
    let pane = mount(&mut sync, 0);

    sync.on_pane_scroll(0, 130.0, at(0)).unwrap();
    sync.on_momentum_end(0, at(0)).unwrap();
    sync.poll(at(100)).unwrap();
    assert!(pane.commands().is_empty());
}

// =============================================================================
// Surface & Lifecycle Tests
// =============================================================================

#[test]
fn test_unmounted_surface_is_skipped() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();

    sync.on_pane_scroll(2, 130.0, at(0)).unwrap();
    sync.on_momentum_end(2, at(0)).unwrap();
    let issued = sync.poll(at(16)).unwrap();
    assert_eq!(issued.len(), 1);
    assert!(!issued[0].delivered);
}

#[test]
fn test_dropped_surface_is_skipped() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let pane = mount(&mut sync, 1);
    drop(pane);

    sync.on_pane_scroll(1, 200.0, at(0)).unwrap();
    sync.on_momentum_end(1, at(0)).unwrap();
    let issued = sync.poll(at(16)).unwrap();
    assert!(!issued[0].delivered);
}

#[test]
fn test_out_of_range_pane_fails_fast() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let err = SyncError::PaneOutOfRange { index: 3, count: 3 };

    assert_eq!(sync.on_pane_scroll(3, 10.0, at(0)), Err(err.clone()));
    assert_eq!(sync.on_momentum_end(3, at(0)), Err(err));
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(SyncCoordinator::new(config().header(0.0, 0.0)).is_err());
    assert!(SyncCoordinator::new(config().panes(0)).is_err());
}

#[test]
fn test_teardown_detaches_everything() {
    let at = clock();
    let mut sync = SyncCoordinator::new(config()).unwrap();
    let pane = mount(&mut sync, 0);
    let seen = Rc::new(RefCell::new(0));
    let sink = seen.clone();
    sync.subscribe(move |_| *sink.borrow_mut() += 1);

    sync.on_pane_scroll(0, 130.0, at(0)).unwrap();
    sync.on_momentum_end(0, at(0)).unwrap();
    sync.teardown();

    assert!(!sync.has_pending());
    assert!(sync.poll(at(100)).unwrap().is_empty());
    sync.recompute().unwrap();
    assert_eq!(*seen.borrow(), 0);
    assert!(pane.commands().is_empty());
}
