//! Simulated host scroll views.

use std::cell::{Cell, RefCell};

use log::debug;
use tabsync::ScrollableSurface;

use crate::easing::{Easing, ScrollAnimation};

/// A headless scroll view.
///
/// Commands from the synchroniser are played back over virtual time by
/// [`tick`](Self::tick); the runner feeds the resulting offsets back in as
/// ordinary scroll events.
#[derive(Debug)]
pub struct SimulatedSurface {
    name: String,
    offset: Cell<f32>,
    enabled: Cell<bool>,
    now_ms: Cell<u64>,
    animation: RefCell<Option<ScrollAnimation>>,
    jump: Cell<Option<f32>>,
    duration_ms: u64,
    easing: Easing,
}

impl SimulatedSurface {
    pub fn new(name: impl Into<String>, duration_ms: u64, easing: Easing) -> Self {
        Self {
            name: name.into(),
            offset: Cell::new(0.0),
            enabled: Cell::new(true),
            now_ms: Cell::new(0),
            animation: RefCell::new(None),
            jump: Cell::new(None),
            duration_ms,
            easing,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// A user gesture moved the view.
    pub fn set_offset(&self, offset: f32) {
        self.offset.set(offset);
    }

    /// A user grabbed the view: any running animation stops where it is.
    pub fn interrupt(&self) {
        if self.animation.borrow_mut().take().is_some() {
            debug!("{}: animation interrupted at {}", self.name, self.offset());
        }
    }

    /// Tell the view what time it is, so new animations start now.
    pub fn set_clock(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    /// Advance to `now_ms`. Returns the new offset if it moved.
    pub fn tick(&self, now_ms: u64) -> Option<f32> {
        self.now_ms.set(now_ms);

        if let Some(target) = self.jump.take() {
            self.offset.set(target);
            return Some(target);
        }

        let animation = (*self.animation.borrow())?;
        let value = animation.sample(now_ms);
        if animation.is_done(now_ms) {
            self.animation.borrow_mut().take();
        }
        if value == self.offset.get() {
            return None;
        }
        self.offset.set(value);
        Some(value)
    }
}

impl ScrollableSurface for SimulatedSurface {
    fn scroll_to(&self, offset: f32, animated: bool) {
        debug!("{}: scroll_to({offset}, animated: {animated})", self.name);

        if animated {
            let start = self.now_ms.get();
            *self.animation.borrow_mut() = Some(ScrollAnimation::new(
                self.offset(),
                offset,
                start,
                self.duration_ms,
                self.easing,
            ));
        } else {
            self.animation.borrow_mut().take();
            self.jump.set(Some(offset));
        }
    }

    fn set_scroll_enabled(&self, enabled: bool) {
        debug!("{}: scroll enabled = {enabled}", self.name);
        self.enabled.set(enabled);
    }
}
