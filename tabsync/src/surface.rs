//! Host scroll surfaces.
//!
//! The presentation layer owns its scroll views and registers them here.
//! The registry only keeps weak references, so commands issued after a
//! surface unmounts (or before it mounts) are skipped instead of failing.

use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::error::{SyncError, check_pane};

/// A scroll view the synchroniser can command.
///
/// Methods take `&self`; hosts use interior mutability. Commands are
/// fire-and-forget: resulting scroll events come back through the normal
/// event handlers.
pub trait ScrollableSurface {
    /// Scroll to a vertical offset.
    fn scroll_to(&self, offset: f32, animated: bool);

    /// Enable or disable user scrolling. Hosts that cannot toggle scrolling
    /// may ignore this.
    fn set_scroll_enabled(&self, _enabled: bool) {}
}

/// Weak reference to one registered surface.
#[derive(Default)]
pub struct SurfaceSlot {
    surface: Option<Weak<dyn ScrollableSurface>>,
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, surface: &Rc<dyn ScrollableSurface>) {
        self.surface = Some(Rc::downgrade(surface));
    }

    pub fn detach(&mut self) {
        self.surface = None;
    }

    pub fn get(&self) -> Option<Rc<dyn ScrollableSurface>> {
        self.surface.as_ref().and_then(Weak::upgrade)
    }

    /// Issue a scroll command. Returns false if no live surface was there.
    pub fn scroll_to(&self, offset: f32, animated: bool) -> bool {
        match self.get() {
            Some(surface) => {
                surface.scroll_to(offset, animated);
                true
            }
            None => {
                debug!("scroll_to({offset}) skipped: surface not mounted");
                false
            }
        }
    }

    pub fn set_scroll_enabled(&self, enabled: bool) -> bool {
        match self.get() {
            Some(surface) => {
                surface.set_scroll_enabled(enabled);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for SurfaceSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceSlot")
            .field("mounted", &self.get().is_some())
            .finish()
    }
}

/// Per-pane surfaces, indexed by pane.
#[derive(Debug)]
pub struct SurfaceRegistry {
    slots: Vec<SurfaceSlot>,
}

impl SurfaceRegistry {
    pub fn new(pane_count: usize) -> Self {
        Self {
            slots: (0..pane_count).map(|_| SurfaceSlot::new()).collect(),
        }
    }

    /// Register the surface for pane `index`, replacing any previous one.
    pub fn register(
        &mut self,
        index: usize,
        surface: &Rc<dyn ScrollableSurface>,
    ) -> Result<(), SyncError> {
        check_pane(index, self.slots.len())?;
        self.slots[index].attach(surface);
        Ok(())
    }

    pub fn unregister(&mut self, index: usize) -> Result<(), SyncError> {
        check_pane(index, self.slots.len())?;
        self.slots[index].detach();
        Ok(())
    }

    /// Command pane `index` to scroll. Missing surfaces are skipped.
    pub fn scroll_to(&self, index: usize, offset: f32, animated: bool) -> bool {
        match self.slots.get(index) {
            Some(slot) => slot.scroll_to(offset, animated),
            None => {
                warn!("scroll_to for unknown pane {index} ignored");
                false
            }
        }
    }

    /// Toggle scrolling on every mounted pane.
    pub fn set_scroll_enabled_all(&self, enabled: bool) {
        for slot in &self.slots {
            slot.set_scroll_enabled(enabled);
        }
    }

    /// Scroll every mounted pane to `offset`.
    pub fn scroll_all_to(&self, offset: f32, animated: bool) {
        for slot in &self.slots {
            slot.scroll_to(offset, animated);
        }
    }

    /// Forget every surface.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.detach();
        }
    }
}
