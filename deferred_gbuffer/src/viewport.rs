//! Viewport-size provider
//!
//! The geometry buffer samples the wanted attachment size from a provider
//! every `update()`. The provider is read-only from the buffer's side; the
//! owner writes it on window resize.

use std::cell::Cell;
use glam::IVec2;

/// Source of the current viewport dimensions
pub trait ViewportProvider {
    /// Current viewport size in pixels (`viewSizeX`, `viewSizeY`)
    fn view_size(&self) -> IVec2;
}

/// Viewport size shared between the window owner and its render targets
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use deferred_gbuffer::deferred::{SharedViewport, ViewportProvider};
///
/// let viewport = Rc::new(SharedViewport::new(800, 600));
/// viewport.resize(1024, 768);
/// assert_eq!(viewport.view_size().x, 1024);
/// ```
#[derive(Debug, Default)]
pub struct SharedViewport {
    size: Cell<IVec2>,
}

impl SharedViewport {
    /// Create a viewport of the given size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Cell::new(IVec2::new(width, height)),
        }
    }

    /// Record a new viewport size
    pub fn resize(&self, width: i32, height: i32) {
        self.size.set(IVec2::new(width, height));
    }
}

impl ViewportProvider for SharedViewport {
    fn view_size(&self) -> IVec2 {
        self.size.get()
    }
}
