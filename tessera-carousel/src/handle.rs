//! Shared ownership of a [`Carousel`].
//!
//! ## Usage
//!
//! Clone a [`CarouselHandle`] into every event callback that needs to drive
//! the carousel, e.g. navigation buttons, the tab list and the frame timer.
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    carousel::{Carousel, CarouselSnapshot},
    config::CarouselArgs,
    metrics::ScrollHost,
};

/// Cheaply clonable, thread-safe handle to a [`Carousel`].
pub struct CarouselHandle<H> {
    inner: Arc<RwLock<Carousel<H>>>,
}

impl<H> Clone for CarouselHandle<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> std::fmt::Debug for CarouselHandle<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselHandle")
            .field("carousel", &*self.inner.read())
            .finish()
    }
}

impl<H: ScrollHost> CarouselHandle<H> {
    /// Creates a carousel and wraps it in a handle.
    pub fn new(args: CarouselArgs, item_count: usize) -> Self {
        Self::from_carousel(Carousel::new(args, item_count))
    }

    /// Wraps an existing carousel.
    pub fn from_carousel(carousel: Carousel<H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(carousel)),
        }
    }

    /// Execute a closure with a shared reference to the carousel.
    pub fn with<R>(&self, f: impl FnOnce(&Carousel<H>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Execute a closure with a mutable reference to the carousel.
    ///
    /// Subscribers run inside the write lock, so they must not use the handle.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Carousel<H>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Current state.
    pub fn snapshot(&self) -> CarouselSnapshot {
        self.with(Carousel::snapshot)
    }

    /// Whether both handles point at the same carousel.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Instant};

    use super::*;
    use crate::testing::SimulatedScroller;

    #[test]
    fn clones_share_state_across_threads() {
        let start = Instant::now();
        let args = CarouselArgs::default();
        let handle = CarouselHandle::new(args.clone(), 4);
        handle.with_mut(|carousel| carousel.attach(SimulatedScroller::new(&args, 4, 100.0), start));

        let remote = handle.clone();
        assert!(remote.ptr_eq(&handle));
        let page = thread::spawn(move || remote.with_mut(|carousel| carousel.next(start)))
            .join()
            .unwrap();
        assert_eq!(page, Some(1));
        assert_eq!(handle.snapshot().active_page_index, Some(1));
        assert!(handle.with(|carousel| carousel.snapshot().busy));
    }
}
