//! Deterministic scroll host for tests.
//!
//! ## Usage
//!
//! Enable the `testing` feature and attach a [`SimulatedScroller`] instead of
//! a real platform scroll container.
use tracing_subscriber::EnvFilter;

use crate::{
    config::{CarouselArgs, Orientation},
    metrics::{ItemGeometry, ScrollBehavior, ScrollHost},
};

/// Installs a test-friendly tracing subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory scroll container laid out with [`ItemGeometry`].
///
/// Smooth scrolls are recorded as pending and only land when
/// [`finish_animation`](Self::finish_animation) or
/// [`interrupt`](Self::interrupt) is called, so tests control exactly when
/// the offset changes.
#[derive(Clone, Debug)]
pub struct SimulatedScroller {
    axis: Orientation,
    geometry: ItemGeometry,
    item_count: usize,
    viewport: f32,
    offset: f32,
    pending: Option<f32>,
    commands: Vec<(f32, ScrollBehavior)>,
}

impl SimulatedScroller {
    /// Creates a scroller for `item_count` items in a viewport of `viewport`
    /// pixels along the carousel axis.
    pub fn new(args: &CarouselArgs, item_count: usize, viewport: f32) -> Self {
        Self {
            axis: args.orientation,
            geometry: ItemGeometry::resolve(args, viewport),
            item_count,
            viewport,
            offset: 0.0,
            pending: None,
            commands: Vec::new(),
        }
    }

    /// Current offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> f32 {
        (self.geometry.content_extent(self.item_count, self.viewport) - self.viewport).max(0.0)
    }

    /// Moves the offset directly, as a user gesture would.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Target of the in-flight smooth scroll.
    pub fn pending(&self) -> Option<f32> {
        self.pending
    }

    /// Lands the in-flight smooth scroll. Returns `true` if the offset moved.
    pub fn finish_animation(&mut self) -> bool {
        match self.pending.take() {
            Some(target) => {
                let moved = (target - self.offset).abs() > f32::EPSILON;
                self.offset = target;
                moved
            }
            None => false,
        }
    }

    /// Stops the in-flight smooth scroll at `offset`.
    pub fn interrupt(&mut self, offset: f32) {
        self.pending = None;
        self.set_offset(offset);
    }

    /// Every scroll command received, oldest first.
    pub fn commands(&self) -> &[(f32, ScrollBehavior)] {
        &self.commands
    }

    /// Changes the viewport size, keeping the raw offset where possible.
    pub fn resize(&mut self, args: &CarouselArgs, viewport: f32) {
        self.viewport = viewport;
        self.geometry = ItemGeometry::resolve(args, viewport);
        self.set_offset(self.offset);
    }

    /// Changes the number of laid out items.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.set_offset(self.offset);
    }
}

impl ScrollHost for SimulatedScroller {
    fn scroll_offset(&self, axis: Orientation) -> f32 {
        if axis == self.axis { self.offset } else { 0.0 }
    }

    fn viewport_extent(&self, _axis: Orientation) -> f32 {
        self.viewport
    }

    fn scroll_extent(&self, _axis: Orientation) -> f32 {
        self.geometry.content_extent(self.item_count, self.viewport)
    }

    fn item_offset(&self, index: usize, _axis: Orientation) -> Option<f32> {
        (index < self.item_count).then(|| self.geometry.item_offset(index, self.viewport))
    }

    fn scroll_to(&mut self, offset: f32, _axis: Orientation, behavior: ScrollBehavior) {
        self.commands.push((offset, behavior));
        let offset = offset.clamp(0.0, self.max_offset());
        match behavior {
            ScrollBehavior::Smooth => self.pending = Some(offset),
            ScrollBehavior::Instant => {
                self.pending = None;
                self.offset = offset;
            }
        }
    }
}
