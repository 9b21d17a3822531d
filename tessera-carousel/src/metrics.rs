//! Scroll metrics: the only place that reads or writes the host's scroll
//! position.
//!
//! ## Usage
//!
//! Implement [`ScrollHost`] for the platform's scroll container and let the
//! carousel wrap it in [`ScrollMetrics`].
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::trace;

use crate::{
    config::{CarouselArgs, Length, Orientation},
    partition::{Page, Pages},
};

/// Distance in pixels under which two scroll offsets are considered equal.
pub const SNAP_TOLERANCE: f32 = 1.0;

/// How the host should move to a new scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Animate toward the offset.
    Smooth,
    /// Jump to the offset in one step.
    Instant,
}

/// A platform scroll container hosting the carousel items.
///
/// All offsets are measured along `axis` in pixels, from the start of the
/// scrollable content.
pub trait ScrollHost {
    /// Current scroll offset.
    fn scroll_offset(&self, axis: Orientation) -> f32;

    /// Size of the visible viewport.
    fn viewport_extent(&self, axis: Orientation) -> f32;

    /// Size of the full scrollable content, padding included.
    fn scroll_extent(&self, axis: Orientation) -> f32;

    /// Start edge of item `index`, if the host can measure it.
    ///
    /// Returning `None` makes [`ScrollMetrics`] derive item positions from
    /// [`ItemGeometry`].
    fn item_offset(&self, _index: usize, _axis: Orientation) -> Option<f32> {
        None
    }

    /// Requests a scroll to `offset`.
    fn scroll_to(&mut self, offset: f32, axis: Orientation, behavior: ScrollBehavior);
}

/// Why a measurement could not be taken.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeasureError {
    /// No host element is attached.
    #[error("scroll host is not attached")]
    Detached,
    /// The host has no visible extent yet.
    #[error("scroll host has zero extent")]
    ZeroExtent,
}

/// A successful reading of the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Current scroll offset.
    pub offset: f32,
    /// Visible extent.
    pub extent: f32,
    /// Largest reachable scroll offset.
    pub max_offset: f32,
}

/// Grid layout of equally sized items, used when the host cannot report item
/// positions itself.
///
/// Item extent is `(viewport - 2 * padding) / ipp - gap * (ipp - 1) / ipp`, and
/// item `i` starts at `padding + i * (extent + gap)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemGeometry {
    /// Visible items per page, possibly fractional.
    pub items_per_page: f32,
    /// Gap between items.
    pub gap: f32,
    /// Leading and trailing scroll padding.
    pub padding: f32,
}

impl ItemGeometry {
    /// Resolves the configured lengths against `viewport`.
    pub fn resolve(args: &CarouselArgs, viewport: f32) -> Self {
        Self {
            items_per_page: args.items_per_page,
            gap: args.space_between_items.resolve(viewport).max(0.0),
            padding: args
                .scroll_padding
                .unwrap_or(Length::ZERO)
                .resolve(viewport)
                .max(0.0),
        }
    }

    /// Extent of a single item.
    pub fn item_extent(&self, viewport: f32) -> f32 {
        let ipp = self.items_per_page.max(f32::EPSILON);
        let inner = (viewport - 2.0 * self.padding).max(0.0);
        (inner / ipp - self.gap * (ipp - 1.0) / ipp).max(0.0)
    }

    /// Start edge of item `index`.
    pub fn item_offset(&self, index: usize, viewport: f32) -> f32 {
        self.padding + index as f32 * (self.item_extent(viewport) + self.gap)
    }

    /// Total content length for `item_count` items.
    pub fn content_extent(&self, item_count: usize, viewport: f32) -> f32 {
        if item_count == 0 {
            return 2.0 * self.padding;
        }
        let extent = self.item_extent(viewport);
        2.0 * self.padding + item_count as f32 * extent + (item_count - 1) as f32 * self.gap
    }
}

/// Reads and writes scroll position through an optional [`ScrollHost`].
///
/// While detached, reads return 0 and writes are dropped.
#[derive(Debug)]
pub struct ScrollMetrics<H> {
    host: Option<H>,
    axis: Orientation,
    args: CarouselArgs,
}

impl<H: ScrollHost> ScrollMetrics<H> {
    /// Creates a detached adapter.
    pub fn new(args: &CarouselArgs) -> Self {
        Self {
            host: None,
            axis: args.orientation,
            args: args.clone(),
        }
    }

    /// Attaches a host, returning the previous one.
    pub fn attach(&mut self, host: H) -> Option<H> {
        self.host.replace(host)
    }

    /// Detaches and returns the host.
    pub fn detach(&mut self) -> Option<H> {
        self.host.take()
    }

    /// Returns `true` while a host is attached.
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// Shared access to the host.
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub(crate) fn set_args(&mut self, args: &CarouselArgs) {
        self.axis = args.orientation;
        self.args = args.clone();
    }

    /// Scroll offset along the carousel axis, or 0 while detached.
    pub fn current_offset(&self) -> f32 {
        self.host
            .as_ref()
            .map_or(0.0, |host| host.scroll_offset(self.axis))
    }

    /// Takes a full reading of the host.
    pub fn measure(&self) -> Result<Viewport, MeasureError> {
        let host = self.host.as_ref().ok_or(MeasureError::Detached)?;
        let extent = host.viewport_extent(self.axis);
        if !(extent.is_finite() && extent > 0.0) {
            return Err(MeasureError::ZeroExtent);
        }
        let max_offset = (host.scroll_extent(self.axis) - extent).max(0.0);
        Ok(Viewport {
            offset: host.scroll_offset(self.axis),
            extent,
            max_offset,
        })
    }

    /// Offset that aligns `item` to the scroll-start edge, or 0 while not
    /// measurable.
    pub fn offset_for_item(&self, item: usize) -> f32 {
        let Ok(viewport) = self.measure() else {
            return 0.0;
        };
        self.aligned_offset(item, &viewport)
    }

    /// Offset that aligns the first item of `page` to the scroll-start edge.
    pub fn offset_for_page(&self, page: &Page) -> f32 {
        self.offset_for_item(page.first_item())
    }

    /// Page whose aligned offset is closest to the current offset. Ties go to
    /// the lower index.
    pub fn nearest_page(&self, pages: &Pages) -> Result<usize, MeasureError> {
        let viewport = self.measure()?;
        let nearest = nearest_index(
            viewport.offset,
            pages
                .iter()
                .map(|page| self.aligned_offset(page.first_item(), &viewport)),
        );
        trace!(offset = viewport.offset, ?nearest, "nearest page estimate");
        nearest.ok_or(MeasureError::ZeroExtent)
    }

    /// Item whose aligned offset is closest to the current offset. Ties go to
    /// the lower index.
    pub fn nearest_item(&self, item_count: usize) -> Result<usize, MeasureError> {
        let viewport = self.measure()?;
        nearest_index(
            viewport.offset,
            (0..item_count).map(|item| self.aligned_offset(item, &viewport)),
        )
        .ok_or(MeasureError::ZeroExtent)
    }

    /// Asks the host to scroll. Dropped while detached.
    pub fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        let axis = self.axis;
        if let Some(host) = self.host.as_mut() {
            host.scroll_to(offset, axis, behavior);
        }
    }

    /// Moves the scroll position by `delta` immediately.
    pub fn scroll_by(&mut self, delta: f32) {
        let Ok(viewport) = self.measure() else {
            return;
        };
        let offset = (viewport.offset + delta).clamp(0.0, viewport.max_offset);
        self.scroll_to(offset, ScrollBehavior::Instant);
    }

    fn aligned_offset(&self, item: usize, viewport: &Viewport) -> f32 {
        let geometry = ItemGeometry::resolve(&self.args, viewport.extent);
        let start = self
            .host
            .as_ref()
            .and_then(|host| host.item_offset(item, self.axis))
            .unwrap_or_else(|| geometry.item_offset(item, viewport.extent));
        (start - geometry.padding).clamp(0.0, viewport.max_offset)
    }
}

fn nearest_index(offset: f32, candidates: impl Iterator<Item = f32>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, candidate) in candidates.enumerate() {
        let distance = (candidate - offset).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Debounces a burst of scroll events into a single settle notification.
///
/// The scroll is settled once no event has been recorded for the quiet
/// period. Every new event restarts the period.
#[derive(Clone, Debug)]
pub struct SettleDetector {
    quiet: Duration,
    last_event: Option<Instant>,
}

impl SettleDetector {
    /// Creates a detector with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_event: None,
        }
    }

    /// Records scroll activity at `now`.
    pub fn record(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    /// Returns `true` while activity is pending settlement.
    pub fn is_pending(&self) -> bool {
        self.last_event.is_some()
    }

    /// Returns `true` once, when the quiet period after the last event has
    /// elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(last) if now.saturating_duration_since(last) >= self.quiet => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    /// Forgets pending activity.
    pub fn reset(&mut self) {
        self.last_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{partition::partition, testing::SimulatedScroller};

    struct BareHost {
        offset: f32,
        viewport: f32,
        content: f32,
    }

    impl ScrollHost for BareHost {
        fn scroll_offset(&self, _axis: Orientation) -> f32 {
            self.offset
        }

        fn viewport_extent(&self, _axis: Orientation) -> f32 {
            self.viewport
        }

        fn scroll_extent(&self, _axis: Orientation) -> f32 {
            self.content
        }

        fn scroll_to(&mut self, offset: f32, _axis: Orientation, _behavior: ScrollBehavior) {
            self.offset = offset;
        }
    }

    #[test]
    fn detached_adapter_reads_zero() {
        let mut metrics = ScrollMetrics::<BareHost>::new(&CarouselArgs::default());
        assert_eq!(metrics.current_offset(), 0.0);
        assert_eq!(metrics.measure(), Err(MeasureError::Detached));
        assert_eq!(metrics.offset_for_item(3), 0.0);
        metrics.scroll_to(40.0, ScrollBehavior::Smooth);
        assert!(!metrics.is_attached());
    }

    #[test]
    fn zero_extent_is_not_measurable() {
        let mut metrics = ScrollMetrics::new(&CarouselArgs::default());
        metrics.attach(BareHost {
            offset: 0.0,
            viewport: 0.0,
            content: 0.0,
        });
        assert_eq!(metrics.measure(), Err(MeasureError::ZeroExtent));
    }

    #[test]
    fn geometry_accounts_for_gap_and_padding() {
        let geometry = ItemGeometry {
            items_per_page: 2.0,
            gap: 10.0,
            padding: 20.0,
        };
        // (240 - 40) / 2 - 10 * 1 / 2 = 95
        assert_eq!(geometry.item_extent(240.0), 95.0);
        assert_eq!(geometry.item_offset(0, 240.0), 20.0);
        assert_eq!(geometry.item_offset(2, 240.0), 230.0);
        assert_eq!(geometry.content_extent(3, 240.0), 40.0 + 285.0 + 20.0);
    }

    #[test]
    fn falls_back_to_geometry_without_item_offsets() {
        let args = CarouselArgs::default().space_between_items(Length::Px(10.0));
        let mut metrics = ScrollMetrics::new(&args);
        // 4 items of 100px with 10px gaps.
        metrics.attach(BareHost {
            offset: 0.0,
            viewport: 100.0,
            content: 430.0,
        });
        let pages = partition(4, 1.0);
        assert_eq!(metrics.offset_for_page(&pages[1]), 110.0);
        assert_eq!(metrics.offset_for_page(&pages[3]), 330.0);
    }

    #[test]
    fn page_offsets_clamp_to_reachable_range() {
        let args = CarouselArgs::default().items_per_page(2.0);
        let mut metrics = ScrollMetrics::new(&args);
        metrics.attach(SimulatedScroller::new(&args, 5, 200.0));
        let pages = partition(5, 2.0);
        // Items are 100px; the last page starts at 400 but only 300 is reachable.
        assert_eq!(metrics.offset_for_page(&pages[1]), 200.0);
        assert_eq!(metrics.offset_for_page(&pages[2]), 300.0);
    }

    #[test]
    fn nearest_page_breaks_ties_toward_lower_index() {
        let args = CarouselArgs::default();
        let mut metrics = ScrollMetrics::new(&args);
        let mut host = SimulatedScroller::new(&args, 3, 100.0);
        host.set_offset(50.0);
        metrics.attach(host);
        let pages = partition(3, 1.0);
        assert_eq!(metrics.nearest_page(&pages), Ok(0));

        metrics.host_mut().unwrap().set_offset(51.0);
        assert_eq!(metrics.nearest_page(&pages), Ok(1));
    }

    #[test]
    fn scroll_by_clamps_to_content() {
        let args = CarouselArgs::default();
        let mut metrics = ScrollMetrics::new(&args);
        metrics.attach(SimulatedScroller::new(&args, 3, 100.0));
        metrics.scroll_by(-30.0);
        assert_eq!(metrics.current_offset(), 0.0);
        metrics.scroll_by(500.0);
        assert_eq!(metrics.current_offset(), 200.0);
    }

    #[test]
    fn settle_detector_waits_for_quiet_period() {
        let start = Instant::now();
        let mut detector = SettleDetector::new(Duration::from_millis(100));
        assert!(!detector.poll(start));

        detector.record(start);
        detector.record(start + Duration::from_millis(60));
        assert!(!detector.poll(start + Duration::from_millis(120)));
        assert!(detector.poll(start + Duration::from_millis(160)));
        assert!(!detector.poll(start + Duration::from_millis(500)));
    }
}
