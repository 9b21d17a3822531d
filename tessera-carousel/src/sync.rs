//! Keeps the active page index and the host's scroll offset in agreement.
//!
//! ## Usage
//!
//! The [`Carousel`](crate::Carousel) facade owns a [`Synchronizer`]; use it
//! directly only when building a custom facade.
//!
//! Navigation is optimistic: a command sets the active page to its target
//! immediately and asks the host to scroll. Once the scroll has settled the
//! measured position either confirms the target or corrects it.
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::{
    busy::BusyGuard,
    config::{CarouselArgs, ScrollBy},
    metrics::{
        MeasureError, SNAP_TOLERANCE, ScrollBehavior, ScrollHost, ScrollMetrics, SettleDetector,
    },
    partition::{PagePartitioner, Pages},
};

/// Coarse state of the synchronizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SyncPhase {
    /// Scroll has settled; the active page is trusted.
    #[default]
    Idle,
    /// A programmatic scroll toward a target is in flight.
    Navigating,
    /// The offset is changing without a pending command.
    UserScrolling,
}

/// Destination of a navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavTarget {
    /// Page that becomes active.
    pub page: usize,
    /// Item aligned to the scroll-start edge.
    pub item: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Navigating(NavTarget),
    UserScrolling { estimate: Option<usize> },
}

/// The paging state machine.
#[derive(Debug)]
pub struct Synchronizer<H> {
    args: CarouselArgs,
    item_count: usize,
    partitioner: PagePartitioner,
    metrics: ScrollMetrics<H>,
    settle: SettleDetector,
    busy: BusyGuard,
    phase: Phase,
    active: Option<usize>,
    anchor: usize,
    dragging: bool,
}

impl<H: ScrollHost> Synchronizer<H> {
    /// Creates a detached synchronizer over `item_count` items.
    ///
    /// `args` are expected to be sanitized.
    pub fn new(args: CarouselArgs, item_count: usize) -> Self {
        let mut partitioner = PagePartitioner::new();
        partitioner.update(item_count, args.items_per_page);
        Self {
            metrics: ScrollMetrics::new(&args),
            settle: SettleDetector::new(args.settle_delay),
            args,
            item_count,
            partitioner,
            busy: BusyGuard::new(),
            phase: Phase::Idle,
            active: None,
            anchor: 0,
            dragging: false,
        }
    }

    /// Current pages.
    pub fn pages(&self) -> &Pages {
        self.partitioner.pages()
    }

    /// Active page, or `None` before the first measurement or when there are
    /// no pages.
    pub fn active_page(&self) -> Option<usize> {
        self.active
    }

    /// Item currently aligned to the scroll-start edge.
    pub fn anchor_item(&self) -> usize {
        self.anchor
    }

    /// Coarse phase.
    pub fn phase(&self) -> SyncPhase {
        match self.phase {
            Phase::Idle => SyncPhase::Idle,
            Phase::Navigating(_) => SyncPhase::Navigating,
            Phase::UserScrolling { .. } => SyncPhase::UserScrolling,
        }
    }

    /// Target of the in-flight navigation.
    pub fn target(&self) -> Option<NavTarget> {
        match self.phase {
            Phase::Navigating(target) => Some(target),
            _ => None,
        }
    }

    /// Working nearest-page estimate while the user scrolls.
    pub fn scroll_estimate(&self) -> Option<usize> {
        match self.phase {
            Phase::UserScrolling { estimate } => estimate,
            _ => None,
        }
    }

    /// Whether the scroller is in motion.
    pub fn busy(&self) -> &BusyGuard {
        &self.busy
    }

    /// Effective configuration.
    pub fn args(&self) -> &CarouselArgs {
        &self.args
    }

    /// The scroll metrics adapter.
    pub fn metrics(&self) -> &ScrollMetrics<H> {
        &self.metrics
    }

    /// Mutable access to the attached host.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.metrics.host_mut()
    }

    /// Whether `prev` would do anything.
    pub fn can_go_prev(&self) -> bool {
        match self.args.scroll_by {
            _ if self.pages().len() < 2 => false,
            _ if self.args.looping => true,
            ScrollBy::Page => self.current_page() > 0,
            ScrollBy::Item => self.anchor > 0,
        }
    }

    /// Whether `next` would do anything.
    pub fn can_go_next(&self) -> bool {
        match self.args.scroll_by {
            _ if self.pages().len() < 2 => false,
            _ if self.args.looping => true,
            ScrollBy::Page => self.current_page() + 1 < self.pages().len(),
            ScrollBy::Item => self.anchor + 1 < self.item_count,
        }
    }

    /// Attaches the host and aligns it to the current target without
    /// animation.
    pub fn attach(&mut self, host: H, now: Instant) {
        self.metrics.attach(host);
        if self.pages().is_empty() {
            return;
        }
        let target = self.target().unwrap_or_else(|| self.resting_target());
        self.realign(target, now);
    }

    /// Detaches the host, dropping any in-flight motion.
    pub fn detach(&mut self) -> Option<H> {
        self.settle.reset();
        self.dragging = false;
        self.phase = Phase::Idle;
        self.busy.settle();
        self.metrics.detach()
    }

    /// Advances by one page, or by one item under [`ScrollBy::Item`].
    ///
    /// Returns the resulting page, or `None` when there is nowhere to go.
    pub fn next(&mut self, now: Instant) -> Option<usize> {
        if self.pages().is_empty() {
            return None;
        }
        match self.args.scroll_by {
            ScrollBy::Page => {
                let page =
                    step_forward(self.current_page(), self.pages().len(), self.args.looping)?;
                Some(self.navigate(self.page_target(page), now))
            }
            ScrollBy::Item => {
                let item = step_forward(self.anchor, self.item_count, self.args.looping)?;
                let target = self.item_target(item)?;
                Some(self.navigate(target, now))
            }
        }
    }

    /// Moves back by one page, or by one item under [`ScrollBy::Item`].
    ///
    /// Returns the resulting page, or `None` when there is nowhere to go.
    pub fn prev(&mut self, now: Instant) -> Option<usize> {
        if self.pages().is_empty() {
            return None;
        }
        match self.args.scroll_by {
            ScrollBy::Page => {
                let page =
                    step_back(self.current_page(), self.pages().len(), self.args.looping)?;
                Some(self.navigate(self.page_target(page), now))
            }
            ScrollBy::Item => {
                let item = step_back(self.anchor, self.item_count, self.args.looping)?;
                let target = self.item_target(item)?;
                Some(self.navigate(target, now))
            }
        }
    }

    /// Scrolls to `page`. Out-of-range pages are clamped, or wrapped when
    /// looping.
    pub fn scroll_to_page(&mut self, page: usize, now: Instant) -> Option<usize> {
        let len = self.pages().len();
        if len == 0 {
            return None;
        }
        let page = if self.args.looping {
            page % len
        } else {
            page.min(len - 1)
        };
        let target = self.page_target(page);
        if self.phase == Phase::Idle && self.active == Some(page) && self.anchor == target.item {
            return Some(page);
        }
        Some(self.navigate(target, now))
    }

    /// Aligns `item` to the scroll-start edge. Under [`ScrollBy::Page`] this
    /// scrolls to the item's page instead.
    pub fn scroll_to_item(&mut self, item: usize, now: Instant) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let item = if self.args.looping {
            item % self.item_count
        } else {
            item.min(self.item_count - 1)
        };
        let target = self.item_target(item)?;
        if self.args.scroll_by == ScrollBy::Page {
            return self.scroll_to_page(target.page, now);
        }
        if self.phase == Phase::Idle && self.anchor == item && self.active == Some(target.page) {
            return Some(target.page);
        }
        Some(self.navigate(target, now))
    }

    /// Records a scroll event from the host.
    pub fn on_scroll(&mut self, now: Instant) {
        if self.pages().is_empty() {
            return;
        }
        self.settle.record(now);
        match self.phase {
            Phase::Navigating(_) => {}
            Phase::Idle | Phase::UserScrolling { .. } => {
                let estimate = self.metrics.nearest_page(self.partitioner.pages()).ok();
                trace!(?estimate, "user scroll");
                self.phase = Phase::UserScrolling { estimate };
                self.busy.begin();
            }
        }
    }

    /// Settles immediately, for hosts that report the end of scrolling.
    pub fn on_scroll_end(&mut self, _now: Instant) {
        if self.dragging {
            return;
        }
        self.settle.reset();
        self.settle_now();
    }

    /// Settles once the quiet period has passed. Returns `true` if a settle
    /// ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.dragging || !self.settle.poll(now) {
            return false;
        }
        self.settle_now();
        true
    }

    /// Starts a pointer drag; any navigation target is dropped.
    pub fn begin_drag(&mut self, now: Instant) {
        if self.pages().is_empty() {
            return;
        }
        self.dragging = true;
        self.settle.record(now);
        let estimate = self.metrics.nearest_page(self.partitioner.pages()).ok();
        self.phase = Phase::UserScrolling { estimate };
        self.busy.begin();
    }

    /// Scrolls by `delta` pixels on behalf of a drag.
    pub fn drag_by(&mut self, delta: f32, now: Instant) {
        if !self.dragging {
            return;
        }
        self.metrics.scroll_by(delta);
        self.on_scroll(now);
    }

    /// Releases a drag; the next settle snaps to the nearest page.
    pub fn end_drag(&mut self, now: Instant) {
        if std::mem::take(&mut self.dragging) {
            self.settle.record(now);
        }
    }

    /// Whether a drag holds the pointer.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Updates the number of items.
    pub fn set_item_count(&mut self, item_count: usize, now: Instant) {
        if item_count == self.item_count {
            return;
        }
        self.item_count = item_count;
        self.reconcile_layout(now);
    }

    /// Updates the number of visible items per page.
    pub fn set_items_per_page(&mut self, items_per_page: f32, now: Instant) {
        let items_per_page = if items_per_page.is_finite() && items_per_page > 0.0 {
            items_per_page
        } else {
            warn!(items_per_page, "invalid items per page, falling back to 1");
            1.0
        };
        if items_per_page.to_bits() == self.args.items_per_page.to_bits() {
            return;
        }
        self.args.items_per_page = items_per_page;
        self.metrics.set_args(&self.args);
        self.reconcile_layout(now);
    }

    /// Re-measures after the host changed size or layout.
    pub fn on_resize(&mut self, now: Instant) {
        self.reconcile_layout(now);
    }

    fn reconcile_layout(&mut self, now: Instant) {
        self.partitioner.update(self.item_count, self.args.items_per_page);
        let len = self.pages().len();
        if len == 0 {
            debug!("no pages left, resetting");
            self.active = None;
            self.anchor = 0;
            self.phase = Phase::Idle;
            self.settle.reset();
            self.busy.settle();
            return;
        }
        self.anchor = self.anchor.min(self.item_count - 1);
        if let Some(active) = self.active {
            self.active = Some(active.min(len - 1));
        }

        match self.phase {
            Phase::UserScrolling { .. } => {}
            Phase::Navigating(target) => {
                let Some(target) = self.clamp_target(target) else {
                    return;
                };
                self.realign(target, now);
            }
            Phase::Idle => {
                if self.metrics.is_attached() {
                    let target = self.resting_target();
                    self.realign(target, now);
                }
            }
        }
    }

    fn navigate(&mut self, target: NavTarget, now: Instant) -> usize {
        if let Some(previous) = self.target()
            && previous != target
        {
            debug!(?previous, ?target, "navigation superseded");
        }
        self.active = Some(target.page);
        self.anchor = target.item;
        self.phase = Phase::Navigating(target);
        self.busy.begin();

        let offset = self.metrics.offset_for_item(target.item);
        let behavior = if self.args.reduced_motion {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        };
        debug!(page = target.page, item = target.item, offset, ?behavior, "navigate");
        self.metrics.scroll_to(offset, behavior);
        self.settle.record(now);
        target.page
    }

    /// Jumps to `target` without animation and settles right away.
    fn realign(&mut self, target: NavTarget, now: Instant) {
        self.active = Some(target.page);
        self.anchor = target.item;
        self.phase = Phase::Navigating(target);
        self.busy.begin();

        let offset = self.metrics.offset_for_item(target.item);
        if (self.metrics.current_offset() - offset).abs() > SNAP_TOLERANCE {
            self.metrics.scroll_to(offset, ScrollBehavior::Instant);
        }
        self.settle.record(now);
        self.settle_now();
    }

    fn settle_now(&mut self) {
        let resolved = match self.phase {
            Phase::Idle => return,
            Phase::Navigating(target) => self.resolve_navigation(target),
            Phase::UserScrolling { .. } => self.resolve_nearest(),
        };
        match resolved {
            Ok(target) => {
                self.active = Some(target.page);
                self.anchor = target.item;
                self.phase = Phase::Idle;
                self.settle.reset();
                self.busy.settle();
            }
            Err(err) => debug!(%err, "settle deferred"),
        }
    }

    fn resolve_navigation(&self, target: NavTarget) -> Result<NavTarget, MeasureError> {
        let viewport = self.metrics.measure()?;
        let expected = self.metrics.offset_for_item(target.item);
        if (viewport.offset - expected).abs() <= SNAP_TOLERANCE {
            debug!(page = target.page, "navigation settled");
            return Ok(target);
        }
        let measured = self.resolve_nearest()?;
        debug!(
            target = target.page,
            measured = measured.page,
            offset = viewport.offset,
            "navigation settled elsewhere, correcting"
        );
        Ok(measured)
    }

    fn resolve_nearest(&self) -> Result<NavTarget, MeasureError> {
        let pages = self.partitioner.pages();
        match self.args.scroll_by {
            ScrollBy::Page => {
                let page = self.metrics.nearest_page(pages)?;
                Ok(self.page_target(page))
            }
            ScrollBy::Item => {
                let item = self.metrics.nearest_item(self.item_count)?;
                self.item_target(item).ok_or(MeasureError::ZeroExtent)
            }
        }
    }

    fn current_page(&self) -> usize {
        self.active.unwrap_or_else(|| self.initial_page())
    }

    fn initial_page(&self) -> usize {
        self.args
            .initial_page
            .min(self.pages().len().saturating_sub(1))
    }

    fn resting_target(&self) -> NavTarget {
        match self.args.scroll_by {
            ScrollBy::Item if self.active.is_some() => self
                .item_target(self.anchor)
                .unwrap_or_else(|| self.page_target(self.current_page())),
            _ => self.page_target(self.current_page()),
        }
    }

    fn page_target(&self, page: usize) -> NavTarget {
        let item = self.pages().get(page).map_or(0, |page| page.first_item());
        NavTarget { page, item }
    }

    fn item_target(&self, item: usize) -> Option<NavTarget> {
        let page = self.pages().page_of_item(item)?;
        Some(NavTarget { page, item })
    }

    fn clamp_target(&self, target: NavTarget) -> Option<NavTarget> {
        match self.args.scroll_by {
            ScrollBy::Page => {
                let page = target.page.min(self.pages().last_index()?);
                Some(self.page_target(page))
            }
            ScrollBy::Item => self.item_target(target.item.min(self.item_count.checked_sub(1)?)),
        }
    }
}

fn step_forward(current: usize, len: usize, looping: bool) -> Option<usize> {
    if current + 1 < len {
        Some(current + 1)
    } else if looping && len > 1 {
        Some(0)
    } else {
        None
    }
}

fn step_back(current: usize, len: usize, looping: bool) -> Option<usize> {
    if current > 0 {
        Some(current - 1)
    } else if looping && len > 1 {
        Some(len - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::SimulatedScroller;

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn mounted(
        args: CarouselArgs,
        item_count: usize,
        now: Instant,
    ) -> Synchronizer<SimulatedScroller> {
        let args = args.sanitized();
        let host = SimulatedScroller::new(&args, item_count, 100.0);
        let mut sync = Synchronizer::new(args, item_count);
        sync.attach(host, now);
        sync
    }

    fn host(sync: &mut Synchronizer<SimulatedScroller>) -> &mut SimulatedScroller {
        sync.host_mut().unwrap()
    }

    #[test]
    fn attach_measures_the_initial_page() {
        let start = Instant::now();
        let args = CarouselArgs::default().initial_page(2);
        let sync = mounted(args, 4, start);
        assert_eq!(sync.active_page(), Some(2));
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert!(!sync.busy().is_busy());
        assert_eq!(
            sync.metrics().host().unwrap().commands(),
            &[(200.0, ScrollBehavior::Instant)]
        );
    }

    #[test]
    fn detached_synchronizer_has_no_active_page() {
        let sync = Synchronizer::<SimulatedScroller>::new(CarouselArgs::default(), 3);
        assert_eq!(sync.active_page(), None);
        assert_eq!(sync.pages().len(), 3);
    }

    #[test]
    fn commands_before_attach_are_applied_on_attach() {
        let start = Instant::now();
        let args = CarouselArgs::default();
        let mut sync = Synchronizer::new(args.clone(), 4);
        assert_eq!(sync.next(start), Some(1));
        assert_eq!(sync.phase(), SyncPhase::Navigating);

        sync.attach(SimulatedScroller::new(&args, 4, 100.0), ms(start, 10));
        assert_eq!(sync.active_page(), Some(1));
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert_eq!(sync.metrics().current_offset(), 100.0);
    }

    #[test]
    fn navigation_is_optimistic_then_confirmed() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 4, start);

        assert_eq!(sync.scroll_to_page(3, start), Some(3));
        assert_eq!(sync.active_page(), Some(3));
        assert_eq!(sync.phase(), SyncPhase::Navigating);
        assert!(sync.busy().is_busy());
        assert_eq!(host(&mut sync).pending(), Some(300.0));

        host(&mut sync).finish_animation();
        sync.on_scroll(ms(start, 50));
        assert!(!sync.tick(ms(start, 100)));
        assert!(sync.tick(ms(start, 170)));
        assert_eq!(sync.active_page(), Some(3));
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert!(!sync.busy().is_busy());
    }

    #[test]
    fn settle_elsewhere_corrects_the_target() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 5, start);
        sync.scroll_to_page(4, start);
        host(&mut sync).interrupt(190.0);
        sync.on_scroll(ms(start, 20));
        sync.tick(ms(start, 200));
        assert_eq!(sync.active_page(), Some(2));
        assert_eq!(sync.phase(), SyncPhase::Idle);
    }

    #[test]
    fn newer_command_supersedes_target() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 5, start);
        sync.scroll_to_page(4, start);
        sync.scroll_to_page(1, ms(start, 10));
        assert_eq!(sync.target(), Some(NavTarget { page: 1, item: 1 }));
        assert_eq!(host(&mut sync).pending(), Some(100.0));

        host(&mut sync).finish_animation();
        sync.on_scroll_end(ms(start, 60));
        assert_eq!(sync.active_page(), Some(1));
    }

    #[test]
    fn scroll_to_active_page_is_a_no_op() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 3, start);
        let commands = host(&mut sync).commands().len();
        assert_eq!(sync.scroll_to_page(0, start), Some(0));
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert_eq!(host(&mut sync).commands().len(), commands);
    }

    #[test]
    fn clamps_without_loop_and_wraps_with_loop() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 3, start);
        assert_eq!(sync.prev(start), None);
        assert_eq!(sync.active_page(), Some(0));
        assert_eq!(sync.scroll_to_page(10, start), Some(2));
        assert_eq!(sync.next(start), None);
        assert_eq!(sync.active_page(), Some(2));

        let mut looping = mounted(CarouselArgs::default().looping(true), 3, start);
        assert_eq!(looping.prev(start), Some(2));
        assert_eq!(looping.next(start), Some(0));
        assert_eq!(looping.scroll_to_page(4, start), Some(1));
    }

    #[test]
    fn empty_collection_ignores_commands() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 0, start);
        assert_eq!(sync.next(start), None);
        assert_eq!(sync.prev(start), None);
        assert_eq!(sync.scroll_to_page(0, start), None);
        assert_eq!(sync.scroll_to_item(0, start), None);
        assert_eq!(sync.active_page(), None);
        assert!(!sync.busy().is_busy());
    }

    #[test]
    fn user_scroll_settles_on_nearest_page() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 4, start);
        host(&mut sync).set_offset(140.0);
        sync.on_scroll(start);
        assert_eq!(sync.phase(), SyncPhase::UserScrolling);
        assert_eq!(sync.scroll_estimate(), Some(1));
        assert!(sync.busy().is_busy());
        assert_eq!(sync.active_page(), Some(0));

        host(&mut sync).set_offset(260.0);
        sync.on_scroll(ms(start, 80));
        assert_eq!(sync.scroll_estimate(), Some(3));
        assert!(!sync.tick(ms(start, 150)));
        assert!(sync.tick(ms(start, 200)));
        assert_eq!(sync.active_page(), Some(3));
        assert!(!sync.busy().is_busy());
    }

    #[test]
    fn item_mode_moves_one_item_at_a_time() {
        let start = Instant::now();
        let args = CarouselArgs::default()
            .items_per_page(2.0)
            .scroll_by(ScrollBy::Item);
        let mut sync = mounted(args, 5, start);
        assert_eq!(sync.next(start), Some(0));
        assert_eq!(sync.anchor_item(), 1);
        assert_eq!(host(&mut sync).pending(), Some(50.0));
        assert_eq!(sync.next(start), Some(1));
        assert_eq!(sync.anchor_item(), 2);

        assert_eq!(sync.scroll_to_item(4, start), Some(2));
        host(&mut sync).finish_animation();
        sync.on_scroll_end(start);
        assert_eq!(sync.active_page(), Some(2));
        assert_eq!(sync.anchor_item(), 4);
        assert_eq!(sync.next(start), None);
        assert_eq!(sync.prev(start), Some(1));
    }

    #[test]
    fn clamped_last_page_is_accepted_on_settle() {
        let start = Instant::now();
        let args = CarouselArgs::default().items_per_page(2.0);
        let mut sync = mounted(args, 5, start);
        sync.scroll_to_page(2, start);
        host(&mut sync).finish_animation();
        sync.on_scroll_end(start);
        assert_eq!(sync.active_page(), Some(2));
        assert_eq!(sync.metrics().current_offset(), 150.0);
    }

    #[test]
    fn reduced_motion_scrolls_instantly() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default().reduced_motion(true), 3, start);
        sync.next(start);
        assert_eq!(
            host(&mut sync).commands().last(),
            Some(&(100.0, ScrollBehavior::Instant))
        );
        assert_eq!(sync.metrics().current_offset(), 100.0);
    }

    #[test]
    fn drag_suppresses_settle_until_release() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 3, start);
        sync.begin_drag(start);
        sync.drag_by(70.0, ms(start, 10));
        assert!(!sync.tick(ms(start, 500)));
        assert_eq!(sync.phase(), SyncPhase::UserScrolling);

        sync.end_drag(ms(start, 510));
        assert!(sync.tick(ms(start, 700)));
        assert_eq!(sync.active_page(), Some(1));
    }

    #[test]
    fn shrinking_collection_clamps_active_page() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default(), 5, start);
        sync.scroll_to_page(4, start);
        host(&mut sync).finish_animation();
        sync.on_scroll_end(start);

        host(&mut sync).set_item_count(2);
        sync.set_item_count(2, ms(start, 10));
        assert_eq!(sync.pages().len(), 2);
        assert_eq!(sync.active_page(), Some(1));
        assert_eq!(sync.phase(), SyncPhase::Idle);

        sync.set_item_count(0, ms(start, 20));
        assert_eq!(sync.active_page(), None);
    }

    #[test]
    fn items_arriving_after_attach_activate_the_initial_page() {
        let start = Instant::now();
        let mut sync = mounted(CarouselArgs::default().initial_page(1), 0, start);
        assert_eq!(sync.active_page(), None);

        host(&mut sync).set_item_count(3);
        sync.set_item_count(3, ms(start, 10));
        assert_eq!(sync.active_page(), Some(1));
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert!(!sync.busy().is_busy());
        assert_eq!(host(&mut sync).offset(), 100.0);
    }

    #[test]
    fn resize_while_navigating_aligns_instantly() {
        let start = Instant::now();
        let args = CarouselArgs::default().initial_page(2);
        let mut sync = Synchronizer::new(args.clone(), 4);
        sync.attach(SimulatedScroller::new(&args, 4, 0.0), start);
        assert_eq!(sync.phase(), SyncPhase::Navigating);

        host(&mut sync).resize(&args, 100.0);
        sync.on_resize(ms(start, 10));
        assert_eq!(
            host(&mut sync).commands(),
            &[(200.0, ScrollBehavior::Instant)]
        );
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert_eq!(sync.active_page(), Some(2));
    }

    #[test]
    fn resize_during_smooth_scroll_jumps_to_the_target() {
        let start = Instant::now();
        let args = CarouselArgs::default();
        let mut sync = mounted(args.clone(), 4, start);
        sync.scroll_to_page(3, start);
        assert_eq!(host(&mut sync).pending(), Some(300.0));

        host(&mut sync).resize(&args, 50.0);
        sync.on_resize(ms(start, 20));
        assert_eq!(
            host(&mut sync).commands().last(),
            Some(&(150.0, ScrollBehavior::Instant))
        );
        assert_eq!(host(&mut sync).pending(), None);
        assert_eq!(sync.active_page(), Some(3));
        assert_eq!(sync.phase(), SyncPhase::Idle);
    }

    #[test]
    fn scroll_to_page_realigns_an_offset_anchor_in_item_mode() {
        let start = Instant::now();
        let args = CarouselArgs::default()
            .items_per_page(2.0)
            .scroll_by(ScrollBy::Item);
        let mut sync = mounted(args, 6, start);
        sync.next(start);
        host(&mut sync).finish_animation();
        sync.on_scroll_end(ms(start, 10));
        assert_eq!(sync.anchor_item(), 1);
        assert_eq!(sync.active_page(), Some(0));

        assert_eq!(sync.scroll_to_page(0, ms(start, 20)), Some(0));
        assert_eq!(sync.phase(), SyncPhase::Navigating);
        host(&mut sync).finish_animation();
        sync.on_scroll_end(ms(start, 30));
        assert_eq!(sync.anchor_item(), 0);
        assert_eq!(host(&mut sync).offset(), 0.0);
    }

    #[test]
    fn zero_extent_defers_settle() {
        let start = Instant::now();
        let args = CarouselArgs::default();
        let mut sync = Synchronizer::new(args.clone(), 3);
        sync.attach(SimulatedScroller::new(&args, 3, 0.0), start);
        assert_eq!(sync.active_page(), Some(0));
        assert_eq!(sync.phase(), SyncPhase::Navigating);
        assert!(sync.busy().is_busy());

        host(&mut sync).resize(&args, 100.0);
        sync.on_resize(ms(start, 10));
        host(&mut sync).finish_animation();
        sync.tick(ms(start, 200));
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert_eq!(sync.active_page(), Some(0));
    }
}
