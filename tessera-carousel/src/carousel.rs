//! The carousel facade: paging state, interaction controllers and change
//! notification behind one type.
//!
//! ## Usage
//!
//! Create a [`Carousel`] on mount, attach the platform scroll container, and
//! forward scroll, pointer, keyboard, focus and timer events to it. Read the
//! state through [`Carousel::snapshot`] or [`Carousel::subscribe`].
use std::time::Instant;

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    autoplay::{Autoplay, Interaction},
    busy::LiveRegion,
    config::{CarouselArgs, Orientation, ScrollBy},
    drag::{MouseDrag, PointerPosition},
    keyboard::{FocusContext, KeyCommand, KeyOutcome, NavKey, key_command},
    metrics::ScrollHost,
    partition::Pages,
    sync::{SyncPhase, Synchronizer},
};

/// Read-only view of the carousel state for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselSnapshot {
    /// Current pages.
    pub pages: Pages,
    /// Active page; `None` before the first measurement or with no pages.
    pub active_page_index: Option<usize>,
    /// Visible items per page.
    pub items_per_page: f32,
    /// Scroll axis.
    pub orientation: Orientation,
    /// Navigation granularity.
    pub scroll_by: ScrollBy,
    /// Whether navigation wraps.
    pub looping: bool,
    /// A scroll is in flight.
    pub busy: bool,
    /// Synchronizer phase.
    pub phase: SyncPhase,
    /// Whether a previous-page control should be enabled.
    pub can_go_prev: bool,
    /// Whether a next-page control should be enabled.
    pub can_go_next: bool,
    /// Live-region metadata for the scroller.
    pub live_region: LiveRegion,
}

impl CarouselSnapshot {
    /// Whether `item` is on the active page. Items elsewhere should be hidden
    /// from assistive technologies.
    pub fn is_item_in_active_page(&self, item: usize) -> bool {
        self.active_page_index
            .and_then(|page| self.pages.get(page))
            .is_some_and(|page| page.contains(item))
    }

    /// Page that owns `item`.
    pub fn page_of_item(&self, item: usize) -> Option<usize> {
        self.pages.page_of_item(item)
    }
}

/// Identifies a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&CarouselSnapshot) + Send + Sync>;

/// An accessible, paged scroll view.
///
/// Every state change is published once to subscribers after the operation
/// that caused it completes, so `busy` and the active page always change
/// together.
pub struct Carousel<H> {
    sync: Synchronizer<H>,
    autoplay: Autoplay,
    drag: MouseDrag,
    listeners: SmallVec<[(SubscriptionId, Listener); 2]>,
    next_subscription: u64,
    published: CarouselSnapshot,
}

impl<H> std::fmt::Debug for Carousel<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("snapshot", &self.published)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<H: ScrollHost> Carousel<H> {
    /// Creates a carousel over `item_count` items. Invalid arguments are
    /// replaced with defaults.
    pub fn new(args: CarouselArgs, item_count: usize) -> Self {
        let args = args.sanitized();
        let autoplay = Autoplay::new(args.autoplay_interval, args.reduced_motion);
        let drag = MouseDrag::new(args.mouse_dragging);
        let sync = Synchronizer::new(args, item_count);
        let published = snapshot_of(&sync);
        Self {
            sync,
            autoplay,
            drag,
            listeners: SmallVec::new(),
            next_subscription: 0,
            published,
        }
    }

    /// Mounts the carousel on `host`.
    pub fn attach(&mut self, host: H, now: Instant) {
        self.sync.attach(host, now);
        if self.sync.args().autoplay {
            self.autoplay.set_enabled(true, now);
        }
        debug!(pages = self.sync.pages().len(), "carousel attached");
        self.publish();
    }

    /// Tears the carousel down: clears autoplay, drops listeners and returns
    /// the host.
    pub fn unmount(&mut self) -> Option<H> {
        self.autoplay.clear();
        self.drag.release();
        let host = self.sync.detach();
        self.publish();
        self.listeners.clear();
        debug!("carousel unmounted");
        host
    }

    /// Current state.
    pub fn snapshot(&self) -> CarouselSnapshot {
        snapshot_of(&self.sync)
    }

    /// Effective configuration.
    pub fn args(&self) -> &CarouselArgs {
        self.sync.args()
    }

    /// The paging state machine.
    pub fn synchronizer(&self) -> &Synchronizer<H> {
        &self.sync
    }

    /// The autoplay timer.
    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// Shared access to the attached host.
    pub fn host(&self) -> Option<&H> {
        self.sync.metrics().host()
    }

    /// Mutable access to the attached host.
    ///
    /// Scroll position changes made here are only noticed through
    /// [`on_scroll`](Self::on_scroll).
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.sync.host_mut()
    }

    /// Registers a listener called with every changed snapshot.
    ///
    /// Listeners run while the carousel is borrowed and must not call back
    /// into it.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&CarouselSnapshot) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `true` if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Goes to the next page. Returns the resulting page.
    pub fn next(&mut self, now: Instant) -> Option<usize> {
        let page = self.sync.next(now);
        self.publish();
        page
    }

    /// Goes to the previous page. Returns the resulting page.
    pub fn prev(&mut self, now: Instant) -> Option<usize> {
        let page = self.sync.prev(now);
        self.publish();
        page
    }

    /// Goes to `page`. Returns the resulting page.
    pub fn scroll_to_page(&mut self, page: usize, now: Instant) -> Option<usize> {
        let page = self.sync.scroll_to_page(page, now);
        self.publish();
        page
    }

    /// Brings `item` into view. Returns the resulting page.
    pub fn scroll_to_item(&mut self, item: usize, now: Instant) -> Option<usize> {
        let page = self.sync.scroll_to_item(item, now);
        self.publish();
        page
    }

    /// The host scrolled.
    pub fn on_scroll(&mut self, now: Instant) {
        self.sync.on_scroll(now);
        self.publish();
    }

    /// The host reported the end of scrolling.
    pub fn on_scroll_end(&mut self, now: Instant) {
        self.sync.on_scroll_end(now);
        self.publish();
    }

    /// The host resized or re-laid out its content.
    pub fn on_resize(&mut self, now: Instant) {
        self.sync.on_resize(now);
        self.publish();
    }

    /// Drives settle detection and autoplay. Call on every frame or timer
    /// wake-up.
    pub fn tick(&mut self, now: Instant) {
        self.sync.tick(now);
        if self.autoplay.poll(now) {
            let page = self.sync.next(now);
            debug!(?page, "autoplay advanced");
        }
        self.publish();
    }

    /// Changes the number of items.
    pub fn set_item_count(&mut self, item_count: usize, now: Instant) {
        self.sync.set_item_count(item_count, now);
        self.publish();
    }

    /// Changes the number of visible items per page.
    pub fn set_items_per_page(&mut self, items_per_page: f32, now: Instant) {
        self.sync.set_items_per_page(items_per_page, now);
        self.publish();
    }

    /// Switches autoplay on or off. Enabling twice does nothing.
    pub fn set_autoplay(&mut self, enabled: bool, now: Instant) {
        self.autoplay.set_enabled(enabled, now);
    }

    /// Handles a key press on the scroller or the tab list.
    pub fn handle_key(&mut self, key: NavKey, focus: FocusContext, now: Instant) -> KeyOutcome {
        let Some(command) = key_command(key, self.sync.args().orientation) else {
            return KeyOutcome::ignored();
        };
        let page = match command {
            KeyCommand::Prev => self.sync.prev(now),
            KeyCommand::Next => self.sync.next(now),
            KeyCommand::First => self.sync.scroll_to_page(0, now),
            KeyCommand::Last => match self.sync.pages().last_index() {
                Some(last) => self.sync.scroll_to_page(last, now),
                None => None,
            },
        };
        self.publish();
        KeyOutcome::handled(page, focus)
    }

    /// A pointer button went down on the carousel root.
    pub fn pointer_down(&mut self, position: PointerPosition, now: Instant) {
        self.autoplay.begin_interaction(Interaction::Press, now);
        if self.drag.press(position) {
            self.sync.begin_drag(now);
            self.publish();
        }
    }

    /// The pointer moved.
    pub fn pointer_move(&mut self, position: PointerPosition, now: Instant) {
        let axis = self.sync.args().orientation;
        if let Some(delta) = self.drag.move_to(position, axis) {
            self.sync.drag_by(delta, now);
            self.publish();
        }
    }

    /// The pointer button was released.
    pub fn pointer_up(&mut self, now: Instant) {
        if self.drag.release() {
            self.sync.end_drag(now);
        }
        self.autoplay.end_interaction(Interaction::Press, now);
        self.publish();
    }

    /// The pointer entered the carousel root.
    pub fn pointer_enter(&mut self, now: Instant) {
        self.autoplay.begin_interaction(Interaction::Hover, now);
    }

    /// The pointer left the carousel root.
    pub fn pointer_leave(&mut self, now: Instant) {
        self.autoplay.end_interaction(Interaction::Hover, now);
    }

    /// Focus moved into the carousel root.
    pub fn focus_in(&mut self, now: Instant) {
        self.autoplay.begin_interaction(Interaction::Focus, now);
    }

    /// Focus left the carousel root.
    pub fn focus_out(&mut self, now: Instant) {
        self.autoplay.end_interaction(Interaction::Focus, now);
    }

    fn publish(&mut self) {
        let snapshot = snapshot_of(&self.sync);
        if snapshot == self.published {
            return;
        }
        for (_, listener) in &self.listeners {
            listener(&snapshot);
        }
        self.published = snapshot;
    }
}

fn snapshot_of<H: ScrollHost>(sync: &Synchronizer<H>) -> CarouselSnapshot {
    let args = sync.args();
    CarouselSnapshot {
        pages: sync.pages().clone(),
        active_page_index: sync.active_page(),
        items_per_page: args.items_per_page,
        orientation: args.orientation,
        scroll_by: args.scroll_by,
        looping: args.looping,
        busy: sync.busy().is_busy(),
        phase: sync.phase(),
        can_go_prev: sync.can_go_prev(),
        can_go_next: sync.can_go_next(),
        live_region: sync.busy().live_region(),
    }
}
