//! Busy flag for the scroller's live region.
//!
//! ## Usage
//!
//! Read [`LiveRegion`] from the carousel snapshot when building the
//! scroller's accessibility node, so assistive technologies stay quiet while
//! the content is moving.
use accesskit::Live;

/// Live-region metadata for the item scroller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveRegion {
    /// Politeness of announcements.
    pub live: Live,
    /// Whether the region is announced as a whole.
    pub atomic: bool,
    /// Whether the region content is mid-update.
    pub busy: bool,
}

/// Tracks whether the scroller is moving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyGuard {
    busy: bool,
}

impl BusyGuard {
    /// Creates an idle guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a scroll is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Marks the start of scroll motion. Returns `true` if the flag changed.
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.busy, true)
    }

    /// Marks the scroll as settled. Returns `true` if the flag changed.
    pub fn settle(&mut self) -> bool {
        std::mem::replace(&mut self.busy, false)
    }

    /// Live-region metadata reflecting the current flag.
    pub fn live_region(&self) -> LiveRegion {
        LiveRegion {
            live: Live::Polite,
            atomic: true,
            busy: self.busy,
        }
    }
}
