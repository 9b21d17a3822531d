//! Headless, accessible carousel paging for scroll containers.
//!
//! `tessera-carousel` keeps a paged view of a scrollable strip of items in
//! agreement with the scroll position of a platform container. It owns no
//! rendering: the host implements [`ScrollHost`], forwards its events, and
//! renders from a [`CarouselSnapshot`].
//!
//! # Usage
//!
//! ```
//! use std::time::Instant;
//!
//! use tessera_carousel::{Carousel, CarouselArgs, Orientation, ScrollBehavior, ScrollHost};
//!
//! struct Strip {
//!     offset: f32,
//! }
//!
//! impl ScrollHost for Strip {
//!     fn scroll_offset(&self, _axis: Orientation) -> f32 {
//!         self.offset
//!     }
//!
//!     fn viewport_extent(&self, _axis: Orientation) -> f32 {
//!         100.0
//!     }
//!
//!     fn scroll_extent(&self, _axis: Orientation) -> f32 {
//!         300.0
//!     }
//!
//!     fn scroll_to(&mut self, offset: f32, _axis: Orientation, _behavior: ScrollBehavior) {
//!         self.offset = offset;
//!     }
//! }
//!
//! let now = Instant::now();
//! let mut carousel = Carousel::new(CarouselArgs::default(), 3);
//! carousel.attach(Strip { offset: 0.0 }, now);
//!
//! assert_eq!(carousel.next(now), Some(1));
//! carousel.on_scroll_end(now);
//!
//! let snapshot = carousel.snapshot();
//! assert_eq!(snapshot.active_page_index, Some(1));
//! assert!(!snapshot.busy);
//! ```
//!
//! # Time
//!
//! Nothing in this crate reads the clock. Every operation that depends on
//! time takes `now`, and [`Carousel::tick`] must be called from the host's
//! frame loop or a timer so settle detection and autoplay make progress.
#![deny(missing_docs, clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod autoplay;
pub mod busy;
pub mod carousel;
pub mod config;
pub mod drag;
pub mod handle;
pub mod keyboard;
pub mod metrics;
pub mod partition;
pub mod sync;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use autoplay::{Autoplay, Interaction};
pub use busy::{BusyGuard, LiveRegion};
pub use carousel::{Carousel, CarouselSnapshot, SubscriptionId};
pub use config::{CarouselArgs, ConfigError, Length, Orientation, ScrollBy};
pub use drag::{MouseDrag, PointerPosition};
pub use handle::CarouselHandle;
pub use keyboard::{FocusContext, KeyCommand, KeyOutcome, NavKey, key_command};
pub use metrics::{
    ItemGeometry, MeasureError, SNAP_TOLERANCE, ScrollBehavior, ScrollHost, ScrollMetrics,
    SettleDetector, Viewport,
};
pub use partition::{Page, PagePartitioner, Pages, partition};
pub use sync::{NavTarget, SyncPhase, Synchronizer};
