//! Carousel configuration.
//!
//! ## Usage
//!
//! Build a [`CarouselArgs`] with its setters and hand it to
//! [`Carousel::new`](crate::Carousel::new).
use std::time::Duration;

use derive_setters::Setters;
use thiserror::Error;
use tracing::warn;

const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);
const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(120);

/// Scroll axis of the carousel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items are laid out left to right and scroll horizontally.
    #[default]
    Horizontal,
    /// Items are laid out top to bottom and scroll vertically.
    Vertical,
}

/// Granularity of `next`/`prev` navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBy {
    /// Advance by a whole page.
    #[default]
    Page,
    /// Advance by a single item.
    Item,
}

/// A length along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Absolute length in pixels.
    Px(f32),
    /// Percentage of the viewport extent along the scroll axis.
    Percent(f32),
}

impl Default for Length {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl Length {
    /// A zero length.
    pub const ZERO: Self = Self::Px(0.0);

    /// Resolves this length against the viewport extent.
    pub fn resolve(self, viewport: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(percent) => viewport * percent / 100.0,
        }
    }

    /// Parses a CSS-like length such as `12px`, `15%` or `0`.
    ///
    /// ```
    /// use tessera_carousel::Length;
    ///
    /// assert_eq!(Length::parse("12px").unwrap(), Length::Px(12.0));
    /// assert_eq!(Length::parse("15%").unwrap(), Length::Percent(15.0));
    /// assert!(Length::parse("1em").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let trimmed = input.trim();
        let invalid = || ConfigError::InvalidLength(input.to_string());
        let (number, unit): (&str, fn(f32) -> Length) =
            if let Some(number) = trimmed.strip_suffix("px") {
                (number, Length::Px)
            } else if let Some(number) = trimmed.strip_suffix('%') {
                (number, Length::Percent)
            } else {
                (trimmed, Length::Px)
            };
        let value: f32 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(unit(value))
    }

    fn value(self) -> f32 {
        match self {
            Self::Px(v) | Self::Percent(v) => v,
        }
    }

    fn is_valid(self) -> bool {
        let value = self.value();
        value.is_finite() && value >= 0.0
    }
}

/// Errors reported by [`CarouselArgs::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// `items_per_page` must be a finite number greater than zero.
    #[error("items per page must be a positive finite number, got {0}")]
    InvalidItemsPerPage(f32),
    /// The autoplay interval must not be zero.
    #[error("autoplay interval must be greater than zero")]
    ZeroAutoplayInterval,
    /// A length was negative, non-finite or could not be parsed.
    #[error("invalid length `{0}`")]
    InvalidLength(String),
}

/// Configuration arguments for a carousel.
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct CarouselArgs {
    /// Number of items visible in one page; may be fractional.
    pub items_per_page: f32,
    /// Whether navigation past either end wraps to the opposite end.
    pub looping: bool,
    /// Scroll axis.
    pub orientation: Orientation,
    /// Whether `next`/`prev` move by page or by item.
    pub scroll_by: ScrollBy,
    /// Gap between adjacent items.
    pub space_between_items: Length,
    /// Padding applied to the scroll area so neighbours peek in.
    #[setters(strip_option)]
    pub scroll_padding: Option<Length>,
    /// Enables click-and-drag scrolling with a mouse.
    pub mouse_dragging: bool,
    /// Starts the autoplay timer on mount.
    pub autoplay: bool,
    /// Delay between autoplay advances.
    pub autoplay_interval: Duration,
    /// Page aligned on first attach.
    pub initial_page: usize,
    /// Quiet period after the last scroll event before the scroll is settled.
    pub settle_delay: Duration,
    /// The user prefers reduced motion. Read once at mount.
    pub reduced_motion: bool,
}

impl Default for CarouselArgs {
    fn default() -> Self {
        Self {
            items_per_page: 1.0,
            looping: false,
            orientation: Orientation::default(),
            scroll_by: ScrollBy::default(),
            space_between_items: Length::ZERO,
            scroll_padding: None,
            mouse_dragging: false,
            autoplay: false,
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            initial_page: 0,
            settle_delay: DEFAULT_SETTLE_DELAY,
            reduced_motion: false,
        }
    }
}

impl CarouselArgs {
    /// Checks the configuration, reporting the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.items_per_page.is_finite() && self.items_per_page > 0.0) {
            return Err(ConfigError::InvalidItemsPerPage(self.items_per_page));
        }
        if self.autoplay_interval.is_zero() {
            return Err(ConfigError::ZeroAutoplayInterval);
        }
        for length in [Some(self.space_between_items), self.scroll_padding]
            .into_iter()
            .flatten()
        {
            if !length.is_valid() {
                return Err(ConfigError::InvalidLength(format!("{length:?}")));
            }
        }
        Ok(())
    }

    /// Returns a copy with every invalid value replaced by its default.
    pub fn sanitized(mut self) -> Self {
        if !(self.items_per_page.is_finite() && self.items_per_page > 0.0) {
            warn!(
                items_per_page = self.items_per_page,
                "invalid items per page, falling back to 1"
            );
            self.items_per_page = 1.0;
        }
        if self.autoplay_interval.is_zero() {
            warn!("zero autoplay interval, falling back to the default");
            self.autoplay_interval = DEFAULT_AUTOPLAY_INTERVAL;
        }
        if !self.space_between_items.is_valid() {
            warn!(length = ?self.space_between_items, "invalid item spacing, using 0");
            self.space_between_items = Length::ZERO;
        }
        if let Some(padding) = self.scroll_padding
            && !padding.is_valid()
        {
            warn!(length = ?padding, "invalid scroll padding, ignoring it");
            self.scroll_padding = None;
        }
        self
    }
}

/// Integer number of items that belong to one page.
pub(crate) fn whole_items(items_per_page: f32) -> usize {
    if items_per_page.is_finite() && items_per_page >= 1.0 {
        items_per_page.floor() as usize
    } else {
        1
    }
}
