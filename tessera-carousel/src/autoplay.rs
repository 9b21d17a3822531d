//! Timed advancing of the carousel.
//!
//! ## Usage
//!
//! Enable with [`CarouselArgs::autoplay`](crate::CarouselArgs) or toggle at
//! runtime with [`Carousel::set_autoplay`](crate::Carousel::set_autoplay). The
//! timer pauses while the user hovers, presses or focuses the carousel.
use std::time::{Duration, Instant};

use tracing::debug;

/// A kind of user interaction that pauses autoplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// The pointer is over the carousel root.
    Hover,
    /// A pointer button is held on the carousel root.
    Press,
    /// Keyboard focus is inside the carousel root.
    Focus,
}

/// Repeating autoplay timer.
#[derive(Clone, Debug)]
pub struct Autoplay {
    interval: Duration,
    reduced_motion: bool,
    enabled: bool,
    hover: bool,
    press: bool,
    focus: bool,
    deadline: Option<Instant>,
}

impl Autoplay {
    /// Creates a disabled timer. With `reduced_motion` the timer never runs.
    pub fn new(interval: Duration, reduced_motion: bool) -> Self {
        Self {
            interval,
            reduced_motion,
            enabled: false,
            hover: false,
            press: false,
            focus: false,
            deadline: None,
        }
    }

    /// Whether autoplay is switched on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a user interaction is holding the timer.
    pub fn is_paused(&self) -> bool {
        self.hover || self.press || self.focus
    }

    /// Whether the timer is counting down.
    pub fn is_running(&self) -> bool {
        self.enabled && !self.reduced_motion && !self.is_paused()
    }

    /// Next time the timer fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Switches autoplay on or off. Returns `true` if the setting changed.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.update(now, |autoplay| autoplay.enabled = enabled);
        true
    }

    /// Pauses for an interaction.
    pub fn begin_interaction(&mut self, interaction: Interaction, now: Instant) {
        self.update(now, |autoplay| *autoplay.flag(interaction) = true);
    }

    /// Ends an interaction; resumes with a full interval once nothing holds
    /// the timer.
    pub fn end_interaction(&mut self, interaction: Interaction, now: Instant) {
        self.update(now, |autoplay| *autoplay.flag(interaction) = false);
    }

    /// Returns `true` when the timer fires at `now`, then re-arms it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Stops the timer and forgets interactions.
    pub fn clear(&mut self) {
        self.enabled = false;
        self.hover = false;
        self.press = false;
        self.focus = false;
        self.deadline = None;
    }

    fn flag(&mut self, interaction: Interaction) -> &mut bool {
        match interaction {
            Interaction::Hover => &mut self.hover,
            Interaction::Press => &mut self.press,
            Interaction::Focus => &mut self.focus,
        }
    }

    fn update(&mut self, now: Instant, change: impl FnOnce(&mut Self)) {
        let was_running = self.is_running();
        change(self);
        let running = self.is_running();
        if running != was_running {
            self.deadline = running.then(|| now + self.interval);
            debug!(running, "autoplay state changed");
        }
    }
}
