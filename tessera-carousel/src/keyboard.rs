//! Keyboard navigation for the scroller and its tab list.
//!
//! ## Usage
//!
//! Translate the platform key event into a [`NavKey`] and pass it to
//! [`Carousel::handle_key`](crate::Carousel::handle_key). Only prevent the
//! platform's default action when [`KeyOutcome::handled`] is `true`.
use crate::config::Orientation;

/// Keys the carousel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
}

impl NavKey {
    /// Parses a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Self> {
        Some(match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => return None,
        })
    }
}

/// Navigation requested by a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Go to the previous page.
    Prev,
    /// Go to the next page.
    Next,
    /// Go to the first page.
    First,
    /// Go to the last page.
    Last,
}

/// Maps a key to a command for the given orientation.
///
/// Arrows along the other axis return `None` so the platform keeps its
/// default behaviour for them.
pub fn key_command(key: NavKey, orientation: Orientation) -> Option<KeyCommand> {
    match (key, orientation) {
        (NavKey::ArrowLeft, Orientation::Horizontal) | (NavKey::ArrowUp, Orientation::Vertical) => {
            Some(KeyCommand::Prev)
        }
        (NavKey::ArrowRight, Orientation::Horizontal)
        | (NavKey::ArrowDown, Orientation::Vertical) => Some(KeyCommand::Next),
        (NavKey::Home, _) => Some(KeyCommand::First),
        (NavKey::End, _) => Some(KeyCommand::Last),
        _ => None,
    }
}

/// Where keyboard focus was when the key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusContext {
    /// Focus is on or inside the tab list.
    pub within_nav: bool,
}

/// Result of dispatching a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The key was consumed; the host should prevent its default action.
    pub handled: bool,
    /// Page reached by the navigation, if any.
    pub page: Option<usize>,
    /// Tab that should receive focus.
    pub focus_nav_item: Option<usize>,
}

impl KeyOutcome {
    /// A key the carousel does not intercept.
    pub fn ignored() -> Self {
        Self::default()
    }

    /// A consumed key that navigated to `page`.
    pub fn handled(page: Option<usize>, focus: FocusContext) -> Self {
        Self {
            handled: true,
            page,
            focus_nav_item: page.filter(|_| focus.within_nav),
        }
    }
}
