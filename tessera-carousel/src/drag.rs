//! Click-and-drag scrolling with a mouse.
//!
//! ## Usage
//!
//! Enable with [`CarouselArgs::mouse_dragging`](crate::CarouselArgs) and
//! forward pointer events through
//! [`Carousel::pointer_down`](crate::Carousel::pointer_down) and friends.
//! Touch and trackpad input should use the host's native scrolling instead.
use crate::config::Orientation;

/// Pointer position in the host's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl PointerPosition {
    /// Creates a position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn along(self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

/// Turns pointer motion into scroll deltas while the pointer is captured.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseDrag {
    enabled: bool,
    last: Option<PointerPosition>,
}

impl MouseDrag {
    /// Creates a controller; a disabled one never captures the pointer.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            last: None,
        }
    }

    /// Whether the pointer is captured.
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Captures the pointer. Returns `true` when a drag started.
    pub fn press(&mut self, position: PointerPosition) -> bool {
        if !self.enabled {
            return false;
        }
        self.last = Some(position);
        true
    }

    /// Scroll delta for moving to `position`, if dragging.
    ///
    /// Moving the pointer toward the start edge scrolls forward.
    pub fn move_to(&mut self, position: PointerPosition, axis: Orientation) -> Option<f32> {
        let last = self.last?;
        self.last = Some(position);
        Some(last.along(axis) - position.along(axis))
    }

    /// Releases the pointer. Returns `true` if a drag was active.
    pub fn release(&mut self) -> bool {
        self.last.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_drag_never_captures() {
        let mut drag = MouseDrag::new(false);
        assert!(!drag.press(PointerPosition::new(10.0, 0.0)));
        assert_eq!(
            drag.move_to(PointerPosition::new(0.0, 0.0), Orientation::Horizontal),
            None
        );
        assert!(!drag.release());
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut drag = MouseDrag::new(true);
        assert_eq!(
            drag.move_to(PointerPosition::new(100.0, 0.0), Orientation::Horizontal),
            None
        );
        assert_eq!(
            drag.move_to(PointerPosition::new(70.0, 0.0), Orientation::Horizontal),
            None
        );
        assert!(!drag.is_dragging());
        assert!(!drag.release());
    }

    #[test]
    fn deltas_follow_axis() {
        let mut drag = MouseDrag::new(true);
        assert!(drag.press(PointerPosition::new(100.0, 50.0)));
        assert_eq!(
            drag.move_to(PointerPosition::new(70.0, 10.0), Orientation::Horizontal),
            Some(30.0)
        );
        assert_eq!(
            drag.move_to(PointerPosition::new(80.0, 40.0), Orientation::Vertical),
            Some(-30.0)
        );
        assert!(drag.release());
        assert!(!drag.is_dragging());
    }
}
