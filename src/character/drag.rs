//! Left-button drag tracking
//!
//! A press only turns into a drag once the pointer has moved
//! `threshold` pixels (Manhattan distance); shorter gestures are clicks.
//! All pointer positions are in screen coordinates.

use crate::character::geometry::Point;

/// Result of feeding a pointer move to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    /// No button held
    Idle,
    /// Button held but still under the threshold
    Pending,
    /// The threshold was crossed by this move; window should go to the point
    Started(Point),
    /// Already dragging; window should go to the point
    Moved(Point),
}

#[derive(Debug, Clone, Copy)]
struct Press {
    pointer: Point,
    window_origin: Point,
    dragging: bool,
}

/// Converts pointer events into window positions
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    threshold: u32,
    press: Option<Press>,
}

impl DragTracker {
    /// Tracker with the given start threshold in pixels
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            press: None,
        }
    }

    /// Left button went down at `pointer` while the window was at `window_origin`
    pub fn press(&mut self, pointer: Point, window_origin: Point) {
        self.press = Some(Press {
            pointer,
            window_origin,
            dragging: false,
        });
    }

    /// Pointer moved to `pointer`
    pub fn update(&mut self, pointer: Point) -> DragUpdate {
        let threshold = self.threshold;
        let Some(press) = self.press.as_mut() else {
            return DragUpdate::Idle;
        };

        let target = Point::new(
            press.window_origin.x + (pointer.x - press.pointer.x),
            press.window_origin.y + (pointer.y - press.pointer.y),
        );

        if press.dragging {
            DragUpdate::Moved(target)
        } else if pointer.manhattan_distance(press.pointer) >= threshold {
            press.dragging = true;
            DragUpdate::Started(target)
        } else {
            DragUpdate::Pending
        }
    }

    /// Button released; returns `true` if the gesture was a drag
    pub fn release(&mut self) -> bool {
        self.press.take().is_some_and(|press| press.dragging)
    }

    /// Forget any pending gesture
    pub fn cancel(&mut self) {
        self.press = None;
    }

    /// Whether a press is being tracked
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the current press has become a drag
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|press| press.dragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_motion_is_a_click() {
        let mut drag = DragTracker::new(10);
        drag.press(Point::new(100, 100), Point::new(0, 0));
        assert_eq!(drag.update(Point::new(104, 103)), DragUpdate::Pending);
        assert!(!drag.release());
    }

    #[test]
    fn test_threshold_starts_drag_with_grab_offset() {
        let mut drag = DragTracker::new(10);
        drag.press(Point::new(100, 100), Point::new(50, 60));
        assert_eq!(
            drag.update(Point::new(106, 104)),
            DragUpdate::Started(Point::new(56, 64))
        );
        assert_eq!(
            drag.update(Point::new(90, 100)),
            DragUpdate::Moved(Point::new(40, 60))
        );
        assert!(drag.is_dragging());
        assert!(drag.release());
        assert!(!drag.is_pressed());
    }

    #[test]
    fn test_move_without_press_is_idle() {
        let mut drag = DragTracker::new(10);
        assert_eq!(drag.update(Point::new(1, 1)), DragUpdate::Idle);
    }

    #[test]
    fn test_zero_threshold_drags_immediately() {
        let mut drag = DragTracker::new(0);
        drag.press(Point::new(0, 0), Point::new(0, 0));
        assert_eq!(drag.update(Point::new(0, 0)), DragUpdate::Started(Point::new(0, 0)));
    }
}
