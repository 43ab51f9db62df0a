//! Placement of auxiliary windows next to the character

use crate::character::geometry::{Point, Rect, Size};

/// Gap between the character and a window placed beside it
pub const GAP: i32 = 10;

/// Top-left corner for a `size` window next to `anchor`
///
/// Tries the right side first, then the left side. When neither fits it
/// centers the window above the character, or below if above is off screen.
/// The result is always clamped to `screen`.
#[expect(
    clippy::cast_possible_wrap,
    reason = "window dimensions are far below i32::MAX"
)]
pub fn place_beside(anchor: Rect, size: Size, screen: Rect) -> Point {
    let width = size.width as i32;
    let height = size.height as i32;

    let mut x = anchor.right() + GAP;
    let mut y = anchor.y;

    if x + width > screen.right() {
        x = anchor.x - width - GAP;
    }
    if x < screen.x {
        x = anchor.x + (anchor.width as i32 - width) / 2;
        let above = anchor.y - height - GAP;
        y = if above >= screen.y {
            above
        } else {
            anchor.bottom() + GAP
        };
    }

    screen.clamp_origin(Point::new(x, y), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);
    const BUBBLE: Size = Size::new(320, 140);

    #[test]
    fn test_prefers_right_side() {
        let anchor = Rect::new(100, 200, 300, 500);
        assert_eq!(place_beside(anchor, BUBBLE, SCREEN), Point::new(410, 200));
    }

    #[test]
    fn test_falls_back_to_left_side() {
        let anchor = Rect::new(1620, 200, 300, 500);
        assert_eq!(place_beside(anchor, BUBBLE, SCREEN), Point::new(1290, 200));
    }

    #[test]
    fn test_centers_above_when_no_side_fits() {
        let screen = Rect::new(0, 0, 600, 1080);
        let anchor = Rect::new(150, 400, 300, 500);
        assert_eq!(place_beside(anchor, BUBBLE, screen), Point::new(140, 250));
    }

    #[test]
    fn test_centers_below_when_above_is_off_screen() {
        let screen = Rect::new(0, 0, 600, 1080);
        let anchor = Rect::new(150, 50, 300, 500);
        assert_eq!(place_beside(anchor, BUBBLE, screen), Point::new(140, 560));
    }

    #[test]
    fn test_result_is_clamped() {
        let anchor = Rect::new(100, 1000, 300, 500);
        let origin = place_beside(anchor, BUBBLE, SCREEN);
        assert!(SCREEN.contains_rect(&Rect::from_origin(origin, BUBBLE)));
    }
}
