//! Character pose, expression and position
//!
//! `CharacterState` is plain data with in-memory mutations only. It knows the
//! screen bounds and sprite sizes so every mutation can keep the window on
//! screen, but it never touches the window or the image files.

use crate::character::geometry::{Point, Rect, Size};
use crate::assets::BASE_EXPRESSION;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Distance from the screen corner of the default spawn position
const SPAWN_MARGIN: i32 = 40;

/// Visual pose of the character
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Pose {
    /// Full character shown
    #[default]
    Expanded,
    /// Docked to a screen edge, upper body only
    Collapsed,
}

/// Screen edge a collapsed character is docked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Left screen edge
    Left,
    /// Right screen edge
    Right,
    /// Not docked
    #[default]
    None,
}

/// Size of the collapsed view of a `sprite`-sized image
///
/// The view keeps the upper `fraction` of the sprite and is rotated a quarter
/// turn, so width and height swap.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "fraction is clamped to 0..=1 so the product fits in u32"
)]
pub fn collapsed_size(sprite: Size, fraction: f32) -> Size {
    let fraction = f64::from(fraction.clamp(0.0, 1.0));
    let kept = (f64::from(sprite.height) * fraction).round() as u32;
    Size::new(kept.clamp(1, sprite.height.max(1)), sprite.width)
}

/// Screen bounds and the window size of each pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Usable screen area
    pub screen: Rect,
    /// Window size while expanded
    pub expanded: Size,
    /// Window size while collapsed
    pub collapsed: Size,
}

impl Layout {
    /// Layout for a sprite box and collapsed fraction
    pub fn new(screen: Rect, sprite_size: Size, collapsed_fraction: f32) -> Self {
        Self {
            screen,
            expanded: sprite_size,
            collapsed: collapsed_size(sprite_size, collapsed_fraction),
        }
    }

    /// Window size for `pose`
    pub const fn size(&self, pose: Pose) -> Size {
        match pose {
            Pose::Expanded => self.expanded,
            Pose::Collapsed => self.collapsed,
        }
    }
}

/// The one character of the running process
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    pose: Pose,
    expression_id: String,
    position: Point,
    collapsed_edge: Edge,
    restore_position: Point,
    layout: Layout,
}

impl CharacterState {
    /// Expanded character with the base expression
    ///
    /// Without an initial position the character spawns near the bottom-right
    /// corner of the screen.
    #[expect(
        clippy::cast_possible_wrap,
        reason = "sprite dimensions are far below i32::MAX"
    )]
    pub fn new(layout: Layout, initial_position: Option<Point>) -> Self {
        let position = initial_position.unwrap_or_else(|| {
            Point::new(
                layout.screen.right() - layout.expanded.width as i32 - SPAWN_MARGIN,
                layout.screen.bottom() - layout.expanded.height as i32,
            )
        });
        let position = layout.screen.clamp_origin(position, layout.expanded);

        Self {
            pose: Pose::Expanded,
            expression_id: BASE_EXPRESSION.to_string(),
            position,
            collapsed_edge: Edge::None,
            restore_position: position,
            layout,
        }
    }

    /// Current pose
    pub const fn pose(&self) -> Pose {
        self.pose
    }

    /// Current expression id
    pub fn expression(&self) -> &str {
        &self.expression_id
    }

    /// Top-left corner of the window
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Docked edge, `Edge::None` while expanded
    pub const fn collapsed_edge(&self) -> Edge {
        self.collapsed_edge
    }

    /// Screen and sprite sizes
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Window size for the current pose
    pub const fn size(&self) -> Size {
        self.layout.size(self.pose)
    }

    /// Window rectangle for the current pose
    pub const fn rect(&self) -> Rect {
        Rect::from_origin(self.position, self.size())
    }

    /// Whether the character is docked to an edge
    pub fn is_collapsed(&self) -> bool {
        self.pose == Pose::Collapsed
    }

    /// Flip between expanded and collapsed
    ///
    /// Collapsing docks to the nearer horizontal edge, keeping the vertical
    /// center. Expanding returns to where the character was before it
    /// collapsed.
    #[expect(
        clippy::cast_possible_wrap,
        reason = "sprite dimensions are far below i32::MAX"
    )]
    pub fn toggle_collapse(&mut self) {
        match self.pose {
            Pose::Expanded => {
                let rect = self.rect();
                let screen = self.layout.screen;
                let size = self.layout.collapsed;

                self.restore_position = self.position;
                self.collapsed_edge = if rect.center_x() < screen.center_x() {
                    Edge::Left
                } else {
                    Edge::Right
                };
                self.pose = Pose::Collapsed;

                let y = rect.center_y() - (size.height / 2) as i32;
                self.position = screen.clamp_origin(Point::new(self.docked_x(), y), size);
            }
            Pose::Collapsed => {
                self.pose = Pose::Expanded;
                self.collapsed_edge = Edge::None;
                self.position = self
                    .layout
                    .screen
                    .clamp_origin(self.restore_position, self.layout.expanded);
            }
        }
        debug!(
            "Pose {:?} at ({}, {}), edge {:?}",
            self.pose, self.position.x, self.position.y, self.collapsed_edge
        );
    }

    /// Set the displayed expression
    ///
    /// The id is stored as given; unknown ids fall back to the base sprite
    /// when rendering.
    pub fn set_expression(&mut self, id: impl Into<String>) {
        self.expression_id = id.into();
    }

    /// Move the window, keeping it fully on screen
    ///
    /// A collapsed character stays docked: only `y` is applied.
    pub fn move_to(&mut self, x: i32, y: i32) {
        let size = self.size();
        let target = match self.pose {
            Pose::Expanded => Point::new(x, y),
            Pose::Collapsed => Point::new(self.docked_x(), y),
        };
        self.position = self.layout.screen.clamp_origin(target, size);
    }

    /// Replace the screen bounds and pull the window back on screen
    pub fn set_screen(&mut self, screen: Rect) {
        self.layout.screen = screen;
        let Point { x, y } = self.position;
        self.move_to(x, y);
    }

    #[expect(
        clippy::cast_possible_wrap,
        reason = "sprite dimensions are far below i32::MAX"
    )]
    fn docked_x(&self) -> i32 {
        let screen = self.layout.screen;
        match self.collapsed_edge {
            Edge::Left => screen.x,
            Edge::Right | Edge::None => screen.right() - self.layout.collapsed.width as i32,
        }
    }
}
