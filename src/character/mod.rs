//! Character state
//!
//! Pose, expression and window position of the on-screen character, plus the
//! drag gesture tracker and the geometry types they share.

pub mod drag;
pub mod geometry;
pub mod state;

pub use drag::{DragTracker, DragUpdate};
pub use geometry::{Point, Rect, Size};
pub use state::{CharacterState, Edge, Layout, Pose, collapsed_size};
