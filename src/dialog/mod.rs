//! Dialog bubble
//!
//! Line selection, typewriter reveal and placement of the speech bubble.

pub mod bubble;
pub mod placement;
pub mod script;

pub use bubble::{BubbleClick, BubbleTiming, DialogBubble};
pub use placement::place_beside;
pub use script::{DialogPicker, DialogScript};
