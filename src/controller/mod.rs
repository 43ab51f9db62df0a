//! Companion logic controller
//!
//! Sits between the Slint windows and the character model. The GUI converts
//! Slint callbacks into [`InputEvent`]s and [`Command`]s, the controller
//! mutates the state it owns, and the GUI redraws from a [`CompanionView`].
//!
//! # Event Flow
//!
//! ```text
//! Slint callbacks / tray menu / UI timer
//!            │
//!            ▼
//!   CompanionController ──▶ CharacterState, DialogBubble, PomodoroTimer
//!            │
//!            ▼
//!      CompanionView ──▶ SpriteRenderer ──▶ windows
//! ```
//!
//! Everything runs on the UI thread; the controller is shared by the Slint
//! closures as `Rc<RefCell<CompanionController>>`.

pub mod companion;
pub mod input;
pub mod view;

pub use companion::CompanionController;
pub use input::{Command, InputEvent, PointerButton};
pub use view::{CompanionView, DialogView, PomodoroView};
