//! Slot cursor: traversal over live visual UI elements.
//!
//! Independent of the data-tree navigation in [`crate::engine`]; used as a
//! fallback/manual aid for surfaces the tree has no reading for, and as the
//! walker for the host's pre-game menu.
//!
//! - [`element`]: element/container model and the [`UiSurface`] contract
//! - [`cursor`]: the [`SlotCursor`] state machine

pub mod cursor;
pub mod element;

pub use cursor::{SlotCursor, SlotLevel};
pub use element::{ElementKind, NoSurface, SlotPos, UiContainer, UiElement, UiSurface};
