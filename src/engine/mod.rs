//! Review-mode engine: the tree cursor, its modes, and command handling.
//!
//! The engine follows a unidirectional flow:
//!
//! ```text
//! NavCommand → handle_command → state mutations → Actions → side effects
//!                                                    │
//!                       after_dispatch ◄── Dispatch executed by embedder
//! ```
//!
//! # Modules
//!
//! - [`state`]: [`NavigationState`], the cursor state machine
//! - [`modes`]: level and overlay-mode types
//! - [`handler`]: command processing and the action contract
//! - [`actions`]: side effect commands returned by the handler

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{after_dispatch, handle_command};
pub use modes::{Mode, NavLevel};
pub use state::{DrillOutcome, NavigationState};

use crate::Verbosity;

/// The engine's whole mutable state: the tree cursor plus whichever overlay
/// mode is active.
#[derive(Debug)]
pub struct ReviewState {
    /// The cursor over the Screens → Items → Sections → SectionItems tree.
    pub nav: NavigationState,
    pub(crate) mode: Mode,
    pub(crate) verbose: bool,
}

impl ReviewState {
    #[must_use]
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            nav: NavigationState::new(),
            mode: Mode::Browse,
            verbose: verbosity == Verbosity::Verbose,
        }
    }

    /// Whether type-ahead search is open (typed characters are query input).
    #[must_use]
    pub fn is_searching(&self) -> bool {
        matches!(self.mode, Mode::Search(_))
    }

    /// Whether grid mode currently interprets movement.
    #[must_use]
    pub fn in_grid(&self) -> bool {
        matches!(self.mode, Mode::Grid(_))
    }
}
